mod common;

use std::sync::Arc;

use chrono::Utc;
use hospital_backend::AppData;
use hospital_backend::config::ApplicationSettings;
use hospital_backend::coordinators::password_reset_coordinator::{
    RESET_COMPLETED_MESSAGE, RESET_REQUESTED_MESSAGE,
};
use hospital_backend::coordinators::{LoginCoordinator, PasswordResetCoordinator};
use hospital_backend::errors::internal::{CredentialError, ValidationError};
use hospital_backend::errors::{AuthError, InternalError};
use hospital_backend::providers::MemoryNotifier;
use hospital_backend::stores::IdentityStore;
use hospital_backend::types::dto::common::ErrorResponse;
use hospital_backend::types::internal::context::RequestContext;
use poem_openapi::payload::Json;

/// Pull the `uidb64` and `token` query parameters out of a reset email body
fn link_params(body: &str) -> (String, String) {
    let query = body
        .split_once("?uidb64=")
        .map(|(_, rest)| rest.trim())
        .expect("body should contain a reset link");
    let (uidb64, token) = query.split_once("&token=").expect("link should carry a token");
    (uidb64.to_string(), token.to_string())
}

async fn request_link(app_data: &Arc<AppData>, notifier: &MemoryNotifier, email: &str) -> (String, String) {
    PasswordResetCoordinator::new(Arc::clone(app_data))
        .request_reset(&RequestContext::anonymous(), email)
        .await
        .unwrap();

    let sent = notifier.sent();
    let last = sent.last().expect("a reset email should be sent");
    link_params(&last.body)
}

fn invalid_link_body(err: InternalError) -> ErrorResponse {
    match AuthError::from_internal_error(err) {
        AuthError::InvalidResetLink(Json(body)) => body,
        other => panic!("expected InvalidResetLink, got {:?}", other),
    }
}

#[tokio::test]
async fn test_reset_link_sets_a_new_password() {
    let (app_data, notifier) = common::setup_app_data().await;
    let acme = common::register(&app_data, "Acme Clinic", "admin@acme.io").await;

    let (uidb64, token) = request_link(&app_data, &notifier, "admin@acme.io").await;

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "admin@acme.io");
    assert_eq!(sent[0].subject, "Password Reset Request");
    assert!(sent[0].body.contains("http://localhost:5173/reset-password?uidb64="));

    let response = PasswordResetCoordinator::new(Arc::clone(&app_data))
        .confirm_reset(&RequestContext::anonymous(), &uidb64, &token, "brand-new-secret")
        .await
        .unwrap();
    assert_eq!(response.message, RESET_COMPLETED_MESSAGE);

    let login = LoginCoordinator::new(Arc::clone(&app_data));
    login
        .login(&RequestContext::anonymous(), "admin@acme.io", "brand-new-secret")
        .await
        .expect("new password should work");
    assert!(
        login
            .login(&RequestContext::anonymous(), "admin@acme.io", &acme.temp_password)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_reset_link_works_only_once() {
    let (app_data, notifier) = common::setup_app_data().await;
    common::register(&app_data, "Acme Clinic", "admin@acme.io").await;
    let (uidb64, token) = request_link(&app_data, &notifier, "admin@acme.io").await;
    let coordinator = PasswordResetCoordinator::new(Arc::clone(&app_data));

    coordinator
        .confirm_reset(&RequestContext::anonymous(), &uidb64, &token, "first-new-secret")
        .await
        .unwrap();

    let err = coordinator
        .confirm_reset(&RequestContext::anonymous(), &uidb64, &token, "second-new-secret")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InternalError::Credential(CredentialError::InvalidResetLink { .. })
    ));
}

#[tokio::test]
async fn test_bad_links_share_one_generic_error() {
    let (app_data, notifier) = common::setup_app_data().await;
    common::register(&app_data, "Acme Clinic", "admin@acme.io").await;
    let (uidb64, token) = request_link(&app_data, &notifier, "admin@acme.io").await;

    let identity = app_data
        .stores
        .identity_store
        .find_by_email(&app_data.db, "admin@acme.io")
        .await
        .unwrap()
        .unwrap();
    let four_days_ago = Utc::now().timestamp() - 4 * 24 * 60 * 60;
    let expired = app_data
        .providers
        .reset_token_provider
        .make_token(&identity, four_days_ago)
        .unwrap();

    let (issued, signature) = token.split_once('-').unwrap();
    let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
    let tampered = format!("{}-{}{}", issued, flipped, &signature[1..]);

    let unknown_uid = app_data.providers.reset_token_provider.encode_uid("no-such-identity");

    let coordinator = PasswordResetCoordinator::new(Arc::clone(&app_data));
    let mut bodies = Vec::new();
    for (uid, candidate) in [
        (uidb64.as_str(), expired.as_str()),
        (uidb64.as_str(), tampered.as_str()),
        (uidb64.as_str(), "not-a-token"),
        ("%%%", token.as_str()),
        (unknown_uid.as_str(), token.as_str()),
    ] {
        let err = coordinator
            .confirm_reset(&RequestContext::anonymous(), uid, candidate, "brand-new-secret")
            .await
            .unwrap_err();
        bodies.push(invalid_link_body(err));
    }

    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(bodies[0].error, "Invalid or expired reset link.");

    // The genuine link still works after all those failures
    coordinator
        .confirm_reset(&RequestContext::anonymous(), &uidb64, &token, "brand-new-secret")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_short_password_is_rejected_before_the_link_is_checked() {
    let (app_data, _) = common::setup_app_data().await;

    let err = PasswordResetCoordinator::new(Arc::clone(&app_data))
        .confirm_reset(&RequestContext::anonymous(), "garbage", "garbage", "short")
        .await
        .unwrap_err();

    match err {
        InternalError::Validation(ValidationError::TooShort { field, min }) => {
            assert_eq!(field, "new_password");
            assert_eq!(min, 8);
        }
        other => panic!("expected TooShort, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_email_gets_the_same_answer_and_no_mail() {
    let (app_data, notifier) = common::setup_app_data().await;
    common::register(&app_data, "Acme Clinic", "admin@acme.io").await;
    let coordinator = PasswordResetCoordinator::new(Arc::clone(&app_data));

    let unknown = coordinator
        .request_reset(&RequestContext::anonymous(), "nobody@acme.io")
        .await
        .unwrap();
    assert_eq!(unknown.message, RESET_REQUESTED_MESSAGE);
    assert!(notifier.sent().is_empty());

    let known = coordinator
        .request_reset(&RequestContext::anonymous(), "admin@acme.io")
        .await
        .unwrap();
    assert_eq!(known.message, unknown.message);
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_malformed_email_is_a_validation_error() {
    let (app_data, _) = common::setup_app_data().await;

    let err = PasswordResetCoordinator::new(Arc::clone(&app_data))
        .request_reset(&RequestContext::anonymous(), "not-an-email")
        .await
        .unwrap_err();

    assert!(matches!(err, InternalError::Validation(ref v) if v.field() == "email"));
}

#[tokio::test]
async fn test_notifier_failure_is_surfaced() {
    let (app_data, _) = common::setup_app_data_with(
        ApplicationSettings::default(),
        Arc::new(MemoryNotifier::failing("smtp unavailable")),
    )
    .await;
    common::register(&app_data, "Acme Clinic", "admin@acme.io").await;

    let err = PasswordResetCoordinator::new(Arc::clone(&app_data))
        .request_reset(&RequestContext::anonymous(), "admin@acme.io")
        .await
        .unwrap_err();

    assert!(matches!(err, InternalError::Notification(_)));
    assert!(matches!(
        AuthError::from_internal_error(err),
        AuthError::NotificationFailed(_)
    ));
}

#[tokio::test]
async fn test_reset_revokes_refresh_tokens() {
    let (app_data, notifier) = common::setup_app_data().await;
    let acme = common::register(&app_data, "Acme Clinic", "admin@acme.io").await;
    let login = LoginCoordinator::new(Arc::clone(&app_data));

    let session = login
        .login(&RequestContext::anonymous(), "admin@acme.io", &acme.temp_password)
        .await
        .unwrap();

    let (uidb64, token) = request_link(&app_data, &notifier, "admin@acme.io").await;
    PasswordResetCoordinator::new(Arc::clone(&app_data))
        .confirm_reset(&RequestContext::anonymous(), &uidb64, &token, "brand-new-secret")
        .await
        .unwrap();

    let err = login
        .refresh(&RequestContext::anonymous(), &session.refresh)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InternalError::Credential(CredentialError::InvalidToken { .. })
    ));
}

#[tokio::test]
async fn test_password_change_after_link_check_voids_the_link() {
    let (app_data, _notifier) = common::setup_app_data().await;
    common::register(&app_data, "Acme Clinic", "admin@acme.io").await;
    let store = IdentityStore::new();

    let stale = store
        .find_by_username(&app_data.db, "admin@acme.io")
        .await
        .unwrap()
        .expect("admin identity should exist");

    let first = store
        .replace_password_hash(&app_data.db, &stale.id, &stale.password_hash, "hash-one".to_string(), Utc::now().timestamp())
        .await
        .unwrap();
    assert!(first);

    // A second writer holding the same checked hash loses
    let second = store
        .replace_password_hash(&app_data.db, &stale.id, &stale.password_hash, "hash-two".to_string(), Utc::now().timestamp())
        .await
        .unwrap();
    assert!(!second);

    let current = store
        .find_by_id(&app_data.db, &stale.id)
        .await
        .unwrap()
        .expect("admin identity should exist");
    assert_eq!(current.password_hash, "hash-one");
}
