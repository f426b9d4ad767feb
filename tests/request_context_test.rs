mod common;

use hospital_backend::types::internal::auth::Claims;
use hospital_backend::types::internal::context::{RequestContext, RequestSource};
use poem::Request;

fn claims(sub: &str) -> Claims {
    Claims {
        sub: sub.to_string(),
        role: "hospital_admin".to_string(),
        exp: 4_102_444_800,
        iat: 1_700_000_000,
    }
}

#[test]
fn test_anonymous_context_defaults_to_api_source() {
    let ctx = RequestContext::anonymous();

    assert_eq!(ctx.source, RequestSource::API);
    assert_eq!(ctx.actor_id, "anonymous");
    assert!(!ctx.is_authenticated());
    assert!(ctx.ip_address.is_none());
}

#[test]
fn test_request_context_for_cli() {
    let ctx = RequestContext::for_cli("migrate");

    assert_eq!(ctx.source, RequestSource::CLI);
    assert_eq!(ctx.actor_id, "cli:migrate");
    assert!(ctx.claims.is_none());
}

#[test]
fn test_with_auth_sets_actor_from_subject() {
    let ctx = RequestContext::anonymous().with_auth(claims("user-42"));

    assert!(ctx.is_authenticated());
    assert_eq!(ctx.actor_id, "user-42");
    assert_eq!(ctx.claims.as_ref().map(|c| c.role.as_str()), Some("hospital_admin"));
}

#[test]
fn test_request_ids_are_unique() {
    assert_ne!(RequestContext::anonymous().request_id, RequestContext::anonymous().request_id);
}

#[tokio::test]
async fn test_from_request_reads_forwarded_ip_and_bearer_token() {
    let (app_data, _) = common::setup_app_data().await;
    let token_provider = &app_data.providers.token_provider;
    let jwt = token_provider.generate_jwt("user-7", "doctor").unwrap();

    let req = Request::builder()
        .header("X-Forwarded-For", "203.0.113.9, 10.0.0.1")
        .header("Authorization", format!("Bearer {}", jwt))
        .finish();
    let ctx = RequestContext::from_request(&req, token_provider);

    assert_eq!(ctx.ip_address, Some("203.0.113.9".parse().unwrap()));
    assert!(ctx.is_authenticated());
    assert_eq!(ctx.actor_id, "user-7");
}

#[tokio::test]
async fn test_from_request_ignores_invalid_bearer_token() {
    let (app_data, _) = common::setup_app_data().await;

    let req = Request::builder()
        .header("X-Real-IP", "198.51.100.4")
        .header("Authorization", "Bearer not-a-jwt")
        .finish();
    let ctx = RequestContext::from_request(&req, &app_data.providers.token_provider);

    assert_eq!(ctx.ip_address, Some("198.51.100.4".parse().unwrap()));
    assert!(!ctx.is_authenticated());
    assert_eq!(ctx.actor_id, "anonymous");
}
