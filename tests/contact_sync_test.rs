mod common;

use std::sync::Arc;

use chrono::Utc;
use hospital_backend::AppData;
use hospital_backend::coordinators::{HospitalCoordinator, LoginCoordinator};
use hospital_backend::errors::InternalError;
use hospital_backend::errors::internal::HospitalError;
use hospital_backend::stores::{NewHospital, NewIdentity};
use hospital_backend::types::db::{hospital, profile, user};
use hospital_backend::types::internal::HospitalUpdate;
use hospital_backend::types::internal::context::RequestContext;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

async fn identity_for(app_data: &Arc<AppData>, user_id: &str) -> user::Model {
    user::Entity::find_by_id(user_id.to_string())
        .one(&app_data.db)
        .await
        .unwrap()
        .expect("identity exists")
}

async fn admins_of(app_data: &Arc<AppData>, hospital_id: &str) -> Vec<profile::Model> {
    profile::Entity::find()
        .filter(profile::Column::HospitalId.eq(hospital_id))
        .filter(profile::Column::Role.eq("hospital_admin"))
        .all(&app_data.db)
        .await
        .unwrap()
}

/// Adds a hospital_admin profile without a login identity to an existing hospital
async fn add_contact_only_admin(app_data: &Arc<AppData>, hospital_id: &str, email: &str) -> String {
    let profile = app_data
        .stores
        .profile_store
        .create_profile(
            &app_data.db,
            profile::ActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                user_id: Set(None),
                role: Set("hospital_admin".to_string()),
                role_details: Set(None),
                health_id: Set(None),
                hospital_id: Set(Some(hospital_id.to_string())),
                department_id: Set(None),
                full_name: Set(Some("Deputy Admin".to_string())),
                email: Set(Some(email.to_string())),
                contact_number: Set(None),
                is_active: Set(true),
                join_date: Set("2024-01-01".to_string()),
                registered_by: Set(None),
                created_at: Set(Utc::now().timestamp()),
            },
        )
        .await
        .unwrap();

    profile.id
}

/// Adds a second hospital_admin that owns its own login identity
async fn add_login_admin(app_data: &Arc<AppData>, hospital_id: &str, email: &str) {
    let identity = app_data
        .stores
        .identity_store
        .create_identity(
            &app_data.db,
            NewIdentity {
                id: uuid::Uuid::new_v4().to_string(),
                email: email.to_string(),
                password_hash: "not-a-real-hash".to_string(),
                created_at: Utc::now().timestamp(),
            },
        )
        .await
        .unwrap();

    let profile_id = add_contact_only_admin(app_data, hospital_id, email).await;
    let stored = profile::Entity::find_by_id(profile_id).one(&app_data.db).await.unwrap().unwrap();
    let mut active: profile::ActiveModel = stored.into();
    active.user_id = Set(Some(identity.id));
    active.update(&app_data.db).await.unwrap();
}

#[tokio::test]
async fn test_contact_email_change_propagates_to_every_admin_of_the_hospital() {
    let (app_data, _) = common::setup_app_data().await;
    let acme = common::register(&app_data, "Acme Clinic", "admin@acme.io").await;
    let other = common::register(&app_data, "Beacon Hospital", "admin@beacon.org").await;
    let deputy = add_contact_only_admin(&app_data, &acme.hospital.id, "deputy@acme.io").await;

    let updated = HospitalCoordinator::new(Arc::clone(&app_data))
        .update_hospital(
            &RequestContext::anonymous(),
            &acme.hospital.id,
            HospitalUpdate::contact_email(Some("new@acme.io")),
        )
        .await
        .unwrap();

    assert_eq!(updated.contact_email.as_deref(), Some("new@acme.io"));

    let admins = admins_of(&app_data, &acme.hospital.id).await;
    assert_eq!(admins.len(), 2);
    for admin in &admins {
        assert_eq!(admin.email.as_deref(), Some("new@acme.io"));
        if let Some(user_id) = admin.user_id.as_deref() {
            let identity = identity_for(&app_data, user_id).await;
            assert_eq!(identity.email, "new@acme.io");
            assert_eq!(identity.username, "new@acme.io");
        }
    }
    assert!(admins.iter().any(|a| a.id == deputy && a.user_id.is_none()));

    let untouched = admins_of(&app_data, &other.hospital.id).await;
    assert_eq!(untouched[0].email.as_deref(), Some("admin@beacon.org"));
    let untouched_identity = identity_for(&app_data, untouched[0].user_id.as_deref().unwrap()).await;
    assert_eq!(untouched_identity.username, "admin@beacon.org");
}

#[tokio::test]
async fn test_admin_logs_in_with_new_contact_email() {
    let (app_data, _) = common::setup_app_data().await;
    let acme = common::register(&app_data, "Acme Clinic", "admin@acme.io").await;

    HospitalCoordinator::new(Arc::clone(&app_data))
        .update_hospital(
            &RequestContext::anonymous(),
            &acme.hospital.id,
            HospitalUpdate::contact_email(Some("new@acme.io")),
        )
        .await
        .unwrap();

    let login = LoginCoordinator::new(Arc::clone(&app_data));
    let session = login
        .login(&RequestContext::anonymous(), "new@acme.io", &acme.temp_password)
        .await
        .expect("new email should log in");
    assert_eq!(session.user.email.as_deref(), Some("new@acme.io"));

    let err = login
        .login(&RequestContext::anonymous(), "admin@acme.io", &acme.temp_password)
        .await
        .unwrap_err();
    assert!(matches!(err, InternalError::Credential(_)));
}

#[tokio::test]
async fn test_unchanged_contact_email_does_not_cascade() {
    let (app_data, _) = common::setup_app_data().await;
    let acme = common::register(&app_data, "Acme Clinic", "admin@acme.io").await;

    // Desynchronize the admin profile so any cascade write would be visible
    let admin = admins_of(&app_data, &acme.hospital.id).await.remove(0);
    let mut active: profile::ActiveModel = admin.clone().into();
    active.email = Set(Some("stale@acme.io".to_string()));
    active.update(&app_data.db).await.unwrap();

    let updated = HospitalCoordinator::new(Arc::clone(&app_data))
        .update_hospital(
            &RequestContext::anonymous(),
            &acme.hospital.id,
            HospitalUpdate {
                name: Some("Acme Clinic North".to_string()),
                contact_email: Some(Some("admin@acme.io".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Acme Clinic North");
    let admin = admins_of(&app_data, &acme.hospital.id).await.remove(0);
    assert_eq!(admin.email.as_deref(), Some("stale@acme.io"));
}

#[tokio::test]
async fn test_taken_email_aborts_the_whole_update() {
    let (app_data, _) = common::setup_app_data().await;
    let acme = common::register(&app_data, "Acme Clinic", "admin@acme.io").await;
    common::register(&app_data, "Beacon Hospital", "admin@beacon.org").await;

    let err = HospitalCoordinator::new(Arc::clone(&app_data))
        .update_hospital(
            &RequestContext::anonymous(),
            &acme.hospital.id,
            HospitalUpdate {
                name: Some("Renamed".to_string()),
                contact_email: Some(Some("admin@beacon.org".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "A user with this email already exists.");
    match &err {
        InternalError::Hospital(hospital_err @ HospitalError::ContactEmailTaken { .. }) => {
            assert_eq!(hospital_err.field(), "contact_email");
        }
        other => panic!("expected ContactEmailTaken, got {:?}", other),
    }

    let hospital = hospital::Entity::find_by_id(acme.hospital.id.clone())
        .one(&app_data.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(hospital.name, "Acme Clinic");
    assert_eq!(hospital.contact_email.as_deref(), Some("admin@acme.io"));

    let admin = admins_of(&app_data, &acme.hospital.id).await.remove(0);
    assert_eq!(admin.email.as_deref(), Some("admin@acme.io"));
}

#[tokio::test]
async fn test_clearing_contact_email_requires_no_linked_admins() {
    let (app_data, _) = common::setup_app_data().await;
    let acme = common::register(&app_data, "Acme Clinic", "admin@acme.io").await;
    let coordinator = HospitalCoordinator::new(Arc::clone(&app_data));

    for cleared in [None, Some("  ")] {
        let err = coordinator
            .update_hospital(
                &RequestContext::anonymous(),
                &acme.hospital.id,
                HospitalUpdate::contact_email(cleared),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InternalError::Hospital(HospitalError::ContactEmailRequired { .. })
        ));
    }

    let orphan = app_data
        .stores
        .hospital_store
        .create_hospital(
            &app_data.db,
            NewHospital {
                id: uuid::Uuid::new_v4().to_string(),
                name: "Orphan Clinic".to_string(),
                address: None,
                contact_email: Some("info@orphan.org".to_string()),
                contact_phone: None,
                created_at: Utc::now().timestamp(),
            },
        )
        .await
        .unwrap();

    let updated = coordinator
        .update_hospital(&RequestContext::anonymous(), &orphan.id, HospitalUpdate::contact_email(None))
        .await
        .unwrap();
    assert_eq!(updated.contact_email, None);
}

#[tokio::test]
async fn test_two_login_admins_cannot_share_one_contact_email() {
    let (app_data, _) = common::setup_app_data().await;
    let acme = common::register(&app_data, "Acme Clinic", "admin@acme.io").await;
    add_login_admin(&app_data, &acme.hospital.id, "deputy@acme.io").await;

    let err = HospitalCoordinator::new(Arc::clone(&app_data))
        .update_hospital(
            &RequestContext::anonymous(),
            &acme.hospital.id,
            HospitalUpdate::contact_email(Some("new@acme.io")),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        InternalError::Hospital(HospitalError::ContactEmailTaken { .. })
    ));
    for admin in admins_of(&app_data, &acme.hospital.id).await {
        assert_ne!(admin.email.as_deref(), Some("new@acme.io"));
    }
}

#[tokio::test]
async fn test_update_of_unknown_hospital_is_not_found() {
    let (app_data, _) = common::setup_app_data().await;

    let err = HospitalCoordinator::new(Arc::clone(&app_data))
        .update_hospital(
            &RequestContext::anonymous(),
            "missing",
            HospitalUpdate::contact_email(Some("x@y.io")),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, InternalError::NotFound { entity: "Hospital", .. }));
}
