mod common;

use hospital_backend::api::create_app;
use hospital_backend::types::dto::common::ErrorResponse;
use hospital_backend::types::dto::profile::ProfileResponse;
use poem::http::StatusCode;
use poem::test::TestClient;
use poem::Route;
use serde_json::json;

async fn client() -> TestClient<Route> {
    let (app_data, _) = common::setup_app_data().await;
    TestClient::new(create_app(app_data, "http://localhost:3000/api"))
}

/// Create a profile through HTTP and return its id
async fn create_profile(cli: &TestClient<Route>, body: serde_json::Value) -> String {
    let resp = cli.post("/api/profiles").body_json(&body).send().await;
    resp.assert_status(StatusCode::CREATED);
    resp.json().await.value().object().get("id").string().to_string()
}

/// Register through HTTP and return (hospital id, temp password)
async fn register(cli: &TestClient<Route>, name: &str, email: &str) -> (String, String) {
    let resp = cli
        .post("/api/hospitals/register")
        .body_json(&json!({ "name": name, "email": email, "phone": "+1-555-0100" }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);

    let body = resp.json().await;
    let body = body.value().object();
    (
        body.get("hospital").object().get("id").string().to_string(),
        body.get("temp_password").string().to_string(),
    )
}

#[tokio::test]
async fn test_health_endpoint() {
    let cli = client().await;

    let resp = cli.get("/api/health").send().await;
    resp.assert_status_is_ok();
    resp.json().await.value().object().get("status").assert_string("healthy");
}

#[tokio::test]
async fn test_register_then_fetch_hospital() {
    let cli = client().await;
    let (hospital_id, temp_password) = register(&cli, "Acme Clinic", "admin@acme.io").await;
    assert!(temp_password.len() >= 12);

    let resp = cli.get(format!("/api/hospitals/{}", hospital_id)).send().await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    let hospital = body.value().object();
    hospital.get("name").assert_string("Acme Clinic");
    hospital.get("contact_email").assert_string("admin@acme.io");

    let resp = cli.get("/api/hospitals").send().await;
    resp.assert_status_is_ok();
    assert_eq!(resp.json().await.value().array().len(), 1);
}

#[tokio::test]
async fn test_duplicate_registration_is_a_field_error() {
    let cli = client().await;
    register(&cli, "Acme Clinic", "admin@acme.io").await;

    let resp = cli
        .post("/api/hospitals/register")
        .body_json(&json!({ "name": "Acme Again", "email": "admin@acme.io" }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let body = resp.json().await;
    let body = body.value().object();
    body.get("field").assert_string("email");
    body.get("error").assert_string("A user with this email already exists");
}

#[tokio::test]
async fn test_patch_contact_email_moves_the_admin_login() {
    let cli = client().await;
    let (hospital_id, temp_password) = register(&cli, "Acme Clinic", "admin@acme.io").await;

    let resp = cli
        .patch(format!("/api/hospitals/{}", hospital_id))
        .body_json(&json!({ "contact_email": "new@acme.io" }))
        .send()
        .await;
    resp.assert_status_is_ok();
    resp.json().await.value().object().get("contact_email").assert_string("new@acme.io");

    let resp = cli
        .post("/api/auth/login")
        .body_json(&json!({ "email": "new@acme.io", "password": temp_password }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    let user = body.value().object().get("user").object();
    user.get("email").assert_string("new@acme.io");
    user.get("role").assert_string("hospital_admin");
}

#[tokio::test]
async fn test_login_failures_share_one_payload() {
    let cli = client().await;
    register(&cli, "Acme Clinic", "admin@acme.io").await;

    let wrong_password = cli
        .post("/api/auth/login")
        .body_json(&json!({ "email": "admin@acme.io", "password": "wrong-password" }))
        .send()
        .await;
    wrong_password.assert_status(StatusCode::UNAUTHORIZED);

    let unknown_email = cli
        .post("/api/auth/login")
        .body_json(&json!({ "email": "nobody@acme.io", "password": "wrong-password" }))
        .send()
        .await;
    unknown_email.assert_status(StatusCode::UNAUTHORIZED);

    let wrong_password = wrong_password.0.into_body().into_string().await.unwrap();
    let unknown_email = unknown_email.0.into_body().into_string().await.unwrap();
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_system_stats_counts_people_by_role() {
    let cli = client().await;
    register(&cli, "Acme Clinic", "admin@acme.io").await;
    register(&cli, "Beacon Hospital", "admin@beacon.org").await;

    let resp = cli.get("/api/hospitals/system_stats").send().await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    let stats = body.value().object();
    stats.get("hospitals").assert_i64(2);
    stats.get("totalUsers").assert_i64(2);
    stats.get("doctors").assert_i64(0);
    stats.get("patients").assert_i64(0);
}

#[tokio::test]
async fn test_department_crud() {
    let cli = client().await;
    let (hospital_id, _) = register(&cli, "Acme Clinic", "admin@acme.io").await;

    let resp = cli
        .post("/api/departments")
        .body_json(&json!({ "id": "cardio", "hospital_id": hospital_id, "name": "Cardiology" }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    let body = resp.json().await;
    let created = body.value().object();
    created.get("status").assert_string("Active");
    created.get("doctor_count").assert_i64(0);

    let resp = cli
        .patch("/api/departments/cardio")
        .body_json(&json!({ "head_name": "Dr. Grey", "doctor_count": 4 }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    let patched = body.value().object();
    patched.get("head_name").assert_string("Dr. Grey");
    patched.get("doctor_count").assert_i64(4);
    patched.get("name").assert_string("Cardiology");

    let resp = cli.delete("/api/departments/cardio").send().await;
    resp.assert_status(StatusCode::NO_CONTENT);

    let resp = cli.get("/api/departments/cardio").send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_records_are_not_found() {
    let cli = client().await;

    for path in [
        "/api/hospitals/missing",
        "/api/clinical/visits/missing",
        "/api/clinical/prescriptions/missing",
        "/api/clinical/lab-reports/missing",
        "/api/clinical/vaccinations/missing",
        "/api/profiles/missing",
        "/api/analytics/trends/missing",
    ] {
        let resp = cli.get(path).send().await;
        resp.assert_status(StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_visit_for_unknown_hospital_is_rejected() {
    let cli = client().await;
    let (hospital_id, _) = register(&cli, "Acme Clinic", "admin@acme.io").await;
    let patient_id = create_profile(
        &cli,
        json!({ "role": "patient", "hospital_id": hospital_id, "health_id": "HID-1" }),
    )
    .await;
    let doctor_id = create_profile(&cli, json!({ "role": "doctor", "hospital_id": hospital_id })).await;

    let resp = cli
        .post("/api/clinical/visits")
        .body_json(&json!({
            "hospital_id": "no-such-hospital",
            "patient_id": patient_id,
            "doctor_id": doctor_id,
            "diagnosis": "Flu"
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = resp.json().await.value().deserialize();
    assert_eq!(body.code, "validation_error");
    assert_eq!(body.error, "Referenced record does not exist.");
    assert_eq!(body.field, None);

    let resp = cli.get("/api/clinical/visits").send().await;
    resp.assert_status_is_ok();
    assert_eq!(resp.json().await.value().array().len(), 0);
}

#[tokio::test]
async fn test_duplicate_health_id_is_a_conflict() {
    let cli = client().await;
    let (hospital_id, _) = register(&cli, "Acme Clinic", "admin@acme.io").await;
    create_profile(
        &cli,
        json!({ "role": "patient", "hospital_id": hospital_id, "health_id": "HID-7" }),
    )
    .await;

    let resp = cli
        .post("/api/profiles")
        .body_json(&json!({ "role": "patient", "hospital_id": hospital_id, "health_id": "HID-7" }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = resp.json().await.value().deserialize();
    assert_eq!(body.code, "conflict");
}

#[tokio::test]
async fn test_deleting_a_department_detaches_its_profiles() {
    let cli = client().await;
    let (hospital_id, _) = register(&cli, "Acme Clinic", "admin@acme.io").await;

    let resp = cli
        .post("/api/departments")
        .body_json(&json!({ "id": "cardio", "hospital_id": hospital_id, "name": "Cardiology" }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);

    let doctor_id = create_profile(
        &cli,
        json!({ "role": "doctor", "hospital_id": hospital_id, "department_id": "cardio" }),
    )
    .await;

    let resp = cli.delete("/api/departments/cardio").send().await;
    resp.assert_status(StatusCode::NO_CONTENT);

    let resp = cli.get(format!("/api/profiles/{}", doctor_id)).send().await;
    resp.assert_status_is_ok();
    let profile: ProfileResponse = resp.json().await.value().deserialize();
    assert_eq!(profile.department_id, None);
    assert_eq!(profile.hospital_id.as_deref(), Some(hospital_id.as_str()));
}

#[tokio::test]
async fn test_visit_crud() {
    let cli = client().await;
    let (hospital_id, _) = register(&cli, "Acme Clinic", "admin@acme.io").await;
    let patient_id = create_profile(
        &cli,
        json!({ "role": "patient", "hospital_id": hospital_id, "health_id": "HID-2" }),
    )
    .await;
    let doctor_id = create_profile(&cli, json!({ "role": "doctor", "hospital_id": hospital_id })).await;

    let resp = cli
        .post("/api/clinical/visits")
        .body_json(&json!({
            "hospital_id": hospital_id,
            "patient_id": patient_id,
            "doctor_id": doctor_id,
            "diagnosis": "Flu",
            "clinical_notes": "Rest and fluids"
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    let visit_id = resp.json().await.value().object().get("id").string().to_string();

    let resp = cli.get("/api/clinical/visits").send().await;
    resp.assert_status_is_ok();
    assert_eq!(resp.json().await.value().array().len(), 1);

    let resp = cli.get(format!("/api/clinical/visits/{}", visit_id)).send().await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    let visit = body.value().object();
    visit.get("diagnosis").assert_string("Flu");
    visit.get("patient_id").assert_string(&patient_id);

    let resp = cli
        .patch(format!("/api/clinical/visits/{}", visit_id))
        .body_json(&json!({ "diagnosis": "Influenza A", "next_visit_date": "2025-04-01" }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    let patched = body.value().object();
    patched.get("diagnosis").assert_string("Influenza A");
    patched.get("next_visit_date").assert_string("2025-04-01");
    patched.get("clinical_notes").assert_string("Rest and fluids");

    let resp = cli.delete(format!("/api/clinical/visits/{}", visit_id)).send().await;
    resp.assert_status(StatusCode::NO_CONTENT);

    let resp = cli.get(format!("/api/clinical/visits/{}", visit_id)).send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_analytics_crud() {
    let cli = client().await;
    let (hospital_id, _) = register(&cli, "Acme Clinic", "admin@acme.io").await;

    let resp = cli
        .post("/api/analytics/trends")
        .body_json(&json!({
            "hospital_id": hospital_id,
            "metric_name": "daily_visits",
            "metric_date": "2025-03-01",
            "value": { "count": 42 }
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    let record_id = resp.json().await.value().object().get("id").string().to_string();

    let resp = cli.get("/api/analytics/trends").send().await;
    resp.assert_status_is_ok();
    assert_eq!(resp.json().await.value().array().len(), 1);

    let resp = cli.get(format!("/api/analytics/trends/{}", record_id)).send().await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    let record = body.value().object();
    record.get("metric_name").assert_string("daily_visits");
    record.get("value").object().get("count").assert_i64(42);

    let resp = cli
        .patch(format!("/api/analytics/trends/{}", record_id))
        .body_json(&json!({ "value": { "count": 57 } }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    let patched = body.value().object();
    patched.get("value").object().get("count").assert_i64(57);
    patched.get("metric_date").assert_string("2025-03-01");

    let resp = cli.delete(format!("/api/analytics/trends/{}", record_id)).send().await;
    resp.assert_status(StatusCode::NO_CONTENT);

    let resp = cli.get(format!("/api/analytics/trends/{}", record_id)).send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
}
