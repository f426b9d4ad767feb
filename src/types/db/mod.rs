// Database entities - SeaORM models
pub mod ai_analytics;
pub mod department;
pub mod hospital;
pub mod lab_report;
pub mod prescription;
pub mod profile;
pub mod refresh_token;
pub mod user;
pub mod vaccination;
pub mod visit;
