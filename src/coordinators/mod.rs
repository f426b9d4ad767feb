// Coordinators layer - Workflow orchestration
//
// Coordinators compose store and provider operations for specific API
// endpoints and own the transaction boundary of each workflow.
pub mod hospital_coordinator;
pub mod login_coordinator;
pub mod password_reset_coordinator;
pub mod record_coordinator;
pub mod registration_coordinator;

pub use hospital_coordinator::HospitalCoordinator;
pub use login_coordinator::LoginCoordinator;
pub use password_reset_coordinator::PasswordResetCoordinator;
pub use record_coordinator::RecordCoordinator;
pub use registration_coordinator::RegistrationCoordinator;
