pub mod auth;
pub mod context;
pub mod email;
pub mod hospital_update;
pub mod patch;
pub mod profile_role;

pub use email::EmailAddress;
pub use hospital_update::HospitalUpdate;
pub use profile_role::{DoctorDetails, PatientDetails, ProfileRole};
