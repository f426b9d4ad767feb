// Stores layer - data access
//
// Stores are stateless; every method takes the connection (or transaction) to
// run on so coordinators can compose several stores inside one transaction.
pub mod authentication_store;
pub mod hospital_store;
pub mod identity_store;
pub mod profile_store;
pub mod record_store;

pub use authentication_store::AuthenticationStore;
pub use hospital_store::{HospitalStore, NewHospital};
pub use identity_store::{IdentityStore, NewIdentity};
pub use profile_store::ProfileStore;
pub use record_store::RecordStore;
