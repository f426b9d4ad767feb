// Providers layer - Work performers and business logic
//
// Providers hold the cryptography, token and notification logic that
// coordinators orchestrate. They never open transactions themselves.

pub mod crypto_provider;
pub mod notification_provider;
pub mod reset_token_provider;
pub mod token_provider;

pub use crypto_provider::CryptoProvider;
pub use notification_provider::{EmailMessage, LogNotifier, MemoryNotifier, Notifier};
pub use reset_token_provider::ResetTokenProvider;
pub use token_provider::TokenProvider;
