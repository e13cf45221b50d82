//! Storage layer abstraction trait definition

mod credential_store;
mod provider_repository;
mod record_store;

pub use credential_store::CredentialStore;
pub use provider_repository::ProviderRepository;
pub use record_store::RecordStore;
