//! Storage implementations shared by every platform

mod memory;
mod provider_storage;

pub use memory::{InMemoryCredentialStore, InMemoryRecordStore};
pub use provider_storage::{ProviderStorage, PROVIDERS_RECORD};
