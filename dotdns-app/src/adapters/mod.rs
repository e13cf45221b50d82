//! Platform storage adapters.

mod file_record_store;

#[cfg(feature = "keyring-store")]
mod keyring_credential_store;

pub use file_record_store::FileRecordStore;

#[cfg(feature = "keyring-store")]
pub use keyring_credential_store::KeyringCredentialStore;
