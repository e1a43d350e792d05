//! Volant core types and utilities

pub mod credentials;
pub mod error;
pub mod navigation;
pub mod storage;

pub use credentials::{CredentialPair, CredentialStore, MemoryCredentialStore};
pub use error::{CoreError, CoreResult};
pub use navigation::{Navigator, NoopNavigator};
pub use storage::FileCredentialStore;
