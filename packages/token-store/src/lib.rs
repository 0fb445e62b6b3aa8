//! # crudux-token-store
//!
//! Key-value storage for authentication tokens.
//!
//! Endpoints never touch a global: they receive a [`SharedTokenStore`] at
//! construction time and go through the [`TokenStore`] capability to
//! persist the token obtained by a login and to read it back for every
//! authenticated request.
//!
//! ```rust
//! use crudux_token_store::{InMemoryTokenStore, TokenStore, TOKEN_KEY};
//!
//! let store = InMemoryTokenStore::new();
//! store.set(TOKEN_KEY, "abc").unwrap();
//! assert_eq!(store.get(TOKEN_KEY).unwrap(), Some("abc".to_string()));
//! ```

pub mod error;
pub mod in_memory;
pub mod local_disk;

use std::sync::Arc;

pub use error::Error;
pub use in_memory::InMemoryTokenStore;
pub use local_disk::LocalDiskTokenStore;

/// Default key under which the login token is kept.
pub const TOKEN_KEY: &str = "token";

/// A token store shared between every endpoint of an API.
pub type SharedTokenStore = Arc<dyn TokenStore>;

/// Capability for reading and writing opaque tokens by key.
///
/// Implementations use interior mutability so a single store can be shared
/// behind an `Arc` by endpoints living on different threads.
pub trait TokenStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;
}

impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        (**self).set(key, value)
    }
}
