//! crudux: REST CRUD calls paired with request/success/error notifications.
//!
//! Describe a REST resource once, then call it; every call reports what
//! happened as [`Notification`]s, ready to feed a reducer-style state
//! container. Authentication tokens go through a pluggable [`TokenStore`].
//!
//! This crate re-exports [`crudux_http`] and [`crudux_token_store`].

pub use crudux_http::*;

pub use crudux_token_store::{
    Error as TokenStoreError, InMemoryTokenStore, LocalDiskTokenStore, SharedTokenStore,
    TokenStore, TOKEN_KEY,
};

pub mod token_store {
    pub use crudux_token_store::*;
}
