//! # crudux-http
//!
//! REST resource endpoints that report each call as notifications.
//!
//! An [`Api`] holds a validated [`ApiConfig`], an [`HttpExecutor`] and a
//! token store. [`Api::endpoint`] describes one resource; the descriptor's
//! calls send a single request each and pass request/success/error
//! [`Notification`]s to a [`Dispatch`] sink, ready for a reducer-style state
//! container.
//!
//! ```ignore
//! use crudux_http::{Api, ApiConfig, Notification};
//! use serde_json::json;
//!
//! let api = Api::new(ApiConfig::new("https://api.example.com"))?;
//!
//! let mut notifications: Vec<Notification> = Vec::new();
//! api.endpoint("login")
//!     .login(&json!({"email": "e@mail.com", "password": "secret"}), &mut notifications)?;
//!
//! // REQUEST_USERS_COMPANIES, RECEIVE_USERS_COMPANIES
//! api.endpoint("companies")
//!     .nested("users", Some(3.into()))
//!     .with_auth()
//!     .read(None, &mut notifications)?;
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod dispatch;
pub mod encoding;
pub mod endpoint;
pub mod error;
pub mod executor;
pub mod notification;
pub mod types;

pub use api::Api;
pub use auth::AuthScheme;
pub use config::ApiConfig;
pub use dispatch::{dispatch_fn, Dispatch, FnDispatch};
pub use encoding::BodyEncoding;
pub use endpoint::Endpoint;
pub use error::Error;
pub use executor::{HttpExecutor, ReqwestExecutor};
pub use notification::{notification, Notification, NotificationGroup, Phase};
pub use types::{HttpRequest, HttpResponse, Method, ResourceId};

#[cfg(any(test, feature = "test-utils"))]
pub use executor::mock::MockExecutor;
