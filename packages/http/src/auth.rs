//! Authorization header formatting.

use serde::{Deserialize, Serialize};

pub const AUTHORIZATION: &str = "Authorization";

/// Scheme used to turn a stored token into an `Authorization` header value.
///
/// Serialized as the bare prefix string, so configuration files can say
/// `"auth_scheme": "Bearer"` or `"auth_scheme": "JWT"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthScheme {
    /// `Bearer <token>`
    #[default]
    Bearer,
    /// `Token <token>`
    Token,
    /// `<prefix> <token>`
    Custom(String),
}

impl AuthScheme {
    pub fn prefix(&self) -> &str {
        match self {
            AuthScheme::Bearer => "Bearer",
            AuthScheme::Token => "Token",
            AuthScheme::Custom(prefix) => prefix,
        }
    }

    pub fn header_value(&self, token: &str) -> String {
        format!("{} {}", self.prefix(), token)
    }
}

impl From<&str> for AuthScheme {
    fn from(prefix: &str) -> Self {
        let prefix = prefix.trim();
        if prefix.eq_ignore_ascii_case("bearer") {
            AuthScheme::Bearer
        } else if prefix.eq_ignore_ascii_case("token") {
            AuthScheme::Token
        } else {
            AuthScheme::Custom(prefix.to_string())
        }
    }
}

impl From<String> for AuthScheme {
    fn from(prefix: String) -> Self {
        AuthScheme::from(prefix.as_str())
    }
}

impl From<AuthScheme> for String {
    fn from(scheme: AuthScheme) -> Self {
        scheme.prefix().to_string()
    }
}
