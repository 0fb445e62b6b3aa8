use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// HTTP method for requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => http::Method::GET,
            Method::POST => http::Method::POST,
            Method::PUT => http::Method::PUT,
            Method::DELETE => http::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
        };
        f.write_str(name)
    }
}

/// Identifier of a single resource item.
///
/// Rendered into URLs with `Display` and serialized untagged, so numeric ids
/// stay numbers in notification payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl ResourceId {
    /// Extract an id from a JSON number or string.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(ResourceId::Number),
            Value::String(s) if !s.is_empty() => Some(ResourceId::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{}", n),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        ResourceId::Number(id.into())
    }
}

impl From<u32> for ResourceId {
    fn from(id: u32) -> Self {
        ResourceId::Number(id.into())
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        ResourceId::Number(id)
    }
}

impl From<u64> for ResourceId {
    /// Ids beyond `i64::MAX` are kept as their decimal text.
    fn from(id: u64) -> Self {
        i64::try_from(id)
            .map(ResourceId::Number)
            .unwrap_or_else(|_| ResourceId::Text(id.to_string()))
    }
}

impl From<usize> for ResourceId {
    fn from(id: usize) -> Self {
        i64::try_from(id)
            .map(ResourceId::Number)
            .unwrap_or_else(|_| ResourceId::Text(id.to_string()))
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Text(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        ResourceId::Text(id)
    }
}

impl From<ResourceId> for Value {
    fn from(id: ResourceId) -> Self {
        match id {
            ResourceId::Number(n) => Value::from(n),
            ResourceId::Text(s) => Value::String(s),
        }
    }
}

/// A fully resolved HTTP request.
///
/// Endpoints build these and hand them to an [`HttpExecutor`](crate::HttpExecutor).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpRequest {
    /// HTTP method (GET, POST, PUT, DELETE)
    pub method: Method,

    /// Absolute URL
    pub url: String,

    /// Request headers
    pub headers: HashMap<String, String>,

    /// Already encoded request body
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Look up a header, ignoring ASCII case of the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP response from a request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Status text (e.g., "OK", "Not Found")
    pub status_text: String,

    /// Response headers
    pub headers: HashMap<String, String>,

    /// Parsed JSON body, `None` when the body is empty or not JSON
    pub body: Option<Value>,

    /// Raw body text
    pub body_text: String,
}

impl HttpResponse {
    /// Build a response from a status and raw body, parsing the body as JSON
    /// when possible.
    pub fn from_text(status: u16, body_text: impl Into<String>) -> Self {
        let body_text = body_text.into();
        let body = if body_text.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&body_text).ok()
        };
        let status_text = http::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
            .to_string();

        Self {
            status,
            status_text,
            headers: HashMap::new(),
            body,
            body_text,
        }
    }

    /// Check if the response status indicates success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True when the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body_text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resource_id_display() {
        assert_eq!(ResourceId::from(1).to_string(), "1");
        assert_eq!(ResourceId::from("abc").to_string(), "abc");
    }

    #[test]
    fn resource_id_serializes_untagged() {
        assert_eq!(Value::from(ResourceId::from(1)), json!(1));
        assert_eq!(
            serde_json::to_value(ResourceId::from("x1")).unwrap(),
            json!("x1")
        );
    }

    #[test]
    fn resource_id_from_unsigned() {
        assert_eq!(ResourceId::from(42u64), ResourceId::Number(42));
        assert_eq!(ResourceId::from(7usize), ResourceId::Number(7));

        let huge = ResourceId::from(u64::MAX);
        assert_eq!(huge, ResourceId::Text(u64::MAX.to_string()));
        assert_eq!(huge.to_string(), "18446744073709551615");
    }

    #[test]
    fn resource_id_from_value() {
        assert_eq!(
            ResourceId::from_value(&json!(7)),
            Some(ResourceId::Number(7))
        );
        assert_eq!(
            ResourceId::from_value(&json!("7a")),
            Some(ResourceId::Text("7a".to_string()))
        );
        assert_eq!(ResourceId::from_value(&json!("")), None);
        assert_eq!(ResourceId::from_value(&json!(null)), None);
        assert_eq!(ResourceId::from_value(&json!(1.5)), None);
    }

    #[test]
    fn request_builders() {
        let request = HttpRequest::put("http://api/x/1")
            .with_header("Content-Type", "application/json")
            .with_body("{}");
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.url, "http://api/x/1");
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some("{}"));
    }

    #[test]
    fn response_from_text_parses_json() {
        let response = HttpResponse::from_text(200, r#"{"id":1}"#);
        assert_eq!(response.status_text, "OK");
        assert_eq!(response.body, Some(json!({"id": 1})));
        assert!(response.is_success());
    }

    #[test]
    fn response_from_text_keeps_non_json() {
        let response = HttpResponse::from_text(502, "<html>bad gateway</html>");
        assert_eq!(response.body, None);
        assert_eq!(response.status_text, "Bad Gateway");
        assert!(!response.is_success());
        assert!(!response.is_empty());
    }

    #[test]
    fn response_from_empty_text() {
        let response = HttpResponse::from_text(204, "");
        assert_eq!(response.body, None);
        assert!(response.is_empty());
    }

    #[test]
    fn success_is_2xx_only() {
        assert!(HttpResponse::from_text(201, "").is_success());
        assert!(!HttpResponse::from_text(302, "").is_success());
        assert!(!HttpResponse::from_text(404, "").is_success());
    }
}
