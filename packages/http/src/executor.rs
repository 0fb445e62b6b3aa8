//! HTTP execution abstraction.
//!
//! Endpoints never talk to the network directly. They build an
//! [`HttpRequest`] and hand it to an [`HttpExecutor`], which can be a real
//! client or a mock in tests.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::Error;
use crate::types::{HttpRequest, HttpResponse};

/// Trait for executing HTTP requests.
///
/// Any response the server sends back, whatever its status, is `Ok`. `Err`
/// is reserved for requests that never produced a response.
pub trait HttpExecutor: Send + Sync {
    /// Execute an HTTP request and return the response.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}

/// Production HTTP executor using the blocking reqwest client.
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    /// Create a new executor with the given timeout.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Create with default timeout of 30 seconds.
    pub fn with_default_timeout() -> Result<Self, Error> {
        Self::new(Duration::from_secs(30))
    }

    /// Wrap an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpExecutor for ReqwestExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let method: http::Method = request.method.into();

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let header_name = HeaderName::try_from(name.as_str())?;
            let header_value = HeaderValue::try_from(value.as_str())?;
            headers.insert(header_name, header_value);
        }

        let mut req_builder = self.client.request(method, &request.url);
        req_builder = req_builder.headers(headers);

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let response = req_builder.send()?;

        let status = response.status().as_u16();

        let mut resp_headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                resp_headers.insert(name.to_string(), v.to_string());
            }
        }

        let body_text = response.text()?;

        let mut http_response = HttpResponse::from_text(status, body_text);
        http_response.headers = resp_headers;
        Ok(http_response)
    }
}

/// Mock HTTP executor for testing.
///
/// Returns predefined responses keyed by URL and records every request.
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// A mock HTTP executor that returns predefined responses.
    #[derive(Clone, Default)]
    pub struct MockExecutor {
        /// Responses keyed by request URL.
        responses: Arc<Mutex<HashMap<String, HttpResponse>>>,
        /// Default response when no match found.
        default_response: Arc<Mutex<Option<HttpResponse>>>,
        /// Recorded requests for verification.
        recorded_requests: Arc<Mutex<Vec<HttpRequest>>>,
        /// Error message returned for every request when set.
        failure: Arc<Mutex<Option<String>>>,
    }

    impl MockExecutor {
        /// Create a new mock executor.
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a response for a specific URL.
        pub fn with_response(self, url: impl Into<String>, response: HttpResponse) -> Self {
            self.responses.lock().unwrap().insert(url.into(), response);
            self
        }

        /// Set a default response when no URL matches.
        pub fn with_default_response(self, response: HttpResponse) -> Self {
            *self.default_response.lock().unwrap() = Some(response);
            self
        }

        /// Configure to fail all requests with a transport error.
        pub fn fail_with(self, message: impl Into<String>) -> Self {
            *self.failure.lock().unwrap() = Some(message.into());
            self
        }

        /// Get all recorded requests.
        pub fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.recorded_requests.lock().unwrap().clone()
        }

        /// Clear recorded requests.
        pub fn clear_recorded(&self) {
            self.recorded_requests.lock().unwrap().clear();
        }

        /// Create a 200 response with a JSON body.
        pub fn success_response(body: serde_json::Value) -> HttpResponse {
            Self::json_response(200, body)
        }

        /// Create a response with the given status and JSON body.
        pub fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
            HttpResponse::from_text(status, body.to_string())
        }

        /// Create a 404 Not Found response.
        pub fn not_found() -> HttpResponse {
            Self::json_response(404, serde_json::json!({"error": "Not Found"}))
        }
    }

    impl HttpExecutor for MockExecutor {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
            self.recorded_requests.lock().unwrap().push(request.clone());

            if let Some(message) = self.failure.lock().unwrap().clone() {
                return Err(Error::Transport { message });
            }

            let responses = self.responses.lock().unwrap();
            if let Some(response) = responses.get(&request.url) {
                return Ok(response.clone());
            }

            if let Some(ref response) = *self.default_response.lock().unwrap() {
                return Ok(response.clone());
            }

            Ok(Self::not_found())
        }
    }
}
