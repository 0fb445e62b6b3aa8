//! Request body encodings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::types::HttpRequest;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// How a resource is written into a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    /// `application/json`. The content type header is sent even when the
    /// request has no body.
    #[default]
    Json,
    /// `application/x-www-form-urlencoded`, built from the top-level fields
    /// of a JSON object.
    Form,
}

impl BodyEncoding {
    pub fn content_type(&self) -> &'static str {
        match self {
            BodyEncoding::Json => JSON_CONTENT_TYPE,
            BodyEncoding::Form => FORM_CONTENT_TYPE,
        }
    }

    /// Encode a JSON value into a body string.
    pub fn encode(&self, value: &Value) -> Result<String, Error> {
        match self {
            BodyEncoding::Json => Ok(serde_json::to_string(value)?),
            BodyEncoding::Form => encode_form(value),
        }
    }

    /// Set the content type header and body of `request`.
    pub fn apply(&self, request: HttpRequest, body: Option<&Value>) -> Result<HttpRequest, Error> {
        match (self, body) {
            (BodyEncoding::Json, None) => {
                Ok(request.with_header(CONTENT_TYPE, JSON_CONTENT_TYPE))
            }
            (_, Some(value)) => Ok(request
                .with_header(CONTENT_TYPE, self.content_type())
                .with_body(self.encode(value)?)),
            (BodyEncoding::Form, None) => Ok(request),
        }
    }
}

fn encode_form(value: &Value) -> Result<String, Error> {
    let fields = value.as_object().ok_or_else(|| Error::Encoding {
        message: format!("form bodies need a JSON object, got {}", value),
    })?;

    let mut entries: Vec<_> = fields.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (name, field) in entries {
        let text = match field {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        };
        serializer.append_pair(name, &text);
    }
    Ok(serializer.finish())
}
