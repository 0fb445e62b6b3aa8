//! Request lifecycle notifications.
//!
//! A [`Notification`] is a plain value describing one step of a call made by
//! an [`Endpoint`](crate::Endpoint): the request starting, a result arriving,
//! or an error. Notifications serialize to the shape reducer-style state
//! containers expect:
//!
//! ```json
//! {"type": "RECEIVE_COMPANIES", "payload": {"companies": []}, "loading": false}
//! ```
//!
//! Tags follow `<PHASE>_<UPPERCASED_GROUP>`.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The step of a call a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    /// A read or login was sent.
    Request,
    /// A read or login succeeded.
    Receive,
    /// A login failed.
    Error,
    /// A resource was created.
    Create,
    /// A resource was updated.
    Update,
    /// A resource was deleted.
    Remove,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Request => "REQUEST",
            Phase::Receive => "RECEIVE",
            Phase::Error => "ERROR",
            Phase::Create => "CREATE",
            Phase::Update => "UPDATE",
            Phase::Remove => "REMOVE",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Phase::Error)
    }

    /// Loading hint carried by request/receive/error notifications.
    pub fn loading(&self) -> Option<bool> {
        match self {
            Phase::Request => Some(true),
            Phase::Receive | Phase::Error => Some(false),
            Phase::Create | Phase::Update | Phase::Remove => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lifecycle event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub tag: String,

    #[serde(skip)]
    pub phase: Phase,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,

    #[serde(skip_serializing_if = "is_false")]
    pub error: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading: Option<bool>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Notification {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    /// The reducer-style JSON form of this notification.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Build the notification for `phase` of the group `group`.
pub fn notification(group: &str, phase: Phase, payload: Option<Value>) -> Notification {
    Notification {
        tag: format!("{}_{}", phase.as_str(), group.to_uppercase()),
        phase,
        payload,
        error: phase.is_error(),
        loading: phase.loading(),
    }
}

/// The tag prefix shared by every notification of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationGroup {
    name: String,
}

impl NotificationGroup {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().to_uppercase(),
        }
    }

    /// The uppercased group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self, phase: Phase) -> String {
        format!("{}_{}", phase.as_str(), self.name)
    }

    pub fn request(&self) -> Notification {
        notification(&self.name, Phase::Request, None)
    }

    pub fn receive(&self, payload: Value) -> Notification {
        notification(&self.name, Phase::Receive, Some(payload))
    }

    pub fn error(&self, payload: Value) -> Notification {
        notification(&self.name, Phase::Error, Some(payload))
    }

    pub fn created(&self, resource: Value) -> Notification {
        notification(&self.name, Phase::Create, Some(resource))
    }

    pub fn updated(&self, resource: Value) -> Notification {
        notification(&self.name, Phase::Update, Some(resource))
    }

    pub fn removed(&self, id: Value) -> Notification {
        notification(&self.name, Phase::Remove, Some(id))
    }
}
