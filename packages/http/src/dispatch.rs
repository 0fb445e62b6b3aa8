//! Sinks that receive notifications.

use std::sync::mpsc::Sender;

use crate::notification::Notification;

/// Receives the notifications produced by endpoint calls.
///
/// This crate only produces notifications; interpreting or storing them is up
/// to the sink.
pub trait Dispatch {
    fn dispatch(&mut self, notification: Notification);
}

/// Records notifications in order.
impl Dispatch for Vec<Notification> {
    fn dispatch(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Hands notifications to a state container running elsewhere.
impl Dispatch for Sender<Notification> {
    fn dispatch(&mut self, notification: Notification) {
        if let Err(err) = self.send(notification) {
            log::warn!("Dropping {}: receiver is gone", err.0.tag);
        }
    }
}

/// Adapter turning a closure into a [`Dispatch`] sink. See [`dispatch_fn`].
pub struct FnDispatch<F>(F);

impl<F: FnMut(Notification)> Dispatch for FnDispatch<F> {
    fn dispatch(&mut self, notification: Notification) {
        (self.0)(notification)
    }
}

/// Use a closure as a dispatch sink.
///
/// ```rust
/// use crudux_http::{dispatch_fn, Dispatch, NotificationGroup};
///
/// let mut tags = Vec::new();
/// let mut sink = dispatch_fn(|n| tags.push(n.tag));
/// sink.dispatch(NotificationGroup::new("users").request());
/// drop(sink);
/// assert_eq!(tags, vec!["REQUEST_USERS".to_string()]);
/// ```
pub fn dispatch_fn<F: FnMut(Notification)>(f: F) -> FnDispatch<F> {
    FnDispatch(f)
}
