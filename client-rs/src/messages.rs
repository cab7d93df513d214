//! Message types for the notification service protocol
//!
//! These mirror the service-side definitions so request bodies stay compatible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broadcast a batch to every connected client
pub const SEND_TO_ALL: &str = "NOTIFICATION.send-to-all";

/// Deliver a batch only to the listed clients
pub const SEND_TO_CLIENTS: &str = "NOTIFICATION.send-to-clients";

/// Fetch the notifications the service has stored
pub const LIST: &str = "NOTIFICATION.list";

/// Body of a list request
pub const LIST_REQUEST_BODY: &[u8] = b"{}";

/// Notification severity tag, serialized as a lowercase string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationKind {
    Info,
    Warning,
    Error,
    /// Any tag the service understands that this client has no name for
    Other(String),
}

impl NotificationKind {
    pub fn as_str(&self) -> &str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
            NotificationKind::Other(tag) => tag,
        }
    }

    /// Delivery rank the service is expected to apply (1 goes first)
    pub fn priority(&self) -> u8 {
        match self {
            NotificationKind::Error => 1,
            NotificationKind::Warning => 2,
            NotificationKind::Info => 3,
            NotificationKind::Other(_) => u8::MAX,
        }
    }
}

impl From<String> for NotificationKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "info" => NotificationKind::Info,
            "warning" => NotificationKind::Warning,
            "error" => NotificationKind::Error,
            _ => NotificationKind::Other(tag),
        }
    }
}

impl From<NotificationKind> for String {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single notification to be delivered by the service
///
/// An empty `clients` list is left out of the JSON entirely, which the
/// service reads as "deliver to everyone".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clients: Vec<String>,
}

impl Notification {
    /// Notification for every connected client, stamped with the current time
    pub fn broadcast(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            time: Utc::now(),
            clients: Vec::new(),
        }
    }

    /// Notification restricted to the given client ids
    pub fn targeted<I, S>(kind: NotificationKind, message: impl Into<String>, clients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            clients: clients.into_iter().map(Into::into).collect(),
            ..Self::broadcast(kind, message)
        }
    }

    pub fn is_broadcast(&self) -> bool {
        self.clients.is_empty()
    }
}

/// Serialize a batch as the JSON array the send subjects expect
///
/// Order is preserved; reordering by priority is the service's job.
pub fn encode_batch(notifications: &[Notification]) -> crate::Result<Vec<u8>> {
    if notifications.is_empty() {
        return Err(<serde_json::Error as serde::ser::Error>::custom(
            "notification batch is empty",
        )
        .into());
    }

    Ok(serde_json::to_vec(notifications)?)
}
