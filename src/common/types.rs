use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a contact in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub u32);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A contact shown in the sidebar. Loaded once at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub online: bool,
    /// Short label rendered inside the avatar circle.
    pub avatar: String,
    /// Style token, resolved to a colour by the UI.
    pub color: String,
}

/// Time-ordered message identifier (UUIDv7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Delivery state of an own message. Ordered: a status never moves backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageStatus {
    Sent,
    Received,
    Read,
}

/// A single chat bubble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    /// Display string, e.g. `3:07 PM`.
    pub timestamp: String,
    /// Authored by the local user rather than the contact.
    pub is_own: bool,
    pub status: MessageStatus,
}

impl Message {
    pub fn outgoing(text: String, timestamp: String) -> Self {
        Self {
            id: MessageId::new(),
            text,
            timestamp,
            is_own: true,
            status: MessageStatus::Sent,
        }
    }

    /// Bot replies are considered seen the moment they arrive.
    pub fn incoming(text: String, timestamp: String) -> Self {
        Self {
            id: MessageId::new(),
            text,
            timestamp,
            is_own: false,
            status: MessageStatus::Read,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

/// Sidebar row: a contact plus its conversation preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSummary {
    pub contact: Contact,
    pub preview: String,
    pub last_timestamp: String,
    pub selected: bool,
}

/// Everything the UI needs to draw one frame. Plain data, no shared state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub contacts: Vec<ContactSummary>,
    pub selected: Option<Contact>,
    pub messages: Vec<Message>,
    /// True only when the selected contact is typing.
    pub typing: bool,
    pub search_term: String,
    pub theme: ThemePreference,
}
