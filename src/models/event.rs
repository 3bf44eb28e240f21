use std::fmt;

use serde::Serialize;

use super::Post;

/// Index of a contact in the timeline store, in the order contacts were first seen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContactId(pub usize);

/// Externally assigned, 1-based session number within one contact's archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SessionId(pub u32);

impl SessionId {
    pub const FIRST: SessionId = SessionId(1);
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A (contact, session) pair registered under a post in the global index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionRef {
    pub contact: ContactId,
    pub session: SessionId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventKind {
    Join,
    Message,
    Leave,
    Invitation,
    InvitationResponse,
}

impl EventKind {
    /// Maps an XML element name to an event kind
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Join" => Some(EventKind::Join),
            "Message" => Some(EventKind::Message),
            "Leave" => Some(EventKind::Leave),
            "Invitation" => Some(EventKind::Invitation),
            "InvitationResponse" => Some(EventKind::InvitationResponse),
            _ => None,
        }
    }
}

/// One entry of a contact's archive, in file order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LogEvent {
    /// The archive declares sessions `1..=count`
    SessionsAnnounced(u32),
    Post { kind: EventKind, session: SessionId, post: Post },
}

impl LogEvent {
    pub fn post(kind: EventKind, session: u32, post: Post) -> Self {
        LogEvent::Post { kind, session: SessionId(session), post }
    }
}
