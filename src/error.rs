//! Error types for the timeline and graph core.
//!
//! These are precondition failures: asking for a post that was never recorded,
//! or referencing a session the archive never announced. Data anomalies are not
//! errors; they surface as [`crate::models::Diagnostic`] values instead.

use thiserror::Error;

use crate::models::{Post, SessionId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The post is not registered in the timeline index
    #[error("post {0} was never recorded in any session")]
    PostNotFound(Post),

    /// The session id is outside the range the archive announced
    #[error("{email} has no session {session} (only {available} announced)")]
    UnknownSession { email: String, session: SessionId, available: usize },

    /// No contact with this email was ingested
    #[error("unknown contact: {0}")]
    UnknownContact(String),

    /// A contact has no posts at all in its first session
    #[error("{0} has no recorded posts in session 1")]
    NoFirstPost(String),

    /// A conversation was built with no participants
    #[error("conversation has no participants")]
    EmptyConversation,
}
