use std::fmt;

use serde::Serialize;

use super::{Post, SessionId};

/// Advisory data anomaly. Never changes control flow; reported on stderr
/// through `tracing` and collected for summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A post was not strictly later than the session's previous post and was dropped
    NonMonotonicPost { email: String, session: SessionId, post: Post, last: Post },
    /// A contact left a conversation and came back; later posts were ignored
    ReEntry { email: String },
    /// Session 1 had no posts, so a placeholder conversation was synthesized
    MissingFirstSession { email: String, placeholder: Post },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NonMonotonicPost { email, session, post, last } => write!(
                f,
                "non-monotonic timestamp in {} session {}: {} <= {}; dropping post",
                email, session, post, last
            ),
            Diagnostic::ReEntry { email } => write!(
                f,
                "{} left and re-entered the conversation; all posts by this user after \
                 re-entering will be ignored",
                email
            ),
            Diagnostic::MissingFirstSession { email, placeholder } => write!(
                f,
                "failed to locate the first session (SessionID=1) with {}; generated blank \
                 conversation at {}. Are you missing an XML file?",
                email, placeholder
            ),
        }
    }
}
