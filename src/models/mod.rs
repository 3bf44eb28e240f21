//! Data models for the introduction graph.
//!
//! - [`Post`] - Marker timestamps, the join key between archives
//! - [`LogEvent`] - Parsed archive entries fed to ingestion
//! - [`Conversation`] / [`Participant`] - Output of conversation reconstruction
//! - [`Edge`] / [`EdgeColor`] - Output of graph synthesis
//! - [`Diagnostic`] - Advisory data anomalies

pub mod conversation;
pub mod diagnostic;
pub mod edge;
pub mod event;
pub mod post;

pub use conversation::{Conversation, Participant};
pub use diagnostic::Diagnostic;
pub use edge::{Edge, EdgeColor};
pub use event::{ContactId, EventKind, LogEvent, SessionId, SessionRef};
pub use post::Post;
