use serde::Serialize;

use super::{Diagnostic, Post};
use crate::error::GraphError;

/// One contact's presence span within a reconstructed conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub email: String,
    pub first_post: Post,
    pub last_post: Post,
}

/// A reconstructed logical conversation.
///
/// Participants are listed in the order they entered. The overall bounds are
/// derived from the participants when the value is built and never set
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversation {
    participants: Vec<Participant>,
    first_post: Post,
    last_post: Post,
    #[serde(skip)]
    diagnostics: Vec<Diagnostic>,
}

impl Conversation {
    pub fn new(
        participants: Vec<Participant>,
        diagnostics: Vec<Diagnostic>,
    ) -> Result<Self, GraphError> {
        let first_post =
            participants.iter().map(|p| p.first_post).min().ok_or(GraphError::EmptyConversation)?;
        let last_post =
            participants.iter().map(|p| p.last_post).max().ok_or(GraphError::EmptyConversation)?;
        Ok(Self { participants, first_post, last_post, diagnostics })
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, email: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.email == email)
    }

    /// Earliest entry of any participant
    pub fn first_post(&self) -> Post {
        self.first_post
    }

    /// Latest exit of any participant
    pub fn last_post(&self) -> Post {
        self.last_post
    }

    /// Re-entry warnings raised while this conversation was rebuilt
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
