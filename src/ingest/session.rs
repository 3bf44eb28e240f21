use tracing::debug;

use crate::error::GraphError;
use crate::models::{ContactId, EventKind, LogEvent, Post, SessionId};
use crate::timeline::TimelineStore;

/// Streams one contact's archive into the timeline store, keeping only the
/// marker posts needed to rebuild presence intervals:
///
/// - the first post of a session
/// - the post following a `Join`
/// - the post preceding a `Leave`
/// - the last post of a session
pub struct SessionIngestor<'a> {
    store: &'a mut TimelineStore,
    contact: ContactId,
    prev_kind: Option<EventKind>,
    prev_session: Option<SessionId>,
    /// Previous post, if it has not been committed yet
    pending: Option<Post>,
    committed: usize,
}

impl<'a> SessionIngestor<'a> {
    pub fn new(store: &'a mut TimelineStore, contact: ContactId) -> Self {
        Self { store, contact, prev_kind: None, prev_session: None, pending: None, committed: 0 }
    }

    pub fn push(&mut self, event: &LogEvent) -> Result<(), GraphError> {
        let (kind, session, post) = match *event {
            LogEvent::SessionsAnnounced(count) => {
                return self.store.reserve_sessions(self.contact, count);
            }
            LogEvent::Post { kind, session, post } => (kind, session, post),
        };
        let new_session = self.prev_session != Some(session);

        // Close out the previous post before a Leave or a session change.
        if let (Some(pending), Some(prev_session)) = (self.pending, self.prev_session)
            && (kind == EventKind::Leave || new_session)
        {
            self.commit(prev_session, pending)?;
        }

        let mut current = Some(post);
        if self.prev_kind == Some(EventKind::Join) || new_session {
            self.commit(session, post)?;
            current = None;
        }

        self.prev_kind = Some(kind);
        self.prev_session = Some(session);
        self.pending = current;
        Ok(())
    }

    /// Commits the trailing post of the final session. Returns the number of
    /// markers stored for this contact.
    pub fn finish(mut self) -> Result<usize, GraphError> {
        if let (Some(pending), Some(session)) = (self.pending.take(), self.prev_session) {
            self.commit(session, pending)?;
        }
        Ok(self.committed)
    }

    fn commit(&mut self, session: SessionId, post: Post) -> Result<(), GraphError> {
        if self.store.record_marker(self.contact, session, post)? {
            self.committed += 1;
        }
        Ok(())
    }
}

/// Ingests one archive for `email`. Several archives for the same contact may
/// be ingested one after another.
pub fn ingest_contact(
    store: &mut TimelineStore,
    email: &str,
    events: &[LogEvent],
) -> Result<usize, GraphError> {
    let contact = store.add_contact(email);
    let mut ingestor = SessionIngestor::new(store, contact);
    for event in events {
        ingestor.push(event)?;
    }
    let committed = ingestor.finish()?;
    debug!(email, events = events.len(), markers = committed, "ingested archive");
    Ok(committed)
}
