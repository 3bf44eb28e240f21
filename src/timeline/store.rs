use std::collections::HashMap;

use tracing::warn;

use crate::error::GraphError;
use crate::models::{ContactId, Diagnostic, Post, SessionId, SessionRef};

/// One session of one contact: its strictly increasing marker posts
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    posts: Vec<Post>,
}

impl Session {
    fn new(id: SessionId) -> Self {
        Self { id, posts: Vec::new() }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn first_post(&self) -> Option<Post> {
        self.posts.first().copied()
    }

    pub fn last_post(&self) -> Option<Post> {
        self.posts.last().copied()
    }
}

#[derive(Debug, Clone)]
pub struct Contact {
    email: String,
    sessions: Vec<Session>,
}

impl Contact {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn session(&self, id: SessionId) -> Option<&Session> {
        slot(id, self.sessions.len()).map(|i| &self.sessions[i])
    }
}

/// Maps a 1-based session id to a vector slot, if it was announced
fn slot(id: SessionId, available: usize) -> Option<usize> {
    let index = (id.0 as usize).checked_sub(1)?;
    (index < available).then_some(index)
}

/// Per-contact session timelines plus the global post index.
///
/// Built once during ingestion, then only read. Contacts are kept in the order
/// they were first added, which is also the order [`ContactId`]s are issued.
#[derive(Debug, Default)]
pub struct TimelineStore {
    contacts: Vec<Contact>,
    by_email: HashMap<String, ContactId>,
    index: HashMap<Post, Vec<SessionRef>>,
    diagnostics: Vec<Diagnostic>,
    placeholders_issued: u32,
}

impl TimelineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `email`, creating an empty contact on first sight
    pub fn add_contact(&mut self, email: &str) -> ContactId {
        if let Some(&id) = self.by_email.get(email) {
            return id;
        }
        let id = ContactId(self.contacts.len());
        self.contacts.push(Contact { email: email.to_string(), sessions: Vec::new() });
        self.by_email.insert(email.to_string(), id);
        id
    }

    /// Ensures sessions `1..=count` exist. Never shrinks.
    pub fn reserve_sessions(&mut self, contact: ContactId, count: u32) -> Result<(), GraphError> {
        let owner = self.contact_mut(contact)?;
        for id in (owner.sessions.len() as u32 + 1)..=count {
            owner.sessions.push(Session::new(SessionId(id)));
        }
        Ok(())
    }

    /// Appends a marker post to a session and registers it in the global index.
    ///
    /// Returns `Ok(false)` when the post is not strictly later than the
    /// session's last post; the store is left unchanged and a
    /// [`Diagnostic::NonMonotonicPost`] is recorded.
    pub fn record_marker(
        &mut self,
        contact: ContactId,
        session: SessionId,
        post: Post,
    ) -> Result<bool, GraphError> {
        let owner = self
            .contacts
            .get_mut(contact.0)
            .ok_or_else(|| GraphError::UnknownContact(format!("#{}", contact.0)))?;
        let available = owner.sessions.len();
        let index = slot(session, available).ok_or_else(|| GraphError::UnknownSession {
            email: owner.email.clone(),
            session,
            available,
        })?;

        let posts = &mut owner.sessions[index].posts;
        if let Some(&last) = posts.last()
            && post <= last
        {
            let diagnostic =
                Diagnostic::NonMonotonicPost { email: owner.email.clone(), session, post, last };
            warn!("{}", diagnostic);
            self.diagnostics.push(diagnostic);
            return Ok(false);
        }

        posts.push(post);
        self.index.entry(post).or_default().push(SessionRef { contact, session });
        Ok(true)
    }

    /// All sessions holding a marker at exactly `post`, in registration order
    pub fn lookup_sessions_at(&self, post: Post) -> Result<&[SessionRef], GraphError> {
        self.index.get(&post).map(Vec::as_slice).ok_or(GraphError::PostNotFound(post))
    }

    pub fn contains_post(&self, post: Post) -> bool {
        self.index.contains_key(&post)
    }

    pub fn session(&self, at: SessionRef) -> Result<&Session, GraphError> {
        let owner = self.contact(at.contact)?;
        owner.session(at.session).ok_or_else(|| GraphError::UnknownSession {
            email: owner.email.clone(),
            session: at.session,
            available: owner.sessions.len(),
        })
    }

    pub fn contact(&self, id: ContactId) -> Result<&Contact, GraphError> {
        self.contacts.get(id.0).ok_or_else(|| GraphError::UnknownContact(format!("#{}", id.0)))
    }

    fn contact_mut(&mut self, id: ContactId) -> Result<&mut Contact, GraphError> {
        self.contacts
            .get_mut(id.0)
            .ok_or_else(|| GraphError::UnknownContact(format!("#{}", id.0)))
    }

    pub fn contact_id(&self, email: &str) -> Result<ContactId, GraphError> {
        self.by_email.get(email).copied().ok_or_else(|| GraphError::UnknownContact(email.into()))
    }

    pub fn email(&self, id: ContactId) -> Result<&str, GraphError> {
        self.contact(id).map(Contact::email)
    }

    /// Contacts in insertion order
    pub fn contacts(&self) -> impl Iterator<Item = (ContactId, &Contact)> {
        self.contacts.iter().enumerate().map(|(i, c)| (ContactId(i), c))
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    pub fn session_count(&self) -> usize {
        self.contacts.iter().map(|c| c.sessions.len()).sum()
    }

    pub fn marker_count(&self) -> usize {
        self.contacts.iter().flat_map(|c| &c.sessions).map(|s| s.posts.len()).sum()
    }

    /// First and last marker of the contact's first session
    pub fn first_session_bounds(&self, id: ContactId) -> Result<(Post, Post), GraphError> {
        let owner = self.contact(id)?;
        owner
            .session(SessionId::FIRST)
            .and_then(|s| Some((s.first_post()?, s.last_post()?)))
            .ok_or_else(|| GraphError::NoFirstPost(owner.email.clone()))
    }

    /// The contact's earliest recorded marker
    pub fn first_post(&self, id: ContactId) -> Result<Post, GraphError> {
        self.first_session_bounds(id).map(|(first, _)| first)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Issues the next synthetic post. Each call yields a later placeholder.
    pub(crate) fn next_placeholder(&mut self) -> Post {
        let post = Post::Placeholder(self.placeholders_issued);
        self.placeholders_issued += 1;
        post
    }

    pub(crate) fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }
}
