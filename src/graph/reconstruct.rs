//! Conversation reconstruction.
//!
//! No archive records every participant of a multi-party conversation: each
//! contact's log only shows the posts *that contact* saw. A post that appears
//! in several archives at the same millisecond ties those sessions together.
//! Starting from one post, [`reconstruct`] walks back to the session that
//! reaches furthest into the past, then sweeps forward post by post, hopping
//! to whichever session reaches furthest into the future, until neither bound
//! can be extended.
//!
//! Known limitation: two unrelated posts sharing a timestamp are treated as the
//! same message, which can splice unrelated conversations together. This is
//! left uncorrected.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::error::GraphError;
use crate::models::{ContactId, Conversation, Diagnostic, Participant, Post, SessionRef};
use crate::timeline::{Session, TimelineStore};

/// A session that could become the sweep frontier
#[derive(Debug, Clone, Copy)]
struct Candidate<'s> {
    at: SessionRef,
    session: &'s Session,
    email: &'s str,
    first: Post,
    last: Post,
}

impl Candidate<'_> {
    /// Deterministic tie-break between sessions with equal extremal posts:
    /// lexically smallest email, then lowest session id
    fn tie_break(&self, other: &Self) -> Ordering {
        self.email.cmp(other.email).then(self.at.session.cmp(&other.at.session))
    }
}

fn candidates_at(store: &TimelineStore, post: Post) -> Result<Vec<Candidate<'_>>, GraphError> {
    let mut found = Vec::new();
    for &at in store.lookup_sessions_at(post)? {
        let session = store.session(at)?;
        // Indexed sessions always hold at least the post they were indexed by.
        let (Some(first), Some(last)) = (session.first_post(), session.last_post()) else {
            continue;
        };
        found.push(Candidate { at, session, email: store.email(at.contact)?, first, last });
    }
    Ok(found)
}

/// Presence of one contact during one reconstruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Open { first: Post },
    Closed { first: Post, last: Post },
}

/// Intervals for a single reconstruction call, in order of first entry
#[derive(Debug, Default)]
struct IntervalArena {
    order: Vec<ContactId>,
    intervals: HashMap<ContactId, Presence>,
    reentered: BTreeSet<ContactId>,
}

impl IntervalArena {
    /// Opens an interval. Returns `true` the first time a contact re-enters
    /// after already having an interval; the existing interval is kept as is.
    fn enter(&mut self, contact: ContactId, at: Post) -> bool {
        if self.intervals.contains_key(&contact) {
            return self.reentered.insert(contact);
        }
        self.order.push(contact);
        self.intervals.insert(contact, Presence::Open { first: at });
        false
    }

    fn leave(&mut self, contact: ContactId, at: Post) {
        if let Some(presence) = self.intervals.get_mut(&contact)
            && let Presence::Open { first } = *presence
        {
            *presence = Presence::Closed { first, last: at };
        }
    }

    /// Closes everyone still present at the end of the sweep
    fn close_all(&mut self, at: Post) {
        for presence in self.intervals.values_mut() {
            if let Presence::Open { first } = *presence {
                *presence = Presence::Closed { first, last: at };
            }
        }
    }

    fn into_participants(self, store: &TimelineStore) -> Result<Vec<Participant>, GraphError> {
        let mut participants = Vec::with_capacity(self.order.len());
        for contact in self.order {
            if let Some(&Presence::Closed { first, last }) = self.intervals.get(&contact) {
                participants.push(Participant {
                    email: store.email(contact)?.to_string(),
                    first_post: first,
                    last_post: last,
                });
            }
        }
        Ok(participants)
    }
}

/// Rebuilds the conversation that `anchor` belongs to.
///
/// Fails with [`GraphError::PostNotFound`] if `anchor` was never recorded.
/// The store is only read, so calls are independent and may run in parallel.
pub fn reconstruct(store: &TimelineStore, anchor: Post) -> Result<Conversation, GraphError> {
    let start = candidates_at(store, anchor)?
        .into_iter()
        .min_by(Candidate::tie_break)
        .ok_or(GraphError::PostNotFound(anchor))?;

    let mut frontier = find_left_edge(store, start)?;
    debug!(
        anchor = %anchor,
        left_edge = %frontier.first,
        email = frontier.email,
        "found left edge"
    );

    let mut arena = IntervalArena::default();
    let mut diagnostics = Vec::new();
    let mut cursor: Option<Post> = None;
    let mut prev_present: BTreeSet<ContactId> = BTreeSet::new();

    loop {
        for &post in frontier.session.posts() {
            if cursor.is_some_and(|prev| post <= prev) {
                continue;
            }

            let present: BTreeSet<ContactId> =
                store.lookup_sessions_at(post)?.iter().map(|at| at.contact).collect();

            for &contact in present.difference(&prev_present) {
                if arena.enter(contact, post) {
                    let diagnostic =
                        Diagnostic::ReEntry { email: store.email(contact)?.to_string() };
                    warn!("{}", diagnostic);
                    diagnostics.push(diagnostic);
                }
            }
            if let Some(prev) = cursor {
                for &contact in prev_present.difference(&present) {
                    arena.leave(contact, prev);
                }
            }

            cursor = Some(post);
            prev_present = present;
        }

        let Some(reached) = cursor else { break };
        let next = candidates_at(store, reached)?
            .into_iter()
            .min_by(|a, b| b.last.cmp(&a.last).then(a.tie_break(b)));
        match next {
            Some(next) if next.last > frontier.last => {
                debug!(
                    at = %reached,
                    email = next.email,
                    session = %next.at.session,
                    "extending right edge"
                );
                frontier = next;
            }
            _ => break,
        }
    }

    let end = cursor.ok_or(GraphError::PostNotFound(anchor))?;
    arena.close_all(end);
    Conversation::new(arena.into_participants(store)?, diagnostics)
}

/// Follows first posts backwards to the session that started the conversation
fn find_left_edge<'s>(
    store: &'s TimelineStore,
    mut frontier: Candidate<'s>,
) -> Result<Candidate<'s>, GraphError> {
    loop {
        let earliest = candidates_at(store, frontier.first)?
            .into_iter()
            .min_by(|a, b| a.first.cmp(&b.first).then(a.tie_break(b)));
        match earliest {
            Some(next) if next.first < frontier.first => frontier = next,
            _ => return Ok(frontier),
        }
    }
}
