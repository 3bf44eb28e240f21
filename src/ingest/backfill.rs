use crate::error::GraphError;
use crate::models::{ContactId, Diagnostic, SessionId};
use crate::timeline::TimelineStore;

/// Gives every contact without a first session a one-person conversation at
/// the dawn of time.
///
/// The first archive for a contact is sometimes missing. Each such contact
/// gets a fresh placeholder post in session 1, issued in contact order, so the
/// contact still has an earliest conversation to anchor on. Returns the number
/// of contacts repaired.
pub fn backfill_missing_first_sessions(store: &mut TimelineStore) -> Result<usize, GraphError> {
    let missing: Vec<ContactId> = store
        .contacts()
        .filter(|(_, contact)| {
            contact.session(SessionId::FIRST).is_none_or(|s| s.posts().is_empty())
        })
        .map(|(id, _)| id)
        .collect();

    for &contact in &missing {
        let placeholder = store.next_placeholder();
        store.reserve_sessions(contact, 1)?;
        store.record_marker(contact, SessionId::FIRST, placeholder)?;
        let email = store.email(contact)?.to_string();
        store.push_diagnostic(Diagnostic::MissingFirstSession { email, placeholder });
    }

    Ok(missing.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventKind, LogEvent, Post};
    use crate::ingest::ingest_contact;

    fn ms(v: i64) -> Post {
        Post::from_millis(v).unwrap()
    }

    #[test]
    fn test_placeholders_precede_real_posts_in_contact_order() {
        let mut store = TimelineStore::new();
        let late_session = |at| {
            vec![LogEvent::SessionsAnnounced(2), LogEvent::post(EventKind::Message, 2, ms(at))]
        };
        ingest_contact(&mut store, "c@x", &late_session(500)).unwrap();
        ingest_contact(
            &mut store,
            "real@x",
            &[LogEvent::SessionsAnnounced(1), LogEvent::post(EventKind::Message, 1, ms(0))],
        )
        .unwrap();
        ingest_contact(&mut store, "d@x", &late_session(600)).unwrap();

        let repaired = backfill_missing_first_sessions(&mut store).unwrap();

        assert_eq!(repaired, 2);
        let c = store.first_post(store.contact_id("c@x").unwrap()).unwrap();
        let d = store.first_post(store.contact_id("d@x").unwrap()).unwrap();
        let real = store.first_post(store.contact_id("real@x").unwrap()).unwrap();
        assert!(c < d);
        assert!(d < real);
        assert!(c.is_placeholder() && d.is_placeholder());

        let warned: Vec<_> = store
            .diagnostics()
            .iter()
            .filter_map(|d| match d {
                Diagnostic::MissingFirstSession { email, .. } => Some(email.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(warned, vec!["c@x", "d@x"]);
    }

    #[test]
    fn test_contact_without_announced_sessions_gets_session_one() {
        let mut store = TimelineStore::new();
        store.add_contact("empty@x");

        backfill_missing_first_sessions(&mut store).unwrap();

        let id = store.contact_id("empty@x").unwrap();
        assert_eq!(store.first_post(id).unwrap(), Post::Placeholder(0));
    }

    #[test]
    fn test_backfill_is_stable_when_repeated() {
        let mut store = TimelineStore::new();
        store.add_contact("a@x");
        backfill_missing_first_sessions(&mut store).unwrap();
        store.add_contact("b@x");
        backfill_missing_first_sessions(&mut store).unwrap();

        let b = store.contact_id("b@x").unwrap();
        assert_eq!(store.first_post(b).unwrap(), Post::Placeholder(1));
        assert_eq!(store.lookup_sessions_at(Post::Placeholder(0)).unwrap().len(), 1);
    }
}
