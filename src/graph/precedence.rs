use crate::error::GraphError;
use crate::graph::reconstruct::reconstruct;
use crate::models::ContactId;
use crate::timeline::TimelineStore;

/// Whether `a` is a former contact to `b`.
///
/// True when `a`'s first post is older than `b`'s, and the two first posts
/// belong to different conversations (the one `a` first appears in started
/// before the one `b` first appears in).
pub fn is_predecessor(
    store: &TimelineStore,
    a: ContactId,
    b: ContactId,
) -> Result<bool, GraphError> {
    let a_first = store.first_post(a)?;
    let b_first = store.first_post(b)?;
    if a_first >= b_first {
        return Ok(false);
    }

    let a_convo = reconstruct(store, a_first)?;
    let b_convo = reconstruct(store, b_first)?;
    Ok(a_convo.first_post() < b_convo.first_post())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::backfill_missing_first_sessions;
    use crate::models::{Post, SessionId};

    fn ms(v: i64) -> Post {
        Post::from_millis(v).unwrap()
    }

    fn record(store: &mut TimelineStore, email: &str, session: u32, posts: &[i64]) -> ContactId {
        let id = store.add_contact(email);
        store.reserve_sessions(id, session).unwrap();
        for &p in posts {
            store.record_marker(id, SessionId(session), ms(p)).unwrap();
        }
        id
    }

    #[test]
    fn test_earlier_separate_conversation_is_predecessor() {
        let mut store = TimelineStore::new();
        let a = record(&mut store, "a@x", 1, &[10, 20]);
        record(&mut store, "a@x", 2, &[100, 150, 200]);
        let b = record(&mut store, "b@x", 1, &[150, 200]);

        assert!(is_predecessor(&store, a, b).unwrap());
        assert!(!is_predecessor(&store, b, a).unwrap());
    }

    #[test]
    fn test_same_conversation_is_not_predecessor() {
        // a was there first, but b's first post is in the same conversation
        let mut store = TimelineStore::new();
        let a = record(&mut store, "a@x", 1, &[10, 20, 40, 50]);
        let b = record(&mut store, "b@x", 1, &[20, 40]);

        assert!(!is_predecessor(&store, a, b).unwrap());
        assert!(!is_predecessor(&store, b, a).unwrap());
    }

    #[test]
    fn test_never_predecessor_of_itself() {
        let mut store = TimelineStore::new();
        let a = record(&mut store, "a@x", 1, &[10]);
        assert!(!is_predecessor(&store, a, a).unwrap());
    }

    #[test]
    fn test_nothing_precedes_a_placeholder_contact() {
        let mut store = TimelineStore::new();
        let real = record(&mut store, "real@x", 1, &[10, 20]);
        let blank = store.add_contact("blank@x");
        backfill_missing_first_sessions(&mut store).unwrap();

        assert!(!is_predecessor(&store, real, blank).unwrap());
    }

    #[test]
    fn test_placeholder_contact_precedes_real_contact_it_later_talks_with() {
        // c's first archive is missing, but its second session shares a's
        // first conversation
        let mut store = TimelineStore::new();
        let a = record(&mut store, "a@x", 1, &[100, 150, 200]);
        let c = record(&mut store, "c@x", 2, &[100, 150, 200]);
        backfill_missing_first_sessions(&mut store).unwrap();

        assert!(store.first_post(c).unwrap().is_placeholder());
        assert!(is_predecessor(&store, c, a).unwrap());
        assert!(!is_predecessor(&store, a, c).unwrap());
    }

    #[test]
    fn test_predecessor_is_antisymmetric() {
        let mut store = TimelineStore::new();
        let ids = [
            record(&mut store, "a@x", 1, &[10, 20]),
            record(&mut store, "b@x", 1, &[20, 30]),
            record(&mut store, "c@x", 1, &[50, 60]),
            record(&mut store, "d@x", 1, &[60, 70]),
        ];

        for &x in &ids {
            for &y in &ids {
                let both = is_predecessor(&store, x, y).unwrap()
                    && is_predecessor(&store, y, x).unwrap();
                assert!(!both, "{:?} and {:?}", x, y);
            }
        }
    }

    #[test]
    fn test_contact_without_posts_is_an_error() {
        let mut store = TimelineStore::new();
        let a = record(&mut store, "a@x", 1, &[10]);
        let empty = store.add_contact("empty@x");

        assert_eq!(
            is_predecessor(&store, a, empty),
            Err(GraphError::NoFirstPost("empty@x".into()))
        );
    }
}
