//! Session ingestion: turns parsed archive events into marker posts.
//!
//! Only four kinds of post carry structural information (session start, the
//! post after a join, the post before a leave, session end), so message content
//! is discarded here and only those timestamps reach the timeline store.

pub mod backfill;
pub mod session;

pub use backfill::backfill_missing_first_sessions;
pub use session::{SessionIngestor, ingest_contact};
