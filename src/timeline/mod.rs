//! Timeline store: per-contact session marker lists and the post → session index.

pub mod store;

pub use store::{Contact, Session, TimelineStore};
