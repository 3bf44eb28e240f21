//! MSN Social Graph - Build an "introduction graph" from MSN Messenger chat logs
//!
//! Given one XML archive per contact, this library works out who introduced the
//! main user to whom: you added A, who brought you into a chat with B, who
//! brought you into a chat with C, and so on. It supports:
//!
//! - Parsing MSN Messenger XML chat logs into session events
//! - Keeping only the marker posts that delimit presence in a conversation
//! - Reconstructing multi-party conversations across archives that share timestamps
//! - Drawing colored edges from earlier contacts to the contacts they introduced
//!
//! # Example
//!
//! ```no_run
//! use msn_social_graph::build_graph;
//! use std::path::PathBuf;
//!
//! let logs = PathBuf::from("/home/alice/My Received Files/alice1234/History");
//! let report = build_graph(&logs, "alice@example.com")?;
//! println!("Drew {} edges", report.edges.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod models;
pub mod parsers;
pub mod render;
pub mod timeline;
pub mod utils;

// Re-export commonly used types
pub use error::GraphError;
pub use graph::{GraphReport, build_graph, build_store, is_predecessor, reconstruct};
pub use models::{Conversation, Edge, EdgeColor, Participant, Post};
pub use timeline::TimelineStore;
