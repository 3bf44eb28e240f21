//! Readers for MSN Messenger chat log archives
//!
//! # Error Handling Strategy
//!
//! Parsing follows a **graceful degradation** approach suitable for CLI tools:
//!
//! - **Individual element failures**: Elements with missing or malformed `SessionID` /
//!   `DateTime` attributes are logged and skipped, so one bad post does not lose an archive.
//!
//! - **Catastrophic failure detection**: If >50% of elements fail to parse, or if >100
//!   consecutive errors occur, or the XML itself is malformed, the file is rejected.
//!
//! - **File-level failures**: The graph builder logs rejected files and carries on, unless
//!   more than half of all files fail.
//!
//! - **Error propagation**: Uses `anyhow::Result` with context; callers report, they do not
//!   match on error types.

pub mod discovery;
pub mod msn_xml;

pub use discovery::{LogFile, discover_logs};
pub use msn_xml::{parse_log, parse_log_file};
