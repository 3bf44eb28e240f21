//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::Path;

use msn_social_graph::Post;
use tempfile::TempDir;

/// Timestamp `minute` minutes after midnight on 2006-08-17, as written in
/// Messenger's `DateTime` attribute
pub fn at(minute: u32) -> String {
    assert!(minute < 24 * 60, "minute out of range: {}", minute);
    format!("2006-08-17T{:02}:{:02}:00.000Z", minute / 60, minute % 60)
}

/// The [`Post`] matching [`at`]
pub fn post_at(minute: u32) -> Post {
    at(minute).parse().expect("Failed to parse test timestamp")
}

/// Builder for a directory of MSN chat logs
pub struct LogDirBuilder {
    temp_dir: TempDir,
}

impl LogDirBuilder {
    /// Create a new builder with an empty log directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the log directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add `<email>.xml` with the given log
    pub fn with_log(self, email: &str, log: &ChatLogBuilder) -> Self {
        self.with_file(&format!("{}.xml", email), &log.to_xml())
    }

    /// Add a file with arbitrary content
    pub fn with_file(self, name: &str, content: &str) -> Self {
        let path = self.temp_dir.path().join(name);
        let mut file = fs::File::create(path).expect("Failed to create log file");
        file.write_all(content.as_bytes()).expect("Failed to write log file");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for LogDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one contact's XML chat log
pub struct ChatLogBuilder {
    last_session: Option<u32>,
    elements: Vec<(&'static str, u32, String)>,
}

impl ChatLogBuilder {
    /// Create an empty log
    pub fn new() -> Self {
        Self { last_session: None, elements: Vec::new() }
    }

    /// Override the `LastSessionID` header (defaults to the highest session used)
    pub fn last_session(mut self, session: u32) -> Self {
        self.last_session = Some(session);
        self
    }

    /// Add a `<Message>` at `minute`
    pub fn message(self, session: u32, minute: u32) -> Self {
        self.element("Message", session, minute)
    }

    /// Add one `<Message>` per minute
    pub fn messages(self, session: u32, minutes: &[u32]) -> Self {
        minutes.iter().fold(self, |log, &minute| log.message(session, minute))
    }

    /// Add a `<Join>` at `minute`
    pub fn join(self, session: u32, minute: u32) -> Self {
        self.element("Join", session, minute)
    }

    /// Add a `<Leave>` at `minute`
    pub fn leave(self, session: u32, minute: u32) -> Self {
        self.element("Leave", session, minute)
    }

    fn element(mut self, tag: &'static str, session: u32, minute: u32) -> Self {
        self.elements.push((tag, session, at(minute)));
        self
    }

    /// Render as a Messenger XML log
    pub fn to_xml(&self) -> String {
        let last_session = self
            .last_session
            .or_else(|| self.elements.iter().map(|(_, session, _)| *session).max())
            .unwrap_or(1);

        let mut xml = String::from("<?xml version=\"1.0\"?>\n");
        xml.push_str("<?xml-stylesheet type='text/xsl' href='MessageLog.xsl'?>\n");
        xml.push_str(&format!("<Log FirstSessionID=\"1\" LastSessionID=\"{}\">\n", last_session));
        for (tag, session, datetime) in &self.elements {
            xml.push_str(&format!(
                "<{tag} Date=\"8/17/2006\" DateTime=\"{datetime}\" SessionID=\"{session}\">\
                 <From><User FriendlyName=\"Someone\"/></From><Text>hello</Text></{tag}>\n"
            ));
        }
        xml.push_str("</Log>\n");
        xml
    }
}

impl Default for ChatLogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Three contacts introduced one after another:
///
/// - alice talks to the main user alone (minutes 10-12), then adds bob at 102
/// - bob talks with alice from 103 to 105, then adds carol at 201
/// - carol talks with bob from 202 to 203
pub fn introduction_chain() -> LogDirBuilder {
    LogDirBuilder::new()
        .with_log(
            "alice@example.com",
            &ChatLogBuilder::new()
                .messages(1, &[10, 11, 12])
                .messages(2, &[100, 101])
                .join(2, 102)
                .messages(2, &[103, 104, 105]),
        )
        .with_log(
            "bob@example.com",
            &ChatLogBuilder::new()
                .messages(1, &[103, 104, 105])
                .message(2, 200)
                .join(2, 201)
                .messages(2, &[202, 203]),
        )
        .with_log("carol@example.com", &ChatLogBuilder::new().messages(1, &[202, 203]))
}
