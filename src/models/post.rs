use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// A marker post: the timestamp of a structurally important message.
///
/// Posts are the cross-contact join key of the timeline. The same literal
/// value recorded in two archives is taken to be the same message.
///
/// Synthetic placeholders always sort before every real timestamp, and among
/// themselves by issue order, because the variant order is significant for
/// the derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Post {
    Placeholder(u32),
    Real(DateTime<Utc>),
}

impl Post {
    pub fn from_millis(ms: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(ms).map(Post::Real)
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Post::Placeholder(_))
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Post::Placeholder(n) => write!(f, "0000-{:010}", n),
            Post::Real(ts) => f.write_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

impl FromStr for Post {
    type Err = chrono::ParseError;

    /// Parses an RFC3339 timestamp such as `2006-08-17T01:32:09.578Z`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<DateTime<Utc>>().map(Post::Real)
    }
}
