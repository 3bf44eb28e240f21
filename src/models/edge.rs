use std::fmt;

use serde::Serialize;

/// Edge colors, weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeColor {
    /// The predecessor was in the conversation at some point
    Gray,
    /// The predecessor joined before the new contact left
    Black,
    /// The predecessor was present when the new contact joined
    Blue,
    /// The predecessor was present when the conversation started
    Green,
}

impl EdgeColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeColor::Gray => "gray",
            EdgeColor::Black => "black",
            EdgeColor::Blue => "blue",
            EdgeColor::Green => "green",
        }
    }
}

impl fmt::Display for EdgeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed "introduced" edge from an earlier contact to a newer one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub src: String,
    pub dest: String,
    pub color: EdgeColor,
}
