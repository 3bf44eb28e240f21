//! Output formats for the edge list.

pub mod dot;
pub mod json;

pub use dot::write_dot;
pub use json::write_json;
