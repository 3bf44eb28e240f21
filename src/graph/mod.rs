//! Introduction graph: conversation reconstruction, precedence and edges.

pub mod builder;
pub mod edges;
pub mod precedence;
pub mod reconstruct;

pub use builder::{build_graph, build_store};
pub use edges::{GraphReport, edge_color, synthesize, synthesize_edges};
pub use precedence::is_predecessor;
pub use reconstruct::reconstruct;
