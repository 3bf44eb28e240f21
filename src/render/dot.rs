use std::borrow::Cow;
use std::io::{self, Write};

use crate::models::Edge;

/// Writes edges as a Graphviz digraph, ready for `sfdp -x -T png`
pub fn write_dot<W: Write>(out: &mut W, edges: &[Edge]) -> io::Result<()> {
    writeln!(out, "digraph G {{")?;
    writeln!(out, r#" graph[overlap=false, splines=ortho, fontname="Roboto"];"#)?;
    writeln!(out, r#" node[shape=box, style=rounded, fontname="Roboto", fontsize=10];"#)?;
    writeln!(out, r#" edge[fontname="Roboto"];"#)?;

    for edge in edges {
        writeln!(
            out,
            r#" "{}" -> "{}" [color={}]"#,
            quote_id(&edge.src),
            quote_id(&edge.dest),
            edge.color
        )?;
    }

    writeln!(out, "}}")
}

/// Escapes a string for use inside a double-quoted DOT identifier
fn quote_id(id: &str) -> Cow<'_, str> {
    if !id.contains(['"', '\\', '\n', '\r']) {
        return Cow::Borrowed(id);
    }

    let mut escaped = String::with_capacity(id.len() + 2);
    for c in id.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' | '\r' => escaped.push(' '),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
