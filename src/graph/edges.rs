//! Edge synthesis: who introduced the main user to whom.
//!
//! For every contact A, the conversation holding A's first post is rebuilt and
//! each participant B that is a former contact to A gets an edge B → A. A
//! contact nobody introduced gets an edge from the main user instead.

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::error::GraphError;
use crate::graph::precedence::is_predecessor;
use crate::graph::reconstruct::reconstruct;
use crate::models::{ContactId, Diagnostic, Edge, EdgeColor, Participant, Post};
use crate::timeline::TimelineStore;

/// Result of a full graph run
#[derive(Debug, Clone, Serialize)]
pub struct GraphReport {
    pub main_email: String,
    pub contacts: usize,
    pub edges: Vec<Edge>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Colors an edge B → A by how B's presence overlapped A's first session.
///
/// Later rules override earlier ones: green beats blue beats black beats gray.
pub fn edge_color(
    b: &Participant,
    a_first: Post,
    a_last: Post,
    conversation_first: Post,
) -> EdgeColor {
    let mut color = EdgeColor::Gray;
    // B joined before A left
    if b.first_post <= a_last {
        color = EdgeColor::Black;
    }
    // B was present when A joined
    if b.first_post <= a_first && b.last_post >= a_first {
        color = EdgeColor::Blue;
    }
    // B was present when the conversation started
    if b.first_post == conversation_first {
        color = EdgeColor::Green;
    }
    color
}

/// Incoming edges for one contact, plus any re-entry warnings raised while
/// rebuilding its first conversation
fn incoming_edges(
    store: &TimelineStore,
    main_email: &str,
    a: ContactId,
) -> Result<(Vec<Edge>, Vec<Diagnostic>), GraphError> {
    let email_a = store.email(a)?;
    let (a_first, a_last) = store.first_session_bounds(a)?;
    info!(email = email_a, first_post = %a_first, "calculating incoming edges");

    let convo = reconstruct(store, a_first)?;
    info!(
        email = email_a,
        from = %convo.first_post(),
        to = %convo.last_post(),
        participants = convo.len(),
        "rebuilt first conversation"
    );

    let mut edges = Vec::new();
    for b in convo.participants() {
        if b.email == email_a {
            continue;
        }
        let b_id = store.contact_id(&b.email)?;
        if !is_predecessor(store, b_id, a)? {
            continue;
        }
        edges.push(Edge {
            src: b.email.clone(),
            dest: email_a.to_string(),
            color: edge_color(b, a_first, a_last, convo.first_post()),
        });
    }

    if edges.is_empty() {
        info!(email = email_a, "no former contacts; adding an edge from the main user");
        edges.push(Edge {
            src: main_email.to_string(),
            dest: email_a.to_string(),
            color: EdgeColor::Black,
        });
    }

    Ok((edges, convo.diagnostics().to_vec()))
}

/// Builds the introduction graph as seen by `main_email`.
///
/// Every ingested contact other than the main user gets at least one incoming
/// edge. Edges are grouped by destination, in contact order; contacts are
/// processed in parallel.
pub fn synthesize(store: &TimelineStore, main_email: &str) -> Result<GraphReport, GraphError> {
    let targets: Vec<ContactId> = store
        .contacts()
        .filter(|(_, contact)| contact.email() != main_email)
        .map(|(id, _)| id)
        .collect();

    let per_contact = targets
        .par_iter()
        .map(|&a| incoming_edges(store, main_email, a))
        .collect::<Result<Vec<_>, GraphError>>()?;

    let mut diagnostics = store.diagnostics().to_vec();
    let mut edges = Vec::new();
    for (contact_edges, contact_diagnostics) in per_contact {
        edges.extend(contact_edges);
        for diagnostic in contact_diagnostics {
            if !diagnostics.contains(&diagnostic) {
                diagnostics.push(diagnostic);
            }
        }
    }

    Ok(GraphReport {
        main_email: main_email.to_string(),
        contacts: targets.len(),
        edges,
        diagnostics,
    })
}

/// Shorthand for [`synthesize`] when only the edges are needed
pub fn synthesize_edges(
    store: &TimelineStore,
    main_email: &str,
) -> Result<Vec<Edge>, GraphError> {
    synthesize(store, main_email).map(|report| report.edges)
}
