//! Plain-text digest of an atom's top-ranked relationships.
//!
//! The digest is pasted into LLM prompts as verifiable grounding context, so
//! its format is a contract: byte-identical output for identical input, no
//! timestamps, no randomness. At most the top ten relationships are listed.

use crate::model::TripleSummary;

/// Maximum relationships included in a digest.
pub const SUMMARY_LIMIT: usize = 10;

/// Render the digest for an atom given its already-ranked relationships.
///
/// ```
/// use trustgraph_core::model::{AtomRef, TripleSummary};
/// use trustgraph_core::render_summary;
///
/// let triples = vec![TripleSummary {
///     id: None,
///     subject: AtomRef::default(),
///     predicate: AtomRef { id: None, label: Some("is a".into()) },
///     object: AtomRef { id: None, label: Some("founder".into()) },
///     trust_signal: 2.5,
///     attesters_count: 3,
///     provenance: vec![],
/// }];
/// let text = render_summary("Vitalik", "0xabc", &triples);
/// assert!(text.contains("1. is a founder - Trust: 2.5000 $TRUST (Unendorsed)"));
/// ```
pub fn render_summary(atom_label: &str, atom_id: &str, triples: &[TripleSummary]) -> String {
    let lines: Vec<String> = triples
        .iter()
        .take(SUMMARY_LIMIT)
        .enumerate()
        .map(|(i, t)| summary_line(i + 1, t))
        .collect();

    format!(
        "Verified facts about \"{}\" (ID: {}):\n{}\n\nSource: TrustGraph / Intuition Protocol (Intuition Testnet Beta)",
        atom_label,
        atom_id,
        lines.join("\n"),
    )
}

fn summary_line(index: usize, triple: &TripleSummary) -> String {
    let predicate = non_empty(triple.predicate.label.as_deref()).unwrap_or("relates to");
    let object = non_empty(triple.object.label.as_deref()).unwrap_or("unknown");
    let endorsement = if triple.provenance.is_empty() {
        "Unendorsed".to_string()
    } else {
        format!("Endorsed by {} accounts", triple.attesters_count)
    };
    format!(
        "{index}. {predicate} {object} - Trust: {:.4} $TRUST ({endorsement})",
        triple.trust_signal,
    )
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
