//! Trust ranking: raw relationship records → sorted display summaries.
//!
//! The trust signal of a relationship is its vault's `total_shares` divided
//! by 10^18. The vault aggregate is authoritative: provenance entries are
//! converted for display but never summed back into the signal, because the
//! indexer may paginate or truncate the position list. The two views can
//! therefore diverge transiently; that is a documented approximation of the
//! upstream data source, not something to enforce here.

use crate::model::{AtomRef, Endorsement, RawTriple, RawVault, TripleSummary};
use crate::units::signal_from_shares;

/// Convert raw records into display summaries, sorted by trust signal
/// descending. The sort is stable: records with equal signals keep their
/// insertion order, and ranking an already-ranked list is a no-op.
///
/// Never fails. A record with a malformed or missing aggregate degrades to a
/// zero signal instead of poisoning the rest of the list.
pub fn rank_triples(records: Vec<RawTriple>) -> Vec<TripleSummary> {
    let mut summaries: Vec<TripleSummary> = records.into_iter().map(summarize).collect();
    summaries.sort_by(|a, b| b.trust_signal.total_cmp(&a.trust_signal));
    summaries
}

fn summarize(record: RawTriple) -> TripleSummary {
    let vault = record
        .term
        .and_then(|t| t.vaults.into_iter().next())
        .unwrap_or_default();

    TripleSummary {
        id: record.term_id,
        subject: record.subject.map(AtomRef::from).unwrap_or_default(),
        predicate: record.predicate.map(AtomRef::from).unwrap_or_default(),
        object: record.object.map(AtomRef::from).unwrap_or_default(),
        trust_signal: signal_from_shares(vault.total_shares.as_deref()),
        attesters_count: vault.position_count.unwrap_or(0),
        provenance: endorsements(&vault),
    }
}

fn endorsements(vault: &RawVault) -> Vec<Endorsement> {
    vault
        .positions
        .iter()
        .map(|position| {
            let account = position.account.clone().unwrap_or_default();
            Endorsement {
                account: account.id,
                label: account.label,
                shares: signal_from_shares(position.shares.as_deref()),
            }
        })
        .collect()
}
