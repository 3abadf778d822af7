//! Cached read operations.
//!
//! Every read goes through the query cache under its group constant, which
//! is what lets the write paths refresh dependent views with group
//! invalidations. Failures are returned to the caller for inline display;
//! they never take down the process and are never cached.

use crate::cache::{groups, COST_TTL, READ_TTL};
use crate::error::{IndexerError, WriteError};
use crate::indexer::{SEARCH_LIMIT, TRIPLES_LIMIT};
use crate::writes::CostQuote;
use crate::Explorer;
use trustgraph_core::model::{Atom, AtomSummary, RawAtom, TripleSummary};
use trustgraph_core::units::{format_units, signal_from_shares};
use trustgraph_core::{atom_description, atom_label, rank_triples};

impl Explorer {
    /// Search atoms by label fragment. The text is wrapped in `%…%` for the
    /// indexer's ilike filter.
    pub async fn search_atoms(&self, text: &str) -> Result<Vec<AtomSummary>, IndexerError> {
        let raw = self
            .cache
            .get_or_fetch(
                groups::SEARCH,
                &(text, SEARCH_LIMIT),
                READ_TTL,
                || self.indexer.search_atoms(text, SEARCH_LIMIT),
            )
            .await?;
        Ok(raw.iter().map(atom_summary).collect())
    }

    /// Single-atom detail view, `None` when the id is unknown to the
    /// indexer.
    pub async fn atom_details(&self, id: &str) -> Result<Option<Atom>, IndexerError> {
        let raw = self
            .cache
            .get_or_fetch(
                groups::ATOM_DETAILS,
                &id,
                READ_TTL,
                || self.indexer.atom_details(id),
            )
            .await?;
        Ok(raw.as_ref().map(atom_view))
    }

    /// Relationships where `subject_id` is the subject, ranked by trust
    /// signal descending.
    pub async fn ranked_triples(&self, subject_id: &str) -> Result<Vec<TripleSummary>, IndexerError> {
        let raw = self
            .cache
            .get_or_fetch(
                groups::TRIPLES,
                &(subject_id, TRIPLES_LIMIT),
                READ_TTL,
                || self.indexer.triples_for_subject(subject_id, TRIPLES_LIMIT),
            )
            .await?;
        Ok(rank_triples(raw))
    }

    /// Current relationship-creation fee. Quotes age out after a minute; the
    /// write path always re-reads the fee fresh before submitting.
    pub async fn triple_cost(&self) -> Result<CostQuote, WriteError> {
        self.cache
            .get_or_fetch(
                groups::TRIPLE_COST,
                &self.network.chain_id,
                COST_TTL,
                || async {
                    let raw = self.chain_reader.protocol_fee().await?;
                    Ok(CostQuote {
                        raw,
                        formatted: format_units(raw),
                    })
                },
            )
            .await
    }
}

fn atom_summary(raw: &RawAtom) -> AtomSummary {
    AtomSummary {
        id: raw.term_id.clone().unwrap_or_default(),
        label: atom_label(raw),
        description: atom_description(raw),
        triples_count: position_total(raw),
    }
}

fn atom_view(raw: &RawAtom) -> Atom {
    let vault = raw.vault();
    Atom {
        id: raw.term_id.clone().unwrap_or_default(),
        label: atom_label(raw),
        description: atom_description(raw),
        creator: raw.creator.as_ref().and_then(|c| c.id.clone()),
        trust_signal: signal_from_shares(vault.and_then(|v| v.total_shares.as_deref())),
        position_count: vault.and_then(|v| v.position_count).unwrap_or(0),
    }
}

fn position_total(raw: &RawAtom) -> u32 {
    raw.term
        .as_ref()
        .map(|t| t.vaults.iter().filter_map(|v| v.position_count).sum())
        .unwrap_or(0)
}
