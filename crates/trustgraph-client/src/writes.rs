//! Write pipelines: cost estimation, the balance gate, submission, and the
//! cache invalidations that make dependent reads refresh.
//!
//! Within one write the steps are strictly sequential: fetch fee → compute
//! total → check balance → submit. The balance check must pass before the
//! submit call is issued; there is no speculative submission. A successful
//! receipt does not mean the indexer has caught up yet, so an immediate
//! re-read may still show the old state; invalidating the cache groups is
//! the strongest refresh this side can offer.

use crate::cache::groups;
use crate::chain::TxHash;
use crate::error::{classify_submit_failure, SubmitContext, WriteError};
use crate::Explorer;
use serde::{Deserialize, Serialize};
use trustgraph_core::model::AtomId;
use trustgraph_core::units::{format_units, parse_units, UnitError};

/// A protocol fee quote: raw base units plus the display rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostQuote {
    pub raw: u128,
    pub formatted: String,
}

/// Inputs for a create-relationship write.
#[derive(Debug, Clone)]
pub struct TripleDraft {
    pub subject: AtomId,
    pub predicate: AtomId,
    pub object: AtomId,
    /// Optional extra stake, as a display-unit decimal string ("0.01").
    pub initial_deposit: Option<String>,
}

/// The cost of a create-relationship write, all in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostBreakdown {
    pub protocol_fee: u128,
    pub deposit: u128,
    pub total: u128,
}

impl CostBreakdown {
    /// Total required value: protocol fee plus the optional deposit.
    /// Integer arithmetic throughout; a blank deposit means zero.
    pub fn compute(protocol_fee: u128, initial_deposit: Option<&str>) -> Result<Self, WriteError> {
        let deposit = match initial_deposit {
            Some(text) if !text.trim().is_empty() => parse_units(text)?,
            _ => 0,
        };
        let total = protocol_fee
            .checked_add(deposit)
            .ok_or(WriteError::Amount(UnitError::Overflow))?;
        Ok(Self {
            protocol_fee,
            deposit,
            total,
        })
    }
}

impl Explorer {
    /// Create a relationship between three existing atoms.
    ///
    /// Submitted as a batch of one through the protocol's batched
    /// create-relationships call, with the whole value assigned to the
    /// single entry.
    pub async fn create_triple(&self, draft: &TripleDraft) -> Result<TxHash, WriteError> {
        let account = self.wallet.ensure_ready(&self.network)?.to_string();

        let fee = self.chain_reader.protocol_fee().await?;
        let breakdown = CostBreakdown::compute(fee, draft.initial_deposit.as_deref())?;
        let balance = self.chain_reader.balance(&account).await?;
        if balance < breakdown.total {
            return Err(WriteError::InsufficientFunds {
                needed: format_units(breakdown.total),
                available: format_units(balance),
                symbol: self.network.symbol.to_string(),
            });
        }

        let ctx = SubmitContext {
            needed: format_units(breakdown.total),
            available: format_units(balance),
            symbol: self.network.symbol.to_string(),
        };
        let tx = self
            .chain_writer
            .submit_create_triples(
                std::slice::from_ref(&draft.subject),
                std::slice::from_ref(&draft.predicate),
                std::slice::from_ref(&draft.object),
                &[breakdown.total],
                breakdown.total,
            )
            .await
            .map_err(|err| classify_submit_failure(err, Some(&ctx)))?;

        self.cache.invalidate_group(groups::TRIPLES);
        self.cache.invalidate_group(groups::SEARCH);
        self.cache.invalidate_group(groups::ATOM_DETAILS);
        tracing::info!(
            tx = %tx,
            subject = %draft.subject,
            total = breakdown.total,
            "relationship created"
        );
        Ok(tx)
    }

    /// Create a new atom from a string payload.
    pub async fn create_atom(&self, data: &str) -> Result<TxHash, WriteError> {
        self.wallet.ensure_ready(&self.network)?;
        let tx = self
            .chain_writer
            .submit_create_atom(data)
            .await
            .map_err(|err| classify_submit_failure(err, None))?;

        self.cache.invalidate_group(groups::SEARCH);
        tracing::info!(tx = %tx, "atom created");
        Ok(tx)
    }

    /// Endorse an existing term by depositing `amount` (display units) into
    /// its vault.
    pub async fn attest(&self, term: &AtomId, amount: &str) -> Result<TxHash, WriteError> {
        let account = self.wallet.ensure_ready(&self.network)?.to_string();
        let value = parse_units(amount)?;

        let tx = self
            .chain_writer
            .submit_deposit(&account, term, 1, 0, value)
            .await
            .map_err(|err| classify_submit_failure(err, None))?;

        self.cache.invalidate_group(groups::ATOM_DETAILS);
        self.cache.invalidate_group(groups::TRIPLES);
        tracing::info!(tx = %tx, term = %term, value, "attestation submitted");
        Ok(tx)
    }
}
