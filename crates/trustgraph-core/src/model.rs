//! Data model: raw indexer records and display-ready projections.
//!
//! The raw types mirror the wire shape of the external graph indexer. The
//! indexer is free to omit almost anything (labels, vaults, whole position
//! lists), so every optional field is an `Option` or defaults to empty and
//! deserialization never fails on a sparse record.
//!
//! All share/stake amounts arrive as *string-encoded* integers in the token's
//! base unit (10^18 per display unit, see [`crate::units`]).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

// ============================================================================
// Identifiers
// ============================================================================

/// A term identifier: `0x` followed by 40-64 hex digits.
///
/// Identifiers are derived off-chain by the external protocol SDK and treated
/// as opaque here; validation only guards against obvious paste errors before
/// a write is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AtomId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid term id {0:?} (expected 0x followed by 40-64 hex digits)")]
pub struct AtomIdError(pub String);

fn atom_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("^0x[a-fA-F0-9]{40,64}$").expect("static pattern"))
}

impl AtomId {
    pub fn new(raw: impl Into<String>) -> Result<Self, AtomIdError> {
        let raw = raw.into();
        if atom_id_pattern().is_match(&raw) {
            Ok(Self(raw))
        } else {
            Err(AtomIdError(raw))
        }
    }

    /// Accept an indexer-provided id without re-validating.
    ///
    /// Indexer responses are projections of on-chain state and already passed
    /// the protocol's own derivation; only user input goes through [`new`].
    ///
    /// [`new`]: AtomId::new
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for terminal rendering, e.g. `0x1a2b…9f00`.
    pub fn abbreviated(&self) -> String {
        if self.0.len() <= 12 {
            return self.0.clone();
        }
        format!("{}…{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for AtomId {
    type Err = AtomIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ============================================================================
// Raw indexer records
// ============================================================================

/// Nested name/description pair under an atom's resolved `value`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNamedValue {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// An atom's structured `value`: at most one of these variants is populated,
/// depending on how the atom was created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAtomValue {
    pub thing: Option<RawNamedValue>,
    pub person: Option<RawNamedValue>,
    pub organization: Option<RawNamedValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAccount {
    pub id: Option<String>,
    pub label: Option<String>,
}

/// One account's stake in a vault, in base units.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPosition {
    pub account: Option<RawAccount>,
    pub shares: Option<String>,
}

/// Aggregate staking state of a term. `total_shares` is authoritative;
/// `positions` may be truncated by the indexer's pagination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVault {
    pub total_shares: Option<String>,
    pub position_count: Option<u32>,
    #[serde(default)]
    pub positions: Vec<RawPosition>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTerm {
    #[serde(default)]
    pub vaults: Vec<RawVault>,
}

/// Subject/predicate/object stub inside a triple record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAtomStub {
    pub term_id: Option<String>,
    pub label: Option<String>,
}

/// A raw relationship record as returned by the indexer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTriple {
    pub term_id: Option<String>,
    pub subject: Option<RawAtomStub>,
    pub predicate: Option<RawAtomStub>,
    pub object: Option<RawAtomStub>,
    pub term: Option<RawTerm>,
}

/// A raw atom record (search result or detail view).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAtom {
    pub term_id: Option<String>,
    pub label: Option<String>,
    /// Free-form payload the atom was created from. May be an `ipfs://` URI,
    /// in which case it is not usable as a description.
    pub data: Option<String>,
    pub value: Option<RawAtomValue>,
    pub creator: Option<RawAccount>,
    pub term: Option<RawTerm>,
}

impl RawAtom {
    /// First vault aggregate, if the indexer sent one.
    pub fn vault(&self) -> Option<&RawVault> {
        self.term.as_ref().and_then(|t| t.vaults.first())
    }
}

// ============================================================================
// Display projections
// ============================================================================

/// A search-result row, with label/description already resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomSummary {
    pub id: String,
    pub label: String,
    pub description: String,
    /// Total endorsement positions across the atom's vaults.
    pub triples_count: u32,
}

/// Atom detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Atom {
    pub id: String,
    pub label: String,
    pub description: String,
    pub creator: Option<String>,
    /// Aggregate trust signal of the atom's own vault, in display units.
    pub trust_signal: f64,
    pub position_count: u32,
}

/// One endpoint of a ranked triple.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtomRef {
    pub id: Option<String>,
    pub label: Option<String>,
}

impl From<RawAtomStub> for AtomRef {
    fn from(stub: RawAtomStub) -> Self {
        Self {
            id: stub.term_id,
            label: stub.label,
        }
    }
}

/// One account's endorsement of a triple, in display units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endorsement {
    pub account: Option<String>,
    pub label: Option<String>,
    pub shares: f64,
}

/// A display-ready relationship: the output of [`crate::ranking`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripleSummary {
    pub id: Option<String>,
    pub subject: AtomRef,
    pub predicate: AtomRef,
    pub object: AtomRef,
    /// Vault aggregate divided by 10^18. Authoritative; not recomputed from
    /// `provenance`, which the indexer may truncate.
    pub trust_signal: f64,
    pub attesters_count: u32,
    pub provenance: Vec<Endorsement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atom_id_accepts_bytes32_style_ids() {
        let id = AtomId::new(format!("0x{}", "ab".repeat(32))).unwrap();
        assert_eq!(id.as_str().len(), 66);
    }

    #[test]
    fn atom_id_accepts_address_style_ids() {
        assert!(AtomId::new(format!("0x{}", "1f".repeat(20))).is_ok());
    }

    #[test]
    fn atom_id_rejects_bad_input() {
        let too_long = format!("0x{}", "a".repeat(65));
        for raw in ["", "0x", "0xzz", "abcd", "0x1234", too_long.as_str()] {
            assert!(AtomId::new(raw).is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn atom_id_abbreviation_keeps_ends() {
        let id = AtomId::new(format!("0x1a2b{}9f00", "0".repeat(56))).unwrap();
        let short = id.abbreviated();
        assert!(short.starts_with("0x1a2b"));
        assert!(short.ends_with("9f00"));
    }

    #[test]
    fn sparse_triple_record_deserializes() {
        let triple: RawTriple = serde_json::from_str(r#"{"term_id": "0xabc"}"#).unwrap();
        assert!(triple.subject.is_none());
        assert!(triple.term.is_none());
    }

    #[test]
    fn vault_with_null_fields_deserializes() {
        let vault: RawVault =
            serde_json::from_str(r#"{"total_shares": null, "position_count": null}"#).unwrap();
        assert!(vault.total_shares.is_none());
        assert!(vault.positions.is_empty());
    }
}
