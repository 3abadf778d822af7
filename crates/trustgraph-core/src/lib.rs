//! TrustGraph core domain model.
//!
//! Pure, I/O-free building blocks shared by the client and the CLI:
//!
//! - [`model`]: raw indexer records and the display-ready summaries derived
//!   from them. Raw types are deliberately tolerant: every field the indexer
//!   may omit is an `Option`, and numeric amounts arrive as string-encoded
//!   base-unit integers.
//! - [`units`]: integer arithmetic on 18-decimal base units. Conversion to
//!   display units happens only at the presentation boundary.
//! - [`ranking`]: the trust-ranking transformation (vault aggregates →
//!   sorted relationship summaries).
//! - [`resolve`]: ordered fallback chains for atom labels and descriptions.
//! - [`summary`]: the deterministic plain-text digest handed to LLMs.
//!
//! Everything here is synchronous and side-effect free; network access and
//! caching live in `trustgraph-client`.

pub mod model;
pub mod ranking;
pub mod resolve;
pub mod summary;
pub mod units;

pub use model::{
    Atom, AtomId, AtomIdError, AtomRef, AtomSummary, Endorsement, RawAtom, RawAtomStub,
    RawPosition, RawTriple, RawVault, TripleSummary,
};
pub use ranking::rank_triples;
pub use resolve::{atom_description, atom_label, first_non_empty, NO_DESCRIPTION, UNNAMED_ATOM};
pub use summary::{render_summary, SUMMARY_LIMIT};
pub use units::{format_units, parse_units, signal_from_shares, UnitError, WAD};
