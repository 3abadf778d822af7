//! Fallback-chain resolution for atom display fields.
//!
//! An atom's label and description can each come from several nested places
//! in the indexer record, tried in a fixed order with the first non-empty
//! value winning. The order is a versioned contract: changing it changes
//! what users see, so the tests in `tests/resolve_tests.rs` pin it.

use crate::model::{RawAtom, RawAtomValue, RawNamedValue};

/// Label shown when every source in the chain is empty.
pub const UNNAMED_ATOM: &str = "Unnamed Atom";

/// Description shown when every source in the chain is empty.
pub const NO_DESCRIPTION: &str = "No description available.";

/// First candidate that is present and non-empty after trimming.
pub fn first_non_empty<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
}

/// Resolve an atom's display label:
/// `label` → `value.thing.name` → `value.person.name` →
/// `value.organization.name`, else [`UNNAMED_ATOM`].
pub fn atom_label(atom: &RawAtom) -> String {
    first_non_empty([
        atom.label.as_deref(),
        named(&atom.value, |v| &v.thing).and_then(|n| n.name.as_deref()),
        named(&atom.value, |v| &v.person).and_then(|n| n.name.as_deref()),
        named(&atom.value, |v| &v.organization).and_then(|n| n.name.as_deref()),
    ])
    .unwrap_or(UNNAMED_ATOM)
    .to_string()
}

/// Resolve an atom's description:
/// `value.thing.description` → `value.person.description` →
/// `value.organization.description` → `data` (unless it is an `ipfs://`
/// URI, which is a payload pointer rather than prose), else
/// [`NO_DESCRIPTION`].
pub fn atom_description(atom: &RawAtom) -> String {
    let data = atom
        .data
        .as_deref()
        .filter(|d| !d.starts_with("ipfs://"));
    first_non_empty([
        named(&atom.value, |v| &v.thing).and_then(|n| n.description.as_deref()),
        named(&atom.value, |v| &v.person).and_then(|n| n.description.as_deref()),
        named(&atom.value, |v| &v.organization).and_then(|n| n.description.as_deref()),
        data,
    ])
    .unwrap_or(NO_DESCRIPTION)
    .to_string()
}

fn named<'a>(
    value: &'a Option<RawAtomValue>,
    pick: impl Fn(&'a RawAtomValue) -> &'a Option<RawNamedValue>,
) -> Option<&'a RawNamedValue> {
    value.as_ref().and_then(|v| pick(v).as_ref())
}
