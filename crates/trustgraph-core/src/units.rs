//! Base-unit arithmetic for the protocol token.
//!
//! The protocol accounts in integer base units at a fixed scale of 10^18 per
//! display unit. That scale is an external protocol invariant, not a tunable.
//! All arithmetic on fees, deposits and balances stays in `u128`; conversion
//! to a decimal string or an `f64` trust signal happens only when a value is
//! about to be shown.

/// Base units per display unit (10^18).
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Decimal digits of the base-unit scale.
pub const DECIMALS: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    #[error("empty amount")]
    Empty,
    #[error("malformed amount {0:?}")]
    Malformed(String),
    #[error("amount has {0} decimal places, the token supports at most {DECIMALS}")]
    TooPrecise(usize),
    #[error("amount does not fit in the token's value range")]
    Overflow,
}

/// Parse a user-entered decimal string ("0.01") into base units.
///
/// Accepts plain decimals with at most 18 fractional digits. Signs,
/// exponents, grouping separators and a bare "." are rejected; an absent
/// integer or fractional part (".5", "5.") is read as zero on that side.
pub fn parse_units(text: &str) -> Result<u128, UnitError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(UnitError::Empty);
    }

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(UnitError::Malformed(text.to_string()));
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) || frac_part.contains('.') {
        return Err(UnitError::Malformed(text.to_string()));
    }
    if frac_part.len() > DECIMALS {
        return Err(UnitError::TooPrecise(frac_part.len()));
    }

    let int_value: u128 = if int_part.is_empty() {
        0
    } else {
        int_part
            .parse()
            .map_err(|_| UnitError::Overflow)?
    };
    let frac_value: u128 = if frac_part.is_empty() {
        0
    } else {
        let digits: u128 = frac_part
            .parse()
            .map_err(|_| UnitError::Malformed(text.to_string()))?;
        digits * 10u128.pow((DECIMALS - frac_part.len()) as u32)
    };

    int_value
        .checked_mul(WAD)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or(UnitError::Overflow)
}

/// Format base units as a decimal display string.
///
/// Trailing fractional zeros are trimmed, so `10^18` renders as `"1"` and
/// `10500000000000000` as `"0.0105"`.
pub fn format_units(base: u128) -> String {
    let int = base / WAD;
    let frac = base % WAD;
    if frac == 0 {
        return int.to_string();
    }
    let mut frac_digits = format!("{frac:018}");
    while frac_digits.ends_with('0') {
        frac_digits.pop();
    }
    format!("{int}.{frac_digits}")
}

/// Derive a display-unit trust signal from a string-encoded share amount.
///
/// Missing or unparseable input degrades to `0.0` rather than failing: one
/// bad record must not take down a whole result list.
pub fn signal_from_shares(shares: Option<&str>) -> f64 {
    let raw = shares.unwrap_or("0").trim();
    match raw.parse::<u128>() {
        Ok(value) => value as f64 / WAD as f64,
        Err(_) => {
            if !raw.is_empty() && raw != "0" {
                tracing::debug!(shares = raw, "unparseable share amount, treating as zero");
            }
            0.0
        }
    }
}
