//! Human-readable byte sizes
//!
//! Parses size strings such as `"32GB"`, `"32GiB"` or `"512 kib"` into a byte
//! count. Decimal units (`K`, `M`, `G`, `T`, `P`) are powers of 1000, binary
//! units (`Ki`, `Mi`, `Gi`, `Ti`, `Pi`) are powers of 1024. Units are
//! case-insensitive and may carry a trailing `B`. A bare number is a byte
//! count.

use thiserror::Error;

const KB: u64 = 1000;
const MB: u64 = KB * 1000;
const GB: u64 = MB * 1000;
const TB: u64 = GB * 1000;
const PB: u64 = TB * 1000;

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;
const TIB: u64 = GIB * 1024;
const PIB: u64 = TIB * 1024;

/// Errors produced by [`parse_size`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeParseError {
    /// The size string is empty or whitespace.
    #[error("size is empty")]
    Empty,

    /// The numeric part is missing or malformed.
    #[error("invalid size '{0}': expected a non-negative number followed by an optional unit")]
    InvalidNumber(String),

    /// The unit suffix is not recognized.
    #[error("invalid size '{input}': unknown unit '{unit}'")]
    UnknownUnit {
        /// The full input string
        input: String,
        /// The unrecognized suffix
        unit: String,
    },

    /// The value does not fit in 64 bits.
    #[error("size '{0}' is too large")]
    Overflow(String),
}

/// Parses a human-readable size into a byte count.
///
/// A fractional part is allowed (`"1.5GiB"`) and the result is truncated to
/// whole bytes. One space may separate the number from its unit.
///
/// # Errors
///
/// Returns [`SizeParseError`] if the string is empty, the number or unit is
/// malformed, or the result exceeds `u64::MAX`.
///
/// # Examples
///
/// ```
/// use dmsnap::config::size::parse_size;
///
/// assert_eq!(parse_size("1KiB").unwrap(), 1024);
/// assert_eq!(parse_size("32GB").unwrap(), 32_000_000_000);
/// assert_eq!(parse_size("32gib").unwrap(), 34_359_738_368);
/// ```
pub fn parse_size(input: &str) -> Result<u64, SizeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SizeParseError::Empty);
    }

    let split = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    let (number, suffix) = trimmed.split_at(split);
    let unit = suffix.strip_prefix(' ').unwrap_or(suffix);

    let multiplier = unit_multiplier(unit).ok_or_else(|| SizeParseError::UnknownUnit {
        input: input.to_string(),
        unit: suffix.trim().to_string(),
    })?;

    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    let malformed = whole.is_empty()
        || fraction.contains('.')
        || (number.contains('.') && fraction.is_empty());
    if malformed {
        return Err(SizeParseError::InvalidNumber(input.to_string()));
    }

    let overflow = || SizeParseError::Overflow(input.to_string());

    let whole: u128 = whole.parse().map_err(|_| overflow())?;
    let mut bytes = whole
        .checked_mul(u128::from(multiplier))
        .ok_or_else(overflow)?;

    if !fraction.is_empty() {
        bytes = bytes
            .checked_add(u128::from(fraction_bytes(fraction, multiplier)))
            .ok_or_else(overflow)?;
    }

    u64::try_from(bytes).map_err(|_| overflow())
}

/// Returns `floor(0.<digits> * multiplier)` exactly, for any number of digits.
///
/// Digits are folded in from the least significant end, so the running value
/// stays below `multiplier`.
fn fraction_bytes(digits: &str, multiplier: u64) -> u64 {
    digits.bytes().rev().fold(0, |acc, digit| {
        (u64::from(digit - b'0') * multiplier + acc) / 10
    })
}

/// Returns the byte multiplier for a unit suffix, or `None` if unknown.
fn unit_multiplier(unit: &str) -> Option<u64> {
    let lower = unit.to_ascii_lowercase();
    let prefix = lower.strip_suffix('b').unwrap_or(&lower);

    match prefix {
        "" => Some(1),
        "k" => Some(KB),
        "m" => Some(MB),
        "g" => Some(GB),
        "t" => Some(TB),
        "p" => Some(PB),
        "ki" => Some(KIB),
        "mi" => Some(MIB),
        "gi" => Some(GIB),
        "ti" => Some(TIB),
        "pi" => Some(PIB),
        _ => None,
    }
}

/// Renders a byte count using the largest unit that divides it exactly.
///
/// Units are tried from largest to smallest, binary before decimal at each
/// magnitude, so `34359738368` renders as `"32 GiB"` and `32000000000` as
/// `"32 GB"`. Counts that no unit divides render as plain bytes.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [(u64, &str); 10] = [
        (PIB, "PiB"),
        (PB, "PB"),
        (TIB, "TiB"),
        (TB, "TB"),
        (GIB, "GiB"),
        (GB, "GB"),
        (MIB, "MiB"),
        (MB, "MB"),
        (KIB, "KiB"),
        (KB, "KB"),
    ];

    if bytes == 0 {
        return "0 bytes".to_string();
    }

    UNITS
        .iter()
        .find(|(unit, _)| bytes >= *unit && bytes % unit == 0)
        .map_or_else(
            || format!("{bytes} bytes"),
            |(unit, name)| format!("{} {name}", bytes / unit),
        )
}
