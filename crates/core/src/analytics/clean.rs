//! Numeric field cleaning.
//!
//! Sheet amounts arrive as display strings: thousands separators, stray
//! quotes, sometimes a currency suffix. Cleaning strips `,` `'` `"` and reads
//! the longest leading number; anything else is zero.

use std::str::FromStr;

use bookgx_shared::ParseMode;
use rust_decimal::Decimal;

use super::error::AnalyticsError;

const STRIPPED: [char; 3] = [',', '\'', '"'];

/// Largest amount a single cell may carry (one quadrillion). Larger values
/// are malformed, which keeps every sum and percentage within `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Classification of a raw amount cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedAmount {
    /// Blank cell.
    Empty,
    /// The whole cell is a number.
    Exact(Decimal),
    /// A numeric prefix followed by other text, such as `"500 SAR"`.
    Partial(Decimal),
    /// No usable number, a negative one, or one above [`MAX_AMOUNT`].
    Invalid,
}

impl ParsedAmount {
    /// Returns the lenient value: the parsed number, or zero.
    #[must_use]
    pub const fn value(self) -> Decimal {
        match self {
            Self::Exact(value) | Self::Partial(value) => value,
            Self::Empty | Self::Invalid => Decimal::ZERO,
        }
    }

    /// Returns true for cells that are neither blank nor a clean number.
    #[must_use]
    pub const fn is_malformed(self) -> bool {
        matches!(self, Self::Partial(_) | Self::Invalid)
    }
}

/// Classifies a raw amount cell.
#[must_use]
pub fn parse_amount(raw: &str) -> ParsedAmount {
    let stripped: String = raw.chars().filter(|c| !STRIPPED.contains(c)).collect();
    let cleaned = stripped.trim();
    if cleaned.is_empty() {
        return ParsedAmount::Empty;
    }

    let prefix = numeric_prefix(cleaned);
    if prefix.is_empty() {
        return ParsedAmount::Invalid;
    }

    let Some(value) = parse_decimal(prefix) else {
        return ParsedAmount::Invalid;
    };
    if value.is_zero() {
        return exactness(prefix, cleaned, Decimal::ZERO);
    }
    if value.is_sign_negative() || value > MAX_AMOUNT {
        return ParsedAmount::Invalid;
    }

    exactness(prefix, cleaned, value.normalize())
}

/// Cleans a raw amount cell, returning zero for anything unusable.
///
/// # Example
///
/// ```
/// use bookgx_core::analytics::clean_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(clean_amount("1,234"), dec!(1234));
/// assert_eq!(clean_amount("'500'"), dec!(500));
/// assert_eq!(clean_amount("abc"), dec!(0));
/// ```
#[must_use]
pub fn clean_amount(raw: &str) -> Decimal {
    parse_amount(raw).value()
}

fn exactness(prefix: &str, cleaned: &str, value: Decimal) -> ParsedAmount {
    if prefix.len() == cleaned.len() {
        ParsedAmount::Exact(value)
    } else {
        ParsedAmount::Partial(value)
    }
}

/// Returns the longest leading slice that reads as a decimal number.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digits_from(end + 1 + sign);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }

    &s[..end]
}

fn parse_decimal(prefix: &str) -> Option<Decimal> {
    let (negative, unsigned) = match prefix.as_bytes().first() {
        Some(b'-') => (true, &prefix[1..]),
        Some(b'+') => (false, &prefix[1..]),
        _ => (false, prefix),
    };
    let unsigned = if unsigned.starts_with('.') {
        format!("0{unsigned}")
    } else {
        unsigned.to_string()
    };

    let value = if unsigned.contains(['e', 'E']) {
        Decimal::from_scientific(&unsigned).ok()?
    } else {
        Decimal::from_str(&unsigned).ok()?
    };

    Some(if negative { -value } else { value })
}

/// Reads amounts under a parse mode and counts malformed cells.
#[derive(Debug)]
pub struct AmountReader {
    mode: ParseMode,
    malformed: usize,
}

impl AmountReader {
    /// Creates a reader for the given mode.
    #[must_use]
    pub const fn new(mode: ParseMode) -> Self {
        Self { mode, malformed: 0 }
    }

    /// Cleans one cell.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::MalformedAmount` in strict mode when the cell
    /// is neither blank nor a clean number.
    pub fn read(&mut self, raw: &str, row: usize, column: &str) -> Result<Decimal, AnalyticsError> {
        let parsed = parse_amount(raw);
        if parsed.is_malformed() {
            if self.mode == ParseMode::Strict {
                return Err(AnalyticsError::MalformedAmount {
                    row,
                    column: column.to_string(),
                    value: raw.to_string(),
                });
            }
            self.malformed += 1;
        }
        Ok(parsed.value())
    }

    /// Number of malformed cells read so far.
    #[must_use]
    pub const fn malformed(&self) -> usize {
        self.malformed
    }
}
