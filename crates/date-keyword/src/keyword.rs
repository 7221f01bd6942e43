//! Keyword grammar: base keyword plus chained offset terms.
//!
//! A keyword expression is a base token followed by zero or more signed,
//! unit-tagged offsets:
//!
//! ```text
//! keyword := BASE (offset)*
//! BASE    := NOW | TODAY | YESTERDAY | TOMORROW | NEXTWEEK | LASTWEEK
//! offset  := SIGN INTEGER UNIT
//! SIGN    := '+' | '-'
//! UNIT    := 'd' | 'h' | 'm' | 's'
//! ```
//!
//! Base and unit tokens are case-insensitive. Units must be pairwise
//! distinct across the offsets of one expression; since only four units
//! exist, this also caps the number of offset terms at four.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ParseError, Result};

// ── Base keyword ────────────────────────────────────────────────────────────

/// The root date token of a keyword expression, before offsets are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BaseKeyword {
    /// The reference instant, time-of-day included.
    Now,
    /// The reference date at midnight.
    Today,
    /// The reference date minus one day, at midnight.
    Yesterday,
    /// The reference date plus one day, at midnight.
    Tomorrow,
    /// Week anchor of the reference date plus seven days.
    NextWeek,
    /// Week anchor of the reference date minus seven days.
    LastWeek,
}

const BASE_TOKENS: [(&str, BaseKeyword); 6] = [
    ("NOW", BaseKeyword::Now),
    ("TODAY", BaseKeyword::Today),
    ("YESTERDAY", BaseKeyword::Yesterday),
    ("TOMORROW", BaseKeyword::Tomorrow),
    ("NEXTWEEK", BaseKeyword::NextWeek),
    ("LASTWEEK", BaseKeyword::LastWeek),
];

/// Split a case-insensitive base token off the front of `s`.
///
/// No base token is a prefix of another, so first match wins.
fn split_base(s: &str) -> Option<(BaseKeyword, &str)> {
    for (token, base) in BASE_TOKENS {
        if let Some(prefix) = s.get(..token.len()) {
            if prefix.eq_ignore_ascii_case(token) {
                return Some((base, &s[token.len()..]));
            }
        }
    }
    None
}

// ── Offset terms ────────────────────────────────────────────────────────────

/// The unit of a single offset term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OffsetUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl OffsetUnit {
    /// Map a unit letter (case-insensitive) to its unit.
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'd' => Some(Self::Days),
            'h' => Some(Self::Hours),
            'm' => Some(Self::Minutes),
            's' => Some(Self::Seconds),
            _ => None,
        }
    }
}

impl fmt::Display for OffsetUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Days => 'd',
            Self::Hours => 'h',
            Self::Minutes => 'm',
            Self::Seconds => 's',
        };
        write!(f, "{c}")
    }
}

/// A signed, unit-tagged magnitude that shifts a resolved instant.
///
/// Sign and magnitude are separate grammar tokens: the integer literal is
/// digits only, so `+0d` and `-0d` both carry magnitude 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetTerm {
    /// +1 or -1.
    pub sign: i64,
    /// Non-negative magnitude as written.
    pub magnitude: i64,
    pub unit: OffsetUnit,
}

impl OffsetTerm {
    /// The signed amount this term shifts by, in its unit.
    pub fn signed_amount(&self) -> i64 {
        self.sign * self.magnitude
    }
}

// ── Parsed keyword ──────────────────────────────────────────────────────────

/// A parsed keyword expression: base keyword plus ordered offset terms.
///
/// Offsets are stored in the order they were written and are applied
/// left to right during resolution.
///
/// # Examples
///
/// ```
/// use date_keyword::{BaseKeyword, DateKeyword};
///
/// let kw: DateKeyword = "now+1h-30m".parse().unwrap();
/// assert_eq!(kw.base, BaseKeyword::Now);
/// assert_eq!(kw.offsets.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateKeyword {
    pub base: BaseKeyword,
    pub offsets: Vec<OffsetTerm>,
}

impl FromStr for DateKeyword {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        let (base, rest) = split_base(s)
            .ok_or_else(|| ParseError::InvalidKeyword(s.to_string()))?;

        let mut offsets = Vec::new();
        let mut unit_chars = Vec::new();
        let mut chars = rest.chars().peekable();

        while chars.peek().is_some() {
            let sign = match chars.next() {
                Some('+') => 1i64,
                Some('-') => -1i64,
                _ => return Err(ParseError::InvalidKeyword(s.to_string())),
            };

            let mut digits = String::new();
            while let Some(c) = chars.peek() {
                if c.is_ascii_digit() {
                    digits.push(*c);
                    chars.next();
                } else {
                    break;
                }
            }
            if digits.is_empty() {
                return Err(ParseError::InvalidKeyword(s.to_string()));
            }
            let magnitude: i64 = digits
                .parse()
                .map_err(|_| ParseError::InvalidKeyword(s.to_string()))?;

            let unit_char = chars
                .next()
                .ok_or_else(|| ParseError::InvalidKeyword(s.to_string()))?;
            let unit = OffsetUnit::from_char(unit_char)
                .ok_or_else(|| ParseError::InvalidKeyword(s.to_string()))?;

            unit_chars.push(unit_char);
            offsets.push(OffsetTerm { sign, magnitude, unit });
        }

        // Units are checked for repeats only after the whole expression has
        // matched the grammar. A repeat is an error, not a last-one-wins
        // merge, and it names the unit letter as written in the repeat.
        let mut seen = Vec::new();
        for (term, unit_char) in offsets.iter().zip(&unit_chars) {
            if seen.contains(&term.unit) {
                return Err(ParseError::DuplicateUnit(*unit_char));
            }
            seen.push(term.unit);
        }

        Ok(DateKeyword { base, offsets })
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_bases() {
        for (text, base) in [
            ("NOW", BaseKeyword::Now),
            ("TODAY", BaseKeyword::Today),
            ("YESTERDAY", BaseKeyword::Yesterday),
            ("TOMORROW", BaseKeyword::Tomorrow),
            ("NEXTWEEK", BaseKeyword::NextWeek),
            ("LASTWEEK", BaseKeyword::LastWeek),
        ] {
            let kw: DateKeyword = text.parse().unwrap();
            assert_eq!(kw.base, base, "for {text}");
            assert!(kw.offsets.is_empty());
        }
    }

    #[test]
    fn test_parse_base_case_insensitive() {
        let kw: DateKeyword = "ToDaY".parse().unwrap();
        assert_eq!(kw.base, BaseKeyword::Today);
        let kw: DateKeyword = "nextweek".parse().unwrap();
        assert_eq!(kw.base, BaseKeyword::NextWeek);
    }

    #[test]
    fn test_parse_offsets_in_written_order() {
        let kw: DateKeyword = "NOW+1h-30m".parse().unwrap();
        assert_eq!(
            kw.offsets,
            vec![
                OffsetTerm { sign: 1, magnitude: 1, unit: OffsetUnit::Hours },
                OffsetTerm { sign: -1, magnitude: 30, unit: OffsetUnit::Minutes },
            ]
        );
    }

    #[test]
    fn test_parse_four_offsets() {
        let kw: DateKeyword = "TODAY+1d-2h+3m-4s".parse().unwrap();
        assert_eq!(kw.offsets.len(), 4);
        assert_eq!(kw.offsets[3].signed_amount(), -4);
    }

    #[test]
    fn test_parse_unit_case_insensitive() {
        let kw: DateKeyword = "NOW+2H".parse().unwrap();
        assert_eq!(kw.offsets[0].unit, OffsetUnit::Hours);
    }

    #[test]
    fn test_parse_zero_magnitude_keeps_sign_token() {
        let plus: DateKeyword = "NOW+0d".parse().unwrap();
        let minus: DateKeyword = "NOW-0d".parse().unwrap();
        assert_eq!(plus.offsets[0].magnitude, 0);
        assert_eq!(minus.offsets[0].magnitude, 0);
        assert_eq!(plus.offsets[0].signed_amount(), minus.offsets[0].signed_amount());
    }

    #[test]
    fn test_duplicate_unit_same_case() {
        let err = "TODAY+1d+2d".parse::<DateKeyword>().unwrap_err();
        assert_eq!(err, ParseError::DuplicateUnit('d'));
    }

    #[test]
    fn test_duplicate_unit_reports_letter_as_written() {
        // Uniqueness is case-insensitive; the error carries the repeat as typed.
        let err = "TODAY+1d-2D".parse::<DateKeyword>().unwrap_err();
        assert_eq!(err, ParseError::DuplicateUnit('D'));
    }

    #[test]
    fn test_malformed_tail_wins_over_duplicate() {
        // The whole expression must match the grammar before units are
        // checked for repeats, so a malformed tail masks an earlier repeat.
        let err = "TODAY+1d+2d+3x".parse::<DateKeyword>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidKeyword(_)));
    }

    #[test]
    fn test_unknown_base_rejected() {
        let err = "BOGUS".parse::<DateKeyword>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidKeyword(_)));
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let err = "NOW+1w".parse::<DateKeyword>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidKeyword(_)));
    }

    #[test]
    fn test_offset_without_sign_rejected() {
        let err = "NOW1d".parse::<DateKeyword>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidKeyword(_)));
    }

    #[test]
    fn test_embedded_sign_in_magnitude_rejected() {
        // SIGN and INTEGER are separate tokens; "+-1d" is not "-1 days".
        let err = "NOW+-1d".parse::<DateKeyword>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidKeyword(_)));
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        let err = "TODAY+1dx".parse::<DateKeyword>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidKeyword(_)));
        let err = "TODAYx".parse::<DateKeyword>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidKeyword(_)));
    }

    #[test]
    fn test_sign_without_digits_rejected() {
        let err = "NOW+d".parse::<DateKeyword>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidKeyword(_)));
        let err = "NOW+".parse::<DateKeyword>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidKeyword(_)));
    }

    #[test]
    fn test_magnitude_out_of_i64_range_rejected() {
        let err = "NOW+99999999999999999999d".parse::<DateKeyword>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidKeyword(_)));
    }

    #[test]
    fn test_empty_expression_rejected() {
        let err = "".parse::<DateKeyword>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidKeyword(_)));
    }
}
