//! # date-keyword
//!
//! Resolve a date keyword expression embedded in a filename-like template,
//! replacing the bracketed token with a formatted date/time value:
//! `export_<TODAY>.csv` becomes `export_2024-05-01.csv`.
//!
//! Keywords are a base token plus up to four chained offsets, all
//! case-insensitive:
//!
//! ```text
//! <NOW>  <TODAY>  <YESTERDAY>  <TOMORROW>  <NEXTWEEK>  <LASTWEEK>
//! <TODAY+1d>  <NOW+1h-30m>  <LASTWEEK-2d+12h>
//! ```
//!
//! Offset units are `d` (days), `h` (hours), `m` (minutes), `s` (seconds);
//! each unit may appear at most once per expression. `NEXTWEEK` and
//! `LASTWEEK` resolve to the first day of their week under the locale's
//! week-start convention.
//!
//! Everything is a pure computation over an explicit reference instant —
//! [`parse`] reads the system clock once at the boundary and delegates to
//! [`parse_at`], which is fully deterministic.
//!
//! ## Modules
//!
//! - [`keyword`] — keyword grammar and parsing
//! - [`resolve`] — week-start convention, locale, resolution arithmetic
//! - [`error`] — error types

pub mod error;
pub mod keyword;
pub mod resolve;
mod template;

pub use error::{ParseError, Result};
pub use keyword::{BaseKeyword, DateKeyword, OffsetTerm, OffsetUnit};
pub use resolve::{apply_offset, resolve, week_anchor, Locale, WeekStartDay};

use chrono::{Local, NaiveDateTime};
use log::debug;

/// Resolve the keyword in `template` against the current local time.
///
/// `format` is a strftime specifier; when `None`, the locale's default
/// format is used. When `locale` is `None`, [`Locale::default`] applies
/// (Monday week start).
///
/// # Errors
///
/// - [`ParseError::InvalidArgument`] — `template` is empty
/// - [`ParseError::InvalidTemplate`] — no structural `<KEYWORD>` match
/// - [`ParseError::InvalidKeyword`] — keyword text not in the grammar
/// - [`ParseError::DuplicateUnit`] — an offset unit repeated
/// - [`ParseError::Format`] — invalid format specifier
pub fn parse(template: &str, format: Option<&str>, locale: Option<&Locale>) -> Result<String> {
    let default_locale;
    let locale = match locale {
        Some(locale) => locale,
        None => {
            default_locale = Locale::default();
            &default_locale
        }
    };
    parse_at(template, format, locale, Local::now().naive_local())
}

/// Resolve the keyword in `template` against an explicit reference instant.
///
/// This is the deterministic core behind [`parse`]: extraction, grammar
/// parse, resolution, formatting, and substitution, with any stage failure
/// short-circuiting as a typed error. No partial result is ever returned.
///
/// # Errors
///
/// Same taxonomy as [`parse`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use date_keyword::{parse_at, Locale};
///
/// let reference = NaiveDate::from_ymd_opt(2024, 5, 1)
///     .unwrap()
///     .and_hms_opt(10, 0, 0)
///     .unwrap();
/// let out = parse_at("export_<TODAY>.csv", Some("%Y-%m-%d"), &Locale::default(), reference);
/// assert_eq!(out.unwrap(), "export_2024-05-01.csv");
/// ```
pub fn parse_at(
    template: &str,
    format: Option<&str>,
    locale: &Locale,
    reference: NaiveDateTime,
) -> Result<String> {
    if template.is_empty() {
        return Err(ParseError::InvalidArgument);
    }

    let matched = template::extract_keyword(template)?;
    debug!("extracted keyword '{}' from template", matched.keyword);

    let keyword: DateKeyword = matched.keyword.parse()?;
    let resolved = resolve::resolve(&keyword, reference, locale)?;
    debug!("resolved '{}' to {}", matched.keyword, resolved);

    let spec = format.unwrap_or(&locale.default_format);
    let formatted = template::format_instant(resolved, spec)?;
    Ok(template::substitute(template, matched.token, &formatted))
}

// ── Tests ───────────────────────────────────────────────────────────────────
