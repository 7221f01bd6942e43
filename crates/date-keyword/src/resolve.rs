//! Resolution of a parsed keyword against an explicit reference instant.
//!
//! All functions take the reference instant as an argument (no system clock
//! access), keeping resolution pure and testable with injected fixed
//! instants. Arithmetic is naive wall-clock arithmetic on
//! [`NaiveDateTime`]; timezone and DST handling are out of scope.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::Serialize;

use crate::error::{ParseError, Result};
use crate::keyword::{BaseKeyword, DateKeyword, OffsetTerm, OffsetUnit};

// ── Locale ──────────────────────────────────────────────────────────────────

/// Which day begins a week for the `NEXTWEEK`/`LASTWEEK` anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WeekStartDay {
    /// ISO 8601 standard (Monday = day 0 of the week).
    #[default]
    Monday,
    /// US/Canada convention (Sunday = day 0 of the week).
    Sunday,
}

/// Week-start convention and default formatting for one resolution.
///
/// Stands in for the ambient process culture: callers that care thread an
/// explicit value; everyone else gets [`Locale::default`] at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    /// Which day starts the week.
    pub week_start: WeekStartDay,
    /// strftime specifier used when the caller supplies none.
    pub default_format: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            week_start: WeekStartDay::default(),
            default_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

/// How many days `weekday` is from the week-start day.
fn days_from_week_start(weekday: Weekday, week_start: WeekStartDay) -> i64 {
    match week_start {
        WeekStartDay::Monday => weekday.num_days_from_monday() as i64,
        WeekStartDay::Sunday => weekday.num_days_from_sunday() as i64,
    }
}

/// The most recent week-start day on or before `date`, or `None` when the
/// anchor would fall outside the representable date range.
pub fn week_anchor(date: NaiveDate, week_start: WeekStartDay) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(days_from_week_start(date.weekday(), week_start)))
}

// ── Offset application ──────────────────────────────────────────────────────

fn instant_out_of_range() -> ParseError {
    ParseError::InvalidKeyword("resolved instant out of range".to_string())
}

fn offset_out_of_range(term: &OffsetTerm) -> ParseError {
    let sign = if term.sign < 0 { '-' } else { '+' };
    ParseError::InvalidKeyword(format!(
        "offset out of range: {sign}{}{}",
        term.magnitude, term.unit
    ))
}

/// Shift `instant` by one offset term using checked calendar arithmetic.
///
/// # Errors
///
/// Returns [`ParseError::InvalidKeyword`] when the shifted instant falls
/// outside the representable datetime range.
pub fn apply_offset(instant: NaiveDateTime, term: &OffsetTerm) -> Result<NaiveDateTime> {
    let amount = term.signed_amount();
    let delta = match term.unit {
        OffsetUnit::Days => Duration::try_days(amount),
        OffsetUnit::Hours => Duration::try_hours(amount),
        OffsetUnit::Minutes => Duration::try_minutes(amount),
        OffsetUnit::Seconds => Duration::try_seconds(amount),
    }
    .ok_or_else(|| offset_out_of_range(term))?;

    instant
        .checked_add_signed(delta)
        .ok_or_else(|| offset_out_of_range(term))
}

// ── Keyword resolution ──────────────────────────────────────────────────────

/// Resolve a parsed keyword to a concrete instant.
///
/// The base instant is computed from `reference`, then each offset term is
/// applied in the order it was written. Offsets on `NOW` shift its
/// time-of-day; offsets on the midnight-anchored bases operate on the
/// truncated value and are **not** re-truncated afterwards, so `TODAY-1h`
/// lands at 23:00 the previous day. That asymmetry is intentional.
///
/// # Errors
///
/// Returns [`ParseError::InvalidKeyword`] when the base shift or an offset
/// pushes the result outside the representable datetime range.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use date_keyword::{resolve, DateKeyword, Locale};
///
/// let reference = NaiveDate::from_ymd_opt(2024, 5, 1)
///     .unwrap()
///     .and_hms_opt(10, 0, 0)
///     .unwrap();
/// let keyword: DateKeyword = "NOW+1h-30m".parse().unwrap();
/// let resolved = resolve(&keyword, reference, &Locale::default()).unwrap();
/// assert_eq!(resolved.to_string(), "2024-05-01 10:30:00");
/// ```
pub fn resolve(
    keyword: &DateKeyword,
    reference: NaiveDateTime,
    locale: &Locale,
) -> Result<NaiveDateTime> {
    let date = reference.date();
    let base = match keyword.base {
        BaseKeyword::Now => reference,
        BaseKeyword::Today => date.and_time(NaiveTime::MIN),
        BaseKeyword::Tomorrow => date
            .checked_add_signed(Duration::days(1))
            .ok_or_else(instant_out_of_range)?
            .and_time(NaiveTime::MIN),
        BaseKeyword::Yesterday => date
            .checked_sub_signed(Duration::days(1))
            .ok_or_else(instant_out_of_range)?
            .and_time(NaiveTime::MIN),
        BaseKeyword::NextWeek => {
            let ahead = date
                .checked_add_signed(Duration::days(7))
                .ok_or_else(instant_out_of_range)?;
            week_anchor(ahead, locale.week_start)
                .ok_or_else(instant_out_of_range)?
                .and_time(NaiveTime::MIN)
        }
        BaseKeyword::LastWeek => {
            let behind = date
                .checked_sub_signed(Duration::days(7))
                .ok_or_else(instant_out_of_range)?;
            week_anchor(behind, locale.week_start)
                .ok_or_else(instant_out_of_range)?
                .and_time(NaiveTime::MIN)
        }
    };

    keyword
        .offsets
        .iter()
        .try_fold(base, |acc, term| apply_offset(acc, term))
}

// ── Tests ───────────────────────────────────────────────────────────────────
