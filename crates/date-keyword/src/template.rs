//! Structural template matching, formatting, and substitution.
//!
//! A template carries exactly one bracketed keyword token, `<KEYWORD>`,
//! either alone, after a prefix ending in `_`, before a `_` suffix, or
//! before a dot-extension. Anything else around the token makes the
//! template invalid.

use std::ops::Range;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ParseError, Result};

/// Anchored structural pattern: optional `prefix_`, the bracketed keyword,
/// then an optional `_suffix` or `.ext` and nothing more.
static TEMPLATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:.*_)?<([A-Za-z0-9+\-]+)>(?:_.*|\.\w+|)$").unwrap());

/// The keyword text and the byte span of its bracketed token.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TemplateMatch<'a> {
    pub keyword: &'a str,
    pub token: Range<usize>,
}

/// Locate the bracketed keyword token in `template`.
///
/// # Errors
///
/// Returns [`ParseError::InvalidTemplate`] when the structural pattern does
/// not match (missing brackets, malformed bracket content, or extra text
/// outside the permitted prefix/suffix/extension positions).
pub(crate) fn extract_keyword(template: &str) -> Result<TemplateMatch<'_>> {
    let invalid = || ParseError::InvalidTemplate(template.to_string());
    let caps = TEMPLATE_PATTERN.captures(template).ok_or_else(invalid)?;
    let keyword = caps.get(1).ok_or_else(invalid)?;
    // Widen the capture span by one byte each side to cover the brackets.
    Ok(TemplateMatch {
        keyword: keyword.as_str(),
        token: keyword.start() - 1..keyword.end() + 1,
    })
}

/// Render a resolved instant with a strftime specifier.
///
/// The specifier is validated up front so an invalid one surfaces as
/// [`ParseError::Format`] instead of a rendering panic.
pub(crate) fn format_instant(instant: NaiveDateTime, spec: &str) -> Result<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(spec).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(ParseError::Format(spec.to_string()));
    }
    Ok(instant.format_with_items(items.into_iter()).to_string())
}

/// Splice `formatted` over the token span located by [`extract_keyword`].
pub(crate) fn substitute(template: &str, token: Range<usize>, formatted: &str) -> String {
    let mut out = String::with_capacity(template.len() + formatted.len());
    out.push_str(&template[..token.start]);
    out.push_str(formatted);
    out.push_str(&template[token.end..]);
    out
}

// ── Tests ───────────────────────────────────────────────────────────────────
