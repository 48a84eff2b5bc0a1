//! Notation grammars for reference-range text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ReferenceRange;
use crate::numeric::leading_decimal;

/// How the dash in a reference range is interpreted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum RangeGrammar {
    /// The separator is the first dash that follows a digit or decimal point.
    /// Other dashes are signs, so `-5-5` is [-5, 5] and `> -5` is a lower
    /// bound of -5.
    #[default]
    Signed,
    /// Any dash selects the interval notation; the text is split on every
    /// dash and the first two pieces are the bounds, so `-5-5` has no lower
    /// bound and an upper bound of 5.
    Legacy,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown range grammar: {0} (expected 'signed' or 'legacy')")]
pub struct UnknownRangeGrammar(pub String);

impl FromStr for RangeGrammar {
    type Err = UnknownRangeGrammar;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "signed" => Ok(RangeGrammar::Signed),
            "legacy" => Ok(RangeGrammar::Legacy),
            _ => Err(UnknownRangeGrammar(s.to_string())),
        }
    }
}

impl fmt::Display for RangeGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeGrammar::Signed => f.write_str("signed"),
            RangeGrammar::Legacy => f.write_str("legacy"),
        }
    }
}

impl RangeGrammar {
    pub(crate) fn parse(self, text: &str) -> Option<ReferenceRange> {
        match self {
            RangeGrammar::Signed => parse_signed(text),
            RangeGrammar::Legacy => parse_legacy(text),
        }
    }
}

fn parse_signed(text: &str) -> Option<ReferenceRange> {
    match separator_position(text) {
        Some(at) => Some(ReferenceRange::Interval {
            min: leading_decimal(&text[..at]),
            max: leading_decimal(&text[at + 1..]),
        }),
        None => parse_bound(text),
    }
}

fn parse_legacy(text: &str) -> Option<ReferenceRange> {
    if !text.contains('-') {
        return parse_bound(text);
    }
    let mut pieces = text.split('-');
    Some(ReferenceRange::Interval {
        min: pieces.next().and_then(leading_decimal),
        max: pieces.next().and_then(leading_decimal),
    })
}

/// `<` before `>`; only the first operator character is stripped.
fn parse_bound(text: &str) -> Option<ReferenceRange> {
    if text.contains('<') {
        return leading_decimal(text.replacen('<', "", 1).trim()).map(ReferenceRange::Below);
    }
    if text.contains('>') {
        return leading_decimal(text.replacen('>', "", 1).trim()).map(ReferenceRange::Above);
    }
    None
}

/// Byte offset of the dash separating two bounds.
fn separator_position(text: &str) -> Option<usize> {
    let mut previous: Option<char> = None;
    for (at, c) in text.char_indices() {
        if c == '-' && matches!(previous, Some(p) if p.is_ascii_digit() || p == '.') {
            return Some(at);
        }
        if !c.is_whitespace() {
            previous = Some(c);
        }
    }
    None
}
