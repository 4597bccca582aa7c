use std::sync::LazyLock;

use regex::Regex;
use snafu::{OptionExt, ensure};

use crate::{
    EvenTwistSnafu, NumberOutOfRangeSnafu, Pretzel, SeifertError, Twist,
    UnrecognisedNotationSnafu, ZeroStrandSnafu,
};

static BRAID_NOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[+-]?[0-9]+\s*)*$").unwrap());
static BRAID_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[+-]?[0-9]+").unwrap());

static PRETZEL_NOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[A-Za-z]\s*(?:[+-]?[0-9]+)?\s*)+$").unwrap());
static PRETZEL_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z])\s*([+-]?[0-9]+)?").unwrap());

/// Largest strand index accepted in braid notation.
///
/// Strand indices size per-strand tables during analysis, so larger ones are rejected with
/// `NumberOutOfRange` rather than allocated.
pub const MAX_STRAND: usize = 65_536;

/// Parse a braid or pretzel from text.
///
/// Two notations are accepted:
///
/// - Braid notation: whitespace separated non-zero integers, where `n` stands for the crossing
///   `(|n|, sign(n))`, e.g. `"1 2 -1"`. Strands are limited to [`MAX_STRAND`].
/// - Letter notation: a sequence of letters, each optionally followed by a signed odd twist
///   count, e.g. `"AbAb"` or `"A1b3B15"`. The letters `A` to `Z` name strands 1 to 26, and a
///   lower case letter negates the count. A letter without a count is a simple crossing.
///
/// Empty or blank input is the empty pretzel.
pub fn parse_pretzel(input: &str) -> Result<Pretzel, SeifertError> {
    if BRAID_NOTATION.is_match(input) {
        BRAID_ITEM
            .find_iter(input)
            .map(|m| parse_braid_item(m.as_str()))
            .collect()
    } else if PRETZEL_NOTATION.is_match(input) {
        PRETZEL_ITEM
            .captures_iter(input)
            .map(|caps| {
                let letter = caps[1].chars().next().unwrap_or_default();
                parse_pretzel_item(letter, caps.get(2).map(|m| m.as_str()))
            })
            .collect()
    } else {
        UnrecognisedNotationSnafu { input }.fail()
    }
}

fn parse_int(text: &str) -> Result<i64, SeifertError> {
    text.parse::<i64>()
        .ok()
        .context(NumberOutOfRangeSnafu { text })
}

fn parse_braid_item(text: &str) -> Result<Twist, SeifertError> {
    let n = parse_int(text)?;
    ensure!(n != 0, ZeroStrandSnafu);
    let strand = usize::try_from(n.unsigned_abs())
        .ok()
        .filter(|&s| s <= MAX_STRAND)
        .context(NumberOutOfRangeSnafu { text })?;
    Ok(Twist::new(strand, if n < 0 { -1 } else { 1 }))
}

fn parse_pretzel_item(letter: char, count: Option<&str>) -> Result<Twist, SeifertError> {
    let (strand, sign) = if letter.is_ascii_uppercase() {
        (letter as usize - 'A' as usize + 1, 1)
    } else {
        (letter as usize - 'a' as usize + 1, -1)
    };

    let count = match count {
        Some(text) => parse_int(text)?,
        None => 1,
    };
    ensure!(count % 2 != 0, EvenTwistSnafu { strand, count });

    let signed = sign * count;
    let count = i32::try_from(signed)
        .ok()
        .context(NumberOutOfRangeSnafu {
            text: signed.to_string(),
        })?;
    Ok(Twist::new(strand, count))
}
