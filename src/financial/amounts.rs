//! Number candidates and keyword-proximity lookup.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::patterns::re;

/// Largest gap, in bytes, between a keyword and the number it qualifies.
pub const MAX_KEYWORD_GAP: usize = 48;

static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    re(concat!(
        r"(?i)(?:(?P<sym>[$€£])\s?|\b(?P<pre>usd|eur|gbp|sek|nok|dkk)\s?)?",
        r"(?P<num>\b(?:\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+|,\d{1,2}\b)?))",
        r"(?:\s?(?P<suffix>thousand|million|billion|msek|mnok|mdkk|mkr|tkr|mm|bn|k|m|b)\b)?",
        r"(?P<post>\s?(?:kr|sek|nok|dkk|usd|eur|gbp)\b)?",
        r"(?P<pct>\s?(?:%|percent\b))?",
    ))
});

static DECIMAL_COMMA: LazyLock<Regex> = LazyLock::new(|| re(r"^\d+,\d{1,2}$"));

/// Nordic magnitude suffixes that also name the currency ("40 MSEK", "3 mkr").
fn is_money_suffix(suffix: &str) -> bool {
    matches!(suffix, "msek" | "mnok" | "mdkk" | "mkr" | "tkr")
}

/// A number found in text, with the markers around it.
#[derive(Debug, Clone, PartialEq)]
pub struct Amount {
    /// Parsed value with any magnitude suffix applied.
    pub value: f64,
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
    /// A currency symbol or code is attached.
    pub currency: bool,
    /// A magnitude suffix (`k`, `m`, `bn`, ...) is attached.
    pub scaled: bool,
    /// Followed by `%` or "percent".
    pub percent: bool,
}

impl Amount {
    /// Money: currency-marked or scaled, never a percentage.
    pub fn is_monetary(&self) -> bool {
        !self.percent && (self.currency || self.scaled)
    }

    /// A plain count: neither money-marked nor a percentage.
    pub fn is_count(&self) -> bool {
        !self.percent && !self.currency
    }

    /// A percentage.
    pub fn is_percent(&self) -> bool {
        self.percent
    }

    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let whole = caps.get(0)?;
        let num = caps.name("num")?.as_str();
        // "1,5" is a decimal comma; "2,500" is a thousands group.
        let digits = if DECIMAL_COMMA.is_match(num) {
            num.replace(',', ".")
        } else {
            num.replace(',', "")
        };
        let base: f64 = digits.parse().ok()?;
        let suffix = caps.name("suffix").map(|m| m.as_str().to_lowercase());
        let multiplier = match suffix.as_deref() {
            Some("k" | "thousand" | "tkr") => 1e3,
            Some("m" | "mm" | "million" | "msek" | "mnok" | "mdkk" | "mkr") => 1e6,
            Some("b" | "bn" | "billion") => 1e9,
            _ => 1.0,
        };
        let value = base * multiplier;
        if !value.is_finite() {
            return None;
        }

        Some(Self {
            value,
            start: whole.start(),
            end: whole.end(),
            currency: caps.name("sym").is_some()
                || caps.name("pre").is_some()
                || caps.name("post").is_some()
                || suffix.as_deref().is_some_and(is_money_suffix),
            scaled: suffix.is_some(),
            percent: caps.name("pct").is_some(),
        })
    }
}

/// Finds every number in the text, in order of occurrence.
pub fn scan_amounts(text: &str) -> Vec<Amount> {
    AMOUNT
        .captures_iter(text)
        .filter_map(|caps| Amount::from_captures(&caps))
        .collect()
}

/// Parses the first number in a short answer such as "$4,000" or "12%".
pub fn parse_amount(text: &str) -> Option<f64> {
    scan_amounts(text).first().map(|amount| amount.value)
}

/// Returns the value of the accepted candidate closest to any keyword match.
pub fn nearest(
    text: &str,
    keyword: &Regex,
    candidates: &[Amount],
    accept: fn(&Amount) -> bool,
) -> Option<f64> {
    nearest_amount(text, keyword, candidates, accept).map(|amount| amount.value)
}

/// Returns the accepted candidate closest to any keyword match.
///
/// Candidates further than [`MAX_KEYWORD_GAP`] are ignored; ties go to the
/// earliest candidate.
pub fn nearest_amount<'a>(
    text: &str,
    keyword: &Regex,
    candidates: &'a [Amount],
    accept: fn(&Amount) -> bool,
) -> Option<&'a Amount> {
    let mut best: Option<(usize, &Amount)> = None;

    for hit in keyword.find_iter(text) {
        for candidate in candidates.iter().filter(|c| accept(c)) {
            let gap = gap_between(hit.start(), hit.end(), candidate);
            if gap > MAX_KEYWORD_GAP {
                continue;
            }
            let closer = match best {
                None => true,
                Some((best_gap, best_candidate)) => {
                    gap < best_gap || (gap == best_gap && candidate.start < best_candidate.start)
                }
            };
            if closer {
                best = Some((gap, candidate));
            }
        }
    }

    best.map(|(_, amount)| amount)
}

fn gap_between(start: usize, end: usize, candidate: &Amount) -> usize {
    if candidate.end <= start {
        start - candidate.end
    } else if candidate.start >= end {
        candidate.start - end
    } else {
        0
    }
}
