//! Currency detection.

use std::sync::LazyLock;

use regex::Regex;

use crate::data::financial::Currency;
use crate::patterns::{re, FirstMatch};

// The bare word only counts next to a number, so "billion-dollar" is no marker.
static USD: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)\$|\busd\b|\d\s?(?:k|mm?|bn|thousand|million|billion)?\s?(?:us\s)?dollars?\b")
});
static EUR: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)€|\beur\b|\beuros?\b"));
static GBP: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)£|\bgbp\b|\bpounds? sterling\b"));
static SEK: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\b[mkt]?sek\b|\b(?:md|m|t)kr\b"));
static NOK: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\bnok\b"));
static DKK: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\bdkk\b"));
static KRONA: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)(?:^|[^a-zA-Z])(?:kr|kronor|krona|krone|kroner)\b"));

static SWEDISH: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\b(?:swed(?:en|ish)|stockholm|gothenburg|göteborg|malmö|svensk)"));
static NORWEGIAN: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\b(?:norw(?:ay|egian)|oslo|bergen|trondheim|norsk|norge)"));
static DANISH: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\b(?:denmark|danish|copenhagen|københavn|aarhus|dansk)"));

fn has_usd(text: &str) -> bool {
    USD.is_match(text)
}

fn has_eur(text: &str) -> bool {
    EUR.is_match(text)
}

fn has_gbp(text: &str) -> bool {
    GBP.is_match(text)
}

fn has_sek(text: &str) -> bool {
    SEK.is_match(text) || (KRONA.is_match(text) && SWEDISH.is_match(text))
}

fn has_nok(text: &str) -> bool {
    NOK.is_match(text) || (KRONA.is_match(text) && NORWEGIAN.is_match(text))
}

fn has_dkk(text: &str) -> bool {
    DKK.is_match(text) || (KRONA.is_match(text) && DANISH.is_match(text))
}

fn has_krona(text: &str) -> bool {
    KRONA.is_match(text)
}

static CURRENCY_RULES: &[(fn(&str) -> bool, Option<Currency>)] = &[
    (has_usd, Some(Currency::Usd)),
    (has_eur, Some(Currency::Eur)),
    (has_gbp, Some(Currency::Gbp)),
    (has_sek, Some(Currency::Sek)),
    (has_nok, Some(Currency::Nok)),
    (has_dkk, Some(Currency::Dkk)),
    (has_krona, Some(Currency::Sek)),
];

static CLASSIFIER: FirstMatch<Option<Currency>> = FirstMatch::new(CURRENCY_RULES, None);

/// Returns the highest-priority currency marked in the text, if any.
pub fn detect_currency(text: &str) -> Option<Currency> {
    CLASSIFIER.classify(text)
}
