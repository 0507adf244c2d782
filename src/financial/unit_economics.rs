//! Unit economics extraction.

use std::sync::LazyLock;

use regex::Regex;

use super::amounts::{nearest, scan_amounts, Amount};
use crate::data::financial::UnitEconomics;
use crate::patterns::re;

static LTV: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\bltv\b|\bclv\b|lifetime value"));
static CAC: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)\bcac\b|acquisition cost|cost to acquire|cost per acquisition")
});
static PAYBACK: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\bpayback\b|pays back|break[- ]even"));
static GROSS_MARGIN: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)gross margins?|\bmargins?\b"));
static CHURN: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\bchurn"));

static EXPLICIT_RATIO: LazyLock<Regex> = LazyLock::new(|| {
    re(concat!(
        r"(?i)ltv\s*[:/]\s*cac(?:\s+ratio)?\s*(?:of|is|at|=|:)?\s*(?P<after>\d+(?:\.\d+)?)",
        r"|(?P<before>\d+(?:\.\d+)?)\s*(?:x|:\s?1)\s+ltv\s*[:/]\s*cac",
    ))
});

/// Extracts LTV, CAC, payback, gross margin and churn from narrative text.
pub fn extract_unit_economics(text: &str) -> UnitEconomics {
    let amounts = scan_amounts(text);

    let ltv = nearest(text, &LTV, &amounts, Amount::is_monetary);
    let cac = nearest(text, &CAC, &amounts, Amount::is_monetary);

    let ltv_cac_ratio = match (ltv, cac) {
        (Some(ltv), Some(cac)) if cac > 0.0 => Some(round_to_tenth(ltv / cac)),
        _ => explicit_ratio(text),
    };

    UnitEconomics {
        ltv,
        cac,
        ltv_cac_ratio,
        payback_months: nearest(text, &PAYBACK, &amounts, Amount::is_count),
        gross_margin: nearest(text, &GROSS_MARGIN, &amounts, Amount::is_percent),
        monthly_churn: nearest(text, &CHURN, &amounts, Amount::is_percent),
    }
}

fn explicit_ratio(text: &str) -> Option<f64> {
    let caps = EXPLICIT_RATIO.captures(text)?;
    caps.name("after")
        .or_else(|| caps.name("before"))
        .and_then(|m| m.as_str().parse().ok())
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_derived_from_ltv_and_cac() {
        let economics = extract_unit_economics(
            "LTV of $3,600 against a CAC of $900. Payback in 6 months, 78% gross margin, 2% monthly churn.",
        );
        assert_eq!(economics.ltv, Some(3600.0));
        assert_eq!(economics.cac, Some(900.0));
        assert_eq!(economics.ltv_cac_ratio, Some(4.0));
        assert_eq!(economics.payback_months, Some(6.0));
        assert_eq!(economics.gross_margin, Some(78.0));
        assert_eq!(economics.monthly_churn, Some(2.0));
    }

    #[test]
    fn explicit_ratio_is_used_without_figures() {
        let economics = extract_unit_economics("We run at an LTV:CAC of 3.5 today.");
        assert_eq!(economics.ltv, None);
        assert_eq!(economics.ltv_cac_ratio, Some(3.5));

        let economics = extract_unit_economics("A healthy 4x LTV/CAC.");
        assert_eq!(economics.ltv_cac_ratio, Some(4.0));
    }

    #[test]
    fn zero_cac_does_not_divide() {
        let economics = extract_unit_economics("LTV $500, CAC $0");
        assert_eq!(economics.cac, Some(0.0));
        assert_eq!(economics.ltv_cac_ratio, None);
    }

    #[test]
    fn nothing_found_is_default() {
        assert_eq!(extract_unit_economics("We sell software."), UnitEconomics::default());
    }
}
