//! Shared display formatting for CLI reports.
//!
//! Every renderer is a pure function returning the text to print, so the
//! layout can be unit tested without capturing stdout.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::analysis::{
    BlindSpot, BlindSpotSeverity, DimensionScore, EvidenceChecklistResult, MoatScores,
    PainAnalysis,
};
use crate::data::financial::{AnchoredAssumptions, PricingMetrics, UnitEconomics};
use crate::data::yaml::to_yaml;
use crate::data::OutputFormat;
use crate::memo::MemoReport;

/// Prints `value` as JSON or YAML, or through `render` for text output.
pub(crate) fn emit<T: Serialize>(
    value: &T,
    format: OutputFormat,
    render: impl FnOnce(&T) -> String,
) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render(value)),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(value).context("Failed to serialize report to JSON")?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = to_yaml(value).context("Failed to serialize report to YAML")?;
            println!("{yaml}");
        }
    }
    Ok(())
}

/// Returns an ANSI-colored severity label with fixed-width padding.
pub(crate) fn format_severity_label(severity: BlindSpotSeverity) -> &'static str {
    match severity {
        BlindSpotSeverity::Warning => "\x1b[33mWARNING\x1b[0m",
        BlindSpotSeverity::Caution => "\x1b[36mCAUTION\x1b[0m",
    }
}

/// Renders a 0-10 score as a ten-cell bar.
pub(crate) fn score_bar(score: u8) -> String {
    let filled = usize::from(score.min(10));
    format!("{}{}", "\u{2588}".repeat(filled), "\u{2591}".repeat(10 - filled))
}

fn dimension_line(dimension: &DimensionScore) -> String {
    let mut line = format!(
        "  {:<18} {} {:>2}/10",
        dimension.name,
        score_bar(dimension.score),
        dimension.score
    );
    if let Some(evidence) = &dimension.evidence {
        line.push_str(&format!("  (\"{evidence}\")"));
    }
    line
}

/// Renders a pain analysis.
pub(crate) fn format_pain(pain: &PainAnalysis) -> String {
    let mut out = format!(
        "\u{1f525} Pain: {}/100 ({})\n   {}\n",
        pain.overall_score,
        pain.heat,
        pain.heat.description()
    );
    for dimension in pain.dimensions() {
        out.push_str(&dimension_line(dimension));
        out.push('\n');
    }
    for tip in &pain.suggestions {
        out.push_str(&format!("  \u{1f4a1} {tip}\n"));
    }
    out
}

/// Renders an evidence checklist.
pub(crate) fn format_evidence(result: &EvidenceChecklistResult) -> String {
    let mut out = format!(
        "\u{1f4cb} Evidence: grade {} ({}/{})\n",
        result.grade, result.detected_count, result.total_count
    );
    for item in &result.items {
        if item.detected {
            out.push_str(&format!("  \u{2705} {}\n", item.label));
        } else {
            out.push_str(&format!("  \u{2b1c} {}: {}\n", item.label, item.hint));
        }
    }
    out
}

/// Renders blind spots, one per line with its suggestion beneath.
pub(crate) fn format_blind_spots(spots: &[BlindSpot]) -> String {
    if spots.is_empty() {
        return "\u{2705} No blind spots found\n".to_string();
    }
    let mut out = String::new();
    for spot in spots {
        out.push_str(&format!(
            "  {} [{}] {}\n",
            format_severity_label(spot.severity),
            spot.rule_id,
            spot.message
        ));
        if let Some(matched) = &spot.matched_text {
            out.push_str(&format!("           matched: \"{matched}\"\n"));
        }
        out.push_str(&format!("           \u{2192} {}\n", spot.suggestion));
    }
    out
}

/// Renders moat scores.
pub(crate) fn format_moat(moat: &MoatScores) -> String {
    let mut out = format!("\u{1f3f0} Moat: {:.1}/10\n", moat.overall_score);
    for dimension in [
        &moat.network_effects,
        &moat.switching_costs,
        &moat.proprietary_data,
        &moat.scale_economies,
        &moat.brand,
    ] {
        out.push_str(&dimension_line(dimension));
        out.push('\n');
    }
    out
}

/// Renders pricing metrics followed by unit economics.
pub(crate) fn format_financials(pricing: &PricingMetrics, unit: &UnitEconomics) -> String {
    let c = pricing.currency;
    let mut out = format!(
        "\u{1f4b0} Pricing: {} in {} (source: {:?})\n",
        pricing.business_model_type,
        c.code(),
        pricing.data_source
    );
    let money = |label: &str, value: Option<f64>| {
        value.map(|v| format!("  {label:<22} {}\n", c.format_amount(v)))
    };
    let plain = |label: &str, value: Option<f64>, suffix: &str| {
        value.map(|v| format!("  {label:<22} {v}{suffix}\n"))
    };

    let lines = [
        money("Monthly revenue/cust.", pricing.avg_monthly_revenue),
        plain("Customers", pricing.current_customers, ""),
        money("MRR", pricing.current_mrr),
        money("LTV", pricing.ltv.or(unit.ltv)),
        money("Average deal size", pricing.avg_deal_size),
        money("AUM", pricing.aum_total),
        plain("AUM fee", pricing.aum_fee_percent, "%"),
        money("Setup fee", pricing.setup_fee),
        plain("Take rate", pricing.transaction_fee_percent, "%"),
        money("Avg transaction", pricing.avg_transaction_value),
        money("CAC", unit.cac),
        plain("LTV:CAC", unit.ltv_cac_ratio, "x"),
        plain("Payback", unit.payback_months, " months"),
        plain("Gross margin", unit.gross_margin, "%"),
        plain("Monthly churn", unit.monthly_churn, "%"),
    ];
    for line in lines.into_iter().flatten() {
        out.push_str(&line);
    }
    out
}

/// Renders the resolved primary metric.
pub(crate) fn format_anchored(anchored: &AnchoredAssumptions) -> String {
    let value = anchored
        .primary_metric_value()
        .map_or_else(|| "unknown".to_string(), |v| anchored.currency.format_amount(v));
    format!(
        "\u{2693} {}: {} ({})\n",
        anchored.primary_metric_label,
        value,
        anchored.source()
    )
}

/// Renders a full memo report.
pub(crate) fn format_memo_report(report: &MemoReport) -> String {
    let company = &report.company;
    let mut out = format!(
        "\n\u{1f4dd} {} ({}, {})\n\n",
        if company.name.is_empty() { "Unnamed company" } else { company.name.as_str() },
        if company.category.is_empty() { "uncategorized" } else { company.category.as_str() },
        company.stage
    );

    if let Some(pain) = &report.pain {
        out.push_str(&format_pain(pain));
        out.push('\n');
    }

    for section in &report.sections {
        out.push_str(&format!("\u{2500}\u{2500} {} \u{2500}\u{2500}\n", section.section));
        if let Some(evidence) = &section.evidence {
            out.push_str(&format_evidence(evidence));
        }
        out.push_str(&format_blind_spots(&section.blind_spots));
        out.push('\n');
    }

    out.push_str(&format_moat(&report.moat));
    out.push('\n');
    out.push_str(&format_financials(&report.pricing, &report.unit_economics));
    out.push('\n');
    out.push_str(&format_anchored(&report.anchored_assumptions));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze_evidence, analyze_pain};
    use crate::data::analysis::BlindSpotType;
    use crate::data::financial::{AnchoredValue, BusinessModelType, Currency};
    use crate::patterns::SectionKey;

    // ── severity / bars ────────────────────────────────────────────

    #[test]
    fn severity_labels_are_colored() {
        assert!(format_severity_label(BlindSpotSeverity::Warning).contains("WARNING"));
        assert!(format_severity_label(BlindSpotSeverity::Caution).starts_with("\x1b[36m"));
    }

    #[test]
    fn score_bar_is_ten_cells() {
        assert_eq!(score_bar(0).chars().count(), 10);
        assert_eq!(score_bar(7).chars().filter(|c| *c == '\u{2588}').count(), 7);
        assert_eq!(score_bar(12).chars().count(), 10);
    }

    // ── renderers ──────────────────────────────────────────────────

    #[test]
    fn pain_lists_all_dimensions() {
        let text = format_pain(&analyze_pain("It is annoying."));
        for name in ["urgency", "frequency", "willingness", "alternatives"] {
            assert!(text.contains(name), "missing {name}");
        }
    }

    #[test]
    fn evidence_shows_hints_for_missing_items() {
        let Some(result) = analyze_evidence("", SectionKey::Traction) else {
            panic!("traction declares a checklist");
        };
        let text = format_evidence(&result);
        assert!(text.contains("grade D"));
        assert!(text.contains(&result.items[0].hint));
    }

    #[test]
    fn blind_spots_empty_message() {
        assert!(format_blind_spots(&[]).contains("No blind spots"));
    }

    #[test]
    fn blind_spots_show_rule_and_match() {
        let spot = BlindSpot {
            rule_id: "problem.overgeneralization".to_string(),
            spot_type: BlindSpotType::Exaggeration,
            severity: BlindSpotSeverity::Warning,
            message: "Overgeneralization".to_string(),
            suggestion: "Name the segment.".to_string(),
            matched_text: Some("everyone".to_string()),
        };
        let text = format_blind_spots(&[spot]);
        assert!(text.contains("[problem.overgeneralization]"));
        assert!(text.contains("matched: \"everyone\""));
        assert!(text.contains("Name the segment."));
    }

    #[test]
    fn financials_skip_absent_fields() {
        let mut pricing = PricingMetrics::new(Currency::Eur, BusinessModelType::Saas);
        pricing.current_mrr = Some(5000.0);
        let text = format_financials(&pricing, &UnitEconomics::default());
        assert!(text.contains("MRR"));
        assert!(text.contains("€5,000"));
        assert!(!text.contains("CAC"));
    }

    #[test]
    fn anchored_without_value_reads_unknown() {
        let anchored = AnchoredAssumptions {
            primary_metric_label: "Monthly ARPU".to_string(),
            value: AnchoredValue::FallbackDefault(None),
            currency: Currency::Usd,
        };
        assert_eq!(
            format_anchored(&anchored),
            "\u{2693} Monthly ARPU: unknown (fallback_default)\n"
        );
    }
}
