//! Evidence checklist tables, one ordered list per section.

use std::sync::LazyLock;

use super::{re, SectionKey, Trigger};

/// One checklist item with its own detection trigger.
#[derive(Debug)]
pub struct EvidenceRule {
    /// Stable item key.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    /// What evidence would satisfy the item.
    pub hint: &'static str,
    /// Detection trigger.
    pub trigger: Trigger,
}

/// Returns the ordered evidence items for a section.
pub fn evidence_rules(section: SectionKey) -> &'static [EvidenceRule] {
    match section {
        SectionKey::Problem => &PROBLEM_EVIDENCE,
        SectionKey::Solution => &SOLUTION_EVIDENCE,
        SectionKey::Market => &MARKET_EVIDENCE,
        SectionKey::BusinessModel => &BUSINESS_MODEL_EVIDENCE,
        SectionKey::Traction => &TRACTION_EVIDENCE,
        SectionKey::Team => &TEAM_EVIDENCE,
        SectionKey::Competition => &COMPETITION_EVIDENCE,
    }
}

static PROBLEM_EVIDENCE: LazyLock<Vec<EvidenceRule>> = LazyLock::new(|| {
    vec![
        EvidenceRule {
            key: "customer_interviews",
            label: "Customer interviews",
            hint: "Say how many potential customers you interviewed.",
            trigger: Trigger::Pattern(re(
                r"(?i)\b\d+\+?\s+(?:customer |user |buyer |founder )?(?:interviews|conversations|calls)\b|\binterview(?:s|ed)\b",
            )),
        },
        EvidenceRule {
            key: "quantified_pain",
            label: "Quantified cost of the problem",
            hint: "Put a number on the pain: hours lost, money spent, error rates.",
            trigger: Trigger::Pattern(re(
                r"(?i)[$€£]\s?\d|\b\d+(?:\.\d+)?\s*(?:%|percent\b|hours?\b|days?\b|minutes?\b)",
            )),
        },
        EvidenceRule {
            key: "frequency",
            label: "How often it happens",
            hint: "State how often customers hit the problem.",
            trigger: Trigger::Keywords(&[
                "every day",
                "daily",
                "weekly",
                "every week",
                "each month",
                "per week",
                "times a",
            ]),
        },
        EvidenceRule {
            key: "current_workaround",
            label: "Current workaround",
            hint: "Describe what customers do today instead.",
            trigger: Trigger::Keywords(&[
                "spreadsheet",
                "manually",
                "workaround",
                "currently use",
                "excel",
                "pen and paper",
            ]),
        },
        EvidenceRule {
            key: "target_segment",
            label: "Specific customer segment",
            hint: "Name the segment that feels the pain most.",
            trigger: Trigger::Pattern(re(
                r"(?i)\b(?:small|mid-sized|mid-market|independent|enterprise|b2b|smb|freelance|solo)\b[^.]{0,40}\b(?:businesses|companies|teams|owners|clinics|agencies|retailers|firms|founders|developers)\b",
            )),
        },
    ]
});

static SOLUTION_EVIDENCE: LazyLock<Vec<EvidenceRule>> = LazyLock::new(|| {
    vec![
        EvidenceRule {
            key: "measurable_outcome",
            label: "Measurable customer outcome",
            hint: "Quantify what improves for the customer.",
            trigger: Trigger::Pattern(re(
                r"(?i)\b(?:reduce[sd]?|cuts?|save[sd]?|increase[sd]?|improve[sd]?)\b[^.]{0,60}\b\d+(?:\.\d+)?\s*(?:%|x\b|hours?\b|percent\b)",
            )),
        },
        EvidenceRule {
            key: "working_product",
            label: "Working product",
            hint: "Mention a prototype, MVP, beta or pilot.",
            trigger: Trigger::Keywords(&["prototype", "mvp", "beta", "pilot", "live product", "launched"]),
        },
        EvidenceRule {
            key: "user_feedback",
            label: "User feedback",
            hint: "Quote feedback or an NPS score from users.",
            trigger: Trigger::Keywords(&["feedback", "testimonial", "nps", "users told", "said that"]),
        },
        EvidenceRule {
            key: "differentiation",
            label: "Differentiation",
            hint: "Explain how it differs from today's alternatives.",
            trigger: Trigger::Keywords(&["unlike", "instead of", "compared to", "only solution", "unique"]),
        },
    ]
});

static MARKET_EVIDENCE: LazyLock<Vec<EvidenceRule>> = LazyLock::new(|| {
    vec![
        EvidenceRule {
            key: "tam_sam_som",
            label: "TAM / SAM / SOM",
            hint: "Break the market into total, serviceable and obtainable.",
            trigger: Trigger::Pattern(re(r"(?i)\b(?:tam|sam|som)\b|addressable|serviceable")),
        },
        EvidenceRule {
            key: "bottom_up",
            label: "Bottom-up sizing",
            hint: "Multiply reachable customers by your price.",
            trigger: Trigger::Pattern(re(
                r"(?i)\b\d[\d,.]*\s*(?:k|m)?\s*(?:customers|businesses|companies|users|clinics|firms)\b[^.]{0,60}(?:×|\bx\b|\*|\btimes\b|\bat\b)\s*[$€£]?\s?\d",
            )),
        },
        EvidenceRule {
            key: "cited_source",
            label: "Cited source",
            hint: "Name where the market numbers come from.",
            trigger: Trigger::Keywords(&["according to", "source:", "report", "gartner", "statista", "census"]),
        },
        EvidenceRule {
            key: "growth_rate",
            label: "Market growth rate",
            hint: "Give the market's growth rate (CAGR).",
            trigger: Trigger::Pattern(re(r"(?i)\bcagr\b|\bgrowing at\b|\bgrowth rate\b|\bgrows?\s+\d")),
        },
    ]
});

static BUSINESS_MODEL_EVIDENCE: LazyLock<Vec<EvidenceRule>> = LazyLock::new(|| {
    vec![
        EvidenceRule {
            key: "price_point",
            label: "Concrete price point",
            hint: "State a price with its billing unit, e.g. $49 per seat per month.",
            trigger: Trigger::Pattern(re(
                r"(?i)[$€£]\s?\d[\d,.]*\s*(?:k|m)?\s*(?:/|per\b|a\b|an\b)\s*(?:month|mo\b|year|yr\b|user|seat|transaction|project|order)",
            )),
        },
        EvidenceRule {
            key: "revenue_model",
            label: "Revenue model",
            hint: "Name how you charge: subscription, take rate, license, fees.",
            trigger: Trigger::Keywords(&[
                "subscription",
                "per seat",
                "transaction fee",
                "commission",
                "license",
                "usage-based",
                "take rate",
                "management fee",
                "retainer",
            ]),
        },
        EvidenceRule {
            key: "acquisition_cost",
            label: "Customer acquisition cost",
            hint: "Estimate what it costs to win one customer.",
            trigger: Trigger::Pattern(re(r"(?i)\bcac\b|acquisition cost|cost to acquire|cost per acquisition")),
        },
        EvidenceRule {
            key: "lifetime_value",
            label: "Customer lifetime value",
            hint: "Estimate what a customer is worth over their lifetime.",
            trigger: Trigger::Pattern(re(r"(?i)\bltv\b|\bclv\b|lifetime value")),
        },
        EvidenceRule {
            key: "gross_margin",
            label: "Gross margin",
            hint: "Give the gross margin per sale.",
            trigger: Trigger::Keywords(&["gross margin", "margin"]),
        },
    ]
});

static TRACTION_EVIDENCE: LazyLock<Vec<EvidenceRule>> = LazyLock::new(|| {
    vec![
        EvidenceRule {
            key: "revenue",
            label: "Revenue",
            hint: "Report MRR, ARR or total revenue.",
            trigger: Trigger::Pattern(re(r"(?i)\b(?:mrr|arr|revenue|sales)\b[^.]{0,30}?[$€£]?\s?\d")),
        },
        EvidenceRule {
            key: "growth",
            label: "Growth rate",
            hint: "Give growth as a percentage over a time window.",
            trigger: Trigger::Pattern(re(
                r"(?i)\b\d+(?:\.\d+)?\s*%\s*(?:mom\b|month[- ]over[- ]month|wow\b|week[- ]over[- ]week|yoy\b|year[- ]over[- ]year|growth)",
            )),
        },
        EvidenceRule {
            key: "paying_customers",
            label: "Paying customers",
            hint: "Say how many customers pay you today.",
            trigger: Trigger::Pattern(re(r"(?i)\b\d[\d,]*\s+(?:paying\s+)?(?:customers|clients|subscribers)\b")),
        },
        EvidenceRule {
            key: "retention",
            label: "Retention",
            hint: "Report retention, churn or repeat purchase rates.",
            trigger: Trigger::Keywords(&["retention", "churn", "repeat purchase", "renewal", "cohort"]),
        },
        EvidenceRule {
            key: "commitments",
            label: "Signed commitments",
            hint: "List LOIs, pre-orders or signed pilots.",
            trigger: Trigger::Pattern(re(
                r"(?i)\blois?\b|letters? of intent|pre-?orders?|signed contracts?|pilot agreements?",
            )),
        },
    ]
});

static TEAM_EVIDENCE: LazyLock<Vec<EvidenceRule>> = LazyLock::new(|| {
    vec![
        EvidenceRule {
            key: "domain_experience",
            label: "Years of domain experience",
            hint: "Give years of experience in this market.",
            trigger: Trigger::Pattern(re(r"(?i)\b\d+\+?\s*years?\b")),
        },
        EvidenceRule {
            key: "prior_venture",
            label: "Prior venture",
            hint: "Mention companies the founders started or exited.",
            trigger: Trigger::Keywords(&["founded", "co-founded", "exited", "acquired by", "previous startup"]),
        },
        EvidenceRule {
            key: "technical_capability",
            label: "Technical capability",
            hint: "Show who builds the product.",
            trigger: Trigger::Pattern(re(r"(?i)\bcto\b|engineer|technical co-?founder|\bphd\b|developer")),
        },
        EvidenceRule {
            key: "full_time",
            label: "Full-time commitment",
            hint: "Confirm the founders work on this full-time.",
            trigger: Trigger::Keywords(&["full-time", "full time"]),
        },
    ]
});

static COMPETITION_EVIDENCE: LazyLock<Vec<EvidenceRule>> = LazyLock::new(|| {
    vec![
        EvidenceRule {
            key: "named_competitors",
            label: "Named competitors",
            hint: "Name the alternatives customers consider.",
            trigger: Trigger::Pattern(re(
                r"(?i)\bvs\.?\s|\bversus\b|\bcompared to\b|\bcompetitors? (?:include|are|like|such as)\b",
            )),
        },
        EvidenceRule {
            key: "advantage",
            label: "Defensible advantage",
            hint: "State the advantage that is hard to copy.",
            trigger: Trigger::Keywords(&["advantage", "moat", "defensib", "patent", "proprietary", "switching cost"]),
        },
        EvidenceRule {
            key: "pricing_comparison",
            label: "Pricing comparison",
            hint: "Compare your price with the alternatives.",
            trigger: Trigger::Keywords(&["cheaper than", "priced at", "costs less", "more expensive"]),
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::Haystack;

    fn detected(section: SectionKey, text: &str) -> Vec<&'static str> {
        let hay = Haystack::new(text);
        evidence_rules(section)
            .iter()
            .filter(|rule| rule.trigger.test(&hay).is_some())
            .map(|rule| rule.key)
            .collect()
    }

    #[test]
    fn problem_interview_counts_detected() {
        let keys = detected(SectionKey::Problem, "We ran 25 customer interviews.");
        assert!(keys.contains(&"customer_interviews"));
    }

    #[test]
    fn commitments_ignore_words_containing_loi() {
        assert!(!detected(SectionKey::Traction, "We exploit a gap.").contains(&"commitments"));
        assert!(detected(SectionKey::Traction, "We hold 3 LOIs.").contains(&"commitments"));
    }

    #[test]
    fn cto_not_matched_inside_director() {
        assert!(!detected(SectionKey::Team, "Former director of sales.")
            .contains(&"technical_capability"));
        assert!(detected(SectionKey::Team, "Our CTO built it.").contains(&"technical_capability"));
    }

    #[test]
    fn price_point_requires_billing_unit() {
        assert!(detected(SectionKey::BusinessModel, "$49 per seat per month")
            .contains(&"price_point"));
        assert!(!detected(SectionKey::BusinessModel, "We raised $49k").contains(&"price_point"));
    }
}
