//! Blind-spot rule tables, one ordered list per section.

use std::sync::LazyLock;

use super::{re, PatternRule, SectionKey, Trigger};
use crate::data::analysis::{BlindSpotSeverity, BlindSpotType};

use BlindSpotSeverity::{Caution, Warning};
use BlindSpotType::{Assumption, Exaggeration, MissingFit, PrematureScaling, Vanity};

/// Returns the ordered blind-spot rules for a section.
pub fn blind_spot_rules(section: SectionKey) -> &'static [PatternRule] {
    match section {
        SectionKey::Problem => &PROBLEM_RULES,
        SectionKey::Solution => &SOLUTION_RULES,
        SectionKey::Market => &MARKET_RULES,
        SectionKey::BusinessModel => &BUSINESS_MODEL_RULES,
        SectionKey::Traction => &TRACTION_RULES,
        SectionKey::Team => &TEAM_RULES,
        SectionKey::Competition => &COMPETITION_RULES,
    }
}

static PROBLEM_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        PatternRule {
            id: "problem.overgeneralization",
            section: SectionKey::Problem,
            trigger: Trigger::Keywords(&[
                "everyone",
                "everybody",
                "all businesses",
                "all companies",
                "every business",
                "every company",
                "nobody",
                "no one",
            ]),
            category: Exaggeration,
            severity: Warning,
            message: "Overgeneralization: a problem that affects everyone is a problem nobody owns",
            suggestion: "Name the specific customer segment that feels this pain most acutely.",
        },
        PatternRule {
            id: "problem.unvalidated_belief",
            section: SectionKey::Problem,
            trigger: Trigger::Keywords(&[
                "we believe",
                "we think",
                "we assume",
                "we feel",
                "we expect",
                "obviously",
                "surely",
            ]),
            category: Assumption,
            severity: Warning,
            message: "Unvalidated assumption: the problem is stated as a belief rather than an observation",
            suggestion: "Replace the belief with what you heard: how many people you asked and what they said.",
        },
        PatternRule {
            id: "problem.hype",
            section: SectionKey::Problem,
            trigger: Trigger::Keywords(&[
                "revolutionary",
                "game-changing",
                "game changer",
                "disruptive",
                "paradigm shift",
                "billion-dollar",
                "unprecedented",
            ]),
            category: Exaggeration,
            severity: Caution,
            message: "Hype language: superlatives describe the opportunity, not the problem",
            suggestion: "Describe the cost of the problem in hours, money or risk instead.",
        },
        PatternRule {
            id: "problem.no_customer_voice",
            section: SectionKey::Problem,
            trigger: Trigger::Absent(re(
                r"(?i)\b(?:interview(?:s|ed)?|spoke (?:to|with)|talked (?:to|with)|survey(?:s|ed)?|customers? (?:told|said))\b",
            )),
            category: MissingFit,
            severity: Caution,
            message: "No customer voice: the problem is not grounded in conversations with customers",
            suggestion: "Add how many potential customers you interviewed and a representative quote.",
        },
    ]
});

static SOLUTION_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        PatternRule {
            id: "solution.technology_first",
            section: SectionKey::Solution,
            trigger: Trigger::Keywords(&[
                "ai-powered",
                "blockchain",
                "cutting-edge",
                "state-of-the-art",
                "innovative technology",
                "next-generation",
            ]),
            category: MissingFit,
            severity: Caution,
            message: "Technology-first framing: the solution leads with technology rather than the customer outcome",
            suggestion: "Start with what the customer can do afterwards that they could not do before.",
        },
        PatternRule {
            id: "solution.all_in_one",
            section: SectionKey::Solution,
            trigger: Trigger::Keywords(&[
                "all-in-one",
                "one-stop shop",
                "everything you need",
                "for everyone",
                "any industry",
            ]),
            category: Exaggeration,
            severity: Warning,
            message: "Unfocused scope: an all-in-one solution is hard to build and harder to sell",
            suggestion: "Pick the single workflow you solve best and lead with it.",
        },
        PatternRule {
            id: "solution.assumed_adoption",
            section: SectionKey::Solution,
            trigger: Trigger::Keywords(&[
                "users will love",
                "customers will love",
                "will definitely",
                "no doubt",
                "we believe",
                "we think",
            ]),
            category: Assumption,
            severity: Warning,
            message: "Assumed adoption: customer enthusiasm is predicted rather than demonstrated",
            suggestion: "Cite pilot usage, feedback or retention from real users.",
        },
    ]
});

static MARKET_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        PatternRule {
            id: "market.top_down",
            section: SectionKey::Market,
            trigger: Trigger::Pattern(re(
                r"(?i)\b\d+(?:\.\d+)?\s*(?:%|percent) of (?:the |a |this )?(?:[$€£]?\d|global|total|entire|worldwide|whole)",
            )),
            category: Assumption,
            severity: Warning,
            message: "Top-down sizing: capturing a small percentage of a huge market is not a go-to-market plan",
            suggestion: "Size the market bottom-up: number of reachable customers times your price.",
        },
        PatternRule {
            id: "market.inflated_size",
            section: SectionKey::Market,
            trigger: Trigger::Keywords(&[
                "trillion",
                "massive market",
                "huge market",
                "every consumer",
                "limitless",
            ]),
            category: Exaggeration,
            severity: Caution,
            message: "Inflated market size: very large numbers read as a lack of focus",
            suggestion: "Lead with the serviceable market you can reach in the next 24 months.",
        },
        PatternRule {
            id: "market.early_expansion",
            section: SectionKey::Market,
            trigger: Trigger::Pattern(re(
                r"\b(?:[Ee]xpand|[Ee]xpanding|[Ll]aunch|[Ll]aunching|[Ee]nter|[Ee]ntering)\s+(?:in|into|to)\s+(?:the\s+)?(?:US|EU|UK|APAC|LATAM|[A-Z][a-z]+)\b",
            )),
            category: PrematureScaling,
            severity: Caution,
            message: "Premature geographic expansion: new markets are planned before the first one is won",
            suggestion: "Show dominance in the beachhead market before describing expansion.",
        },
    ]
});

static BUSINESS_MODEL_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        PatternRule {
            id: "business_model.deferred_monetization",
            section: SectionKey::BusinessModel,
            trigger: Trigger::Keywords(&[
                "free forever",
                "monetize later",
                "monetise later",
                "figure out monetization",
                "once we have scale",
                "ads later",
            ]),
            category: Assumption,
            severity: Warning,
            message: "Deferred monetization: revenue is postponed until after scale",
            suggestion: "Test willingness to pay now, even with a small paid pilot.",
        },
        PatternRule {
            id: "business_model.scale_before_fit",
            section: SectionKey::BusinessModel,
            trigger: Trigger::Keywords(&[
                "hire aggressively",
                "scale the team",
                "national rollout",
                "international expansion",
                "global rollout",
            ]),
            category: PrematureScaling,
            severity: Warning,
            message: "Scaling before fit: growth spending is planned before the model is proven",
            suggestion: "Tie each hiring or expansion step to a unit-economics milestone.",
        },
        PatternRule {
            id: "business_model.guessed_price",
            section: SectionKey::BusinessModel,
            trigger: Trigger::Keywords(&[
                "we will charge",
                "we plan to charge",
                "could charge",
                "might charge",
                "willing to pay around",
            ]),
            category: Assumption,
            severity: Caution,
            message: "Unvalidated price point: pricing is planned but not tested",
            suggestion: "Report what customers have actually paid or committed to pay.",
        },
    ]
});

static TRACTION_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        PatternRule {
            id: "traction.vanity_metric",
            section: SectionKey::Traction,
            trigger: Trigger::Keywords(&[
                "downloads",
                "page views",
                "pageviews",
                "followers",
                "impressions",
                "likes",
                "signups",
                "sign-ups",
                "waitlist",
                "registered users",
            ]),
            category: Vanity,
            severity: Caution,
            message: "Vanity metric: audience size does not show that anyone pays or stays",
            suggestion: "Report paying customers, revenue, or retention alongside reach numbers.",
        },
        PatternRule {
            id: "traction.projection",
            section: SectionKey::Traction,
            trigger: Trigger::Pattern(re(
                r"(?i)\b(?:will|expect to|expected to|projected to|on track to)\s+(?:reach|hit|achieve|have|generate)\b",
            )),
            category: Assumption,
            severity: Caution,
            message: "Projection presented as traction: future numbers are not evidence",
            suggestion: "Separate what has happened from what you forecast.",
        },
        PatternRule {
            id: "traction.scale_spend",
            section: SectionKey::Traction,
            trigger: Trigger::Keywords(&[
                "raise to scale",
                "hire a sales team",
                "expand internationally",
                "scale marketing",
                "paid acquisition at scale",
            ]),
            category: PrematureScaling,
            severity: Warning,
            message: "Premature scaling: spend is planned before repeatable acquisition is shown",
            suggestion: "Show one channel with a known CAC before scaling spend.",
        },
        PatternRule {
            id: "traction.hockey_stick",
            section: SectionKey::Traction,
            trigger: Trigger::Keywords(&[
                "exponential",
                "viral",
                "hockey stick",
                "explosive growth",
            ]),
            category: Exaggeration,
            severity: Caution,
            message: "Growth hyperbole: adjectives instead of growth rates",
            suggestion: "Give month-over-month growth with the time window it covers.",
        },
    ]
});

static TEAM_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        PatternRule {
            id: "team.no_track_record",
            section: SectionKey::Team,
            trigger: Trigger::Absent(re(
                r"\b(?:[Ff]ounded|[Cc]o-founded|[Bb]uilt|[Ll]ed|[Ss]caled|[Ss]old|[Ee]xited|[Ll]aunched|[Mm]anaged|[Gg]rew)\b",
            )),
            category: MissingFit,
            severity: Warning,
            message: "No prior execution evidence: the team section does not say what the founders have built, led or scaled",
            suggestion: "Add one concrete past achievement per founder, with a number.",
        },
        PatternRule {
            id: "team.passion_over_proof",
            section: SectionKey::Team,
            trigger: Trigger::Keywords(&["passionate", "passion", "dream", "always wanted"]),
            category: MissingFit,
            severity: Caution,
            message: "Passion over proof: enthusiasm is not founder-market fit",
            suggestion: "Explain the unfair insight or access the team has in this market.",
        },
        PatternRule {
            id: "team.missing_roles",
            section: SectionKey::Team,
            trigger: Trigger::Keywords(&[
                "will hire",
                "plan to hire",
                "looking for a cto",
                "need a technical co-founder",
                "outsourced development",
            ]),
            category: MissingFit,
            severity: Caution,
            message: "Key roles missing: critical capabilities sit outside the founding team",
            suggestion: "Show how the gap is covered today (advisor, contractor, committed hire).",
        },
    ]
});

static COMPETITION_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        PatternRule {
            id: "competition.no_competition",
            section: SectionKey::Competition,
            trigger: Trigger::Keywords(&[
                "no competition",
                "no competitors",
                "no direct competitors",
                "nobody else",
                "no one else",
            ]),
            category: Exaggeration,
            severity: Warning,
            message: "Claiming no competition: investors read this as no market or no research",
            suggestion: "List the tools and workarounds customers use today, including spreadsheets.",
        },
        PatternRule {
            id: "competition.undifferentiated",
            section: SectionKey::Competition,
            trigger: Trigger::Keywords(&[
                "better, faster",
                "faster and cheaper",
                "better and cheaper",
                "cheaper and better",
                "easier to use",
            ]),
            category: Exaggeration,
            severity: Caution,
            message: "Undifferentiated claim: better-faster-cheaper is what every competitor says",
            suggestion: "Name the structural advantage that competitors cannot copy quickly.",
        },
        PatternRule {
            id: "competition.first_mover",
            section: SectionKey::Competition,
            trigger: Trigger::Keywords(&["first mover", "first-mover", "first to market"]),
            category: Assumption,
            severity: Caution,
            message: "First-mover reliance: being first is rarely a lasting advantage",
            suggestion: "Explain what compounds with time: data, network, or switching costs.",
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{match_rule, Haystack, RuleKind};

    fn fired(section: SectionKey, text: &str) -> Vec<&'static str> {
        let hay = Haystack::new(text);
        blind_spot_rules(section)
            .iter()
            .filter(|rule| match_rule(&hay, rule).is_some())
            .map(|rule| rule.id)
            .collect()
    }

    #[test]
    fn top_down_sizing_detected() {
        let ids = fired(
            SectionKey::Market,
            "If we capture just 1% of the $40B market we win.",
        );
        assert!(ids.contains(&"market.top_down"));
    }

    #[test]
    fn expansion_rule_relies_on_capitalised_place_names() {
        assert!(fired(SectionKey::Market, "Next year we expand into Germany.")
            .contains(&"market.early_expansion"));
        assert!(!fired(SectionKey::Market, "We expand into new verticals.")
            .contains(&"market.early_expansion"));
    }

    #[test]
    fn team_track_record_absence() {
        assert!(fired(SectionKey::Team, "Two passionate engineers.")
            .contains(&"team.no_track_record"));
        assert!(!fired(SectionKey::Team, "Anna led payments at a fintech.")
            .contains(&"team.no_track_record"));
    }

    #[test]
    fn customer_voice_absence_is_regex_kind() {
        let rule = &blind_spot_rules(SectionKey::Problem)[3];
        assert_eq!(rule.id, "problem.no_customer_voice");
        assert_eq!(rule.kind(), RuleKind::Regex);
        assert!(!fired(SectionKey::Problem, "We interviewed 30 clinic owners.")
            .contains(&"problem.no_customer_voice"));
    }
}
