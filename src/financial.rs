//! Pricing-metric extraction from business-model and traction narratives.
//!
//! Sources are scanned in a fixed order: business-model text, traction
//! text, market text, then questionnaire answers in ascending key order.
//! Structured answers (e.g. `current_mrr`) win over free-text matches.

pub mod amounts;
pub mod business_model;
pub mod currency;
pub mod unit_economics;

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

pub use business_model::classify_business_model;
pub use currency::detect_currency;
pub use unit_economics::extract_unit_economics;

use crate::assumptions::PrimaryMetric;
use crate::data::financial::{
    AnchoredAssumptions, AnchoredValue, BusinessModelType, DataSource, PricingMetrics,
};
use crate::data::responses::ResponseMap;
use crate::patterns::re;
use amounts::{nearest_amount, parse_amount, scan_amounts, Amount};

/// How one pricing field is located.
struct FieldRule {
    /// Structured answer keys, checked in order before the text scan.
    response_keys: &'static [&'static str],
    /// Keywords the number must sit next to.
    keyword: Regex,
    /// Which numbers qualify.
    accept: fn(&Amount) -> bool,
}

impl FieldRule {
    fn new(response_keys: &'static [&'static str], keyword: &str, accept: fn(&Amount) -> bool) -> Self {
        Self {
            response_keys,
            keyword: re(keyword),
            accept,
        }
    }
}

static MRR: LazyLock<FieldRule> = LazyLock::new(|| {
    FieldRule::new(
        &["current_mrr", "mrr"],
        r"(?i)\bmrr\b|monthly recurring revenue|monthly revenue",
        Amount::is_monetary,
    )
});

static ARR: LazyLock<FieldRule> = LazyLock::new(|| {
    FieldRule::new(
        &["current_arr", "arr"],
        r"(?i)\barr\b|annual recurring revenue|annual revenue|run[- ]rate",
        Amount::is_monetary,
    )
});

static MONTHLY_PRICE: LazyLock<FieldRule> = LazyLock::new(|| {
    FieldRule::new(
        &["avg_monthly_revenue", "price_per_month", "monthly_price", "arpu"],
        r"(?i)\barpu\b|\barpa\b|average revenue per (?:user|account|customer)",
        Amount::is_monetary,
    )
});

/// A per-unit qualifier directly after a price: "$49 per seat",
/// "$12/user/mo", "499 kr per month per clinic".
static PER_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    re(concat!(
        r"(?i)^\s?(?:(?:/\s?|(?:per|a)\s+)(?:mo|month)\b\.?\s?)?",
        r"(?:/\s?|(?:per|a|an|each)\s+)(?:active\s+|paying\s+)?",
        r"(?:users?|seats?|customers?|clients?|members?|subscribers?|licen[cs]es?|accounts?",
        r"|households?|locations?|clinics?|stores?|teams?|employees?)\b",
    ))
});

static CUSTOMERS: LazyLock<FieldRule> = LazyLock::new(|| {
    FieldRule::new(
        &["customer_count", "current_customers", "customers"],
        r"(?i)\b(?:customers|clients|users|subscribers|accounts|members)\b",
        Amount::is_count,
    )
});

static LTV: LazyLock<FieldRule> = LazyLock::new(|| {
    FieldRule::new(&["ltv"], r"(?i)\bltv\b|\bclv\b|lifetime value", Amount::is_monetary)
});

static DEAL_SIZE: LazyLock<FieldRule> = LazyLock::new(|| {
    FieldRule::new(
        &["avg_deal_size", "deal_size", "acv", "project_fee"],
        r"(?i)deal size|contract value|\bacv\b|per contract|per deal|average contract|project fee|per project|per engagement",
        Amount::is_monetary,
    )
});

static AUM_TOTAL: LazyLock<FieldRule> = LazyLock::new(|| {
    FieldRule::new(
        &["aum_total", "aum"],
        r"(?i)\baum\b|assets under management",
        Amount::is_monetary,
    )
});

static AUM_FEE: LazyLock<FieldRule> = LazyLock::new(|| {
    FieldRule::new(
        &["aum_fee_percent", "management_fee"],
        r"(?i)\bfees?\b",
        Amount::is_percent,
    )
});

static SETUP_FEE: LazyLock<FieldRule> = LazyLock::new(|| {
    FieldRule::new(
        &["setup_fee"],
        r"(?i)set-?up fee|onboarding fee|implementation fee",
        Amount::is_monetary,
    )
});

static TAKE_RATE: LazyLock<FieldRule> = LazyLock::new(|| {
    FieldRule::new(
        &["take_rate", "transaction_fee_percent"],
        r"(?i)take rate|\bcommission\b|transaction fee|per transaction",
        Amount::is_percent,
    )
});

static ORDER_VALUE: LazyLock<FieldRule> = LazyLock::new(|| {
    FieldRule::new(
        &["avg_transaction_value", "aov"],
        r"(?i)order value|\baov\b|transaction value|basket size|average order|per order",
        Amount::is_monetary,
    )
});

/// Text and answers prepared once for all field lookups.
struct Scan<'a> {
    text: &'a str,
    amounts: Vec<Amount>,
    responses: &'a ResponseMap,
}

impl Scan<'_> {
    fn find(&self, rule: &FieldRule) -> Option<f64> {
        self.answer(rule).or_else(|| self.nearest(rule).map(|amount| amount.value))
    }

    /// First usable structured answer for the rule.
    fn answer(&self, rule: &FieldRule) -> Option<f64> {
        rule.response_keys
            .iter()
            .find_map(|key| self.responses.get(key).and_then(parse_amount))
            .filter(|v| v.is_finite() && *v >= 0.0)
    }

    fn nearest(&self, rule: &FieldRule) -> Option<&Amount> {
        nearest_amount(self.text, &rule.keyword, &self.amounts, rule.accept)
    }

    /// Explicit per-customer monthly price.
    ///
    /// Only amounts with a per-unit qualifier attached, or next to an
    /// ARPU keyword, qualify. Amounts the MRR and ARR rules sit next to
    /// are revenue totals and never prices.
    fn monthly_price(&self) -> Option<f64> {
        if let Some(answer) = self.answer(&MONTHLY_PRICE) {
            return Some(answer);
        }

        let claimed: Vec<usize> = [self.nearest(&MRR), self.nearest(&ARR)]
            .into_iter()
            .flatten()
            .map(|amount| amount.start)
            .collect();
        let unclaimed: Vec<Amount> = self
            .amounts
            .iter()
            .filter(|amount| !claimed.contains(&amount.start))
            .cloned()
            .collect();

        unclaimed
            .iter()
            .find(|amount| {
                amount.is_monetary() && PER_UNIT.is_match(&self.text[amount.end..])
            })
            .or_else(|| {
                nearest_amount(self.text, &MONTHLY_PRICE.keyword, &unclaimed, Amount::is_monetary)
            })
            .map(|amount| amount.value)
    }
}

/// Revenue per customer implied by MRR and a customer count.
fn derived_monthly_price(metrics: &PricingMetrics) -> Option<f64> {
    let mrr = metrics.current_mrr?;
    let customers = metrics.current_customers.filter(|c| *c > 0.0)?;
    Some(mrr / customers)
}

/// Builds the scan text: business model, traction, market, then answers
/// in ascending key order.
pub fn scan_text(
    business_model_text: &str,
    traction_text: &str,
    responses: &ResponseMap,
    market_text: Option<&str>,
) -> String {
    let answers = responses.joined_text();
    crate::text::join_nonblank([
        business_model_text,
        traction_text,
        market_text.unwrap_or_default(),
        answers.as_str(),
    ])
}

/// Extracts pricing metrics from the narrative and answers.
///
/// Never fails; unextractable fields stay absent. A previous anchored
/// value fills the model's primary metric only when it was user-provided.
pub fn extract_pricing_metrics(
    business_model_text: &str,
    traction_text: &str,
    responses: &ResponseMap,
    market_text: Option<&str>,
    previous: Option<&AnchoredAssumptions>,
) -> PricingMetrics {
    let text = scan_text(business_model_text, traction_text, responses, market_text);

    let currency = detect_currency(&text)
        .or_else(|| previous.map(|p| p.currency))
        .unwrap_or_default();
    let model = classify_business_model(&text);

    let scan = Scan {
        text: &text,
        amounts: scan_amounts(&text),
        responses,
    };

    let mut metrics = PricingMetrics::new(currency, model);
    metrics.current_mrr = scan.find(&MRR).or_else(|| scan.find(&ARR).map(|arr| arr / 12.0));
    metrics.current_customers = scan.find(&CUSTOMERS);
    let derived = derived_monthly_price(&metrics);
    metrics.avg_monthly_revenue = scan.monthly_price().or(derived);
    metrics.ltv = scan.find(&LTV);
    metrics.avg_deal_size = scan.find(&DEAL_SIZE);
    metrics.aum_total = scan.find(&AUM_TOTAL);
    if model == BusinessModelType::Aum {
        metrics.aum_fee_percent = scan.find(&AUM_FEE);
    }
    metrics.setup_fee = scan.find(&SETUP_FEE);
    metrics.transaction_fee_percent = scan.find(&TAKE_RATE);
    metrics.avg_transaction_value = scan.find(&ORDER_VALUE);

    metrics.data_source = if !metrics.is_empty() {
        DataSource::Extracted
    } else if fill_from_previous(&mut metrics, previous) {
        DataSource::Anchored
    } else {
        DataSource::None
    };

    debug!(
        currency = %metrics.currency,
        model = %metrics.business_model_type,
        source = ?metrics.data_source,
        "Extracted pricing metrics"
    );
    metrics
}

/// Fills the primary metric from a previous user-provided anchor.
fn fill_from_previous(metrics: &mut PricingMetrics, previous: Option<&AnchoredAssumptions>) -> bool {
    let Some(previous) = previous else {
        return false;
    };
    let AnchoredValue::UserProvided(value) = previous.value else {
        return false;
    };
    let metric = PrimaryMetric::for_model(metrics.business_model_type);
    if previous.primary_metric_label != metric.label() {
        return false;
    }
    metric.store(metrics, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::financial::Currency;

    fn approx(actual: Option<f64>, expected: f64) -> bool {
        actual.is_some_and(|v| (v - expected).abs() < 1e-6)
    }

    #[test]
    fn aum_sentence_is_fully_extracted() {
        let metrics = extract_pricing_metrics(
            "Our AUM is $2.5M with a 1.5% annual fee and 40 clients",
            "",
            &ResponseMap::new(),
            None,
            None,
        );
        assert_eq!(metrics.business_model_type, BusinessModelType::Aum);
        assert_eq!(metrics.currency, Currency::Usd);
        assert!(approx(metrics.aum_total, 2.5e6));
        assert!(approx(metrics.aum_fee_percent, 1.5));
        assert!(approx(metrics.current_customers, 40.0));
        assert_eq!(metrics.data_source, DataSource::Extracted);
    }

    #[test]
    fn swedish_aum_sentence_uses_decimal_comma() {
        let metrics = extract_pricing_metrics(
            "Vi förvaltar AUM på 40 MSEK med en avgift (fee) på 1,5% per år.",
            "",
            &ResponseMap::new(),
            None,
            None,
        );
        assert_eq!(metrics.business_model_type, BusinessModelType::Aum);
        assert_eq!(metrics.currency, Currency::Sek);
        assert!(approx(metrics.aum_total, 40e6));
        assert!(approx(metrics.aum_fee_percent, 1.5));
    }

    #[test]
    fn aum_fee_only_for_aum_model() {
        let metrics = extract_pricing_metrics(
            "SaaS with a 2% fee on upgrades",
            "",
            &ResponseMap::new(),
            None,
            None,
        );
        assert_eq!(metrics.business_model_type, BusinessModelType::Saas);
        assert_eq!(metrics.aum_fee_percent, None);
    }

    #[test]
    fn dollar_beats_euro() {
        let metrics = extract_pricing_metrics(
            "€49 per seat in Europe",
            "We reached $10k MRR",
            &ResponseMap::new(),
            None,
            None,
        );
        assert_eq!(metrics.currency, Currency::Usd);
        assert!(approx(metrics.current_mrr, 10e3));
    }

    // ── monthly price ──────────────────────────────────────────────

    #[test]
    fn mrr_is_not_a_price() {
        let metrics = extract_pricing_metrics(
            "Monthly subscription software.",
            "We have $10k MRR from 50 customers.",
            &ResponseMap::new(),
            None,
            None,
        );
        assert!(approx(metrics.current_mrr, 10e3));
        assert!(approx(metrics.current_customers, 50.0));
        assert!(approx(metrics.avg_monthly_revenue, 200.0));
    }

    #[test]
    fn monthly_revenue_total_is_not_a_price() {
        let metrics = extract_pricing_metrics(
            "Revenue is $10k a month from 50 customers.",
            "",
            &ResponseMap::new(),
            None,
            None,
        );
        assert_eq!(metrics.avg_monthly_revenue, None);
        assert!(approx(metrics.current_customers, 50.0));
    }

    #[test]
    fn per_unit_qualifier_marks_a_price() {
        let cases = [
            ("We charge $49 per seat.", 49.0),
            ("Plans start at $12/user/mo.", 12.0),
            ("Swedish clinics pay 499 kr per month per seat.", 499.0),
            ("An ARPU of $35 across plans.", 35.0),
        ];
        for (text, expected) in cases {
            let metrics = extract_pricing_metrics(text, "", &ResponseMap::new(), None, None);
            assert!(
                approx(metrics.avg_monthly_revenue, expected),
                "{text}: {:?}",
                metrics.avg_monthly_revenue
            );
        }
    }

    #[test]
    fn explicit_price_wins_over_derived() {
        let metrics = extract_pricing_metrics(
            "$30 per user",
            "MRR of $10k from 50 customers",
            &ResponseMap::new(),
            None,
            None,
        );
        assert!(approx(metrics.avg_monthly_revenue, 30.0));
    }

    #[test]
    fn zero_customers_derive_nothing() {
        let responses: ResponseMap = [("customer_count", "0")].into_iter().collect();
        let metrics = extract_pricing_metrics("", "MRR is $5k", &responses, None, None);
        assert_eq!(metrics.avg_monthly_revenue, None);
    }

    #[test]
    fn billion_dollar_market_keeps_kronor() {
        let metrics = extract_pricing_metrics(
            "Swedish clinics pay 499 kr per month per seat.",
            "",
            &ResponseMap::new(),
            Some("It is a billion-dollar opportunity across the Nordics."),
            None,
        );
        assert_eq!(metrics.currency, Currency::Sek);
    }

    #[test]
    fn arr_converts_to_mrr() {
        let metrics = extract_pricing_metrics(
            "Subscription software",
            "ARR of $1.2M",
            &ResponseMap::new(),
            None,
            None,
        );
        assert!(approx(metrics.current_mrr, 100e3));
    }

    #[test]
    fn structured_answers_win_over_text() {
        let responses: ResponseMap = [("current_mrr", "$8,000"), ("customer_count", "25")]
            .into_iter()
            .collect();
        let metrics = extract_pricing_metrics(
            "",
            "MRR is $5k across 12 customers",
            &responses,
            None,
            None,
        );
        assert!(approx(metrics.current_mrr, 8e3));
        assert!(approx(metrics.current_customers, 25.0));
    }

    #[test]
    fn unparseable_answer_falls_back_to_text() {
        let responses: ResponseMap = [("current_mrr", "not sure yet")].into_iter().collect();
        let metrics = extract_pricing_metrics("", "MRR is $5k", &responses, None, None);
        assert!(approx(metrics.current_mrr, 5e3));
    }

    #[test]
    fn market_text_contributes_currency() {
        let metrics = extract_pricing_metrics(
            "per seat pricing",
            "",
            &ResponseMap::new(),
            Some("The Nordic market is worth 4 billion SEK"),
            None,
        );
        assert_eq!(metrics.currency, Currency::Sek);
    }

    #[test]
    fn empty_inputs_have_no_data() {
        let metrics = extract_pricing_metrics("", "", &ResponseMap::new(), None, None);
        assert!(metrics.is_empty());
        assert_eq!(metrics.data_source, DataSource::None);
        assert_eq!(metrics.business_model_type, BusinessModelType::Saas);
        assert_eq!(metrics.currency, Currency::Usd);
        assert!(!metrics.is_b2c);
        assert!(!metrics.is_transaction_based);
    }

    #[test]
    fn previous_currency_used_without_markers() {
        let previous = AnchoredAssumptions {
            primary_metric_label: PrimaryMetric::for_model(BusinessModelType::Saas)
                .label()
                .to_string(),
            value: AnchoredValue::AiEstimated(90.0),
            currency: Currency::Nok,
        };
        let metrics =
            extract_pricing_metrics("per seat", "", &ResponseMap::new(), None, Some(&previous));
        assert_eq!(metrics.currency, Currency::Nok);
        assert_eq!(metrics.avg_monthly_revenue, None);
        assert_eq!(metrics.data_source, DataSource::None);
    }

    #[test]
    fn user_provided_anchor_fills_primary_metric() {
        let previous = AnchoredAssumptions {
            primary_metric_label: PrimaryMetric::for_model(BusinessModelType::Enterprise)
                .label()
                .to_string(),
            value: AnchoredValue::UserProvided(48_000.0),
            currency: Currency::Eur,
        };
        let metrics = extract_pricing_metrics(
            "Enterprise contracts",
            "",
            &ResponseMap::new(),
            None,
            Some(&previous),
        );
        assert_eq!(metrics.avg_deal_size, Some(48_000.0));
        assert_eq!(metrics.data_source, DataSource::Anchored);
        assert_eq!(metrics.currency, Currency::Eur);
    }

    #[test]
    fn derived_flags_follow_model() {
        let metrics =
            extract_pricing_metrics("A marketplace with a 10% take rate", "", &ResponseMap::new(), None, None);
        assert!(metrics.is_transaction_based);
        assert!(approx(metrics.transaction_fee_percent, 10.0));

        let metrics = extract_pricing_metrics("Freemium consumer app", "", &ResponseMap::new(), None, None);
        assert!(metrics.is_b2c);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn model() -> impl Strategy<Value = BusinessModelType> {
            proptest::sample::select(BusinessModelType::ALL.to_vec())
        }

        fn currency() -> impl Strategy<Value = Currency> {
            proptest::sample::select(vec![
                Currency::Usd,
                Currency::Eur,
                Currency::Gbp,
                Currency::Sek,
                Currency::Nok,
                Currency::Dkk,
            ])
        }

        fn field() -> impl Strategy<Value = Option<f64>> {
            proptest::option::of(0.0f64..1e9)
        }

        proptest! {
            #[test]
            fn describe_round_trips_model(
                model in model(),
                currency in currency(),
                mrr in field(),
                customers in field(),
                aum in field(),
                fee in proptest::option::of(0.0f64..100.0),
                deal in field(),
                setup in field(),
                take in proptest::option::of(0.0f64..100.0),
                order in field(),
            ) {
                let mut metrics = PricingMetrics::new(currency, model);
                metrics.current_mrr = mrr;
                metrics.current_customers = customers;
                metrics.aum_total = aum;
                metrics.aum_fee_percent = fee;
                metrics.avg_deal_size = deal;
                metrics.setup_fee = setup;
                metrics.transaction_fee_percent = take;
                metrics.avg_transaction_value = order;
                prop_assert_eq!(classify_business_model(&metrics.describe()), model);
            }

            #[test]
            fn extraction_is_idempotent(bm in ".*", traction in ".*") {
                let responses = ResponseMap::new();
                prop_assert_eq!(
                    extract_pricing_metrics(&bm, &traction, &responses, None, None),
                    extract_pricing_metrics(&bm, &traction, &responses, None, None)
                );
            }
        }
    }
}
