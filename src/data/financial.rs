//! Financial records: pricing metrics, unit economics and anchored assumptions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Currencies the extractor can detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar (the default when no marker is present).
    #[default]
    Usd,
    /// Euro.
    Eur,
    /// Pound sterling.
    Gbp,
    /// Swedish krona.
    Sek,
    /// Norwegian krone.
    Nok,
    /// Danish krone.
    Dkk,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Sek => "SEK",
            Self::Nok => "NOK",
            Self::Dkk => "DKK",
        }
    }

    /// Formats an amount with the currency's customary symbol placement.
    pub fn format_amount(self, amount: f64) -> String {
        let rounded = format_grouped(amount);
        match self {
            Self::Usd => format!("${rounded}"),
            Self::Eur => format!("€{rounded}"),
            Self::Gbp => format!("£{rounded}"),
            Self::Sek | Self::Nok | Self::Dkk => format!("{rounded} kr"),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "SEK" => Ok(Self::Sek),
            "NOK" => Ok(Self::Nok),
            "DKK" => Ok(Self::Dkk),
            other => Err(format!("unsupported currency: {other}")),
        }
    }
}

/// Groups the integer part of an amount with thousands separators.
fn format_grouped(amount: f64) -> String {
    let whole = amount.round().abs() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0.0 && whole > 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Business model label. Classification always yields exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessModelType {
    /// Consumer subscriptions priced per user.
    B2c,
    /// Recurring software subscriptions (the default).
    #[default]
    Saas,
    /// Large annual contracts.
    Enterprise,
    /// Take rate on transactions between two sides.
    Marketplace,
    /// Fee on assets under management.
    Aum,
    /// Per-project or per-deal fees.
    Project,
}

impl BusinessModelType {
    /// All labels in classification priority order, default last.
    pub const ALL: [Self; 6] = [
        Self::Aum,
        Self::Project,
        Self::Marketplace,
        Self::Enterprise,
        Self::B2c,
        Self::Saas,
    ];

    /// Canonical phrase that the classifier maps back to this label.
    pub fn descriptor(self) -> &'static str {
        match self {
            Self::B2c => "B2C consumer subscription priced per user",
            Self::Saas => "SaaS subscription",
            Self::Enterprise => "enterprise contracts (ACV)",
            Self::Marketplace => "marketplace take rate",
            Self::Aum => "fee on assets under management (AUM)",
            Self::Project => "project fee per engagement",
        }
    }
}

impl fmt::Display for BusinessModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::B2c => "b2c",
            Self::Saas => "saas",
            Self::Enterprise => "enterprise",
            Self::Marketplace => "marketplace",
            Self::Aum => "aum",
            Self::Project => "project",
        };
        write!(f, "{label}")
    }
}

/// Where the populated pricing figures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// At least one figure was read from the narrative or responses.
    Extracted,
    /// The only figure came from a previously user-provided anchor.
    Anchored,
    /// No figures could be found.
    None,
}

/// Pricing figures extracted from the business-model narrative.
///
/// Absent fields mean "unknown", never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingMetrics {
    /// Detected currency.
    pub currency: Currency,
    /// Classified business model.
    pub business_model_type: BusinessModelType,
    /// Average monthly revenue per customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_monthly_revenue: Option<f64>,
    /// Current customer count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_customers: Option<f64>,
    /// Current monthly recurring revenue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_mrr: Option<f64>,
    /// Customer lifetime value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ltv: Option<f64>,
    /// Average deal or contract size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_deal_size: Option<f64>,
    /// Annual AUM fee in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aum_fee_percent: Option<f64>,
    /// Total assets under management.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aum_total: Option<f64>,
    /// One-off setup fee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_fee: Option<f64>,
    /// Take rate in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_fee_percent: Option<f64>,
    /// Average transaction value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_transaction_value: Option<f64>,
    /// Derived: business model is B2C.
    pub is_b2c: bool,
    /// Derived: business model is transaction based.
    pub is_transaction_based: bool,
    /// Provenance of the populated figures.
    pub data_source: DataSource,
}

impl PricingMetrics {
    /// Creates an empty record for a currency and model; derived flags are set.
    pub fn new(currency: Currency, business_model_type: BusinessModelType) -> Self {
        Self {
            currency,
            business_model_type,
            avg_monthly_revenue: None,
            current_customers: None,
            current_mrr: None,
            ltv: None,
            avg_deal_size: None,
            aum_fee_percent: None,
            aum_total: None,
            setup_fee: None,
            transaction_fee_percent: None,
            avg_transaction_value: None,
            is_b2c: business_model_type == BusinessModelType::B2c,
            is_transaction_based: business_model_type == BusinessModelType::Marketplace,
            data_source: DataSource::None,
        }
    }

    /// Returns true when no figure is populated.
    pub fn is_empty(&self) -> bool {
        [
            self.avg_monthly_revenue,
            self.current_customers,
            self.current_mrr,
            self.ltv,
            self.avg_deal_size,
            self.aum_fee_percent,
            self.aum_total,
            self.setup_fee,
            self.transaction_fee_percent,
            self.avg_transaction_value,
        ]
        .iter()
        .all(Option::is_none)
    }

    /// Renders the record as a one-paragraph narrative.
    ///
    /// Feeding the result back through business-model classification yields
    /// the same `business_model_type`.
    pub fn describe(&self) -> String {
        let c = self.currency;
        let mut parts = vec![format!(
            "Business model: {}.",
            self.business_model_type.descriptor()
        )];
        if let Some(v) = self.aum_total {
            parts.push(format!("Assets managed: {}.", c.format_amount(v)));
        }
        if let Some(v) = self.aum_fee_percent {
            parts.push(format!("Annual rate: {v}%."));
        }
        if let Some(v) = self.avg_monthly_revenue {
            parts.push(format!("Average revenue: {} monthly.", c.format_amount(v)));
        }
        if let Some(v) = self.current_customers {
            parts.push(format!("Customer count: {v}."));
        }
        if let Some(v) = self.current_mrr {
            parts.push(format!("Recurring revenue: {} monthly.", c.format_amount(v)));
        }
        if let Some(v) = self.ltv {
            parts.push(format!("Lifetime value: {}.", c.format_amount(v)));
        }
        if let Some(v) = self.avg_deal_size {
            parts.push(format!("Average size: {}.", c.format_amount(v)));
        }
        if let Some(v) = self.setup_fee {
            parts.push(format!("Onboarding charge: {}.", c.format_amount(v)));
        }
        if let Some(v) = self.transaction_fee_percent {
            parts.push(format!("Rate per order: {v}%."));
        }
        if let Some(v) = self.avg_transaction_value {
            parts.push(format!("Average order: {}.", c.format_amount(v)));
        }
        parts.join(" ")
    }
}

/// Core unit economics; every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitEconomics {
    /// Customer lifetime value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ltv: Option<f64>,
    /// Customer acquisition cost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cac: Option<f64>,
    /// LTV divided by CAC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ltv_cac_ratio: Option<f64>,
    /// Months to recover CAC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payback_months: Option<f64>,
    /// Gross margin in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_margin: Option<f64>,
    /// Monthly churn in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_churn: Option<f64>,
}

/// Provenance of an anchored assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssumptionSource {
    /// Read directly from the founder's own text or answers.
    UserProvided,
    /// Produced by the external estimation service.
    AiEstimated,
    /// Taken from the static per-stage table.
    FallbackDefault,
}

impl fmt::Display for AssumptionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserProvided => write!(f, "user_provided"),
            Self::AiEstimated => write!(f, "ai_estimated"),
            Self::FallbackDefault => write!(f, "fallback_default"),
        }
    }
}

/// An anchored value tagged with the tier that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchoredValue {
    /// Directly extracted.
    UserProvided(f64),
    /// Estimated by the external collaborator.
    AiEstimated(f64),
    /// Static default; `None` when the table has no entry.
    FallbackDefault(Option<f64>),
}

impl AnchoredValue {
    /// The tier that produced the value.
    pub fn source(self) -> AssumptionSource {
        match self {
            Self::UserProvided(_) => AssumptionSource::UserProvided,
            Self::AiEstimated(_) => AssumptionSource::AiEstimated,
            Self::FallbackDefault(_) => AssumptionSource::FallbackDefault,
        }
    }

    /// The numeric value, if any.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::UserProvided(v) | Self::AiEstimated(v) => Some(v),
            Self::FallbackDefault(v) => v,
        }
    }
}

/// The single headline metric for a company, with provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    into = "AnchoredAssumptionsRecord",
    try_from = "AnchoredAssumptionsRecord"
)]
pub struct AnchoredAssumptions {
    /// Label of the primary metric (e.g. "Average contract value").
    pub primary_metric_label: String,
    /// Value and the tier that produced it.
    pub value: AnchoredValue,
    /// Currency of the value.
    pub currency: Currency,
}

impl AnchoredAssumptions {
    /// The tier that produced the value.
    pub fn source(&self) -> AssumptionSource {
        self.value.source()
    }

    /// The value, if any.
    pub fn primary_metric_value(&self) -> Option<f64> {
        self.value.value()
    }
}

/// Flat wire form of [`AnchoredAssumptions`].
#[derive(Serialize, Deserialize)]
struct AnchoredAssumptionsRecord {
    primary_metric_label: String,
    primary_metric_value: Option<f64>,
    currency: Currency,
    source: AssumptionSource,
}

impl From<AnchoredAssumptions> for AnchoredAssumptionsRecord {
    fn from(a: AnchoredAssumptions) -> Self {
        Self {
            source: a.value.source(),
            primary_metric_value: a.value.value(),
            primary_metric_label: a.primary_metric_label,
            currency: a.currency,
        }
    }
}

impl TryFrom<AnchoredAssumptionsRecord> for AnchoredAssumptions {
    type Error = String;

    fn try_from(r: AnchoredAssumptionsRecord) -> Result<Self, Self::Error> {
        let value = match (r.source, r.primary_metric_value) {
            (AssumptionSource::UserProvided, Some(v)) => AnchoredValue::UserProvided(v),
            (AssumptionSource::AiEstimated, Some(v)) => AnchoredValue::AiEstimated(v),
            (AssumptionSource::FallbackDefault, v) => AnchoredValue::FallbackDefault(v),
            (source, None) => {
                return Err(format!("{source} assumption requires a primary_metric_value"))
            }
        };
        Ok(Self {
            primary_metric_label: r.primary_metric_label,
            value,
            currency: r.currency,
        })
    }
}
