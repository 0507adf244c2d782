//! Anchored-assumption resolution.
//!
//! The headline metric is resolved through three tiers, strictly in order:
//! a value extracted from the founder's own input, a single estimate from
//! an external collaborator, then a static per-stage default.

pub mod defaults;

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::data::financial::{AnchoredAssumptions, AnchoredValue, BusinessModelType, Currency, PricingMetrics};
use crate::data::responses::{CompanyDescriptor, ResponseMap};
use crate::financial::classify_business_model;
use defaults::get_stage_defaults;

/// The headline metric tracked for a business model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryMetric {
    /// SaaS: average monthly revenue per customer.
    AvgMonthlyRevenue,
    /// B2C: monthly average revenue per user.
    MonthlyArpu,
    /// Enterprise: average contract value.
    AvgContractValue,
    /// Marketplace: average transaction value.
    AvgTransactionValue,
    /// AUM: annual fee revenue.
    AnnualFeeRevenue,
    /// Project: average project fee.
    AvgProjectFee,
}

impl PrimaryMetric {
    /// The primary metric of a business model.
    pub fn for_model(model: BusinessModelType) -> Self {
        match model {
            BusinessModelType::Saas => Self::AvgMonthlyRevenue,
            BusinessModelType::B2c => Self::MonthlyArpu,
            BusinessModelType::Enterprise => Self::AvgContractValue,
            BusinessModelType::Marketplace => Self::AvgTransactionValue,
            BusinessModelType::Aum => Self::AnnualFeeRevenue,
            BusinessModelType::Project => Self::AvgProjectFee,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::AvgMonthlyRevenue => "Average monthly revenue per customer",
            Self::MonthlyArpu => "Monthly ARPU",
            Self::AvgContractValue => "Average contract value",
            Self::AvgTransactionValue => "Average transaction value",
            Self::AnnualFeeRevenue => "Annual fee revenue",
            Self::AvgProjectFee => "Average project fee",
        }
    }

    /// Reads the metric from extracted pricing figures.
    pub fn read(self, metrics: &PricingMetrics) -> Option<f64> {
        match self {
            Self::AvgMonthlyRevenue | Self::MonthlyArpu => metrics.avg_monthly_revenue,
            Self::AvgContractValue => metrics.avg_deal_size,
            Self::AvgTransactionValue => metrics.avg_transaction_value,
            Self::AnnualFeeRevenue => match (metrics.aum_total, metrics.aum_fee_percent) {
                (Some(total), Some(fee)) => Some(total * fee / 100.0),
                _ => None,
            },
            Self::AvgProjectFee => metrics.avg_deal_size.or(metrics.setup_fee),
        }
    }

    /// Stores a value into the backing field if it is absent.
    ///
    /// Returns false when the field is already set or the metric is derived.
    pub fn store(self, metrics: &mut PricingMetrics, value: f64) -> bool {
        let slot = match self {
            Self::AvgMonthlyRevenue | Self::MonthlyArpu => &mut metrics.avg_monthly_revenue,
            Self::AvgContractValue | Self::AvgProjectFee => &mut metrics.avg_deal_size,
            Self::AvgTransactionValue => &mut metrics.avg_transaction_value,
            Self::AnnualFeeRevenue => return false,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        true
    }
}

/// What the estimator is asked for.
#[derive(Debug, Clone, Serialize)]
pub struct EstimationRequest {
    /// Label of the metric to estimate.
    pub metric_label: String,
    /// Classified business model.
    pub business_model_type: BusinessModelType,
    /// Currency the estimate must be expressed in.
    pub currency: Currency,
    /// Company identity.
    pub company: CompanyDescriptor,
    /// The founder's questionnaire answers.
    pub responses: ResponseMap,
}

/// External collaborator that estimates a single metric.
pub trait AssumptionEstimator: Send + Sync {
    /// Estimates the requested metric. Called at most once per resolution.
    fn estimate<'a>(
        &'a self,
        request: &'a EstimationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<f64>> + Send + 'a>>;
}

/// Resolves the anchored assumption for a company.
///
/// Never fails: estimator errors and unusable estimates downgrade to the
/// static default tier. With `estimator` set to `None` the estimation tier
/// is skipped. No timeout is imposed here.
pub async fn resolve(
    metrics: Option<&PricingMetrics>,
    responses: &ResponseMap,
    currency: Currency,
    company: &CompanyDescriptor,
    estimator: Option<&dyn AssumptionEstimator>,
) -> AnchoredAssumptions {
    let model = metrics.map_or_else(
        || classify_business_model(&responses.joined_text()),
        |m| m.business_model_type,
    );
    let metric = PrimaryMetric::for_model(model);
    let anchored = |value| AnchoredAssumptions {
        primary_metric_label: metric.label().to_string(),
        value,
        currency,
    };

    if let Some(value) = metrics.and_then(|m| metric.read(m)).filter(|v| usable(*v)) {
        debug!(metric = metric.label(), value, "Using user-provided value");
        return anchored(AnchoredValue::UserProvided(value));
    }

    if let Some(estimator) = estimator {
        let request = EstimationRequest {
            metric_label: metric.label().to_string(),
            business_model_type: model,
            currency,
            company: company.clone(),
            responses: responses.clone(),
        };
        info!(metric = metric.label(), model = %model, "Requesting estimate");
        match estimator.estimate(&request).await {
            Ok(value) if usable(value) => {
                debug!(value, "Using estimated value");
                return anchored(AnchoredValue::AiEstimated(value));
            }
            Ok(value) => warn!(value, "Discarding unusable estimate"),
            Err(e) => warn!("Estimation failed: {e:#}"),
        }
    }

    let fallback = get_stage_defaults().lookup(company.stage, model);
    debug!(stage = %company.stage, model = %model, ?fallback, "Using stage default");
    anchored(AnchoredValue::FallbackDefault(fallback))
}

fn usable(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
