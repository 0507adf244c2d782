//! Business-model classification.

use std::sync::LazyLock;

use regex::Regex;

use crate::data::financial::BusinessModelType;
use crate::patterns::{re, FirstMatch};

static AUM: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)\baum\b|assets under management|wealth management|management fee|portfolio management")
});

static PROJECT: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)project fee|per project|per engagement|\bconsult(?:ing|ancy)\b|\bagency\b|\bretainer\b|fixed[- ]fee|billable hours")
});

static MARKETPLACE: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)marketplace|take rate|\bcommission\b|\bgmv\b|two-sided|buyers and sellers|transaction fee|per transaction")
});

static ENTERPRISE: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)\benterprise\b|\bacv\b|annual contract|fortune 500|large (?:organi[sz]ations|companies|corporations)|site licen[cs]e")
});

static CONSUMER: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)\bb2c\b|\bd2c\b|\bconsumers?\b|direct[- ]to[- ]consumer|\bapp store\b|freemium|households")
});

fn is_aum(text: &str) -> bool {
    AUM.is_match(text)
}

fn is_project(text: &str) -> bool {
    PROJECT.is_match(text)
}

fn is_marketplace(text: &str) -> bool {
    MARKETPLACE.is_match(text)
}

fn is_enterprise(text: &str) -> bool {
    ENTERPRISE.is_match(text)
}

fn is_consumer(text: &str) -> bool {
    CONSUMER.is_match(text)
}

static BUSINESS_MODEL_RULES: &[(fn(&str) -> bool, BusinessModelType)] = &[
    (is_aum, BusinessModelType::Aum),
    (is_project, BusinessModelType::Project),
    (is_marketplace, BusinessModelType::Marketplace),
    (is_enterprise, BusinessModelType::Enterprise),
    (is_consumer, BusinessModelType::B2c),
];

static CLASSIFIER: FirstMatch<BusinessModelType> =
    FirstMatch::new(BUSINESS_MODEL_RULES, BusinessModelType::Saas);

/// Classifies narrative text into exactly one business model.
///
/// Total: text that matches nothing is `saas`.
pub fn classify_business_model(text: &str) -> BusinessModelType {
    CLASSIFIER.classify(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_saas() {
        assert_eq!(classify_business_model(""), BusinessModelType::Saas);
    }

    #[test]
    fn aum_outranks_everything() {
        assert_eq!(
            classify_business_model("An enterprise marketplace charging a management fee on AUM"),
            BusinessModelType::Aum
        );
    }

    #[test]
    fn priority_order_is_respected() {
        assert_eq!(
            classify_business_model("Consulting retainer for enterprise clients"),
            BusinessModelType::Project
        );
        assert_eq!(
            classify_business_model("A marketplace with enterprise buyers"),
            BusinessModelType::Marketplace
        );
        assert_eq!(
            classify_business_model("Enterprise contracts sold to consumer brands"),
            BusinessModelType::Enterprise
        );
        assert_eq!(
            classify_business_model("Freemium consumer app"),
            BusinessModelType::B2c
        );
        assert_eq!(
            classify_business_model("Monthly subscription per seat"),
            BusinessModelType::Saas
        );
    }

    #[test]
    fn descriptors_classify_to_their_own_label() {
        for model in BusinessModelType::ALL {
            assert_eq!(classify_business_model(model.descriptor()), model, "{model}");
        }
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn classification_is_total_and_stable(s in ".*") {
                let model = classify_business_model(&s);
                prop_assert!(BusinessModelType::ALL.contains(&model));
                prop_assert_eq!(model, classify_business_model(&s));
            }
        }
    }
}
