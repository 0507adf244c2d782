use std::fs;

use anyhow::Result;
use memo_engine::data::{AssumptionSource, BusinessModelType, Currency, Grade};
use memo_engine::patterns::SectionKey;
use memo_engine::{build_report, MemoInput};
use tempfile::TempDir;

const MEMO: &str = r#"
company:
  name: Harbor Wealth
  category: wealth tech
  stage: seed
sections:
  problem: >
    Independent advisors lose hours every week reconciling client portfolios
    in Excel. Three firms told us they pay $2,000 a month for consultants to do it.
  solution: >
    A portfolio platform that integrates with custodians through an API and
    becomes the system of record for each advisory firm.
  business_model: >
    Our AUM is $2.5M with a 1.5% annual fee and 40 clients.
  traction: >
    40 paying clients, $3,125 MRR, 2% monthly churn.
  competition: >
    We have no competition.
responses:
  target_customer: Independent advisors
dismissed:
  - competition.no_competition
"#;

fn write_memo(dir: &TempDir) -> Result<std::path::PathBuf> {
    let path = dir.path().join("memo.yaml");
    fs::write(&path, MEMO)?;
    Ok(path)
}

#[tokio::test]
async fn offline_memo_report_from_file() -> Result<()> {
    let dir = TempDir::new()?;
    let input = MemoInput::from_path(write_memo(&dir)?)?;

    let report = build_report(&input, None).await;

    let pain = report.pain.as_ref().expect("problem section present");
    assert!(pain.overall_score <= 100);

    assert_eq!(report.pricing.business_model_type, BusinessModelType::Aum);
    assert_eq!(report.pricing.currency, Currency::Usd);
    assert_eq!(report.pricing.aum_total, Some(2_500_000.0));
    assert_eq!(report.pricing.aum_fee_percent, Some(1.5));
    assert_eq!(report.unit_economics.monthly_churn, Some(2.0));

    let anchored = &report.anchored_assumptions;
    assert_eq!(anchored.source(), AssumptionSource::UserProvided);
    assert_eq!(anchored.primary_metric_label, "Annual fee revenue");
    let fee_revenue = anchored.primary_metric_value().expect("value present");
    assert!((fee_revenue - 37_500.0).abs() < 1e-6);

    Ok(())
}

#[tokio::test]
async fn dismissed_competition_spot_is_hidden() -> Result<()> {
    let dir = TempDir::new()?;
    let input = MemoInput::from_path(write_memo(&dir)?)?;

    let report = build_report(&input, None).await;

    let competition = report
        .sections
        .iter()
        .find(|s| s.section == SectionKey::Competition)
        .expect("competition section present");
    assert!(competition
        .blind_spots
        .iter()
        .all(|s| s.rule_id != "competition.no_competition"));
    Ok(())
}

#[tokio::test]
async fn report_serializes_snake_case() -> Result<()> {
    let dir = TempDir::new()?;
    let input = MemoInput::from_path(write_memo(&dir)?)?;

    let report = build_report(&input, None).await;
    let json = serde_json::to_value(&report)?;

    assert_eq!(json["pricing"]["business_model_type"], "aum");
    assert_eq!(json["anchored_assumptions"]["source"], "user_provided");
    assert!(json["moat"]["overall_score"].is_number());
    Ok(())
}

#[tokio::test]
async fn empty_sections_grade_d() -> Result<()> {
    let input: MemoInput = memo_engine::data::from_yaml(
        "company: {name: Blank, stage: idea}\nsections:\n  traction: Nothing yet.\n",
    )?;

    let report = build_report(&input, None).await;

    let traction = &report.sections[0];
    assert_eq!(traction.section, SectionKey::Traction);
    assert_eq!(traction.evidence.as_ref().map(|e| e.grade), Some(Grade::D));
    Ok(())
}
