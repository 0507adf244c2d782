//! Evidence completeness checklists.

use crate::data::analysis::{EvidenceChecklistResult, EvidenceItem, Grade};
use crate::patterns::{evidence_rules, Haystack, SectionKey};

/// Grade boundaries in percent, best first.
const GRADE_BOUNDARIES: [(usize, Grade); 3] = [(90, Grade::A), (70, Grade::B), (50, Grade::C)];

/// Runs the evidence checklist for a section.
///
/// Returns `None` when the section declares no items.
pub fn analyze_evidence(text: &str, section: SectionKey) -> Option<EvidenceChecklistResult> {
    let rules = evidence_rules(section);
    if rules.is_empty() {
        return None;
    }

    let hay = Haystack::new(text);
    let items: Vec<EvidenceItem> = rules
        .iter()
        .map(|rule| EvidenceItem {
            key: rule.key.to_string(),
            label: rule.label.to_string(),
            hint: rule.hint.to_string(),
            detected: rule.trigger.test(&hay).is_some(),
        })
        .collect();

    let detected_count = items.iter().filter(|item| item.detected).count();
    let total_count = items.len();

    Some(EvidenceChecklistResult {
        grade: grade_for(detected_count, total_count),
        items,
        detected_count,
        total_count,
    })
}

/// Grades a detected/total ratio in integer percent arithmetic.
pub fn grade_for(detected: usize, total: usize) -> Grade {
    GRADE_BOUNDARIES
        .iter()
        .find(|(boundary, _)| detected * 100 >= total * boundary)
        .map_or(Grade::D, |(_, grade)| *grade)
}
