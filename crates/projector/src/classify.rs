use crate::config::Thresholds;
use crate::model::{Classification, DisplayGroup, MatchCandidate, MatchStatus, ProjectionSummary};

/// Classify a matched group. Approved status wins outright; otherwise
/// the confidence score is split at the configured thresholds.
pub fn classify(candidate: &MatchCandidate, thresholds: &Thresholds) -> Classification {
    if candidate.status == MatchStatus::Approved {
        Classification::Approved
    } else if candidate.confidence >= thresholds.high {
        Classification::HighConfidence
    } else if candidate.confidence >= thresholds.low {
        Classification::LowConfidence
    } else {
        Classification::NoMatch
    }
}

/// Count groups per kind and classification.
pub fn compute_summary(groups: &[DisplayGroup]) -> ProjectionSummary {
    let mut summary = ProjectionSummary {
        total_groups: groups.len(),
        ..ProjectionSummary::default()
    };

    for group in groups {
        match group {
            DisplayGroup::Matched { classification, .. } => {
                summary.matched += 1;
                match classification {
                    Classification::Approved => summary.approved += 1,
                    Classification::HighConfidence => summary.high_confidence += 1,
                    Classification::LowConfidence => summary.low_confidence += 1,
                    Classification::NoMatch => summary.no_match += 1,
                }
            }
            DisplayGroup::UnmatchedBank { .. } => summary.unmatched_bank += 1,
            DisplayGroup::UnmatchedGl { .. } => summary.unmatched_gl += 1,
        }
    }

    summary
}
