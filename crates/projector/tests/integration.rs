use std::path::PathBuf;

use reconview_projector::model::DisplayGroup;
use reconview_projector::{
    load_rows, project, Classification, MatchCandidate, MatchStatus, ProjectorConfig,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

fn load_fixture_projection() -> reconview_projector::Projection {
    let bank = load_rows(&read_fixture("bank.csv")).unwrap();
    let gl = load_rows(&read_fixture("ledger.csv")).unwrap();
    let matches: Vec<MatchCandidate> =
        serde_json::from_str(&read_fixture("matches.json")).unwrap();
    project(&bank, &gl, &matches, &ProjectorConfig::default())
}

#[test]
fn fixture_projection_summary() {
    let p = load_fixture_projection();

    assert_eq!(p.summary.matched, 4);
    assert_eq!(p.summary.approved, 1);
    assert_eq!(p.summary.high_confidence, 1);
    assert_eq!(p.summary.low_confidence, 2);
    assert_eq!(p.summary.no_match, 0);
    assert_eq!(p.summary.unmatched_bank, 1);
    assert_eq!(p.summary.unmatched_gl, 2);
    assert_eq!(p.summary.total_groups, 7);
}

#[test]
fn fixture_matched_groups_are_date_ordered() {
    let p = load_fixture_projection();

    let matched: Vec<usize> = p
        .groups
        .iter()
        .filter_map(|g| match g {
            DisplayGroup::Matched { bank_index, .. } => Some(*bank_index),
            _ => None,
        })
        .collect();
    // Jan 5, Feb 2, Feb 14, Mar 1
    assert_eq!(matched, vec![1, 4, 2, 0]);
}

#[test]
fn fixture_rejected_record_is_superseded_by_rematch() {
    let p = load_fixture_projection();

    let group = p
        .groups
        .iter()
        .find_map(|g| match g {
            DisplayGroup::Matched {
                bank_index: 4,
                candidate,
                classification,
                gl_rows,
                ..
            } => Some((candidate, classification, gl_rows)),
            _ => None,
        })
        .expect("bank row 4 should be matched by its re-match record");

    let (candidate, classification, gl_rows) = group;
    assert_eq!(candidate.status, MatchStatus::Pending);
    assert_eq!(candidate.confidence, 0.76);
    assert_eq!(*classification, Classification::LowConfidence);
    assert_eq!(gl_rows[0].gl_index, 3);
}

#[test]
fn fixture_unmatched_tail_is_positional() {
    let p = load_fixture_projection();

    let tail: Vec<&DisplayGroup> = p.groups.iter().skip(4).collect();
    assert!(matches!(
        tail[0],
        DisplayGroup::UnmatchedBank { bank_index: 3, .. }
    ));
    // Unmatched ledger rows sort by their own date: Jan 31 before Feb 28.
    assert!(matches!(tail[1], DisplayGroup::UnmatchedGl { gl_index: 5, .. }));
    assert!(matches!(tail[2], DisplayGroup::UnmatchedGl { gl_index: 4, .. }));

    let slots = p.aligned_unmatched();
    assert_eq!(slots.len(), 2);
    assert!(slots[1].0.is_none(), "bank column pads after one entry");
}

#[test]
fn fixture_projection_serializes_to_json() {
    let p = load_fixture_projection();
    let json = serde_json::to_value(&p).unwrap();

    assert_eq!(json["summary"]["matched"], 4);
    let first = &json["groups"][0];
    assert_eq!(first["kind"], "matched");
    assert_eq!(first["bank_index"], 1);
    assert_eq!(first["classification"], "high_confidence");
    assert_eq!(first["bank_row"]["description"], "ACH TRANSFER GLOBEX");
}

#[test]
fn custom_thresholds_change_classification() {
    let bank = load_rows(&read_fixture("bank.csv")).unwrap();
    let gl = load_rows(&read_fixture("ledger.csv")).unwrap();
    let matches: Vec<MatchCandidate> =
        serde_json::from_str(&read_fixture("matches.json")).unwrap();

    let config = ProjectorConfig::from_toml("[thresholds]\nhigh = 0.5\nlow = 0.3\n").unwrap();
    let p = project(&bank, &gl, &matches, &config);

    // With high = 0.5 every non-approved match clears the bar.
    assert_eq!(p.summary.high_confidence, 3);
    assert_eq!(p.summary.low_confidence, 0);
}
