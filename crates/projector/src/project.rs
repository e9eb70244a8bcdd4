use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::classify::{classify, compute_summary};
use crate::config::ProjectorConfig;
use crate::dates::parse_row_date;
use crate::model::{
    DisplayGroup, GlEntry, MatchCandidate, MatchStatus, Projection, ProjectionMeta, Row,
};

/// Resolve the active match record per bank index.
///
/// A bank index may own several historical records (e.g. one rejected
/// plus one newly created). The active record is the last non-rejected
/// one in list order; when every record is rejected, the last record
/// overall.
pub fn active_matches(matches: &[MatchCandidate]) -> BTreeMap<usize, &MatchCandidate> {
    let mut active: BTreeMap<usize, &MatchCandidate> = BTreeMap::new();
    for m in matches {
        match active.entry(m.bank_index) {
            Entry::Vacant(slot) => {
                slot.insert(m);
            }
            Entry::Occupied(mut slot) => {
                // A rejected record never displaces a live one.
                if m.status != MatchStatus::Rejected || slot.get().status == MatchStatus::Rejected {
                    slot.insert(m);
                }
            }
        }
    }
    active
}

struct BankEntry<'a> {
    bank_index: usize,
    bank_row: &'a Row,
    candidate: Option<&'a MatchCandidate>,
    gl: Vec<(usize, &'a Row)>,
    date: NaiveDate,
}

/// Project two flat datasets plus a sparse match list into one ordered
/// group sequence: matched groups date-ascending first, then the
/// unmatched bank/ledger entries interleaved pairwise by position.
///
/// Total: every bank index and every ledger index lands in exactly one
/// group. Defensive by construction — out-of-range indexes are skipped,
/// unparseable dates sort as the epoch, and no input ever causes an
/// error.
pub fn project(
    bank_rows: &[Row],
    gl_rows: &[Row],
    matches: &[MatchCandidate],
    config: &ProjectorConfig,
) -> Projection {
    let active = active_matches(matches);

    // Resolve bank-centric entries in index order, claiming ledger rows
    // as we go. First claim wins, so a ledger index referenced by two
    // live matches nests under the lower bank index only.
    let mut claimed = vec![false; gl_rows.len()];
    let mut entries: Vec<BankEntry<'_>> = Vec::with_capacity(bank_rows.len());

    for (bank_index, bank_row) in bank_rows.iter().enumerate() {
        let candidate = active.get(&bank_index).copied();

        let mut gl = Vec::new();
        if let Some(c) = candidate {
            if c.status != MatchStatus::Rejected {
                for &gl_index in &c.gl_indexes {
                    match (gl_rows.get(gl_index), claimed.get(gl_index)) {
                        (Some(row), Some(false)) => {
                            claimed[gl_index] = true;
                            gl.push((gl_index, row));
                        }
                        // Out of range or already claimed: skip silently.
                        _ => {}
                    }
                }
            }
        }

        entries.push(BankEntry {
            bank_index,
            bank_row,
            candidate,
            gl,
            date: parse_row_date(bank_row, &config.dates),
        });
    }

    // Date ascending, original index as tiebreak.
    entries.sort_by_key(|e| (e.date, e.bank_index));

    let mut groups = Vec::new();
    let mut unmatched_bank = Vec::new();

    for entry in entries {
        match entry.candidate {
            Some(candidate) if !entry.gl.is_empty() => {
                groups.push(DisplayGroup::Matched {
                    bank_index: entry.bank_index,
                    bank_row: entry.bank_row.clone(),
                    gl_rows: entry
                        .gl
                        .into_iter()
                        .map(|(gl_index, row)| GlEntry {
                            gl_index,
                            row: row.clone(),
                        })
                        .collect(),
                    candidate: candidate.clone(),
                    classification: classify(candidate, &config.thresholds),
                });
            }
            // No live ledger rows: the bank row still surfaces.
            _ => unmatched_bank.push(entry),
        }
    }

    let mut unmatched_gl: Vec<(usize, &Row, NaiveDate)> = gl_rows
        .iter()
        .enumerate()
        .filter(|(gl_index, _)| !claimed[*gl_index])
        .map(|(gl_index, row)| (gl_index, row, parse_row_date(row, &config.dates)))
        .collect();
    unmatched_gl.sort_by_key(|(gl_index, _, date)| (*date, *gl_index));

    // Side-by-side tail: pair the two unmatched columns by position.
    for i in 0..unmatched_bank.len().max(unmatched_gl.len()) {
        if let Some(entry) = unmatched_bank.get(i) {
            groups.push(DisplayGroup::UnmatchedBank {
                bank_index: entry.bank_index,
                bank_row: entry.bank_row.clone(),
            });
        }
        if let Some((gl_index, row, _)) = unmatched_gl.get(i) {
            groups.push(DisplayGroup::UnmatchedGl {
                gl_index: *gl_index,
                gl_row: (*row).clone(),
            });
        }
    }

    let summary = compute_summary(&groups);
    Projection {
        meta: ProjectionMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        groups,
    }
}
