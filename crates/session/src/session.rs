use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use reconview_projector::{
    project, MatchCandidate, MatchStatus, Projection, ProjectorConfig, Row,
};

/// A supporting document surfaced for a bank entry. Cached in memory
/// only, keyed by bank index; the document store itself is remote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub path: String,
    #[serde(default)]
    pub seller: String,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub description: String,
}

/// One logical reconciliation session as a single immutable value.
///
/// Rows are created once and never mutated; matches are replaced
/// wholesale or transitioned through the `with_*` reducers, each of
/// which returns a fresh `Session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub bank_rows: Vec<Row>,
    pub gl_rows: Vec<Row>,
    pub matches: Vec<MatchCandidate>,
    #[serde(default)]
    pub documents: BTreeMap<usize, Vec<Document>>,
    #[serde(default)]
    pub agent_state: String,
    #[serde(default)]
    pub processing_notes: String,
}

impl Session {
    pub fn new(
        session_id: impl Into<String>,
        bank_rows: Vec<Row>,
        gl_rows: Vec<Row>,
        matches: Vec<MatchCandidate>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            bank_rows,
            gl_rows,
            matches,
            documents: BTreeMap::new(),
            agent_state: String::new(),
            processing_notes: String::new(),
        }
    }

    /// Update the status of the active match record for `bank_index`.
    /// No-op clone when the index has no records.
    pub fn with_match_status(&self, bank_index: usize, status: MatchStatus) -> Self {
        let mut next = self.clone();
        if let Some(pos) = active_record_position(&next.matches, bank_index) {
            next.matches[pos].status = status;
        }
        next
    }

    /// Record a manual match. History is preserved: the previous
    /// record for this bank index stays in the list and the new
    /// approved record becomes the active one by recency.
    pub fn with_manual_match(&self, bank_index: usize, gl_indexes: Vec<usize>) -> Self {
        let mut next = self.clone();
        next.matches.push(MatchCandidate {
            bank_index,
            gl_indexes,
            confidence: 1.0,
            reasoning: "manually matched".into(),
            status: MatchStatus::Approved,
            linked_documents: Vec::new(),
        });
        next
    }

    /// Wholesale replacement after the agent produced a new match list.
    pub fn with_matches_replaced(&self, matches: Vec<MatchCandidate>) -> Self {
        let mut next = self.clone();
        next.matches = matches;
        next
    }

    /// Cache the document candidates for one bank entry.
    pub fn with_documents(&self, bank_index: usize, docs: Vec<Document>) -> Self {
        let mut next = self.clone();
        next.documents.insert(bank_index, docs);
        next
    }

    /// Drop one cached document (after a rejection round-trip).
    pub fn without_document(&self, bank_index: usize, path: &str) -> Self {
        let mut next = self.clone();
        if let Some(docs) = next.documents.get_mut(&bank_index) {
            docs.retain(|d| d.path != path);
            if docs.is_empty() {
                next.documents.remove(&bank_index);
            }
        }
        next
    }

    /// Derive the display view. Safe to call on every state change;
    /// the projection is rebuilt from scratch each time.
    pub fn project(&self, config: &ProjectorConfig) -> Projection {
        project(&self.bank_rows, &self.gl_rows, &self.matches, config)
    }
}

/// Position of the active record for a bank index: last non-rejected
/// in list order, else last overall. Mirrors the projector's
/// `active_matches` resolution.
fn active_record_position(matches: &[MatchCandidate], bank_index: usize) -> Option<usize> {
    let mut pos: Option<usize> = None;
    for (i, m) in matches.iter().enumerate() {
        if m.bank_index != bank_index {
            continue;
        }
        match pos {
            None => pos = Some(i),
            Some(p) => {
                if m.status != MatchStatus::Rejected
                    || matches[p].status == MatchStatus::Rejected
                {
                    pos = Some(i);
                }
            }
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use reconview_projector::Scalar;

    fn row(date: &str) -> Row {
        Row::from_pairs(vec![("date".into(), Scalar::Text(date.into()))])
    }

    fn candidate(bank: usize, gl: Vec<usize>, status: MatchStatus) -> MatchCandidate {
        MatchCandidate {
            bank_index: bank,
            gl_indexes: gl,
            confidence: 0.9,
            reasoning: String::new(),
            status,
            linked_documents: Vec::new(),
        }
    }

    fn session() -> Session {
        Session::new(
            "sess-1",
            vec![row("2024-01-05"), row("2024-01-06")],
            vec![row("2024-01-05"), row("2024-01-06")],
            vec![
                candidate(0, vec![0], MatchStatus::Pending),
                candidate(1, vec![1], MatchStatus::Pending),
            ],
        )
    }

    #[test]
    fn status_update_targets_active_record_and_preserves_original() {
        let s = session();
        let next = s.with_match_status(0, MatchStatus::Approved);

        assert_eq!(next.matches[0].status, MatchStatus::Approved);
        // Original untouched
        assert_eq!(s.matches[0].status, MatchStatus::Pending);
    }

    #[test]
    fn status_update_skips_rejected_history() {
        let mut s = session();
        s.matches.push(candidate(0, vec![0], MatchStatus::Pending));
        s.matches[0].status = MatchStatus::Rejected;

        let next = s.with_match_status(0, MatchStatus::Verified);
        assert_eq!(next.matches[0].status, MatchStatus::Rejected, "history kept");
        assert_eq!(next.matches[2].status, MatchStatus::Verified);
    }

    #[test]
    fn status_update_on_unknown_index_is_a_noop() {
        let s = session();
        let next = s.with_match_status(42, MatchStatus::Approved);
        assert_eq!(next.matches, s.matches);
    }

    #[test]
    fn manual_match_appends_approved_record() {
        let s = session();
        let next = s.with_manual_match(0, vec![1]);

        assert_eq!(next.matches.len(), 3);
        let added = next.matches.last().unwrap();
        assert_eq!(added.status, MatchStatus::Approved);
        assert_eq!(added.gl_indexes, vec![1]);
        // The new record wins active resolution by recency.
        let active = reconview_projector::active_matches(&next.matches);
        assert_eq!(active[&0].reasoning, "manually matched");
    }

    #[test]
    fn document_cache_roundtrip() {
        let doc = Document {
            path: "invoices/7741.pdf".into(),
            seller: "Globex".into(),
            customer: "Initech".into(),
            date: "2024-01-05".into(),
            amount: 100.0,
            invoice_number: "7741".into(),
            description: "Consulting invoice".into(),
        };
        let s = session().with_documents(0, vec![doc.clone()]);
        assert_eq!(s.documents[&0], vec![doc]);

        let s = s.without_document(0, "invoices/7741.pdf");
        assert!(!s.documents.contains_key(&0), "empty cache entry removed");
    }

    #[test]
    fn projection_follows_transitions() {
        let config = ProjectorConfig::default();
        let s = session();
        assert_eq!(s.project(&config).summary.matched, 2);

        let s = s.with_match_status(1, MatchStatus::Rejected);
        let p = s.project(&config);
        assert_eq!(p.summary.matched, 1);
        assert_eq!(p.summary.unmatched_bank, 1);
        assert_eq!(p.summary.unmatched_gl, 1);
    }

    #[test]
    fn session_json_roundtrip() {
        let s = session().with_documents(
            1,
            vec![Document {
                path: "a.pdf".into(),
                seller: String::new(),
                customer: String::new(),
                date: String::new(),
                amount: 0.0,
                invoice_number: String::new(),
                description: String::new(),
            }],
        );
        let json = serde_json::to_string(&s).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back.session_id, "sess-1");
        assert_eq!(back.matches, s.matches);
        assert_eq!(back.documents.len(), 1);
    }
}
