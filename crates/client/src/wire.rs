//! Wire types for the reconciliation service API.
//!
//! Field names follow the service's JSON verbatim; defaults keep older
//! server builds (which omit optional fields) parseable.

use serde::{Deserialize, Serialize};

use reconview_projector::{MatchCandidate, MatchStatus, Row};
use reconview_session::{Document, Session};

/// `POST /reconcile` — initial matching over an uploaded CSV pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileResponse {
    pub session_id: String,
    #[serde(default)]
    pub bank_matches: Vec<MatchCandidate>,
    #[serde(default)]
    pub agent_state: String,
    #[serde(default)]
    pub processing_notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentThought {
    #[serde(default)]
    pub thought: String,
    #[serde(default)]
    pub timestamp: String,
}

/// `POST /reconcile/session/{id}/continue`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinueResponse {
    #[serde(default)]
    pub matches: Vec<MatchCandidate>,
    #[serde(default)]
    pub agent_thoughts: Vec<AgentThought>,
    #[serde(default)]
    pub next_action: String,
}

/// `GET /reconcile/session/{id}` — the persisted session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    #[serde(default)]
    pub bank_data: Vec<Row>,
    #[serde(default)]
    pub gl_data: Vec<Row>,
    #[serde(default)]
    pub bank_matches: Vec<MatchCandidate>,
    #[serde(default)]
    pub agent_state: String,
    #[serde(default)]
    pub processing_notes: String,
}

impl SessionSnapshot {
    /// Rehydrate the snapshot into a local session value.
    pub fn into_session(self) -> Session {
        let mut session = Session::new(
            self.session_id,
            self.bank_data,
            self.gl_data,
            self.bank_matches,
        );
        session.agent_state = self.agent_state;
        session.processing_notes = self.processing_notes;
        session
    }
}

/// `POST /reconcile/session/{id}/save` request body.
#[derive(Debug, Clone, Serialize)]
pub struct SaveSessionRequest<'a> {
    #[serde(flatten)]
    pub session: &'a Session,
    pub change_description: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

/// `GET /reconcile/session/{id}/match/{bank_index}/documents`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsResponse {
    #[serde(default)]
    pub matching_documents: Vec<Document>,
    #[serde(default)]
    pub total_found: usize,
}

/// `POST .../match/{bank_index}/reject-document`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectDocumentResponse {
    #[serde(default)]
    pub new_documents: Vec<Document>,
    #[serde(default)]
    pub new_matches_found: bool,
}

/// `POST .../match/{bank_index}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateResponse {
    #[serde(default)]
    pub message: String,
    pub bank_index: usize,
    pub status: MatchStatus,
}

/// `POST .../match/{bank_index}/link-document`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkDocumentResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub linked_documents: Vec<String>,
}

/// `POST /reconcile/session/{id}/finalize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizeResponse {
    #[serde(default)]
    pub processed_matches: usize,
    #[serde(default)]
    pub total_verified: usize,
}
