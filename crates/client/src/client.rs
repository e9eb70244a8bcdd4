use std::time::Duration;

use reconview_projector::MatchStatus;
use reconview_session::Session;

use crate::wire::{
    Ack, ContinueResponse, DocumentsResponse, FinalizeResponse, LinkDocumentResponse,
    ReconcileResponse, RejectDocumentResponse, SaveSessionRequest, SessionSnapshot,
    StatusUpdateResponse,
};

/// Reconciliation service API client (blocking).
#[derive(Clone)]
pub struct ServiceClient {
    http: reqwest::blocking::Client,
    api_base: String,
}

/// Error type for service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Network error
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// JSON parsing error
    Parse(String),
    /// Server returned a validation error (4xx with message)
    Validation(String),
    /// Session or match not found (404)
    NotFound(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Network(msg) => write!(f, "Network error: {}", msg),
            ServiceError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            ServiceError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ServiceError::Validation(msg) => write!(f, "{}", msg),
            ServiceError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ServiceClient {
    /// Create a new client for the given API base URL.
    pub fn new(api_base: impl Into<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("reconview/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Upload a bank statement / ledger CSV pair and kick off matching.
    pub fn reconcile(
        &self,
        bank_csv: Vec<u8>,
        bank_filename: &str,
        gl_csv: Vec<u8>,
        gl_filename: &str,
    ) -> Result<ReconcileResponse, ServiceError> {
        let url = format!("{}/reconcile", self.api_base);

        let form = reqwest::blocking::multipart::Form::new()
            .part(
                "bank_statement",
                reqwest::blocking::multipart::Part::bytes(bank_csv)
                    .file_name(bank_filename.to_string()),
            )
            .part(
                "general_ledger",
                reqwest::blocking::multipart::Part::bytes(gl_csv)
                    .file_name(gl_filename.to_string()),
            );

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        let response = check_status(response)?;
        response
            .json::<ReconcileResponse>()
            .map_err(|e| ServiceError::Parse(e.to_string()))
    }

    /// Advance the agent, optionally with user feedback.
    pub fn continue_session(
        &self,
        session_id: &str,
        user_feedback: Option<&str>,
    ) -> Result<ContinueResponse, ServiceError> {
        let url = format!("{}/reconcile/session/{}/continue", self.api_base, session_id);
        let resp = self.post_json(&url, &serde_json::json!({ "user_feedback": user_feedback }))?;
        resp.json().map_err(|e| ServiceError::Parse(e.to_string()))
    }

    /// Fetch the persisted session: rows, matches, agent state.
    pub fn get_session(&self, session_id: &str) -> Result<SessionSnapshot, ServiceError> {
        let url = format!("{}/reconcile/session/{}", self.api_base, session_id);
        let resp = self.get(&url)?;
        resp.json().map_err(|e| ServiceError::Parse(e.to_string()))
    }

    /// Persist a locally edited session.
    pub fn save_session(
        &self,
        session: &Session,
        change_description: &str,
    ) -> Result<Ack, ServiceError> {
        let url = format!(
            "{}/reconcile/session/{}/save",
            self.api_base, session.session_id
        );
        let body = serde_json::to_value(SaveSessionRequest {
            session,
            change_description,
        })
        .map_err(|e| ServiceError::Parse(e.to_string()))?;
        let resp = self.post_json(&url, &body)?;
        resp.json().map_err(|e| ServiceError::Parse(e.to_string()))
    }

    /// Candidate supporting documents for one bank entry.
    pub fn find_documents(
        &self,
        session_id: &str,
        bank_index: usize,
    ) -> Result<DocumentsResponse, ServiceError> {
        let url = format!(
            "{}/reconcile/session/{}/match/{}/documents",
            self.api_base, session_id, bank_index
        );
        let resp = self.get(&url)?;
        resp.json().map_err(|e| ServiceError::Parse(e.to_string()))
    }

    /// Exclude a document and trigger a re-search.
    pub fn reject_document(
        &self,
        session_id: &str,
        bank_index: usize,
        document_path: &str,
    ) -> Result<RejectDocumentResponse, ServiceError> {
        let url = format!(
            "{}/reconcile/session/{}/match/{}/reject-document",
            self.api_base, session_id, bank_index
        );
        let resp = self.post_json(&url, &serde_json::json!({ "document_path": document_path }))?;
        resp.json().map_err(|e| ServiceError::Parse(e.to_string()))
    }

    /// Update the status of one match on the server.
    pub fn update_match_status(
        &self,
        session_id: &str,
        bank_index: usize,
        status: MatchStatus,
    ) -> Result<StatusUpdateResponse, ServiceError> {
        let url = format!(
            "{}/reconcile/session/{}/match/{}/status",
            self.api_base, session_id, bank_index
        );
        let resp = self.post_json(&url, &serde_json::json!(status))?;
        resp.json().map_err(|e| ServiceError::Parse(e.to_string()))
    }

    /// Attach a document to a match.
    pub fn link_document(
        &self,
        session_id: &str,
        bank_index: usize,
        document_path: &str,
    ) -> Result<LinkDocumentResponse, ServiceError> {
        let url = format!(
            "{}/reconcile/session/{}/match/{}/link-document",
            self.api_base, session_id, bank_index
        );
        let resp = self.post_json(&url, &serde_json::json!(document_path))?;
        resp.json().map_err(|e| ServiceError::Parse(e.to_string()))
    }

    /// Finalize the session, processing all verified matches.
    pub fn finalize(&self, session_id: &str) -> Result<FinalizeResponse, ServiceError> {
        let url = format!("{}/reconcile/session/{}/finalize", self.api_base, session_id);
        let resp = self.post_json(&url, &serde_json::Value::Null)?;
        resp.json().map_err(|e| ServiceError::Parse(e.to_string()))
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, ServiceError> {
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        check_status(response)
    }

    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::blocking::Response, ServiceError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        check_status(response)
    }
}

fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ServiceError> {
    let status = response.status().as_u16();
    if response.status().is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    match status {
        404 => Err(ServiceError::NotFound(body)),
        400 | 422 => Err(ServiceError::Validation(body)),
        _ => Err(ServiceError::Http(status, body)),
    }
}
