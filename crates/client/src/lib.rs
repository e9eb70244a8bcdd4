//! `reconview-client` — Client for the external reconciliation
//! service.
//!
//! Blocking reqwest client (no Tokio runtime required). The service
//! owns matching, agent state, persistence, and document search; this
//! crate only speaks its HTTP surface and maps responses onto the
//! shared wire types.

pub mod client;
pub mod wire;

pub use client::{ServiceClient, ServiceError};
pub use wire::{
    Ack, AgentThought, ContinueResponse, DocumentsResponse, FinalizeResponse,
    LinkDocumentResponse, ReconcileResponse, RejectDocumentResponse, SessionSnapshot,
    StatusUpdateResponse,
};
