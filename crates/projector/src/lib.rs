//! `reconview-projector` — Reconciliation view-state projector.
//!
//! Pure projection crate: takes two flat datasets (bank statement,
//! general ledger) plus a sparse match list and derives an ordered,
//! side-by-side grouped view. No network, no persistence; the CSV
//! loader is the only IO helper.

pub mod classify;
pub mod config;
pub mod dates;
pub mod error;
pub mod load;
pub mod model;
pub mod project;

pub use config::ProjectorConfig;
pub use error::ProjectorError;
pub use load::load_rows;
pub use model::{
    Classification, DisplayGroup, GlEntry, MatchCandidate, MatchStatus, Projection,
    ProjectionSummary, Row, Scalar,
};
pub use project::{active_matches, project};
