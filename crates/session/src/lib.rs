//! `reconview-session` — Immutable session state for a reconciliation
//! run.
//!
//! One `Session` value replaces the drift-prone pile of small mutable
//! cells: every transition returns a new `Session`. `SessionState`
//! layers optimistic, roll-backable changes on top, and `TaskQueue`
//! drives strictly sequential background work (document rejections).

pub mod error;
pub mod pending;
pub mod queue;
pub mod session;

pub use error::SessionError;
pub use pending::SessionState;
pub use queue::{Progress, TaskQueue, TaskState};
pub use session::{Document, Session};
