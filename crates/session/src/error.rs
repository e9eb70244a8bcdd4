use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum SessionError {
    /// A speculative change is already in flight; confirm or roll it
    /// back before starting another.
    TransitionPending,
    /// Commit/rollback called with nothing in flight.
    NoPending,
    /// Queue completion signaled while no task was processing.
    QueueIdle,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransitionPending => {
                write!(f, "a pending change is already in flight")
            }
            Self::NoPending => write!(f, "no pending change to resolve"),
            Self::QueueIdle => write!(f, "no task is processing"),
        }
    }
}

impl std::error::Error for SessionError {}
