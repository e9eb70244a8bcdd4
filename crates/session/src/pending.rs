use crate::error::SessionError;
use crate::session::Session;

struct PendingChange {
    prior: Session,
    description: String,
}

/// Optimistic session holder: one speculative change in flight at a
/// time, with the prior snapshot kept for atomic rollback.
///
/// This is the serialization point for match-list updates — callers
/// route every local edit through `begin`/`commit`/`roll_back` so a
/// late failure response can never leave a half-applied view.
pub struct SessionState {
    current: Session,
    pending: Option<PendingChange>,
}

impl SessionState {
    pub fn new(session: Session) -> Self {
        Self {
            current: session,
            pending: None,
        }
    }

    pub fn current(&self) -> &Session {
        &self.current
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_description(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.description.as_str())
    }

    /// Apply a transition speculatively, keeping the prior snapshot.
    /// Fails when a change is already awaiting confirmation.
    pub fn begin<F>(
        &mut self,
        description: impl Into<String>,
        transition: F,
    ) -> Result<&Session, SessionError>
    where
        F: FnOnce(&Session) -> Session,
    {
        if self.pending.is_some() {
            return Err(SessionError::TransitionPending);
        }
        let next = transition(&self.current);
        let prior = std::mem::replace(&mut self.current, next);
        self.pending = Some(PendingChange {
            prior,
            description: description.into(),
        });
        Ok(&self.current)
    }

    /// Server confirmed: drop the snapshot.
    pub fn commit(&mut self) -> Result<(), SessionError> {
        self.pending.take().ok_or(SessionError::NoPending)?;
        Ok(())
    }

    /// Server rejected: restore the snapshot atomically. Returns the
    /// description of the change that was rolled back.
    pub fn roll_back(&mut self) -> Result<String, SessionError> {
        let pending = self.pending.take().ok_or(SessionError::NoPending)?;
        self.current = pending.prior;
        Ok(pending.description)
    }
}
