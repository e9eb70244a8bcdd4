//! `reconview mark` — update one match status on the server.
//!
//! Applies the change to a local copy first, then pushes it. A push
//! failure rolls the local copy back, so the reported view never shows
//! a status the server refused.

use reconview_client::ServiceClient;
use reconview_projector::MatchStatus;
use reconview_session::SessionState;

use crate::exit_codes::EXIT_USAGE;
use crate::CliError;

pub fn cmd_mark(
    session_id: &str,
    bank_index: usize,
    status: &str,
    api_base: &str,
) -> Result<(), CliError> {
    let status: MatchStatus = status.parse().map_err(|e: String| CliError {
        code: EXIT_USAGE,
        message: e,
        hint: Some("expected one of: pending, approved, rejected, verified".to_string()),
    })?;

    let client = ServiceClient::new(api_base);
    let snapshot = client.get_session(session_id).map_err(CliError::service)?;

    let mut state = SessionState::new(snapshot.into_session());
    state
        .begin(format!("set bank {} to {}", bank_index, status), |s| {
            s.with_match_status(bank_index, status)
        })
        .map_err(|e| CliError::internal(e.to_string()))?;

    match client.update_match_status(session_id, bank_index, status) {
        Ok(resp) => {
            state.commit().map_err(|e| CliError::internal(e.to_string()))?;
            eprintln!("match {} is now {}", resp.bank_index, resp.status);
            Ok(())
        }
        Err(err) => {
            if let Ok(description) = state.roll_back() {
                eprintln!("rolled back local change: {}", description);
            }
            Err(CliError::service(err))
        }
    }
}
