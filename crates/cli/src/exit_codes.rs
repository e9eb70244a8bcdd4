//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3-9     | project          | Projection-specific codes                |
//! | 20-29   | service          | Reconciliation service codes             |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Project (3-9)
// =============================================================================

/// Unmatched rows remain and `--fail-on-unmatched` was set.
pub const EXIT_PROJECT_UNMATCHED: u8 = 3;

/// Projector config rejected (TOML parse error or invalid thresholds).
pub const EXIT_PROJECT_CONFIG: u8 = 4;

/// Parse error reading input data (CSV rows or match list JSON).
pub const EXIT_PROJECT_PARSE: u8 = 5;

// =============================================================================
// Service (20-29)
// =============================================================================

/// Cannot reach the reconciliation service (refused, timeout, DNS).
pub const EXIT_SERVICE_CONNECT: u8 = 20;

/// Service returned an unexpected HTTP error status.
pub const EXIT_SERVICE_HTTP: u8 = 21;

/// Service rejected the request (400/422 with a message).
pub const EXIT_SERVICE_VALIDATION: u8 = 22;

/// Session or match not found (404).
pub const EXIT_SERVICE_NOT_FOUND: u8 = 23;

/// Malformed service response body.
pub const EXIT_SERVICE_PARSE: u8 = 24;

// =============================================================================
// Service Error Mapping
// =============================================================================

use reconview_client::ServiceError;

/// Map a ServiceError to its exit code.
pub fn service_exit_code(err: &ServiceError) -> u8 {
    match err {
        ServiceError::Network(_) => EXIT_SERVICE_CONNECT,
        ServiceError::Http(_, _) => EXIT_SERVICE_HTTP,
        ServiceError::Validation(_) => EXIT_SERVICE_VALIDATION,
        ServiceError::NotFound(_) => EXIT_SERVICE_NOT_FOUND,
        ServiceError::Parse(_) => EXIT_SERVICE_PARSE,
    }
}
