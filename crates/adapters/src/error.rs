//! Adapter error taxonomy.
//!
//! Four kinds, classified by who can fix them and whether a retry helps:
//!
//! - [`Auth`](AdapterError::Auth): credentials invalid or revoked.
//!   Platform-level and terminal until the user re-connects; the engine
//!   flips the platform's status to `error`.
//! - [`RateLimit`](AdapterError::RateLimit): retryable with backoff.
//! - [`NotFound`](AdapterError::NotFound): the external reference no
//!   longer exists. Item-level, not retryable.
//! - [`Transport`](AdapterError::Transport): network faults, timeouts,
//!   and 5xx responses. Retryable.
//!
//! [`MissingLocation`](AdapterError::MissingLocation) is a configuration
//! gap specific to location-scoped inventory APIs (Shopify): the write
//! cannot be addressed until the user configures a location. Item-level,
//! surfaced explicitly rather than silently skipped.

use shopsync_core::outcome::{
    REASON_AUTH_ERROR, REASON_MISSING_LOCATION, REASON_NOT_FOUND, REASON_RATE_LIMITED,
    REASON_TRANSPORT_ERROR,
};

/// Error from a platform adapter call.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Credentials rejected by the platform (401/403).
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The platform throttled the call (429).
    #[error("Rate limited by platform{}", retry_hint(.retry_after_secs))]
    RateLimit {
        /// Parsed `Retry-After` header, when the platform sent one.
        retry_after_secs: Option<u64>,
    },

    /// The external product/inventory reference does not exist (404).
    #[error("External reference not found: {0}")]
    NotFound(String),

    /// Network failure, timeout, or server-side (5xx) error.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The platform needs a configured inventory location and none is set.
    #[error("No inventory location configured for this platform")]
    MissingLocation,
}

fn retry_hint(retry_after_secs: &Option<u64>) -> String {
    match retry_after_secs {
        Some(secs) => format!(" (retry after {secs}s)"),
        None => String::new(),
    }
}

impl AdapterError {
    /// Whether retrying the same call later can succeed without user
    /// intervention.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AdapterError::RateLimit { .. } | AdapterError::Transport(_)
        )
    }

    /// Whether the fault is platform-wide (as opposed to this one item).
    pub fn is_platform_fault(&self) -> bool {
        matches!(
            self,
            AdapterError::Auth(_) | AdapterError::RateLimit { .. } | AdapterError::Transport(_)
        )
    }

    /// Stable reason string recorded in per-item ledger error entries.
    /// The strings are the shared constants from
    /// [`shopsync_core::outcome`], which is also where the engine reads
    /// them back from.
    pub fn reason(&self) -> &'static str {
        match self {
            AdapterError::Auth(_) => REASON_AUTH_ERROR,
            AdapterError::RateLimit { .. } => REASON_RATE_LIMITED,
            AdapterError::NotFound(_) => REASON_NOT_FOUND,
            AdapterError::Transport(_) => REASON_TRANSPORT_ERROR,
            AdapterError::MissingLocation => REASON_MISSING_LOCATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(AdapterError::Transport("timeout".into()).is_retryable());
        assert!(AdapterError::RateLimit {
            retry_after_secs: Some(2)
        }
        .is_retryable());
        assert!(!AdapterError::Auth("revoked".into()).is_retryable());
        assert!(!AdapterError::NotFound("gone".into()).is_retryable());
        assert!(!AdapterError::MissingLocation.is_retryable());
    }

    #[test]
    fn platform_fault_classification() {
        assert!(AdapterError::Auth("revoked".into()).is_platform_fault());
        assert!(!AdapterError::NotFound("gone".into()).is_platform_fault());
        assert!(!AdapterError::MissingLocation.is_platform_fault());
    }

    #[test]
    fn reason_strings_are_stable() {
        assert_eq!(AdapterError::MissingLocation.reason(), "missing-location");
        assert_eq!(AdapterError::NotFound("x".into()).reason(), "not-found");
        assert_eq!(AdapterError::Auth("revoked".into()).reason(), "auth-error");
        assert_eq!(
            AdapterError::Transport("timeout".into()).reason(),
            "transport-error"
        );
    }

    #[test]
    fn reasons_match_the_shared_constants() {
        assert_eq!(AdapterError::Auth("x".into()).reason(), REASON_AUTH_ERROR);
        assert_eq!(
            AdapterError::RateLimit {
                retry_after_secs: None
            }
            .reason(),
            REASON_RATE_LIMITED
        );
    }

    #[test]
    fn rate_limit_display_includes_hint() {
        let err = AdapterError::RateLimit {
            retry_after_secs: Some(30),
        };
        assert!(err.to_string().contains("retry after 30s"));
    }
}
