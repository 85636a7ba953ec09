use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the `panelctl-api` crate.
///
/// Covers local argument validation, transport, and the monitoring cookie jar.
/// Errors reported by the remote panels themselves are never classified here:
/// they come back to the caller inside the raw response body.
#[derive(Debug, Error)]
pub enum Error {
    // ── Validation ──────────────────────────────────────────────────
    /// A caller-supplied value failed a local rule. Raised before any request.
    #[error("Invalid argument {param}={value:?}: {reason}")]
    InvalidArgument {
        param: &'static str,
        value: String,
        reason: String,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, timeout, TLS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Session ─────────────────────────────────────────────────────
    /// The monitoring session cookie could not be persisted.
    #[error("Failed to write cookie jar {}: {source}", .path.display())]
    CookieJar {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn invalid(
        param: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            param,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the call was rejected locally, before any request.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns `true` if this is a transient error a caller may choose to retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if the transport gave up waiting.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
