//! CLI error types with miette diagnostics.
//!
//! Maps library and config errors into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use panelctl_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to {url}")]
    #[diagnostic(
        code(panelctl::connection_failed),
        help(
            "Check that the server is running and reachable.\n\
             Self-signed certificate? Retry with --insecure (-k) or set ca_cert in the profile."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: panelctl_api::Error,
    },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(panelctl::tls_error),
        help("Check the ca_cert path in your profile, or use --insecure (-k).")
    )]
    TlsError { reason: String },

    #[error("Request to {url} timed out")]
    #[diagnostic(
        code(panelctl::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout { url: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("No {secret} configured for profile '{profile}'")]
    #[diagnostic(
        code(panelctl::no_credentials),
        help(
            "Store one with: panelctl config set-secret --profile {profile} <virt-api-key|monitor-password>\n\
             Or pass --api-key / --monitor-password."
        )
    )]
    NoCredentials { profile: String, secret: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(panelctl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(panelctl::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No {section} settings for profile '{profile}'")]
    #[diagnostic(
        code(panelctl::no_config),
        help(
            "Add a [profiles.{profile}.{section}] table to {path}\n\
             or pass the connection flags (see --help)."
        )
    )]
    NoConfig {
        profile: String,
        section: &'static str,
        path: String,
    },

    #[error(transparent)]
    #[diagnostic(code(panelctl::config))]
    Config(Box<ConfigError>),

    // ── Session ──────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(panelctl::cookie_jar),
        help("Check that the cookie jar's directory exists and is writable.")
    )]
    CookieJar(panelctl_api::Error),

    #[error(transparent)]
    #[diagnostic(code(panelctl::api))]
    Api(panelctl_api::Error),

    // ── IO ────────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Library error mapping ────────────────────────────────────────────

impl From<panelctl_api::Error> for CliError {
    fn from(err: panelctl_api::Error) -> Self {
        use panelctl_api::Error as ApiError;

        match err {
            ApiError::InvalidArgument {
                param,
                value,
                reason,
            } => Self::Validation {
                field: param.into(),
                reason: format!("{value:?} {reason}"),
            },
            ApiError::Tls(reason) => Self::TlsError { reason },
            ApiError::InvalidUrl(e) => Self::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },
            ApiError::Transport(e) => {
                let url = e
                    .url()
                    .map_or_else(|| "(unknown)".into(), ToString::to_string);
                if e.is_timeout() {
                    Self::Timeout { url }
                } else if e.is_connect() {
                    Self::ConnectionFailed {
                        url,
                        source: ApiError::Transport(e),
                    }
                } else {
                    Self::Api(ApiError::Transport(e))
                }
            }
            err @ ApiError::CookieJar { .. } => Self::CookieJar(err),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile, secret } => Self::NoCredentials {
                profile,
                secret: secret.into(),
            },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::UnknownProfile { profile } => Self::ProfileNotFound {
                name: profile,
                available: String::new(),
            },
            other => Self::Config(Box::new(other)),
        }
    }
}
