// Shared transport configuration for building reqwest::Client instances.
//
// Both the virtualization and the monitoring client share TLS and timeout
// settings through this module. Each client finishes the builder with its
// own connection policy (fresh connections, redirect handling).

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::error::Error;

const USER_AGENT: &str = concat!("panelctl/", env!("CARGO_PKG_VERSION"));

/// Default connect and transfer timeout for every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// TLS verification mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate and any hostname (self-signed control panels).
    ///
    /// Anyone on the network path can impersonate the panel and read the
    /// credentials sent with every request.
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    /// Config that skips certificate and hostname verification.
    pub fn insecure() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            ..Self::default()
        }
    }

    /// Override the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Start a `reqwest::ClientBuilder` with TLS, timeouts, and user agent applied.
    pub(crate) fn client_builder(&self) -> Result<reqwest::ClientBuilder, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.timeout)
            .user_agent(USER_AGENT);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                warn!("TLS certificate and hostname verification disabled");
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        Ok(builder)
    }

    /// Finish a builder produced by [`client_builder`](Self::client_builder).
    pub(crate) fn finish(builder: reqwest::ClientBuilder) -> Result<reqwest::Client, Error> {
        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}
