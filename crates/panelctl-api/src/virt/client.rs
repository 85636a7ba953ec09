// Virtualization API HTTP client
//
// Wraps `reqwest::Client` with the control panel's single-endpoint
// convention: every call is a form POST to `{base}/command.php` carrying
// the account credentials and an action name. Operation modules (servers,
// resources, listings) are implemented as inherent methods in separate
// files to keep this module focused on transport mechanics.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::virt::request::Request;

const COMMAND_PATH: &str = "command.php";

/// Connection settings for one virtualization panel account.
#[derive(Debug, Clone)]
pub struct VirtConfig {
    /// Panel API root, e.g. `https://panel.example.com:5656/api/admin`.
    pub base_url: Url,
    pub account_id: String,
    pub api_key: SecretString,
    pub transport: TransportConfig,
}

impl VirtConfig {
    pub fn new(base_url: Url, account_id: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            base_url,
            account_id: account_id.into(),
            api_key,
            transport: TransportConfig::default(),
        }
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }
}

/// Client for the virtualization control panel API.
///
/// Each operation validates its arguments, then sends exactly one request
/// and returns the response body verbatim. No status or payload inspection
/// is done here: remote errors are the caller's to interpret.
pub struct VirtClient {
    http: reqwest::Client,
    config: VirtConfig,
    endpoint: Url,
}

impl VirtClient {
    /// Create a client. Credentials are not checked until the first call.
    pub fn new(config: VirtConfig) -> Result<Self, Error> {
        // No idle connections are kept, so every call opens a fresh one.
        let builder = config.transport.client_builder()?.pool_max_idle_per_host(0);
        let http = TransportConfig::finish(builder)?;
        Self::with_client(http, config)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, config: VirtConfig) -> Result<Self, Error> {
        let endpoint = command_url(&config.base_url)?;
        Ok(Self {
            http,
            config,
            endpoint,
        })
    }

    /// The `command.php` URL every call is posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn config(&self) -> &VirtConfig {
        &self.config
    }

    /// Send one request and return the raw response body.
    pub async fn execute(&self, request: Request) -> Result<String, Error> {
        let action = request.action();
        debug!(action = action.as_str(), url = %self.endpoint, "POST");

        let form = request.into_form(
            &self.config.account_id,
            self.config.api_key.expose_secret(),
        );

        let resp = self
            .http
            .post(self.endpoint.clone())
            .form(&form)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        debug!(action = action.as_str(), %status, bytes = body.len(), "response");
        Ok(body)
    }
}

fn command_url(base: &Url) -> Result<Url, Error> {
    let base = base.as_str().trim_end_matches('/');
    Ok(Url::parse(&format!("{base}/{COMMAND_PATH}"))?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn command_url_appends_once() {
        let with_slash = Url::parse("https://panel.example.com/api/admin/").unwrap();
        let without = Url::parse("https://panel.example.com/api/admin").unwrap();
        assert_eq!(
            command_url(&with_slash).unwrap().as_str(),
            "https://panel.example.com/api/admin/command.php"
        );
        assert_eq!(command_url(&with_slash).unwrap(), command_url(&without).unwrap());
    }

    #[test]
    fn root_base_url() {
        let base = Url::parse("https://panel.example.com:5656").unwrap();
        assert_eq!(
            command_url(&base).unwrap().as_str(),
            "https://panel.example.com:5656/command.php"
        );
    }
}
