// Monitoring API HTTP client
//
// Every query is two sequential requests: a basic-auth login that yields
// session cookies, then the JSON-RPC POST carrying those cookies. There is
// no session reuse between queries.

use std::fmt;
use std::path::PathBuf;

use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::redirect::Policy;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::monitor::rpc::RpcCall;
use crate::monitor::session::Session;
use crate::transport::TransportConfig;

/// Cookie authentication endpoint.
pub const LOGIN_PATH: &str = "/zport/acl_users/cookieAuthHelper/login";

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// URL scheme of the monitoring server.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection settings for one monitoring server.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub protocol: Protocol,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    /// Where the latest login's cookies are written, if anywhere.
    ///
    /// Clients that run concurrently must not share a path.
    pub cookie_jar_path: Option<PathBuf>,
    pub transport: TransportConfig,
}

impl MonitorConfig {
    pub fn new(
        protocol: Protocol,
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            protocol,
            host: host.into(),
            port,
            username: username.into(),
            password,
            cookie_jar_path: None,
            transport: TransportConfig::default(),
        }
    }

    pub fn with_cookie_jar(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookie_jar_path = Some(path.into());
        self
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// `{protocol}://{host}:{port}/`
    pub fn origin(&self) -> Result<Url, Error> {
        Ok(Url::parse(&format!(
            "{}://{}:{}/",
            self.protocol, self.host, self.port
        ))?)
    }
}

/// Client for the monitoring server's JSON-RPC routers.
pub struct MonitorClient {
    http: reqwest::Client,
    config: MonitorConfig,
    origin: Url,
}

impl MonitorClient {
    /// Create a client. Redirects are not followed: the login endpoint
    /// sets its cookies on a redirect response.
    pub fn new(config: MonitorConfig) -> Result<Self, Error> {
        let builder = config.transport.client_builder()?.redirect(Policy::none());
        let http = TransportConfig::finish(builder)?;
        Self::with_client(http, config)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, config: MonitorConfig) -> Result<Self, Error> {
        let origin = config.origin()?;
        Ok(Self {
            http,
            config,
            origin,
        })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Absolute URL for a server path. A missing leading `/` is added.
    ///
    /// The path is set verbatim: `?` and `#` are percent-encoded rather
    /// than starting a query or fragment.
    pub(crate) fn url(&self, path: &str) -> Url {
        let mut url = self.origin.clone();
        if path.starts_with('/') {
            url.set_path(path);
        } else {
            url.set_path(&format!("/{path}"));
        }
        url
    }

    /// Log in with basic auth and capture the session cookies.
    ///
    /// The login status is not inspected: a rejected login yields a
    /// session without cookies and the remote answers the following query
    /// with its own error payload.
    pub async fn login(&self) -> Result<Session, Error> {
        let url = self.url(LOGIN_PATH);
        debug!(%url, username = %self.config.username, "logging in");

        let resp = self
            .http
            .post(url.clone())
            .basic_auth(&self.config.username, Some(self.config.password.expose_secret()))
            .send()
            .await
            .map_err(Error::Transport)?;

        let session = Session::from_headers(resp.headers(), &url);
        debug!(status = %resp.status(), ?session, "login response");

        if let Some(ref path) = self.config.cookie_jar_path {
            session.persist(path)?;
        }
        Ok(session)
    }

    /// Log in, then send `call` to `path`. Returns the raw response body.
    pub async fn query(&self, call: &RpcCall, path: &str) -> Result<String, Error> {
        let session = self.login().await?;
        self.query_with_session(&session, call, path).await
    }

    /// Send `call` to `path` with an existing session's cookies.
    pub async fn query_with_session(
        &self,
        session: &Session,
        call: &RpcCall,
        path: &str,
    ) -> Result<String, Error> {
        let url = self.url(path);
        debug!(%url, method = call.method, "RPC POST");

        let mut builder = self.http.post(url.clone()).header(CONTENT_TYPE, JSON_UTF8);
        if let Some(cookie) = session.cookie_header(&url) {
            builder = builder.header(COOKIE, cookie);
        }

        let resp = builder
            .json(&call.envelope())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        debug!(%status, bytes = body.len(), "RPC response");
        Ok(body)
    }
}
