//! Shared configuration for panelctl.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `panelctl_api::{VirtConfig, MonitorConfig}`. The CLI
//! layers its flag overrides on top of the profile types defined here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use panelctl_api::{MonitorConfig, Protocol, TlsMode, TransportConfig, VirtConfig};

/// Keyring service every secret is stored under.
pub const KEYRING_SERVICE: &str = "panelctl";

/// Prefix of environment variables merged over the config file.
pub const ENV_PREFIX: &str = "PANELCTL_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{profile}' not found")]
    UnknownProfile { profile: String },

    #[error("no {secret} configured for profile '{profile}'")]
    NoCredentials {
        profile: String,
        secret: &'static str,
    },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    20
}

/// A named profile. Either section may be absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    pub virt: Option<VirtProfile>,
    pub monitor: Option<MonitorProfile>,
}

/// Virtualization panel account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VirtProfile {
    /// API root (e.g., "https://panel.example.com:5656/api/admin").
    pub url: String,

    pub account_id: String,

    /// API key (plaintext, prefer keyring or env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

/// Monitoring server login.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorProfile {
    #[serde(default)]
    pub protocol: Protocol,

    pub host: String,

    #[serde(default = "default_monitor_port")]
    pub port: u16,

    pub username: String,

    /// Password (plaintext, prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// File the latest login's cookies are written to.
    pub cookie_jar: Option<PathBuf>,

    pub ca_cert: Option<PathBuf>,
    pub insecure: Option<bool>,
    pub timeout: Option<u64>,
}

fn default_monitor_port() -> u16 {
    8080
}

impl Config {
    /// Resolve the active profile name: explicit choice, then the
    /// configured default, then `"default"`.
    pub fn active_profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .map(String::from)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile {
                profile: name.into(),
            })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "panelctl", "panelctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("panelctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` + environment. A missing file yields the defaults.
///
/// Nested keys are addressed with a double underscore, e.g.
/// `PANELCTL_DEFAULTS__TIMEOUT=60`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Secrets ─────────────────────────────────────────────────────────

/// Which secret a keyring entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    VirtApiKey,
    MonitorPassword,
}

impl SecretKind {
    fn suffix(self) -> &'static str {
        match self {
            Self::VirtApiKey => "virt-api-key",
            Self::MonitorPassword => "monitor-password",
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::VirtApiKey => "virtualization API key",
            Self::MonitorPassword => "monitoring password",
        }
    }

    /// Keyring entry name, `<profile>/<secret>`.
    pub fn entry_name(self, profile_name: &str) -> String {
        format!("{profile_name}/{}", self.suffix())
    }
}

fn keyring_entry(profile_name: &str, kind: SecretKind) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &kind.entry_name(profile_name),
    )?)
}

/// Store a secret in the system keyring.
pub fn store_secret(
    profile_name: &str,
    kind: SecretKind,
    secret: &SecretString,
) -> Result<(), ConfigError> {
    use secrecy::ExposeSecret;

    keyring_entry(profile_name, kind)?.set_password(secret.expose_secret())?;
    Ok(())
}

/// Resolve a secret: named env var, then keyring, then plaintext.
fn resolve_secret(
    env_name: Option<&str>,
    plaintext: Option<&str>,
    profile_name: &str,
    kind: SecretKind,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's *_env → env var lookup
    if let Some(env_name) = env_name {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring_entry(profile_name, kind) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(value) = plaintext {
        return Ok(SecretString::from(value.to_owned()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
        secret: kind.describe(),
    })
}

pub fn resolve_virt_api_key(
    virt: &VirtProfile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    resolve_secret(
        virt.api_key_env.as_deref(),
        virt.api_key.as_deref(),
        profile_name,
        SecretKind::VirtApiKey,
    )
}

pub fn resolve_monitor_password(
    monitor: &MonitorProfile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    resolve_secret(
        monitor.password_env.as_deref(),
        monitor.password.as_deref(),
        profile_name,
        SecretKind::MonitorPassword,
    )
}

// ── Translation to client configs ───────────────────────────────────

/// Build the transport settings for one section. Insecure wins over a CA.
pub fn transport_config(
    defaults: &Defaults,
    insecure: Option<bool>,
    ca_cert: Option<&Path>,
    timeout: Option<u64>,
) -> TransportConfig {
    let tls = if insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ca_path) = ca_cert {
        TlsMode::CustomCa(ca_path.to_path_buf())
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        timeout: Duration::from_secs(timeout.unwrap_or(defaults.timeout)),
    }
}

/// Build a `VirtConfig` from a profile section.
///
/// An `api_key` given here is used as-is and skips secret resolution.
pub fn profile_to_virt_config(
    virt: &VirtProfile,
    profile_name: &str,
    defaults: &Defaults,
    api_key: Option<SecretString>,
) -> Result<VirtConfig, ConfigError> {
    let base_url: Url = virt.url.parse().map_err(|_| ConfigError::Validation {
        field: "virt.url".into(),
        reason: format!("invalid URL: {}", virt.url),
    })?;

    let api_key = match api_key {
        Some(key) => key,
        None => resolve_virt_api_key(virt, profile_name)?,
    };
    let transport = transport_config(
        defaults,
        virt.insecure,
        virt.ca_cert.as_deref(),
        virt.timeout,
    );

    Ok(VirtConfig::new(base_url, virt.account_id.clone(), api_key).with_transport(transport))
}

/// Build a `MonitorConfig` from a profile section.
///
/// A `password` given here is used as-is and skips secret resolution.
pub fn profile_to_monitor_config(
    monitor: &MonitorProfile,
    profile_name: &str,
    defaults: &Defaults,
    password: Option<SecretString>,
) -> Result<MonitorConfig, ConfigError> {
    if monitor.host.is_empty() {
        return Err(ConfigError::Validation {
            field: "monitor.host".into(),
            reason: "must not be empty".into(),
        });
    }

    let password = match password {
        Some(pw) => pw,
        None => resolve_monitor_password(monitor, profile_name)?,
    };
    let transport = transport_config(
        defaults,
        monitor.insecure,
        monitor.ca_cert.as_deref(),
        monitor.timeout,
    );

    let mut config = MonitorConfig::new(
        monitor.protocol,
        monitor.host.clone(),
        monitor.port,
        monitor.username.clone(),
        password,
    )
    .with_transport(transport);
    if let Some(ref jar) = monitor.cookie_jar {
        config = config.with_cookie_jar(jar.clone());
    }
    Ok(config)
}

/// Split a monitoring server URL such as `https://mon.example.com:8443`
/// into protocol, host, and port. A missing port takes the scheme default.
pub fn parse_monitor_url(raw: &str) -> Result<(Protocol, String, u16), ConfigError> {
    let invalid = |reason: &str| ConfigError::Validation {
        field: "monitor url".into(),
        reason: format!("{reason}: {raw}"),
    };

    let url: Url = raw.parse().map_err(|_| invalid("invalid URL"))?;
    let protocol: Protocol = url
        .scheme()
        .parse()
        .map_err(|_| invalid("scheme must be http or https"))?;
    let host = url
        .host_str()
        .ok_or_else(|| invalid("missing host"))?
        .to_owned();
    let port = url
        .port_or_known_default()
        .ok_or_else(|| invalid("missing port"))?;

    Ok((protocol, host, port))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    const SAMPLE: &str = r#"
default_profile = "lab"

[defaults]
timeout = 30

[profiles.lab.virt]
url = "https://panel.example.com:5656/api/admin"
account_id = "ACCT"
api_key = "plain-key"
insecure = true

[profiles.lab.monitor]
host = "mon.example.com"
username = "admin"
password = "plain-pw"
cookie_jar = "/tmp/panelctl-cookies.txt"
timeout = 5

[profiles.virt-only.virt]
url = "https://other.example.com/api/admin"
account_id = "OTHER"
"#;

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|jail| {
            let config = load_config_from(&jail.directory().join("absent.toml")).unwrap();
            assert_eq!(config.default_profile.as_deref(), Some("default"));
            assert_eq!(config.defaults.timeout, 20);
            assert!(!config.defaults.insecure);
            assert!(config.profiles.is_empty());
            Ok(())
        });
    }

    #[test]
    fn parses_profiles_and_sections() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            let config = load_config_from(Path::new("config.toml")).unwrap();

            assert_eq!(config.active_profile_name(None), "lab");
            assert_eq!(config.active_profile_name(Some("virt-only")), "virt-only");
            assert_eq!(config.defaults.timeout, 30);

            let lab = config.profile("lab").unwrap();
            let monitor = lab.monitor.as_ref().unwrap();
            assert_eq!(monitor.protocol, Protocol::Https);
            assert_eq!(monitor.port, 8080);
            assert_eq!(monitor.username, "admin");

            let other = config.profile("virt-only").unwrap();
            assert!(other.monitor.is_none());
            assert!(matches!(
                config.profile("nope"),
                Err(ConfigError::UnknownProfile { .. })
            ));
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            jail.set_env("PANELCTL_DEFAULTS__TIMEOUT", "45");
            jail.set_env("PANELCTL_DEFAULT_PROFILE", "virt-only");

            let config = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(config.defaults.timeout, 45);
            assert_eq!(config.active_profile_name(None), "virt-only");
            Ok(())
        });
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.profiles.insert(
            "home".into(),
            Profile {
                virt: None,
                monitor: Some(MonitorProfile {
                    protocol: Protocol::Http,
                    host: "10.0.0.2".into(),
                    port: 8080,
                    username: "admin".into(),
                    password: None,
                    password_env: Some("MON_PW".into()),
                    cookie_jar: None,
                    ca_cert: None,
                    insecure: None,
                    timeout: None,
                }),
            },
        );
        save_config_to(&config, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("[profiles.home.monitor]"));
        let parsed: Config = toml::from_str(&text).unwrap();
        let monitor = parsed.profiles["home"].monitor.as_ref().unwrap();
        assert_eq!(monitor.protocol, Protocol::Http);
        assert_eq!(monitor.password_env.as_deref(), Some("MON_PW"));
    }

    #[test]
    fn env_secret_wins_over_plaintext() {
        Jail::expect_with(|jail| {
            jail.set_env("PANELCTL_TEST_VIRT_KEY", "from-env");
            let virt = VirtProfile {
                url: "https://panel.example.com/api/admin".into(),
                account_id: "ACCT".into(),
                api_key: Some("plain".into()),
                api_key_env: Some("PANELCTL_TEST_VIRT_KEY".into()),
                ca_cert: None,
                insecure: None,
                timeout: None,
            };
            let key = resolve_virt_api_key(&virt, "panelctl-test-env").unwrap();
            assert_eq!(key.expose_secret(), "from-env");
            Ok(())
        });
    }

    #[test]
    fn missing_secret_is_reported() {
        let monitor = MonitorProfile {
            protocol: Protocol::Https,
            host: "mon.example.com".into(),
            port: 443,
            username: "admin".into(),
            password: None,
            password_env: Some("PANELCTL_TEST_UNSET_PASSWORD".into()),
            cookie_jar: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        };
        let err = resolve_monitor_password(&monitor, "panelctl-test-missing").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NoCredentials {
                secret: "monitoring password",
                ..
            }
        ));
    }

    #[test]
    fn virt_profile_translates() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            let config = load_config_from(Path::new("config.toml")).unwrap();
            let virt = config.profile("lab").unwrap().virt.as_ref().unwrap();

            let vc = profile_to_virt_config(virt, "panelctl-test-lab", &config.defaults, None).unwrap();
            assert_eq!(vc.base_url.as_str(), "https://panel.example.com:5656/api/admin");
            assert_eq!(vc.account_id, "ACCT");
            assert_eq!(vc.transport.tls, TlsMode::DangerAcceptInvalid);
            assert_eq!(vc.transport.timeout, Duration::from_secs(30));
            Ok(())
        });
    }

    #[test]
    fn monitor_profile_translates() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            let config = load_config_from(Path::new("config.toml")).unwrap();
            let monitor = config.profile("lab").unwrap().monitor.as_ref().unwrap();

            let mc =
                profile_to_monitor_config(monitor, "panelctl-test-lab", &config.defaults, None)
                    .unwrap();
            assert_eq!(mc.host, "mon.example.com");
            assert_eq!(mc.port, 8080);
            assert_eq!(mc.transport.tls, TlsMode::System);
            assert_eq!(mc.transport.timeout, Duration::from_secs(5));
            assert_eq!(
                mc.cookie_jar_path.as_deref(),
                Some(Path::new("/tmp/panelctl-cookies.txt"))
            );
            Ok(())
        });
    }

    #[test]
    fn invalid_virt_url_is_rejected() {
        let virt = VirtProfile {
            url: "not a url".into(),
            account_id: "ACCT".into(),
            api_key: Some("k".into()),
            api_key_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        };
        let err =
            profile_to_virt_config(&virt, "panelctl-test", &Defaults::default(), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn explicit_secret_skips_resolution() {
        let virt = VirtProfile {
            url: "https://panel.example.com/api/admin".into(),
            account_id: "ACCT".into(),
            api_key: Some("plain".into()),
            api_key_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        };
        let vc = profile_to_virt_config(
            &virt,
            "panelctl-test",
            &Defaults::default(),
            Some(SecretString::from("given".to_owned())),
        )
        .unwrap();
        assert_eq!(vc.api_key.expose_secret(), "given");
    }

    #[test]
    fn empty_monitor_host_is_rejected() {
        let monitor = MonitorProfile {
            protocol: Protocol::Https,
            host: String::new(),
            port: 8080,
            username: "admin".into(),
            password: Some("pw".into()),
            password_env: None,
            cookie_jar: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        };
        let err = profile_to_monitor_config(&monitor, "panelctl-test", &Defaults::default(), None)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Validation { ref field, .. } if field == "monitor.host"
        ));
    }

    #[test]
    fn transport_insecure_beats_custom_ca() {
        let defaults = Defaults::default();
        let ca = Path::new("/etc/ssl/panel.pem");

        let t = transport_config(&defaults, Some(true), Some(ca), None);
        assert_eq!(t.tls, TlsMode::DangerAcceptInvalid);

        let t = transport_config(&defaults, None, Some(ca), Some(3));
        assert_eq!(t.tls, TlsMode::CustomCa(ca.to_path_buf()));
        assert_eq!(t.timeout, Duration::from_secs(3));
    }

    #[test]
    fn monitor_url_splits() {
        assert_eq!(
            parse_monitor_url("https://mon.example.com:8443").unwrap(),
            (Protocol::Https, "mon.example.com".into(), 8443)
        );
        assert_eq!(
            parse_monitor_url("http://10.0.0.2").unwrap(),
            (Protocol::Http, "10.0.0.2".into(), 80)
        );
        assert!(parse_monitor_url("ftp://mon.example.com").is_err());
        assert!(parse_monitor_url("mon.example.com").is_err());
    }

    #[test]
    fn keyring_entry_names() {
        assert_eq!(SecretKind::VirtApiKey.entry_name("lab"), "lab/virt-api-key");
        assert_eq!(
            SecretKind::MonitorPassword.entry_name("lab"),
            "lab/monitor-password"
        );
    }
}
