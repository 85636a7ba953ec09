//! Flag-aware translation from profiles to client configs.
//!
//! Profile loading and secret lookup live in `panelctl-config`; this module
//! layers the global CLI flags on top. Flags win over the profile, and a
//! secret passed on the command line skips the env/keyring/plaintext chain.

use secrecy::SecretString;

use panelctl_api::{MonitorConfig, VirtConfig};
use panelctl_config::{self as cfg, Config, MonitorProfile, Profile, VirtProfile};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// The named profile, or an error listing the available ones.
///
/// A missing profile is only an error when it was asked for explicitly;
/// otherwise the flags alone may be enough.
fn lookup_profile<'a>(
    global: &GlobalOpts,
    config: &'a Config,
    name: &str,
) -> Result<Option<&'a Profile>, CliError> {
    match config.profiles.get(name) {
        Some(profile) => Ok(Some(profile)),
        None if global.profile.is_some() => Err(profile_not_found(config, name)),
        None => Ok(None),
    }
}

pub fn profile_not_found(config: &Config, name: &str) -> CliError {
    let available: Vec<_> = config.profiles.keys().cloned().collect();
    CliError::ProfileNotFound {
        name: name.into(),
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}

fn no_config(profile_name: &str, section: &'static str) -> CliError {
    CliError::NoConfig {
        profile: profile_name.into(),
        section,
        path: cfg::config_path().display().to_string(),
    }
}

// ── Virtualization ───────────────────────────────────────────────────

/// Build a `VirtConfig` from the active profile and CLI overrides.
pub fn virt_config(global: &GlobalOpts, config: &Config) -> Result<VirtConfig, CliError> {
    let profile_name = active_profile_name(global, config);
    let section = lookup_profile(global, config, &profile_name)?.and_then(|p| p.virt.as_ref());

    // 1. Endpoint and account (flag > profile)
    let mut merged = match section {
        Some(virt) => VirtProfile {
            url: global.virt_url.clone().unwrap_or_else(|| virt.url.clone()),
            account_id: global
                .account_id
                .clone()
                .unwrap_or_else(|| virt.account_id.clone()),
            ..virt.clone()
        },
        None => {
            let (Some(url), Some(account_id)) = (&global.virt_url, &global.account_id) else {
                return Err(no_config(&profile_name, "virt"));
            };
            VirtProfile {
                url: url.clone(),
                account_id: account_id.clone(),
                api_key: None,
                api_key_env: None,
                ca_cert: None,
                insecure: None,
                timeout: None,
            }
        }
    };

    // 2. TLS and timeout
    apply_transport_flags(global, &mut merged.insecure, &mut merged.timeout);

    // 3. API key (flag > env > keyring > plaintext)
    let api_key = global.api_key.clone().map(SecretString::from);
    Ok(cfg::profile_to_virt_config(
        &merged,
        &profile_name,
        &config.defaults,
        api_key,
    )?)
}

/// `-k` forces insecure mode on; `--timeout` replaces the section timeout.
fn apply_transport_flags(
    global: &GlobalOpts,
    insecure: &mut Option<bool>,
    timeout: &mut Option<u64>,
) {
    if global.insecure {
        *insecure = Some(true);
    }
    if global.timeout.is_some() {
        *timeout = global.timeout;
    }
}

// ── Monitoring ───────────────────────────────────────────────────────

/// Build a `MonitorConfig` from the active profile and CLI overrides.
pub fn monitor_config(global: &GlobalOpts, config: &Config) -> Result<MonitorConfig, CliError> {
    let profile_name = active_profile_name(global, config);
    let section = lookup_profile(global, config, &profile_name)?.and_then(|p| p.monitor.as_ref());

    // 1. Endpoint (flag > profile)
    let endpoint = global
        .monitor_url
        .as_deref()
        .map(cfg::parse_monitor_url)
        .transpose()?;

    let mut merged = match (section, endpoint) {
        (Some(monitor), endpoint) => {
            let mut merged = monitor.clone();
            if let Some((protocol, host, port)) = endpoint {
                merged.protocol = protocol;
                merged.host = host;
                merged.port = port;
            }
            merged
        }
        (None, Some((protocol, host, port))) => {
            let Some(ref username) = global.monitor_user else {
                return Err(no_config(&profile_name, "monitor"));
            };
            MonitorProfile {
                protocol,
                host,
                port,
                username: username.clone(),
                password: None,
                password_env: None,
                cookie_jar: None,
                ca_cert: None,
                insecure: None,
                timeout: None,
            }
        }
        (None, None) => return Err(no_config(&profile_name, "monitor")),
    };

    if let Some(ref username) = global.monitor_user {
        merged.username.clone_from(username);
    }
    if let Some(ref jar) = global.cookie_jar {
        merged.cookie_jar = Some(jar.clone());
    }

    // 2. TLS and timeout
    apply_transport_flags(global, &mut merged.insecure, &mut merged.timeout);

    // 3. Password (flag > env > keyring > plaintext)
    let password = global.monitor_password.clone().map(SecretString::from);
    Ok(cfg::profile_to_monitor_config(
        &merged,
        &profile_name,
        &config.defaults,
        password,
    )?)
}
