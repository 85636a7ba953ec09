//! Config subcommand handlers.

use tabled::Tabled;

use panelctl_config::{self as cfg, Config, SecretKind};

use super::secret_or_prompt;
use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat, SecretTarget};
use crate::config;
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "********";

// ── Show helpers ────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "Virt URL")]
    virt_url: String,
    #[tabled(rename = "Account")]
    account_id: String,
    #[tabled(rename = "Monitor")]
    monitor: String,
    #[tabled(rename = "User")]
    monitor_user: String,
}

fn profile_rows(config: &Config) -> Vec<ProfileRow> {
    let default = config.default_profile.as_deref().unwrap_or("default");
    config
        .profiles
        .iter()
        .map(|(name, profile)| {
            let marker = if name == default { " *" } else { "" };
            let (virt_url, account_id) = profile.virt.as_ref().map_or_else(
                || ("-".into(), "-".into()),
                |v| (v.url.clone(), v.account_id.clone()),
            );
            let (monitor, monitor_user) = profile.monitor.as_ref().map_or_else(
                || ("-".into(), "-".into()),
                |m| {
                    (
                        format!("{}://{}:{}", m.protocol, m.host, m.port),
                        m.username.clone(),
                    )
                },
            );
            ProfileRow {
                name: format!("{name}{marker}"),
                virt_url,
                account_id,
                monitor,
                monitor_user,
            }
        })
        .collect()
}

/// Copy of the config with plaintext secrets masked.
fn redacted(config: &Config) -> Config {
    let mut out = config.clone();
    for profile in out.profiles.values_mut() {
        if let Some(ref mut virt) = profile.virt {
            if virt.api_key.is_some() {
                virt.api_key = Some(REDACTED.into());
            }
        }
        if let Some(ref mut monitor) = profile.monitor {
            if monitor.password.is_some() {
                monitor.password = Some(REDACTED.into());
            }
        }
    }
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&cfg::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let config = cfg::load_config()?;
            let out = match global.output {
                OutputFormat::Json => serde_json::to_string_pretty(&redacted(&config))
                    .map_err(|e| CliError::Validation {
                        field: "config".into(),
                        reason: format!("failed to serialize config: {e}"),
                    })?,
                OutputFormat::Raw if config.profiles.is_empty() => {
                    "No profiles configured.".into()
                }
                OutputFormat::Raw => output::render_table(&profile_rows(&config)),
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let config = cfg::load_config()?;
            let default = config.default_profile.as_deref().unwrap_or("default");
            if config.profiles.is_empty() {
                eprintln!("No profiles configured.");
            } else {
                for name in config.profiles.keys() {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut config = cfg::load_config()?;
            if !config.profiles.contains_key(&name) {
                return Err(config::profile_not_found(&config, &name));
            }
            config.default_profile = Some(name.clone());
            cfg::save_config(&config)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        ConfigCommand::SetSecret { secret } => {
            let config = cfg::load_config()?;
            let profile_name = config::active_profile_name(global, &config);

            let (kind, prompt) = match secret {
                SecretTarget::VirtApiKey => (SecretKind::VirtApiKey, "API key: "),
                SecretTarget::MonitorPassword => (SecretKind::MonitorPassword, "Password: "),
            };
            let value = secret_or_prompt(None, prompt)?;
            cfg::store_secret(&profile_name, kind, &value)?;

            eprintln!(
                "✓ Stored {} in system keyring for profile '{profile_name}'",
                kind.entry_name(&profile_name)
            );
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use panelctl_api::Protocol;
    use panelctl_config::{MonitorProfile, Profile, VirtProfile};

    use super::*;

    fn config() -> Config {
        let mut config = Config::default();
        config.profiles.insert(
            "default".into(),
            Profile {
                virt: Some(VirtProfile {
                    url: "https://panel.example.com/api/admin".into(),
                    account_id: "ACCT".into(),
                    api_key: Some("secret-key".into()),
                    api_key_env: None,
                    ca_cert: None,
                    insecure: None,
                    timeout: None,
                }),
                monitor: Some(MonitorProfile {
                    protocol: Protocol::Https,
                    host: "mon.example.com".into(),
                    port: 8443,
                    username: "admin".into(),
                    password: Some("secret-pw".into()),
                    password_env: None,
                    cookie_jar: None,
                    ca_cert: None,
                    insecure: None,
                    timeout: None,
                }),
            },
        );
        config
    }

    #[test]
    fn show_masks_plaintext_secrets() {
        let json = serde_json::to_string(&redacted(&config())).unwrap();
        assert!(!json.contains("secret-key"));
        assert!(!json.contains("secret-pw"));
        assert!(json.contains(REDACTED));
    }

    #[test]
    fn table_marks_default_profile() {
        let table = output::render_table(&profile_rows(&config()));
        assert!(table.contains("default *"));
        assert!(table.contains("https://mon.example.com:8443"));
        assert!(!table.contains("secret"));
    }
}
