use std::{collections::HashMap, fs};

use mail_relay::{
    smtp::{DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT},
    RelayCredentials, SmtpRelayConfig,
};
use tracing::warn;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            smtp_host: DEFAULT_SMTP_HOST.into(),
            smtp_port: DEFAULT_SMTP_PORT,
            smtp_username: None,
            smtp_password: None,
        }
    }
}

impl Settings {
    /// Relay settings, or `None` when either credential is absent.
    pub fn relay_config(&self) -> Option<SmtpRelayConfig> {
        let credentials =
            RelayCredentials::from_parts(self.smtp_username.clone(), self.smtp_password.clone())?;
        Some(SmtpRelayConfig {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            credentials,
        })
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    settings_from_sources(file.as_deref(), |key| std::env::var(key).ok())
}

/// File values override defaults, environment values override both.
/// Credentials are only ever read from the environment.
pub(crate) fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, toml::Value>>(raw) {
            Ok(file_cfg) => {
                let file_cfg: HashMap<String, String> = file_cfg
                    .into_iter()
                    .map(|(k, v)| match v {
                        toml::Value::String(s) => (k, s),
                        other => (k, other.to_string()),
                    })
                    .collect();
                if let Some(v) = file_cfg.get("bind_addr") {
                    settings.server_bind = v.clone();
                }
                if let Some(v) = file_cfg.get("smtp_host") {
                    settings.smtp_host = v.clone();
                }
                if let Some(v) = file_cfg.get("smtp_port") {
                    apply_port(&mut settings, v);
                }
            }
            Err(error) => warn!(%error, file = SETTINGS_FILE, "ignoring unreadable settings file"),
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("APP__SMTP_HOST") {
        settings.smtp_host = v;
    }
    if let Some(v) = env("APP__SMTP_PORT") {
        apply_port(&mut settings, &v);
    }

    settings.smtp_username = env("SMTP2GO_USERNAME").filter(|v| !v.is_empty());
    settings.smtp_password = env("SMTP2GO_PASSWORD").filter(|v| !v.is_empty());

    settings
}

fn apply_port(settings: &mut Settings, raw: &str) {
    match raw.trim().parse::<u16>() {
        Ok(port) => settings.smtp_port = port,
        Err(_) => warn!(value = raw, "ignoring invalid smtp port"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
