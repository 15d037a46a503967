use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_SMTP_PORT: u16 = 465;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub schedule: ScheduleConfig,
    pub mail: MailConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub disk_mount_point: String,
    pub cpu_sample_ms: u64,
    pub services_command: Vec<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            disk_mount_point: "/".to_string(),
            cpu_sample_ms: 1000,
            services_command: [
                "systemctl",
                "list-units",
                "--type=service",
                "--state=running",
                "--no-legend",
                "--plain",
                "--no-pager",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub interval_hours: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig { interval_hours: 4 }
    }
}

impl ScheduleConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_hours.max(1).saturating_mul(3600))
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub smtp_server: Option<String>,
    pub smtp_port: u16,
    pub sender: Option<String>,
    pub password: Option<String>,
    pub receiver: Option<String>,
    pub subject: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        MailConfig {
            smtp_server: None,
            smtp_port: DEFAULT_SMTP_PORT,
            sender: None,
            password: None,
            receiver: None,
            subject: "System Health Report".to_string(),
        }
    }
}

// Keeps the password out of logs.
impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("sender", &self.sender)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("receiver", &self.receiver)
            .field("subject", &self.subject)
            .finish()
    }
}

impl MailConfig {
    /// Names of the settings still needed before mail can be sent.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.smtp_server.is_none() {
            missing.push("smtp_server");
        }
        if self.sender.is_none() {
            missing.push("sender");
        }
        if self.password.is_none() {
            missing.push("password");
        }
        if self.receiver.is_none() {
            missing.push("receiver");
        }
        missing
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Overlays the mail settings found in the environment. `lookup` is
    /// `std::env::var(..).ok()` in production.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(server) = non_empty("SMTP_SERVER") {
            self.mail.smtp_server = Some(server);
        }
        if let Some(port) = non_empty("SMTP_PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => self.mail.smtp_port = port,
                Err(_) => warn!(value = %port, "ignoring invalid SMTP_PORT"),
            }
        }
        if let Some(sender) = non_empty("EMAIL_SENDER") {
            self.mail.sender = Some(sender);
        }
        if let Some(password) = non_empty("EMAIL_PASSWORD") {
            self.mail.password = Some(password);
        }
        if let Some(receiver) = non_empty("EMAIL_RECEIVER") {
            self.mail.receiver = Some(receiver);
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("healthcheck").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
