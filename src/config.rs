use anyhow::{anyhow, Result};
use std::env;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite:./data/applications.db";

/// Runtime settings read from the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    /// Telegram user id that receives notifications and may use admin commands.
    pub admin_id: i64,
    pub database_url: String,
    pub http_port: u16,
    pub reminder: ReminderSettings,
}

/// Timing of the reminder scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderSettings {
    pub tick_interval: Duration,
    pub retry_interval: Duration,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(3600),
            retry_interval: Duration::from_secs(300),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let admin_id = env::var("ADMIN_ID")
            .map_err(|_| anyhow!("ADMIN_ID must be set"))?
            .trim()
            .parse::<i64>()
            .map_err(|_| anyhow!("Invalid ADMIN_ID"))?;

        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let defaults = ReminderSettings::default();
        let reminder = ReminderSettings {
            tick_interval: seconds_from_env("REMINDER_INTERVAL_SECS", defaults.tick_interval)?,
            retry_interval: seconds_from_env("REMINDER_RETRY_SECS", defaults.retry_interval)?,
        };

        Ok(Config {
            telegram_bot_token: token,
            admin_id,
            database_url: Self::database_url_from_env(),
            http_port,
            reminder,
        })
    }

    /// Database URL alone, for tools that never talk to Telegram.
    pub fn database_url_from_env() -> String {
        match env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

fn seconds_from_env(name: &str, default: Duration) -> Result<Duration> {
    let raw = match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(default),
    };

    let secs: u64 = raw.trim()
        .parse()
        .map_err(|_| anyhow!("Invalid {}", name))?;

    if secs == 0 {
        return Err(anyhow!("{} must be greater than zero", name));
    }

    Ok(Duration::from_secs(secs))
}
