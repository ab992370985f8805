use std::time::Duration;

use crate::{
    error::{config::ConfigError, AppError},
    util::parse::parse_flag,
};

const DEFAULT_PORT: u16 = 5000;
/// The signal relay listens this far below `PORT`, matching the process layout
/// where the scheduler and the bot share one port range.
const SIGNAL_PORT_OFFSET: u16 = 100;
const DEFAULT_URL_CHECK_INTERVAL_SECS: u64 = 10;

pub struct Config {
    pub discord_token: String,
    pub database_url: String,

    /// Role required for the control-guild administration commands.
    pub admin_role: u64,
    /// Guild the administration commands are registered in.
    pub control_discord_server_id: u64,

    pub port: u16,

    pub test_env: bool,
    pub trigger_without_url_update: bool,
    pub disable_bad_channels: bool,

    pub url_check_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            discord_token: required("DISCORD_TOKEN")?,
            database_url: required("DATABASE_URL")?,
            admin_role: parse_required("ADMIN_ROLE")?,
            control_discord_server_id: parse_required("CONTROL_DISCORD_SERVER_ID")?,
            port: parse_optional("PORT")?.unwrap_or(DEFAULT_PORT),
            test_env: flag("TEST_ENV")?,
            trigger_without_url_update: flag("TRIGGER_WITHOUT_URL_UPDATE")?,
            disable_bad_channels: flag("DISABLE_BAD_CHANNELS")?,
            url_check_interval: Duration::from_secs(
                parse_optional("URL_CHECK_INTERVAL_SECS")?
                    .unwrap_or(DEFAULT_URL_CHECK_INTERVAL_SECS),
            ),
        })
    }

    /// Loopback port the signal relay binds to.
    pub fn signal_port(&self) -> u16 {
        signal_port_for(self.port)
    }
}

pub fn signal_port_for(port: u16) -> u16 {
    port.saturating_sub(SIGNAL_PORT_OFFSET)
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_required<T: std::str::FromStr>(name: &str) -> Result<T, ConfigError> {
    let value = required(name)?;
    value.parse().map_err(|_| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value,
    })
}

fn parse_optional<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

fn flag(name: &str) -> Result<bool, ConfigError> {
    match std::env::var(name) {
        Ok(value) => parse_flag(&value).ok_or(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(false),
    }
}
