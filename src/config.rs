use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::CopydeskError;

pub const CONFIG_FILE: &str = "copydesk.toml";
pub const ENV_PREFIX: &str = "COPYDESK_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    pub body_limit_bytes: usize,
    pub login_attempts_per_minute: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:copydesk.sqlite".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            body_limit_bytes: 1024 * 1024,
            login_attempts_per_minute: 5,
        }
    }
}

impl Config {
    /// Defaults, then `copydesk.toml` if present, then `COPYDESK_*` env vars.
    pub fn load() -> Result<Self, CopydeskError> {
        Ok(Self::figment().extract()?)
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_extract_without_sources() {
        figment::Jail::expect_with(|_jail| {
            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg, Config::default());
            Ok(())
        });
    }

    #[test]
    fn env_overrides_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                listen_addr = "127.0.0.1:9000"
                login_attempts_per_minute = 10
                "#,
            )?;
            jail.set_env("COPYDESK_LOGIN_ATTEMPTS_PER_MINUTE", "3");

            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
            assert_eq!(cfg.login_attempts_per_minute, 3);
            assert_eq!(cfg.database_url, "sqlite:copydesk.sqlite");
            Ok(())
        });
    }

    #[test]
    fn malformed_env_value_is_a_config_error() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("COPYDESK_LOGIN_ATTEMPTS_PER_MINUTE", "lots");
            let err = Config::load().unwrap_err();
            assert!(matches!(err, CopydeskError::Config(_)));
            assert!(err.status().is_server_error());
            Ok(())
        });
    }
}
