use anyhow::{Context, Result, anyhow};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database: DbConfig,

    // Rate limiting, 0 disables
    pub rate_api_per_min: u32,

    pub api_prefix: String,
    pub log_dir: String,
}

/// Credentials and pool bounds for the academic database.
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

// keep the password out of logs
impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| anyhow!("{key} must be set"));

        Ok(Self {
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            database: DbConfig {
                host: required("DB_HOST")?,
                user: required("DB_USER")?,
                password: required("DB_PASSWORD")?,
                name: required("DB_NAME")?,
                port: parse_or(&lookup, "DB_PORT", 3306)?,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
                acquire_timeout_secs: parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5)?,
            },
            rate_api_per_min: parse_or(&lookup, "RATE_API_PER_MIN", 600)?,
            api_prefix: lookup("API_PREFIX").unwrap_or_else(|| "/api".to_string()),
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const SECRETS: [(&str, &str); 4] = [
        ("DB_HOST", "db.local"),
        ("DB_USER", "registrar"),
        ("DB_PASSWORD", "s3cret"),
        ("DB_NAME", "academia"),
    ];

    #[test]
    fn defaults_apply_when_only_secrets_are_set() {
        let config = Config::from_lookup(lookup_from(&SECRETS)).unwrap();

        assert_eq!(config.database.host, "db.local");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server_addr, "127.0.0.1:8080");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.rate_api_per_min, 600);
    }

    #[test]
    fn missing_secret_fails_fast() {
        let err = Config::from_lookup(lookup_from(&SECRETS[..3])).unwrap_err();
        assert!(err.to_string().contains("DB_NAME"));
    }

    #[test]
    fn invalid_number_is_reported_with_its_key() {
        let mut pairs = SECRETS.to_vec();
        pairs.push(("DB_MAX_CONNECTIONS", "lots"));

        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
    }

    #[test]
    fn debug_output_hides_the_password() {
        let config = Config::from_lookup(lookup_from(&SECRETS)).unwrap();
        assert!(!format!("{:?}", config).contains("s3cret"));
    }
}
