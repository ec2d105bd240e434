use anyhow::Context;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Session settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Directory backing the local key-value store.
    pub storage_dir: PathBuf,
    /// Upper bound for each remote call.
    pub remote_timeout: Duration,
    pub notice_ttl: Duration,
    /// Capacity of the sync worker's queue.
    pub sync_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".pos-state"),
            remote_timeout: Duration::from_millis(5000),
            notice_ttl: Duration::from_millis(3000),
            sync_buffer: 32,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Unset variables
    /// keep their defaults; set but malformed ones are an error.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let storage_dir = var("POS_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_dir);
        let remote_timeout = parse::<u64>(&var, "POS_REMOTE_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.remote_timeout);
        let notice_ttl = parse::<u64>(&var, "POS_NOTICE_TTL_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.notice_ttl);
        let sync_buffer = parse::<usize>(&var, "POS_SYNC_BUFFER")?
            .unwrap_or(defaults.sync_buffer);
        anyhow::ensure!(sync_buffer > 0, "POS_SYNC_BUFFER must be at least 1");

        Ok(Self {
            storage_dir,
            remote_timeout,
            notice_ttl,
            sync_buffer,
        })
    }
}

fn parse<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var(key)
        .map(|raw| raw.trim().parse::<T>().with_context(|| format!("invalid {key}: {raw:?}")))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SessionConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.notice_ttl, Duration::from_secs(3));
    }

    #[test]
    fn test_overrides() {
        let config = SessionConfig::from_vars(vars(&[
            ("POS_STORAGE_DIR", "/tmp/pos"),
            ("POS_REMOTE_TIMEOUT_MS", "250"),
            ("POS_SYNC_BUFFER", "4"),
        ]))
        .unwrap();
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/pos"));
        assert_eq!(config.remote_timeout, Duration::from_millis(250));
        assert_eq!(config.sync_buffer, 4);
    }

    #[test]
    fn test_rejects_malformed_values() {
        let err = SessionConfig::from_vars(vars(&[("POS_NOTICE_TTL_MS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("POS_NOTICE_TTL_MS"));
        assert!(SessionConfig::from_vars(vars(&[("POS_SYNC_BUFFER", "0")])).is_err());
    }
}
