//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. If no file is found, falls back to defaults
//!
//! ## Environment Variables
//! - `TABGUARD_DB_PATH`: Database file path
//! - `TABGUARD_DB_POOL_SIZE`: Connection pool size
//! - `TABGUARD_TICK_INTERVAL`: Tick cadence in seconds
//! - `TABGUARD_FLUSH_THRESHOLD`: Mid-session flush threshold in seconds
//!
//! ## File Locations
//! The loader probes `config.toml`, `config.json`, `tabguard.toml`, and
//! `tabguard.json` in the current working directory.

use std::path::{Path, PathBuf};

use tabguard_domain::{
    DatabaseConfig, Result, TabGuardError, TrackerConfig, TrackingConfig,
};

/// Load configuration with automatic fallback strategy.
///
/// # Errors
/// Returns `TabGuardError::Config` if a config file exists but cannot be
/// parsed, or an environment variable holds an invalid value.
pub fn load() -> Result<TrackerConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("configuration loaded from environment variables");
            Ok(config)
        }
        Err(err) => {
            tracing::debug!(error = ?err, "environment incomplete, trying config file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables. All required variables
/// must be present.
pub fn load_from_env() -> Result<TrackerConfig> {
    let db_path = env_var("TABGUARD_DB_PATH")?;
    let pool_size = env_parsed::<u32>("TABGUARD_DB_POOL_SIZE")?;
    let tick_interval = env_parsed::<u64>("TABGUARD_TICK_INTERVAL")?;
    let flush_threshold = env_parsed::<u64>("TABGUARD_FLUSH_THRESHOLD")?;

    Ok(TrackerConfig {
        database: DatabaseConfig { path: db_path, pool_size },
        tracking: TrackingConfig {
            tick_interval_seconds: tick_interval,
            flush_threshold_seconds: flush_threshold,
            ..TrackingConfig::default()
        },
    })
}

/// Load configuration from a file. With no explicit path, probes the
/// default locations and falls back to [`TrackerConfig::default`] when
/// nothing is found.
pub fn load_from_file(path: Option<&Path>) -> Result<TrackerConfig> {
    let candidate = match path {
        Some(path) => Some(path.to_path_buf()),
        None => probe_default_paths(),
    };

    let Some(path) = candidate else {
        tracing::info!("no config file found, using defaults");
        return Ok(TrackerConfig::default());
    };

    let contents = std::fs::read_to_string(&path).map_err(|err| {
        TabGuardError::Config(format!("failed to read {}: {err}", path.display()))
    })?;

    let config = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&contents)
            .map_err(|err| TabGuardError::Config(format!("invalid JSON config: {err}")))?
    } else {
        toml::from_str(&contents)
            .map_err(|err| TabGuardError::Config(format!("invalid TOML config: {err}")))?
    };

    tracing::info!(path = %path.display(), "configuration loaded from file");
    Ok(config)
}

fn probe_default_paths() -> Option<PathBuf> {
    ["config.toml", "config.json", "tabguard.toml", "tabguard.json"]
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| TabGuardError::Config(format!("missing environment variable {name}")))
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    env_var(name)?
        .parse::<T>()
        .map_err(|err| TabGuardError::Config(format!("invalid value for {name}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_toml_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[database]\npath = \"custom.db\"\npool_size = 2\n\n\
             [tracking]\ntick_interval_seconds = 5\nflush_threshold_seconds = 10\nmin_session_seconds = 1\n",
        )
        .unwrap();

        let config = load_from_file(Some(&path)).unwrap();
        assert_eq!(config.database.path, "custom.db");
        assert_eq!(config.tracking.flush_threshold_seconds, 10);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_from_file(None).unwrap();
        assert_eq!(config.tracking.flush_threshold_seconds, 30);
    }

    #[test]
    fn unreadable_explicit_path_is_an_error() {
        assert!(load_from_file(Some(Path::new("/nonexistent/config.toml"))).is_err());
    }
}
