//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CoreError;
use crate::Result;

const CONFIG_FILE_NAME: &str = "quotegen.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Default export directory
    pub export_dir: PathBuf,
    /// Seconds between reconciliation cycles
    pub sync_interval_secs: u64,
    /// Artificial delay of the simulated push
    pub push_delay_ms: u64,
    /// Artificial delay of the simulated fetch
    pub fetch_delay_ms: u64,
    /// Endpoint the simulated server probes for reachability, if any
    pub probe_url: Option<String>,
    pub probe_timeout_secs: u64,
}

/// Fields `quotegen.json` may override.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    database_path: Option<PathBuf>,
    export_dir: Option<PathBuf>,
    sync_interval_secs: Option<u64>,
    push_delay_ms: Option<u64>,
    fetch_delay_ms: Option<u64>,
    probe_url: Option<String>,
    probe_timeout_secs: Option<u64>,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        let export_dir = dirs::download_dir().unwrap_or_else(|| data_dir.join("exports"));

        Self {
            database_path: data_dir.join("quotegen.db"),
            export_dir,
            sync_interval_secs: 15,
            push_delay_ms: 500,
            fetch_delay_ms: 1000,
            probe_url: None,
            probe_timeout_secs: 5,
        }
    }

    /// Defaults for `data_dir`, overridden by `quotegen.json` inside it when
    /// that file exists.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut config = Self::new(data_dir.to_path_buf());
        let path = data_dir.join(CONFIG_FILE_NAME);

        if !path.exists() {
            return Ok(config);
        }

        let raw = std::fs::read_to_string(&path)?;
        let file: ConfigFile = serde_json::from_str(&raw)
            .map_err(|e| CoreError::Config(format!("{}: {}", path.display(), e)))?;
        config.apply(file);
        config.validate()?;

        tracing::info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    pub fn data_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os("QUOTEGEN_DATA_DIR") {
            return PathBuf::from(dir);
        }

        dirs::data_local_dir()
            .map(|d| d.join("quotegen"))
            .unwrap_or_else(|| PathBuf::from(".quotegen"))
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs)
    }

    pub fn push_delay(&self) -> Duration {
        Duration::from_millis(self.push_delay_ms)
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    fn apply(&mut self, file: ConfigFile) {
        if let Some(v) = file.database_path {
            self.database_path = v;
        }
        if let Some(v) = file.export_dir {
            self.export_dir = v;
        }
        if let Some(v) = file.sync_interval_secs {
            self.sync_interval_secs = v;
        }
        if let Some(v) = file.push_delay_ms {
            self.push_delay_ms = v;
        }
        if let Some(v) = file.fetch_delay_ms {
            self.fetch_delay_ms = v;
        }
        if file.probe_url.is_some() {
            self.probe_url = file.probe_url;
        }
        if let Some(v) = file.probe_timeout_secs {
            self.probe_timeout_secs = v;
        }
    }

    fn validate(&self) -> Result<()> {
        // tokio's interval panics on a zero period
        if self.sync_interval_secs == 0 {
            return Err(CoreError::Config(
                "sync_interval_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new(PathBuf::from("/tmp/qg"));
        assert_eq!(config.database_path, PathBuf::from("/tmp/qg/quotegen.db"));
        assert_eq!(config.sync_interval(), Duration::from_secs(15));
        assert!(config.probe_url.is_none());
    }

    #[test]
    fn test_platform_directories() {
        let config = Config::new(PathBuf::from("/tmp/qg"));
        let downloads = dirs::download_dir().unwrap_or_else(|| PathBuf::from("/tmp/qg/exports"));
        assert_eq!(config.export_dir, downloads);

        if std::env::var_os("QUOTEGEN_DATA_DIR").is_none() {
            let expected = dirs::data_local_dir()
                .map(|d| d.join("quotegen"))
                .unwrap_or_else(|| PathBuf::from(".quotegen"));
            assert_eq!(Config::data_dir(), expected);
        }
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.sync_interval_secs, 15);
        assert_eq!(config.database_path, dir.path().join("quotegen.db"));
    }

    #[test]
    fn test_load_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"sync_interval_secs": 60, "probe_url": "https://jsonplaceholder.typicode.com/posts"}"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.sync_interval_secs, 60);
        assert_eq!(
            config.probe_url.as_deref(),
            Some("https://jsonplaceholder.typicode.com/posts")
        );
        assert_eq!(config.fetch_delay_ms, 1000);
    }

    #[test]
    fn test_load_rejects_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), r#"{"unknown": 1}"#).unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(CoreError::Config(_))
        ));

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), r#"{"sync_interval_secs": 0}"#)
            .unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(CoreError::Config(_))
        ));
    }
}
