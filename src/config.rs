use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::duration::sanitize_duration_input;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Text the duration field starts with
    pub default_duration: String,
    /// UI redraw cadence
    pub tick_rate_ms: u64,
    /// Length of one session tick; a second unless you are testing
    pub session_tick_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration: "30:00".to_string(),
            tick_rate_ms: 100,
            session_tick_ms: 1000,
        }
    }
}

impl Config {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    pub fn session_tick(&self) -> Duration {
        Duration::from_millis(self.session_tick_ms.max(1))
    }

    /// Duration text that is safe to put into the setup field
    pub fn duration_text(&self) -> String {
        sanitize_duration_input(&self.default_duration)
            .unwrap_or_else(|| Config::default().default_duration)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_load(&self) -> Result<Config> {
        let bytes = fs::read(&self.path).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_slice::<Config>(&bytes).map_err(|source| Error::Config {
            path: self.path.clone(),
            source,
        })
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing or broken files fall back to defaults
    fn load(&self) -> Config {
        match self.try_load() {
            Ok(cfg) => {
                tracing::debug!(path = %self.path.display(), "config loaded");
                cfg
            }
            Err(Error::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no config file, using defaults");
                Config::default()
            }
            Err(err) => {
                tracing::warn!(%err, "using default config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        let io_err = |source: std::io::Error| Error::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(|source| Error::Config {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, data).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            default_duration: "12:30".into(),
            tick_rate_ms: 50,
            session_tick_ms: 10,
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
        assert_matches!(store.try_load(), Err(Error::Io { .. }));
    }

    #[test]
    fn broken_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();
        let store = FileConfigStore::with_path(&path);
        assert_matches!(store.try_load(), Err(Error::Config { .. }));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "default_duration": "05:00" }"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.default_duration, "05:00");
        assert_eq!(cfg.session_tick_ms, 1000);
    }

    #[test]
    fn duration_text_is_sanitized() {
        let mut cfg = Config {
            default_duration: "m5:00s".into(),
            ..Config::default()
        };
        assert_eq!(cfg.duration_text(), "5:00");

        cfg.default_duration = "100:00:00".into();
        assert_eq!(cfg.duration_text(), "30:00");
    }

    #[test]
    fn zero_intervals_are_floored() {
        let cfg = Config {
            tick_rate_ms: 0,
            session_tick_ms: 0,
            ..Config::default()
        };
        assert_eq!(cfg.tick_rate(), Duration::from_millis(1));
        assert_eq!(cfg.session_tick(), Duration::from_millis(1));
    }
}
