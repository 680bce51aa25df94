//! Runtime configuration, resolved once at startup and passed around
//! explicitly.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cli::Args;
use crate::error::{Error, Result};
use crate::pws::BASE_URL;

pub const DEFAULT_REFRESH: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
pub struct Config {
    pub station_id: String,
    pub api_key: String,
    pub base_url: String,
    pub refresh: Duration,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            station_id: String::new(),
            api_key: String::new(),
            base_url: BASE_URL.to_string(),
            refresh: DEFAULT_REFRESH,
            color: true,
        }
    }
}

impl Config {
    /// Build from parsed arguments, falling back to the remembered station.
    pub fn resolve(args: &Args, saved: &SavedStation) -> Result<Self> {
        let station_id = match args.station.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => saved.load().ok_or_else(|| {
                Error::Config("no station id given and none remembered from an earlier run".to_string())
            })?,
        };

        let api_key = args
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Config("an API key is required (--api-key or WGROUND_API_KEY)".to_string()))?
            .to_string();

        Ok(Self {
            station_id,
            api_key,
            base_url: args.base_url.clone(),
            refresh: Duration::from_secs(args.refresh.max(1)),
            color: !args.no_color && std::env::var_os("NO_COLOR").is_none(),
        })
    }
}

#[derive(Serialize, Deserialize, Debug)]
struct StationFile {
    station_id: String,
}

/// The station used by the last successful run.
#[derive(Debug, Clone)]
pub struct SavedStation {
    path: Option<PathBuf>,
}

impl SavedStation {
    /// Location under the user's config directory.
    pub fn from_project_dirs() -> Self {
        let path = directories::ProjectDirs::from("org", "wground", "wground")
            .map(|dirs| dirs.config_dir().join("station.json"));
        Self { path }
    }

    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn load(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        let text = fs::read_to_string(path).ok()?;
        match serde_json::from_str::<StationFile>(&text) {
            Ok(file) => Some(file.station_id),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable station file");
                None
            }
        }
    }

    pub fn save(&self, station_id: &str) -> Result<()> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = StationFile {
            station_id: station_id.to_string(),
        };
        fs::write(path, serde_json::to_string_pretty(&file)?)?;
        debug!(path = %path.display(), station = station_id, "remembered station");
        Ok(())
    }

    /// Save after a successful fetch; a failure is only logged.
    pub fn remember(&self, station_id: &str) {
        if let Err(err) = self.save(station_id) {
            warn!(error = %err, "could not remember station");
        }
    }
}
