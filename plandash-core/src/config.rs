//! Global plandash configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{PlanDashError, PlanDashResult};
use crate::store::FileSlot;

static DEFAULT_DATA_DIR: &str = "~/.local/share/plandash";
/// Name of the durable slot.
pub static DEFAULT_STORAGE_KEY: &str = "agentic-dashboard-v1";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

/// Configuration at ~/.config/plandash/config.toml
///
/// Every key can also be set through a `PLANDASH_<KEY>` environment variable.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlanDashConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Feed URL used by `import` when no file or URL is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// IANA zone for entering and displaying wall-clock times.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Default for PlanDashConfig {
    fn default() -> Self {
        PlanDashConfig {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
            feed_url: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
            timezone: None,
        }
    }
}

impl PlanDashConfig {
    pub fn config_path() -> PlanDashResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlanDashError::Config("Could not determine config directory".into()))?
            .join("plandash");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config path, creating a commented-out config
    /// file on first run.
    pub fn load() -> PlanDashResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> PlanDashResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("PLANDASH"))
            .build()
            .map_err(|e| PlanDashError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlanDashError::Config(e.to_string()))
    }

    /// The effective settings as TOML.
    pub fn to_toml(&self) -> PlanDashResult<String> {
        toml::to_string_pretty(self).map_err(|e| PlanDashError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PlanDashResult<()> {
        let contents = format!(
            "\
# plandash configuration

# Where the dashboard is stored:
# data_dir = \"{DEFAULT_DATA_DIR}\"

# Name of the storage slot inside data_dir:
# storage_key = \"{DEFAULT_STORAGE_KEY}\"

# Calendar feed to import when none is given on the command line:
# feed_url = \"https://school.instructure.com/feeds/calendars/user_xyz.ics\"

# Seconds to wait for a feed download:
# fetch_timeout_secs = {DEFAULT_FETCH_TIMEOUT_SECS}

# Time zone for entering and showing times (defaults to the system zone):
# timezone = \"America/New_York\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlanDashError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PlanDashError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn slot(&self) -> FileSlot {
        FileSlot::new(&self.data_path(), &self.storage_key)
    }

    /// The configured zone, else the system zone, else UTC.
    pub fn timezone(&self) -> PlanDashResult<Tz> {
        if let Some(ref name) = self.timezone {
            return name
                .parse::<Tz>()
                .map_err(|_| PlanDashError::Config(format!("Unknown time zone '{name}'")));
        }

        let system = iana_time_zone::get_timezone()
            .ok()
            .and_then(|name| name.parse::<Tz>().ok())
            .unwrap_or(Tz::UTC);

        Ok(system)
    }
}
