// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::{ALERT_HORIZON_DAYS, ColumnAliases};
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_alert_horizon() -> u32 {
    ALERT_HORIZON_DAYS
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Interventions due within this many days (inclusive) are reported as alerts.
    #[serde(default = "default_alert_horizon")]
    pub alert_horizon_days: u32,

    /// Header names recognized in the workbook, per interpreted field.
    #[serde(default)]
    pub columns: ColumnAliases,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alert_horizon_days: ALERT_HORIZON_DAYS,
            columns: ColumnAliases::default(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let mut config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;
        config.normalize_columns();

        Ok(config)
    }

    /// Loads the configuration, falling back to defaults when no file exists yet.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Whether an error returned by `load` means the config file does not exist.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        err.chain().any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        })
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }

    // Headers are lower-cased on load, so user-written aliases must be too.
    fn normalize_columns(&mut self) {
        let c = &mut self.columns;
        for list in [
            &mut c.last_intervention,
            &mut c.frequency,
            &mut c.equipment,
            &mut c.intervention_type,
            &mut c.lubricant,
            &mut c.location,
            &mut c.next_intervention,
        ] {
            for alias in list.iter_mut() {
                *alias = alias.trim().to_lowercase();
            }
        }
    }
}
