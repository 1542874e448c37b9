//! Application settings stored as `config.json` in the data directory.
//!
//! Every section is optional; a missing file or section falls back to the
//! defaults below, so the engine runs without any setup.
//!
//! ```json
//! {
//!   "engine": {
//!     "policy": "offset_against_overtime",
//!     "zero_at_month_end": false,
//!     "default_reference_hours": 220
//!   },
//!   "actor": "hr-admin"
//! }
//! ```

use super::data_storage::DataStorage;
use crate::db::employees::DEFAULT_REFERENCE_HOURS;
use crate::libs::aggregator::CompensationPolicy;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_ACTOR: &str = "system";

/// Defaults applied by the time-bank engine when a caller does not override them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub policy: CompensationPolicy,
    /// Close actions post a closure entry that brings the month to zero.
    pub zero_at_month_end: bool,
    /// Reference hours given to newly registered employees.
    pub default_reference_hours: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            policy: CompensationPolicy::OffsetAgainstOvertime,
            zero_at_month_end: false,
            default_reference_hours: DEFAULT_REFERENCE_HOURS,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineConfig>,

    /// Name stamped on period transitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(config_file_path)
    }

    /// Reads a config file, returning the defaults when it does not exist.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(config_file_path)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn engine(&self) -> EngineConfig {
        self.engine.clone().unwrap_or_default()
    }

    /// Configured actor, else the login name, else `system`.
    pub fn actor(&self) -> String {
        self.actor
            .clone()
            .filter(|actor| !actor.trim().is_empty())
            .or_else(|| env::var("USER").ok())
            .or_else(|| env::var("USERNAME").ok())
            .unwrap_or_else(|| DEFAULT_ACTOR.to_string())
    }

    /// Interactive setup, seeded with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let engine = config.engine();
        let theme = ColorfulTheme::default();

        msg_print!(Message::ConfigModuleEngine);
        let policies = [CompensationPolicy::OffsetAgainstOvertime, CompensationPolicy::AlwaysDeduct];
        let policy_index = Select::with_theme(&theme)
            .with_prompt(Message::PromptPolicy.to_string())
            .items(&policies.iter().map(|p| p.as_str()).collect::<Vec<_>>())
            .default(policies.iter().position(|p| *p == engine.policy).unwrap_or(0))
            .interact()?;

        let zero_at_month_end = Confirm::with_theme(&theme)
            .with_prompt(Message::PromptZeroAtMonthEnd.to_string())
            .default(engine.zero_at_month_end)
            .interact()?;

        let default_reference_hours: i64 = Input::with_theme(&theme)
            .with_prompt(Message::PromptReferenceHours.to_string())
            .default(engine.default_reference_hours)
            .interact_text()?;

        let actor: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptActor.to_string())
            .default(config.actor())
            .interact_text()?;

        config.engine = Some(EngineConfig {
            policy: policies[policy_index],
            zero_at_month_end,
            default_reference_hours,
        });
        config.actor = Some(actor);

        Ok(config)
    }
}
