//! Ability configuration loaded from TOML
//!
//! The configuration names the instrument kind the ability drives and the
//! actions it exposes. Action order is significant: it is the order in which
//! rules are registered, and therefore the order in which they are evaluated.

use crate::core::error::{AbilityError, Result};
use crate::device::InstrumentKind;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable holding the path of the configuration file
pub const CONFIG_ENV_VAR: &str = "CAST_ABILITY_CONFIG";

/// Configuration for a single ability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityConfig {
    /// Name of the ability, used in logs
    pub name: String,

    /// Capability kind of the instruments this ability controls
    ///
    /// Only instruments of this kind are considered when resolving an action.
    pub instrument_kind: InstrumentKind,

    /// Human wording for the instrument kind, inserted into spoken sentences
    ///
    /// "chrome cast" gives "I didn't find any chrome cast instrument in the device."
    pub instrument_label: String,

    /// Sentence spoken when no rule matches the request
    #[serde(default = "default_fallback_sentence")]
    pub fallback_sentence: String,

    /// Actions in registration order
    pub actions: Vec<ActionConfig>,
}

/// One action and the intents that trigger it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionConfig {
    /// Action identifier, also used as the outgoing action identifier
    pub name: String,
    /// Intent aliases routed to this action
    pub intents: Vec<String>,
}

impl ActionConfig {
    pub fn new(name: impl Into<String>, intents: &[&str]) -> Self {
        Self {
            name: name.into(),
            intents: intents.iter().map(|i| i.to_string()).collect(),
        }
    }
}

fn default_fallback_sentence() -> String {
    "I didn't understand what you asked me to do.".to_string()
}

impl Default for AbilityConfig {
    fn default() -> Self {
        Self {
            name: "ChromeCast".to_string(),
            instrument_kind: InstrumentKind::chrome_cast(),
            instrument_label: "chrome cast".to_string(),
            fallback_sentence: default_fallback_sentence(),
            actions: vec![
                ActionConfig::new("play", &["CHROME_CAST_PLAY"]),
                ActionConfig::new("pause", &["CHROME_CAST_PAUSE"]),
            ],
        }
    }
}

impl AbilityConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AbilityConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AbilityError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load the file named by `CAST_ABILITY_CONFIG`, or the defaults when unset
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::load(Path::new(&path)),
            Err(_) => {
                tracing::debug!("{} not set, using default configuration", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
        }
    }

    /// Look up an action by name
    pub fn action(&self, name: &str) -> Option<&ActionConfig> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Validate configuration for internal consistency
    ///
    /// All problems are reported together.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.instrument_kind.as_str().is_empty() {
            errors.push("instrument_kind must not be empty".to_string());
        }
        if self.actions.is_empty() {
            errors.push("at least one action must be configured".to_string());
        }

        let mut names = AHashSet::new();
        let mut intents = AHashSet::new();
        for action in &self.actions {
            if action.name.is_empty() {
                errors.push("action name must not be empty".to_string());
            } else if !names.insert(action.name.as_str()) {
                errors.push(format!("duplicate action '{}'", action.name));
            }

            if action.intents.is_empty() {
                errors.push(format!("action '{}' has no intents", action.name));
            }
            for intent in &action.intents {
                if intent.trim().is_empty() {
                    errors.push(format!("action '{}' has an empty intent", action.name));
                } else if !intents.insert(intent.as_str()) {
                    errors.push(format!(
                        "intent '{}' is routed to more than one action",
                        intent
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AbilityError::Config(errors.join(", ")))
        }
    }
}
