//! Machine configuration.

use serde::{Deserialize, Serialize};

/// Per-machine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Append committed transitions to the machine's history
    pub record_history: bool,

    /// Keep only the newest N history records
    pub history_limit: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            record_history: true,
            history_limit: None,
        }
    }
}

impl MachineConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    pub fn without_history(mut self) -> Self {
        self.record_history = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_record_unbounded_history() {
        let config = MachineConfig::default();
        assert!(config.record_history);
        assert_eq!(config.history_limit, None);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = MachineConfig::from_json(r#"{ "history_limit": 50 }"#).unwrap();
        assert!(config.record_history);
        assert_eq!(config.history_limit, Some(50));

        let config = MachineConfig::from_json("{}").unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn builder_methods_adjust_settings() {
        let config = MachineConfig::default().history_limit(3).without_history();
        assert!(!config.record_history);
        assert_eq!(config.history_limit, Some(3));
    }
}
