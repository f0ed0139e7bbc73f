use std::collections::HashMap;
use serde::{Deserialize, Serialize};

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
    fn version(&self) -> i64;
}

// Default hold durations in days, except the e-commerce hold which is in minutes.
const DEFAULT_DURATIONS: [(&str, i64); 9] = [
    ("change_commitment_hold_duration", 15),
    ("consignment_hold_duration", 7),
    ("delinquent_hold_duration", 2),
    ("e_commerce_hold_duration", 15),
    ("no_money_hold_duration", 30),
    ("reinstatement_hold_duration", 15),
    ("reservation_hold_duration", 30),
    ("sponsor_cancel_hold_duration", 15),
    ("sub_child_hold_duration", 30),
];

// Configuration abstracts config options for the child pool
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub pool_id: String,
    // owner of the holds nobody claimed, e.g. the ones received from Connect
    pub system_user: String,
    pub hold_durations: HashMap<String, i64>,
    pub sweep_page_size: usize,
    pub sweep_interval_secs: u64,
}

impl Configuration {
    pub fn new(pool_id: &str) -> Self {
        Configuration {
            pool_id: pool_id.to_string(),
            system_user: "system".to_string(),
            hold_durations: DEFAULT_DURATIONS.iter()
                .map(|(k, v)| (k.to_string(), *v)).collect(),
            sweep_page_size: 100,
            sweep_interval_secs: 60,
        }
    }

    // Builds the defaults and overrides every duration found in the environment, e.g.
    // CONSIGNMENT_HOLD_DURATION=10.
    pub fn from_env(pool_id: &str) -> Self {
        let mut config = Self::new(pool_id);
        let overrides: Vec<(String, i64)> = config.hold_durations.keys()
            .filter_map(|key| {
                std::env::var(key.to_uppercase()).ok()
                    .and_then(|val| val.trim().parse::<i64>().ok())
                    .map(|val| (key.to_string(), val))
            }).collect();
        config.hold_durations.extend(overrides);
        if let Some(secs) = std::env::var("HOLD_SWEEP_INTERVAL_SECS").ok()
            .and_then(|val| val.trim().parse::<u64>().ok()) {
            config.sweep_interval_secs = secs;
        }
        config
    }

    pub fn with_duration(mut self, key: &str, duration: i64) -> Self {
        self.hold_durations.insert(key.to_string(), duration);
        self
    }

    pub fn without_duration(mut self, key: &str) -> Self {
        self.hold_durations.remove(key);
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!(9, config.hold_durations.len());
        assert_eq!(Some(&7), config.hold_durations.get("consignment_hold_duration"));
        assert_eq!(Some(&15), config.hold_durations.get("e_commerce_hold_duration"));
        assert_eq!(100, config.sweep_page_size);
    }

    #[tokio::test]
    async fn test_should_override_durations() {
        let config = Configuration::new("test")
            .with_duration("reinstatement_hold_duration", 3)
            .without_duration("sub_child_hold_duration");
        assert_eq!(Some(&3), config.hold_durations.get("reinstatement_hold_duration"));
        assert_eq!(None, config.hold_durations.get("sub_child_hold_duration"));
    }

    #[tokio::test]
    async fn test_should_read_durations_from_env() {
        std::env::set_var("NO_MONEY_HOLD_DURATION", "12");
        let config = Configuration::from_env("test");
        assert_eq!(Some(&12), config.hold_durations.get("no_money_hold_duration"));
        std::env::remove_var("NO_MONEY_HOLD_DURATION");
    }
}
