use std::collections::HashMap;
use async_trait::async_trait;
use crate::core::domain::Configuration;
use crate::core::pool::{PoolError, PoolResult};

// AvailabilitySettings provides the configured availability values, such as the
// default duration of each hold type.
#[async_trait]
pub trait AvailabilitySettings: Sync + Send {
    // Returns the value of every requested key; a missing key is a configuration error.
    async fn get_default_values(&self, keys: &[&str]) -> PoolResult<HashMap<String, i64>>;
}

pub struct ConfiguredSettings {
    values: HashMap<String, i64>,
}

impl ConfiguredSettings {
    pub fn new(config: &Configuration) -> Self {
        Self {
            values: config.hold_durations.clone(),
        }
    }
}

#[async_trait]
impl AvailabilitySettings for ConfiguredSettings {
    async fn get_default_values(&self, keys: &[&str]) -> PoolResult<HashMap<String, i64>> {
        let mut res = HashMap::new();
        for key in keys {
            match self.values.get(*key) {
                Some(val) => { res.insert(key.to_string(), *val); }
                None => {
                    return Err(PoolError::configuration(
                        format!("availability setting {} is not configured", key).as_str()));
                }
            }
        }
        Ok(res)
    }
}
