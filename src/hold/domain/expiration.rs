use chrono::{NaiveDateTime, Utc};
use crate::core::pool::{PoolError, PoolResult};
use crate::core::settings::AvailabilitySettings;
use crate::hold::domain::types::HoldType;

// ExpirationCalculator derives the default expiration of a hold from the configured
// duration of its type.
pub struct ExpirationCalculator {
    settings: Box<dyn AvailabilitySettings>,
}

impl ExpirationCalculator {
    pub fn new(settings: Box<dyn AvailabilitySettings>) -> Self {
        Self { settings }
    }

    pub async fn compute_default_expiration(&self, hold_type: HoldType) -> PoolResult<NaiveDateTime> {
        let key = hold_type.duration_key();
        let values = self.settings.get_default_values(&[key.as_str()]).await?;
        let amount = values.get(&key).copied().ok_or_else(||
            PoolError::configuration(format!("availability setting {} is not configured", key).as_str()))?;
        expiration_from(Utc::now().naive_utc(), hold_type, amount).ok_or_else(||
            PoolError::configuration(format!("availability setting {} is out of range: {}", key, amount).as_str()))
    }
}

// None when the duration or the resulting date overflows
pub fn expiration_from(now: NaiveDateTime, hold_type: HoldType, amount: i64) -> Option<NaiveDateTime> {
    hold_type.duration(amount).and_then(|duration| now.checked_add_signed(duration))
}
