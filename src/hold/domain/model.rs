use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::pool::{Channel, HoldState};
use crate::hold::domain::types::HoldType;
use crate::utils::date::serializer;

// HoldEntity abstracts a time-boxed reservation of a child
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct HoldEntity {
    pub id: String,
    pub version: i64,
    // assigned by Connect when it confirms the hold
    pub hold_id: Option<String>,
    pub child_id: Option<String>,
    pub name: Option<String>,
    pub hold_type: HoldType,
    #[serde(with = "serializer")]
    pub expiration_date: NaiveDateTime,
    pub primary_owner: String,
    pub secondary_owner: Option<String>,
    pub yield_rate: f64,
    pub no_money_yield_rate: f64,
    pub channel: Option<Channel>,
    pub source_code: Option<String>,
    pub comments: Option<String>,
    pub mandatory_review: bool,
    pub state: HoldState,
    pub reinstatement_reason: Option<String>,
    pub reservation_id: Option<String>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl HoldEntity {
    pub fn new(primary_owner: &str, hold_type: HoldType, expiration_date: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            version: 0,
            hold_id: None,
            child_id: None,
            name: None,
            hold_type,
            expiration_date,
            primary_owner: primary_owner.to_string(),
            secondary_owner: None,
            yield_rate: 0.0,
            no_money_yield_rate: 0.0,
            channel: None,
            source_code: None,
            comments: None,
            mandatory_review: false,
            state: HoldState::Draft,
            reinstatement_reason: None,
            reservation_id: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // Writes every value that is set. A blank hold_id is ignored, the external id is
    // never cleared once Connect assigned it.
    pub fn apply(&mut self, values: &HoldValues) {
        if values.has_hold_id() {
            self.hold_id = values.hold_id.as_ref().map(|h| h.trim().to_string());
        }
        if let Some(child_id) = &values.child_id {
            self.child_id = Some(child_id.to_string());
        }
        if let Some(name) = &values.name {
            self.name = Some(name.to_string());
        }
        if let Some(hold_type) = values.hold_type {
            self.hold_type = hold_type;
        }
        if let Some(expiration_date) = values.expiration_date {
            self.expiration_date = expiration_date;
        }
        if let Some(primary_owner) = &values.primary_owner {
            self.primary_owner = primary_owner.to_string();
        }
        if let Some(secondary_owner) = &values.secondary_owner {
            self.secondary_owner = Some(secondary_owner.to_string());
        }
        if let Some(yield_rate) = values.yield_rate {
            self.yield_rate = yield_rate;
        }
        if let Some(no_money_yield_rate) = values.no_money_yield_rate {
            self.no_money_yield_rate = no_money_yield_rate;
        }
        if let Some(channel) = values.channel {
            self.channel = Some(channel);
        }
        if let Some(source_code) = &values.source_code {
            self.source_code = Some(source_code.to_string());
        }
        if let Some(comments) = &values.comments {
            self.comments = Some(comments.to_string());
        }
        if let Some(mandatory_review) = values.mandatory_review {
            self.mandatory_review = mandatory_review;
        }
        if let Some(reinstatement_reason) = &values.reinstatement_reason {
            self.reinstatement_reason = Some(reinstatement_reason.to_string());
        }
        if let Some(reservation_id) = &values.reservation_id {
            self.reservation_id = Some(reservation_id.to_string());
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.hold_id.is_some()
    }
}

impl Identifiable for HoldEntity {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// HoldValues is a set of hold fields to create a hold with or to write on one; only the
// fields that are set take part in the write.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct HoldValues {
    #[serde(default)]
    pub hold_id: Option<String>,
    #[serde(default)]
    pub child_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hold_type: Option<HoldType>,
    #[serde(default)]
    pub expiration_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub primary_owner: Option<String>,
    #[serde(default)]
    pub secondary_owner: Option<String>,
    #[serde(default)]
    pub yield_rate: Option<f64>,
    #[serde(default)]
    pub no_money_yield_rate: Option<f64>,
    #[serde(default)]
    pub channel: Option<Channel>,
    #[serde(default)]
    pub source_code: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub mandatory_review: Option<bool>,
    #[serde(default)]
    pub reinstatement_reason: Option<String>,
    #[serde(default)]
    pub reservation_id: Option<String>,
}

impl HoldValues {
    // Connect must be told about a write touching any of these fields.
    pub fn is_significant(&self) -> bool {
        self.name.is_some() ||
            self.primary_owner.is_some() ||
            self.hold_type.is_some() ||
            self.mandatory_review.is_some() ||
            self.expiration_date.is_some()
    }

    // hold_id given and not blank
    pub fn has_hold_id(&self) -> bool {
        self.hold_id.as_ref().map(|h| !h.trim().is_empty()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use crate::core::pool::HoldState;
    use crate::hold::domain::model::{HoldEntity, HoldValues};
    use crate::hold::domain::types::HoldType;

    #[tokio::test]
    async fn test_should_build_hold() {
        let expiration = Utc::now().naive_utc() + Duration::days(7);
        let hold = HoldEntity::new("owner1", HoldType::Consignment, expiration);
        assert_eq!("owner1", hold.primary_owner.as_str());
        assert_eq!(HoldState::Draft, hold.state);
        assert_eq!(expiration, hold.expiration_date);
        assert!(!hold.is_confirmed());
    }

    #[tokio::test]
    async fn test_should_apply_values() {
        let mut hold = HoldEntity::new("owner1", HoldType::Consignment, Utc::now().naive_utc());
        hold.apply(&HoldValues {
            hold_id: Some("12345".to_string()),
            hold_type: Some(HoldType::NoMoney),
            comments: Some("waiting for payment".to_string()),
            ..Default::default()
        });
        assert_eq!(Some("12345".to_string()), hold.hold_id);
        assert_eq!(HoldType::NoMoney, hold.hold_type);
        assert_eq!(Some("waiting for payment".to_string()), hold.comments);
        assert_eq!("owner1", hold.primary_owner.as_str());

        hold.apply(&HoldValues { hold_id: Some(" ".to_string()), ..Default::default() });
        assert_eq!(Some("12345".to_string()), hold.hold_id);
    }

    #[tokio::test]
    async fn test_should_detect_significant_values() {
        assert!(!HoldValues::default().is_significant());
        assert!(!HoldValues { comments: Some("note".to_string()), yield_rate: Some(0.3), ..Default::default() }.is_significant());
        assert!(HoldValues { hold_type: Some(HoldType::Reservation), ..Default::default() }.is_significant());
        assert!(HoldValues { mandatory_review: Some(false), ..Default::default() }.is_significant());
        assert!(HoldValues { expiration_date: Some(Utc::now().naive_utc()), ..Default::default() }.is_significant());
    }

    #[tokio::test]
    async fn test_should_detect_hold_id() {
        assert!(!HoldValues::default().has_hold_id());
        assert!(!HoldValues { hold_id: Some("".to_string()), ..Default::default() }.has_hold_id());
        assert!(HoldValues { hold_id: Some("H-1".to_string()), ..Default::default() }.has_hold_id());
    }
}
