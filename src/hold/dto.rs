use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::pool::{Channel, HoldState};
use crate::hold::domain::model::HoldEntity;
use crate::hold::domain::types::HoldType;
use crate::utils::date::serializer;

// HoldDto is the hold as returned to callers
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct HoldDto {
    pub id: String,
    pub version: i64,
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

impl HoldDto {
    pub fn is_active(&self) -> bool {
        self.state == HoldState::Active
    }
}

impl Identifiable for HoldDto {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl From<&HoldEntity> for HoldDto {
    fn from(other: &HoldEntity) -> HoldDto {
        HoldDto {
            id: other.id.to_string(),
            version: other.version,
            hold_id: other.hold_id.clone(),
            child_id: other.child_id.clone(),
            name: other.name.clone(),
            hold_type: other.hold_type,
            expiration_date: other.expiration_date,
            primary_owner: other.primary_owner.to_string(),
            secondary_owner: other.secondary_owner.clone(),
            yield_rate: other.yield_rate,
            no_money_yield_rate: other.no_money_yield_rate,
            channel: other.channel,
            source_code: other.source_code.clone(),
            comments: other.comments.clone(),
            mandatory_review: other.mandatory_review,
            state: other.state,
            reinstatement_reason: other.reinstatement_reason.clone(),
            reservation_id: other.reservation_id.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&HoldDto> for HoldEntity {
    fn from(other: &HoldDto) -> HoldEntity {
        HoldEntity {
            id: other.id.to_string(),
            version: other.version,
            hold_id: other.hold_id.clone(),
            child_id: other.child_id.clone(),
            name: other.name.clone(),
            hold_type: other.hold_type,
            expiration_date: other.expiration_date,
            primary_owner: other.primary_owner.to_string(),
            secondary_owner: other.secondary_owner.clone(),
            yield_rate: other.yield_rate,
            no_money_yield_rate: other.no_money_yield_rate,
            channel: other.channel,
            source_code: other.source_code.clone(),
            comments: other.comments.clone(),
            mandatory_review: other.mandatory_review,
            state: other.state,
            reinstatement_reason: other.reinstatement_reason.clone(),
            reservation_id: other.reservation_id.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
