use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;
use crate::core::pool::{Channel, PoolError, PoolResult};
use crate::hold::domain::model::HoldValues;
use crate::hold::domain::types::HoldType;
use crate::utils::date::parse_connect_date;

// MappedHold is a Connect payload translated into hold values; the child is referenced
// by its global id.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct MappedHold {
    pub global_id: Option<String>,
    pub values: HoldValues,
}

// ConnectMapping translates one Connect payload into hold values.
pub trait ConnectMapping: Sync + Send {
    fn get_vals_from_connect(&self, payload: &Value) -> PoolResult<MappedHold>;
}

#[derive(Debug, Deserialize)]
struct ReinstatementPayload {
    #[serde(rename = "Beneficiary_GlobalID", default)]
    global_id: Option<String>,
    #[serde(rename = "HoldID", default)]
    hold_id: Option<String>,
    #[serde(rename = "HoldType", default)]
    hold_type: Option<String>,
    #[serde(rename = "HoldExpirationDate", default)]
    expiration_date: Option<String>,
    #[serde(rename = "PrimaryHoldOwner", default)]
    primary_owner: Option<String>,
    #[serde(rename = "SecondaryHoldOwner", default)]
    secondary_owner: Option<String>,
    #[serde(rename = "ReinstatementReason", default)]
    reinstatement_reason: Option<String>,
    #[serde(rename = "Channel_Name", default)]
    channel: Option<String>,
    #[serde(rename = "SourceCode", default)]
    source_code: Option<String>,
    #[serde(rename = "HoldYieldRate", default)]
    yield_rate: Option<f64>,
    #[serde(rename = "NoMoneyYieldRate", default)]
    no_money_yield_rate: Option<f64>,
    #[serde(rename = "Comments", default)]
    comments: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReservationPayload {
    #[serde(rename = "Beneficiary_GlobalID", default)]
    global_id: Option<String>,
    #[serde(rename = "HoldID", default)]
    hold_id: Option<String>,
    #[serde(rename = "HoldType", default)]
    hold_type: Option<String>,
    #[serde(rename = "HoldExpirationDate", default)]
    expiration_date: Option<String>,
    #[serde(rename = "PrimaryHoldOwner", default)]
    primary_owner: Option<String>,
    #[serde(rename = "SecondaryHoldOwner", default)]
    secondary_owner: Option<String>,
    #[serde(rename = "Reservation_ID", default)]
    reservation_id: Option<String>,
    #[serde(rename = "SourceCode", default)]
    source_code: Option<String>,
    #[serde(rename = "Channel_Name", default)]
    channel: Option<String>,
    #[serde(rename = "Comments", default)]
    comments: Option<String>,
}

fn parse_date(value: &Option<String>) -> PoolResult<Option<NaiveDateTime>> {
    match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_connect_date(v).map(Some).ok_or_else(||
            PoolError::serialization(format!("malformed date {}", v).as_str())),
        None => Ok(None),
    }
}

// unknown labels are dropped so that the default type applies
fn parse_hold_type(value: &Option<String>) -> Option<HoldType> {
    value.as_deref().and_then(|v| HoldType::from_label(v.trim()))
}

fn parse_channel(value: &Option<String>) -> Option<Channel> {
    value.as_deref().and_then(|v| Channel::from_key(v.trim().to_lowercase().as_str()))
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

pub struct ReinstatementMapping {}

impl ReinstatementMapping {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ReinstatementMapping {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectMapping for ReinstatementMapping {
    fn get_vals_from_connect(&self, payload: &Value) -> PoolResult<MappedHold> {
        let p: ReinstatementPayload = serde_json::from_value(payload.clone())?;
        Ok(MappedHold {
            global_id: non_blank(&p.global_id),
            values: HoldValues {
                hold_id: non_blank(&p.hold_id),
                hold_type: parse_hold_type(&p.hold_type),
                expiration_date: parse_date(&p.expiration_date)?,
                primary_owner: non_blank(&p.primary_owner),
                secondary_owner: non_blank(&p.secondary_owner),
                reinstatement_reason: non_blank(&p.reinstatement_reason),
                channel: parse_channel(&p.channel),
                source_code: non_blank(&p.source_code),
                yield_rate: p.yield_rate,
                no_money_yield_rate: p.no_money_yield_rate,
                comments: non_blank(&p.comments),
                ..Default::default()
            },
        })
    }
}

pub struct ReservationToHoldMapping {}

impl ReservationToHoldMapping {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ReservationToHoldMapping {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectMapping for ReservationToHoldMapping {
    fn get_vals_from_connect(&self, payload: &Value) -> PoolResult<MappedHold> {
        let p: ReservationPayload = serde_json::from_value(payload.clone())?;
        Ok(MappedHold {
            global_id: non_blank(&p.global_id),
            values: HoldValues {
                hold_id: non_blank(&p.hold_id),
                hold_type: parse_hold_type(&p.hold_type),
                expiration_date: parse_date(&p.expiration_date)?,
                primary_owner: non_blank(&p.primary_owner),
                secondary_owner: non_blank(&p.secondary_owner),
                reservation_id: non_blank(&p.reservation_id),
                source_code: non_blank(&p.source_code),
                channel: parse_channel(&p.channel),
                comments: non_blank(&p.comments),
                ..Default::default()
            },
        })
    }
}
