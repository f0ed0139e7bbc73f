use async_trait::async_trait;
use std::collections::HashMap;
use chrono::NaiveDateTime;
use serde_json::Value;
use crate::core::pool::{PoolResult, PaginatedResult};
use crate::hold::domain::model::HoldValues;
use crate::hold::domain::types::HoldType;
use crate::hold::dto::HoldDto;

pub mod expiration;
pub mod model;
pub mod service;
pub mod types;

// HoldService manages the lifecycle of holds placed on children and keeps Connect
// informed of every change it has to know about.
#[async_trait]
pub trait HoldService: Sync + Send {
    async fn compute_default_expiration(&self, hold_type: HoldType) -> PoolResult<NaiveDateTime>;

    // creates a draft hold and asks Connect to confirm it
    async fn create_hold(&self, values: &HoldValues) -> PoolResult<HoldDto>;

    // writes the given values; Connect is told unless no_upsert is set
    async fn update_hold(&self, id: &str, values: &HoldValues, no_upsert: bool) -> PoolResult<HoldDto>;

    async fn change_type(&self, id: &str, hold_type: HoldType) -> PoolResult<HoldDto>;

    // Connect answered a hold request. Returns None when the hold was refused and removed.
    async fn apply_external_confirmation(&self, id: &str, values: &HoldValues) -> PoolResult<Option<HoldDto>>;

    async fn create_from_reinstatement(&self, payload: &Value) -> PoolResult<Vec<String>>;

    async fn convert_reservation_to_hold(&self, payload: &Value) -> PoolResult<Vec<String>>;

    async fn release(&self, id: &str) -> PoolResult<HoldDto>;

    // holds are never removed by a user; deleting one releases it
    async fn delete(&self, id: &str) -> PoolResult<HoldDto>;

    async fn sweep_expired(&self) -> PoolResult<bool>;

    async fn find_hold_by_id(&self, id: &str) -> PoolResult<HoldDto>;

    // the predicate selects Active holds unless it names a state
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> PoolResult<PaginatedResult<HoldDto>>;
}
