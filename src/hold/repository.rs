pub mod ddb_hold_repository;
pub mod mem_hold_repository;

use async_trait::async_trait;
use std::collections::HashMap;
use crate::hold::domain::model::HoldEntity;
use crate::core::pool::{PoolResult, PaginatedResult};
use crate::core::repository::Repository;


// Hold queries always run against one state. `query` and `query_expired` use Active
// when the predicate has no `state` key.
#[async_trait]
pub trait HoldRepository: Repository<HoldEntity> {
    // holds of the given state (Active by default) whose expiration date is strictly in the past
    async fn query_expired(&self, predicate: &HashMap::<String, String>,
                           page: Option<&str>, page_size: usize) -> PoolResult<PaginatedResult<HoldEntity>>;
}
