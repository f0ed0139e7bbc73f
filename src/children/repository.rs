pub mod ddb_child_repository;
pub mod mem_child_repository;

use async_trait::async_trait;
use crate::children::domain::model::ChildEntity;
use crate::core::pool::PoolResult;
use crate::core::repository::Repository;


#[async_trait]
pub trait ChildRepository: Repository<ChildEntity> {
    async fn find_by_global_id(&self, global_id: &str) -> PoolResult<Option<ChildEntity>>;
}
