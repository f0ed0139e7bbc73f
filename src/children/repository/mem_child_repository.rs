use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::children::domain::model::ChildEntity;
use crate::children::repository::ChildRepository;
use crate::core::pool::{PoolError, PoolResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::memory::{matches_predicate, paginate};

// MemChildRepository keeps children in process memory; clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemChildRepository {
    children: Arc<RwLock<HashMap<String, ChildEntity>>>,
}

impl MemChildRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<ChildEntity> for MemChildRepository {
    async fn create(&self, entity: &ChildEntity) -> PoolResult<usize> {
        let mut children = self.children.write().await;
        if children.contains_key(&entity.child_id) {
            return Err(PoolError::duplicate_key(format!("child {} already exists", entity.child_id).as_str()));
        }
        children.insert(entity.child_id.clone(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &ChildEntity) -> PoolResult<usize> {
        let mut children = self.children.write().await;
        match children.get(&entity.child_id) {
            Some(existing) if existing.version == entity.version => {
                let mut updated = entity.clone();
                updated.version = entity.version + 1;
                updated.updated_at = Utc::now().naive_utc();
                children.insert(entity.child_id.clone(), updated);
                Ok(1)
            }
            Some(existing) => {
                Err(PoolError::database(format!("child {} version {} does not match {}",
                                                entity.child_id, entity.version, existing.version).as_str(),
                                        Some("409".to_string()), false))
            }
            None => Err(PoolError::not_found(format!("child not found for {}", entity.child_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> PoolResult<ChildEntity> {
        self.children.read().await.get(id).cloned()
            .ok_or_else(|| PoolError::not_found(format!("child not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> PoolResult<usize> {
        Ok(self.children.write().await.remove(id).map(|_| 1).unwrap_or(0))
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> PoolResult<PaginatedResult<ChildEntity>> {
        let children = self.children.read().await;
        let mut records = vec![];
        for child in children.values() {
            if matches_predicate(child, predicate)? {
                records.push(child.clone());
            }
        }
        records.sort_by(|a, b| a.child_id.cmp(&b.child_id));
        Ok(paginate(records, page, page_size))
    }
}

#[async_trait]
impl ChildRepository for MemChildRepository {
    async fn find_by_global_id(&self, global_id: &str) -> PoolResult<Option<ChildEntity>> {
        let predicate = HashMap::from([("global_id".to_string(), global_id.to_string())]);
        let res = self.query(&predicate, None, 10).await?;
        Ok(res.records.into_iter().next())
    }
}
