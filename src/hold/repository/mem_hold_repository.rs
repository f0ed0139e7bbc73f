use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::core::pool::{HoldState, PoolError, PoolResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::hold::domain::model::HoldEntity;
use crate::hold::repository::HoldRepository;
use crate::utils::date::DATE_FMT;
use crate::utils::memory::{matches_predicate, paginate};

// MemHoldRepository keeps holds in process memory; clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemHoldRepository {
    holds: Arc<RwLock<HashMap<String, HoldEntity>>>,
}

impl MemHoldRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

// external hold ids are unique among holds
fn check_unique_hold_id(holds: &HashMap<String, HoldEntity>, entity: &HoldEntity) -> PoolResult<()> {
    if let Some(hold_id) = &entity.hold_id {
        if holds.values().any(|h| h.id != entity.id && h.hold_id.as_ref() == Some(hold_id)) {
            return Err(PoolError::duplicate_key(format!("hold id {} is already used", hold_id).as_str()));
        }
    }
    Ok(())
}

#[async_trait]
impl Repository<HoldEntity> for MemHoldRepository {
    async fn create(&self, entity: &HoldEntity) -> PoolResult<usize> {
        let mut holds = self.holds.write().await;
        if holds.contains_key(&entity.id) {
            return Err(PoolError::duplicate_key(format!("hold {} already exists", entity.id).as_str()));
        }
        check_unique_hold_id(&holds, entity)?;
        holds.insert(entity.id.clone(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &HoldEntity) -> PoolResult<usize> {
        let mut holds = self.holds.write().await;
        check_unique_hold_id(&holds, entity)?;
        match holds.get(&entity.id) {
            Some(existing) if existing.version == entity.version => {
                let mut updated = entity.clone();
                updated.version = entity.version + 1;
                updated.updated_at = Utc::now().naive_utc();
                holds.insert(entity.id.clone(), updated);
                Ok(1)
            }
            Some(existing) => {
                Err(PoolError::database(format!("hold {} version {} does not match {}",
                                                entity.id, entity.version, existing.version).as_str(),
                                        Some("409".to_string()), false))
            }
            None => Err(PoolError::not_found(format!("hold not found for {}", entity.id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> PoolResult<HoldEntity> {
        self.holds.read().await.get(id).cloned()
            .ok_or_else(|| PoolError::not_found(format!("hold not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> PoolResult<usize> {
        Ok(self.holds.write().await.remove(id).map(|_| 1).unwrap_or(0))
    }

    // state defaults to Active, as in the DynamoDB state index
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> PoolResult<PaginatedResult<HoldEntity>> {
        let mut predicate = predicate.clone();
        predicate.entry("state".to_string()).or_insert_with(|| HoldState::Active.to_string());
        let holds = self.holds.read().await;
        let mut records = vec![];
        for hold in holds.values() {
            if matches_predicate(hold, &predicate)? {
                records.push(hold.clone());
            }
        }
        records.sort_by(|a, b| a.expiration_date.cmp(&b.expiration_date).then(a.id.cmp(&b.id)));
        Ok(paginate(records, page, page_size))
    }
}

#[async_trait]
impl HoldRepository for MemHoldRepository {
    async fn query_expired(&self, predicate: &HashMap<String, String>,
                           page: Option<&str>, page_size: usize) -> PoolResult<PaginatedResult<HoldEntity>> {
        let now = Utc::now().naive_utc();
        let mut new_predicate = HashMap::from([
            ("state".to_string(), HoldState::Active.to_string()),
            ("expiration_date:<".to_string(), now.format(DATE_FMT).to_string()),
        ]);
        for (key, value) in predicate {
            new_predicate.insert(key.to_string(), value.to_string());
        }
        self.query(&new_predicate, page, page_size).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use chrono::{Duration, Utc};
    use crate::core::pool::{HoldState, PoolError};
    use crate::core::repository::Repository;
    use crate::hold::domain::model::HoldEntity;
    use crate::hold::domain::types::HoldType;
    use crate::hold::repository::HoldRepository;
    use crate::hold::repository::mem_hold_repository::MemHoldRepository;

    #[tokio::test]
    async fn test_should_create_update_get_hold() {
        let hold_repo = MemHoldRepository::new();
        let mut hold = HoldEntity::new("owner1", HoldType::Consignment, Utc::now().naive_utc());
        assert_eq!(1, hold_repo.create(&hold).await.expect("should create hold"));
        assert!(matches!(hold_repo.create(&hold).await, Err(PoolError::DuplicateKey { .. })));

        hold.hold_id = Some("H-1".to_string());
        assert_eq!(1, hold_repo.update(&hold).await.expect("should update hold"));
        // stale version
        assert!(hold_repo.update(&hold).await.is_err());

        let loaded = hold_repo.get(hold.id.as_str()).await.expect("should return hold");
        assert_eq!(Some("H-1".to_string()), loaded.hold_id);
        assert_eq!(1, loaded.version);
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_hold_id() {
        let hold_repo = MemHoldRepository::new();
        let mut first = HoldEntity::new("owner1", HoldType::Consignment, Utc::now().naive_utc());
        first.hold_id = Some("H-2".to_string());
        hold_repo.create(&first).await.expect("should create hold");

        let mut second = HoldEntity::new("owner1", HoldType::Consignment, Utc::now().naive_utc());
        hold_repo.create(&second).await.expect("should create hold");
        second.hold_id = Some("H-2".to_string());
        assert!(matches!(hold_repo.update(&second).await, Err(PoolError::DuplicateKey { .. })));
    }

    #[tokio::test]
    async fn test_should_query_expired_holds() {
        let hold_repo = MemHoldRepository::new();
        for i in 0..10 {
            let expiration = if i % 2 == 0 {
                Utc::now().naive_utc() - Duration::days(i + 1)
            } else {
                Utc::now().naive_utc() + Duration::days(i)
            };
            let mut hold = HoldEntity::new("owner1", HoldType::NoMoney, expiration);
            hold.state = if i < 8 { HoldState::Active } else { HoldState::Draft };
            hold_repo.create(&hold).await.expect("should create hold");
        }
        let active = hold_repo.query_expired(&HashMap::new(), None, 100).await.expect("should query");
        assert_eq!(4, active.records.len());
        assert!(active.records.iter().all(|h| h.expiration_date < Utc::now().naive_utc()));

        let predicate = HashMap::from([("state".to_string(), HoldState::Draft.to_string())]);
        let draft = hold_repo.query_expired(&predicate, None, 100).await.expect("should query");
        assert_eq!(1, draft.records.len());

        let first = hold_repo.query_expired(&HashMap::new(), None, 3).await.expect("should query");
        assert_eq!(3, first.records.len());
        let next = hold_repo.query_expired(&HashMap::new(), first.next_page.as_deref(), 3).await.expect("should query");
        assert_eq!(1, next.records.len());
        assert_eq!(None, next.next_page);
    }

    #[tokio::test]
    async fn test_should_query_active_holds_by_default() {
        let hold_repo = MemHoldRepository::new();
        for state in [HoldState::Draft, HoldState::Active, HoldState::Active, HoldState::Expired] {
            let mut hold = HoldEntity::new("owner1", HoldType::Consignment, Utc::now().naive_utc());
            hold.state = state;
            hold_repo.create(&hold).await.expect("should create hold");
        }
        let res = hold_repo.query(&HashMap::new(), None, 100).await.expect("should query");
        assert_eq!(2, res.records.len());
        assert!(res.records.iter().all(|h| h.state == HoldState::Active));

        let predicate = HashMap::from([("state".to_string(), HoldState::Draft.to_string())]);
        let res = hold_repo.query(&predicate, None, 100).await.expect("should query");
        assert_eq!(1, res.records.len());
    }

    #[tokio::test]
    async fn test_should_delete_hold() {
        let hold_repo = MemHoldRepository::new();
        let hold = HoldEntity::new("owner1", HoldType::Reservation, Utc::now().naive_utc());
        hold_repo.create(&hold).await.expect("should create hold");
        assert_eq!(1, hold_repo.delete(hold.id.as_str()).await.expect("should delete hold"));
        assert_eq!(0, hold_repo.delete(hold.id.as_str()).await.expect("should delete hold"));
        assert!(matches!(hold_repo.get(hold.id.as_str()).await, Err(PoolError::NotFound { .. })));
    }
}
