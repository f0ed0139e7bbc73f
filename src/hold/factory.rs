use lazy_static::lazy_static;
use crate::children::factory::create_child_repository;
use crate::core::domain::Configuration;
use crate::core::settings::ConfiguredSettings;
use crate::hold::domain::HoldService;
use crate::hold::domain::service::HoldServiceImpl;
use crate::hold::repository::ddb_hold_repository::DDBHoldRepository;
use crate::hold::repository::mem_hold_repository::MemHoldRepository;
use crate::hold::repository::HoldRepository;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_message_queue;
use crate::utils::ddb::{build_db_client, create_table};

lazy_static! {
    static ref MEMORY_HOLDS: MemHoldRepository = MemHoldRepository::new();
}

pub(crate) async fn create_hold_repository(store: RepositoryStore) -> Box<dyn HoldRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBHoldRepository::new(client, "hold", "hold_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "hold", "id", "state", "expiration_date").await;
            Box::new(DDBHoldRepository::new(client, "hold", "hold_ndx"))
        }
        RepositoryStore::InMemory => {
            Box::new(MEMORY_HOLDS.clone())
        }
    }
}

pub async fn create_hold_service(config: &Configuration, store: RepositoryStore) -> Box<dyn HoldService> {
    let hold_repository = create_hold_repository(store).await;
    let child_repository = create_child_repository(store).await;
    let message_queue = create_message_queue(store.gateway_publisher()).await;
    let settings = Box::new(ConfiguredSettings::new(config));
    Box::new(HoldServiceImpl::new(config, hold_repository, child_repository, message_queue, settings))
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::hold::domain::model::HoldValues;
    use crate::hold::factory::create_hold_service;

    #[tokio::test]
    async fn test_should_share_memory_store_between_services() {
        let config = Configuration::new("test");
        let first = create_hold_service(&config, RepositoryStore::InMemory).await;
        let second = create_hold_service(&config, RepositoryStore::InMemory).await;
        let hold = first.create_hold(&HoldValues::default()).await.expect("should create hold");
        let loaded = second.find_hold_by_id(hold.id.as_str()).await.expect("should find hold");
        assert_eq!(hold.id, loaded.id);
    }
}
