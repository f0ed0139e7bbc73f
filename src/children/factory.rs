use lazy_static::lazy_static;
use crate::children::repository::ChildRepository;
use crate::children::repository::ddb_child_repository::DDBChildRepository;
use crate::children::repository::mem_child_repository::MemChildRepository;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_table};

lazy_static! {
    static ref MEMORY_CHILDREN: MemChildRepository = MemChildRepository::new();
}

pub async fn create_child_repository(store: RepositoryStore) -> Box<dyn ChildRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBChildRepository::new(client, "children", "children_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "children", "child_id", "global_id", "status").await;
            Box::new(DDBChildRepository::new(client, "children", "children_ndx"))
        }
        RepositoryStore::InMemory => {
            Box::new(MEMORY_CHILDREN.clone())
        }
    }
}
