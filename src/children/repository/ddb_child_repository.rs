use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::children::domain::model::ChildEntity;
use crate::children::repository::ChildRepository;
use crate::core::pool::{ChildStatus, PoolError, PoolResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{add_filter_expr, from_ddb, opt_string, parse_bool_attribute, parse_date_attribute, parse_item, parse_number_attribute, parse_opt_string_attribute, parse_string_attribute, string_date, to_ddb_page};

#[derive(Debug)]
pub struct DDBChildRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBChildRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<ChildEntity> for DDBChildRepository {
    async fn create(&self, entity: &ChildEntity) -> PoolResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(child_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(PoolError::from)
    }

    async fn update(&self, entity: &ChildEntity) -> PoolResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("child_id", AttributeValue::S(entity.child_id.clone()))
            .update_expression("SET version = :version, #name = :name, active = :active, #status = :status, hold_id = :hold_id, sponsor_id = :sponsor_id, updated_at = :updated_at")
            .expression_attribute_names("#name", "name")
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":name", AttributeValue::S(entity.name.clone()))
            .expression_attribute_values(":active", AttributeValue::Bool(entity.active))
            .expression_attribute_values(":status", AttributeValue::S(entity.status.to_string()))
            .expression_attribute_values(":hold_id", opt_string(&entity.hold_id))
            .expression_attribute_values(":sponsor_id", opt_string(&entity.sponsor_id))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(PoolError::from)
    }

    async fn get(&self, id: &str) -> PoolResult<ChildEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression(
                "child_id = :child_id",
            )
            .expression_attribute_values(
                ":child_id",
                AttributeValue::S(id.to_string()),
            )
            .send()
            .await.map_err(PoolError::from).and_then(|req| {
            if let Some(items) = req.items {
                if items.len() > 1 {
                    return Err(PoolError::database(format!("too many children for {}", id).as_str(), None, false));
                } else if let Some(map) = items.first() {
                    return Ok(ChildEntity::from(map));
                }
            }
            Err(PoolError::not_found(format!("child not found for {}", id).as_str()))
        })
    }

    async fn delete(&self, id: &str) -> PoolResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("child_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(PoolError::from)
    }

    // the index is keyed by global_id, so every query needs one
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> PoolResult<PaginatedResult<ChildEntity>> {
        let global_id = predicate.get("global_id").ok_or_else(|| PoolError::validation(
            "children can only be queried by global_id", Some("400".to_string())))?;
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        let exclusive_start_key = to_ddb_page(page, predicate);
        let mut request = self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .limit(cmp::min(page_size, 500) as i32)
            .consistent_read(false)
            .set_exclusive_start_key(exclusive_start_key)
            .key_condition_expression("global_id = :global_id")
            .expression_attribute_values(":global_id", AttributeValue::S(global_id.to_string()));
        let mut filter_expr = String::new();
        for (k, v) in predicate {
            if k != "global_id" {
                let ks = add_filter_expr(k.as_str(), &mut filter_expr);
                request = request.expression_attribute_values(format!(":{}", ks).as_str(), AttributeValue::S(v.to_string()));
            }
        }
        if !filter_expr.is_empty() {
            request = request.filter_expression(filter_expr);
        }
        request
            .send()
            .await.map_err(PoolError::from).map(|req| {
            let records = req.items.as_ref().unwrap_or(&vec![]).iter()
                .map(ChildEntity::from).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

#[async_trait]
impl ChildRepository for DDBChildRepository {
    async fn find_by_global_id(&self, global_id: &str) -> PoolResult<Option<ChildEntity>> {
        let predicate = HashMap::from([("global_id".to_string(), global_id.to_string())]);
        let res = self.query(&predicate, None, 10).await?;
        Ok(res.records.into_iter().next())
    }
}

impl From<&HashMap<String, AttributeValue>> for ChildEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        ChildEntity {
            child_id: parse_string_attribute("child_id", map).unwrap_or_default(),
            version: parse_number_attribute("version", map),
            global_id: parse_string_attribute("global_id", map).unwrap_or_default(),
            name: parse_string_attribute("name", map).unwrap_or_default(),
            active: parse_bool_attribute("active", map),
            status: ChildStatus::from(parse_string_attribute("status", map).unwrap_or(ChildStatus::Released.to_string())),
            hold_id: parse_opt_string_attribute("hold_id", map),
            sponsor_id: parse_opt_string_attribute("sponsor_id", map),
            created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;
    use crate::children::domain::model::ChildEntity;
    use crate::children::repository::ChildRepository;
    use crate::children::repository::ddb_child_repository::DDBChildRepository;
    use crate::core::pool::ChildStatus;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "children").await;
                let _ = create_table(&client, "children", "child_id", "global_id", "status").await;
                client
            });
    }

    // needs a dynamodb-local listening on DYNAMODB_ENDPOINT
    #[tokio::test]
    #[ignore]
    async fn test_should_create_update_find_child() {
        let child_repo = DDBChildRepository::new(
            CLIENT.get().await.clone(), "children", "children_ndx");
        let mut child = ChildEntity::new("04000001");
        let size = child_repo.create(&child).await.expect("should create child");
        assert_eq!(1, size);

        child.active = true;
        child.status = ChildStatus::Consigned;
        child.hold_id = Some("hold1".to_string());
        let size = child_repo.update(&child).await.expect("should update child");
        assert_eq!(1, size);

        let loaded = child_repo.get(child.child_id.as_str()).await.expect("should return child");
        assert!(loaded.active);
        assert_eq!(Some("hold1".to_string()), loaded.hold_id);
        assert_eq!(1, loaded.version);

        let found = child_repo.find_by_global_id("04000001").await.expect("should query child");
        assert_eq!(Some(child.child_id.clone()), found.map(|c| c.child_id));

        let deleted = child_repo.delete(child.child_id.as_str()).await.expect("should delete child");
        assert_eq!(1, deleted);
        assert!(child_repo.get(child.child_id.as_str()).await.is_err());
    }
}
