use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, Delete, Put, TransactWriteItem, Update};
use chrono::Utc;

use crate::hold::domain::model::HoldEntity;
use crate::hold::domain::types::HoldType;
use crate::core::pool::{Channel, HoldState, PoolError, PoolResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::hold::repository::HoldRepository;
use crate::utils::date::DATE_FMT;
use crate::utils::ddb::{add_filter_expr, from_ddb, opt_string, parse_bool_attribute, parse_date_attribute, parse_float_attribute, parse_item, parse_number_attribute, parse_opt_string_attribute, parse_string_attribute, string_date, to_ddb_page};

// external hold ids are claimed by a guard item in the hold table, keyed by this
// prefix and the hold id. Guard items carry no state, so the state index skips them.
const HOLD_ID_GUARD: &str = "hold_id#";

#[derive(Debug)]
pub struct DDBHoldRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBHoldRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }

    // claims the hold id for this hold, fails the transaction when another hold owns it
    fn hold_id_guard(&self, entity: &HoldEntity) -> Option<TransactWriteItem> {
        entity.hold_id.as_ref().map(|hold_id| {
            let put = Put::builder()
                .table_name(self.table_name.as_str())
                .item("id", AttributeValue::S(format!("{}{}", HOLD_ID_GUARD, hold_id)))
                .item("owner", AttributeValue::S(entity.id.clone()))
                .condition_expression("attribute_not_exists(id) OR #owner = :owner")
                .expression_attribute_names("#owner", "owner")
                .expression_attribute_values(":owner", AttributeValue::S(entity.id.clone()))
                .build();
            TransactWriteItem::builder().put(put).build()
        })
    }

    async fn transact(&self, items: Vec<TransactWriteItem>) -> PoolResult<usize> {
        self.client
            .transact_write_items()
            .set_transact_items(Some(items))
            .send()
            .await.map(|_| 1).map_err(PoolError::from)
    }
}

#[async_trait]
impl Repository<HoldEntity> for DDBHoldRepository {
    async fn create(&self, entity: &HoldEntity) -> PoolResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        let put = Put::builder()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(id)")
            .set_item(Some(parse_item(val)?))
            .build();
        let mut items = vec![TransactWriteItem::builder().put(put).build()];
        items.extend(self.hold_id_guard(entity));
        self.transact(items).await
    }

    async fn update(&self, entity: &HoldEntity) -> PoolResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        let update = Update::builder()
            .table_name(table_name)
            .key("id", AttributeValue::S(entity.id.clone()))
            .update_expression("SET version = :version, hold_id = :hold_id, child_id = :child_id, #name = :name, hold_type = :hold_type, expiration_date = :expiration_date, primary_owner = :primary_owner, secondary_owner = :secondary_owner, yield_rate = :yield_rate, no_money_yield_rate = :no_money_yield_rate, channel = :channel, source_code = :source_code, comments = :comments, mandatory_review = :mandatory_review, #state = :state, reinstatement_reason = :reinstatement_reason, reservation_id = :reservation_id, updated_at = :updated_at")
            .expression_attribute_names("#name", "name")
            .expression_attribute_names("#state", "state")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":hold_id", opt_string(&entity.hold_id))
            .expression_attribute_values(":child_id", opt_string(&entity.child_id))
            .expression_attribute_values(":name", opt_string(&entity.name))
            .expression_attribute_values(":hold_type", AttributeValue::S(entity.hold_type.label().to_string()))
            .expression_attribute_values(":expiration_date", string_date(entity.expiration_date))
            .expression_attribute_values(":primary_owner", AttributeValue::S(entity.primary_owner.clone()))
            .expression_attribute_values(":secondary_owner", opt_string(&entity.secondary_owner))
            .expression_attribute_values(":yield_rate", AttributeValue::N(entity.yield_rate.to_string()))
            .expression_attribute_values(":no_money_yield_rate", AttributeValue::N(entity.no_money_yield_rate.to_string()))
            .expression_attribute_values(":channel", opt_string(&entity.channel.map(|c| c.to_string())))
            .expression_attribute_values(":source_code", opt_string(&entity.source_code))
            .expression_attribute_values(":comments", opt_string(&entity.comments))
            .expression_attribute_values(":mandatory_review", AttributeValue::Bool(entity.mandatory_review))
            .expression_attribute_values(":state", AttributeValue::S(entity.state.to_string()))
            .expression_attribute_values(":reinstatement_reason", opt_string(&entity.reinstatement_reason))
            .expression_attribute_values(":reservation_id", opt_string(&entity.reservation_id))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .build();
        let mut items = vec![TransactWriteItem::builder().update(update).build()];
        items.extend(self.hold_id_guard(entity));
        self.transact(items).await
    }

    async fn get(&self, id: &str) -> PoolResult<HoldEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression(
                "id = :id",
            )
            .expression_attribute_values(
                ":id",
                AttributeValue::S(id.to_string()),
            )
            .send()
            .await.map_err(PoolError::from).and_then(|req| {
            if let Some(items) = req.items {
                if items.len() > 1 {
                    return Err(PoolError::database(format!("too many holds for {}", id).as_str(), None, false));
                } else if let Some(map) = items.first() {
                    return Ok(HoldEntity::from(map));
                }
            }
            Err(PoolError::not_found(format!("hold not found for {}", id).as_str()))
        })
    }

    // removes the hold together with the guard of its hold id
    async fn delete(&self, id: &str) -> PoolResult<usize> {
        let hold_id = match self.get(id).await {
            Ok(hold) => hold.hold_id,
            Err(PoolError::NotFound { .. }) => return Ok(0),
            Err(err) => return Err(err),
        };
        let table_name: &str = self.table_name.as_ref();
        let mut items = vec![TransactWriteItem::builder().delete(Delete::builder()
            .table_name(table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .build()).build()];
        if let Some(hold_id) = hold_id {
            items.push(TransactWriteItem::builder().delete(Delete::builder()
                .table_name(table_name)
                .key("id", AttributeValue::S(format!("{}{}", HOLD_ID_GUARD, hold_id)))
                .build()).build());
        }
        self.transact(items).await
    }

    // Note you cannot use certain reserved words per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> PoolResult<PaginatedResult<HoldEntity>> {
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
            .expression_attribute_names("#state", "state")
            .expression_attribute_values(":state", AttributeValue::S(
                predicate.get("state").unwrap_or(&HoldState::Active.to_string()).to_string()
            ));
        // handle GSI keys first
        let mut key_cond = String::new();
        key_cond.push_str("#state = :state");

        if let Some(expiration_date) = predicate.get("expiration_date:<") {
            key_cond.push_str(" AND expiration_date < :expiration_date");
            request = request.expression_attribute_values(":expiration_date", AttributeValue::S(expiration_date.to_string()));
        }
        request = request.key_condition_expression(key_cond);
        let mut filter_expr = String::new();
        // then handle other filters
        for (k, v) in predicate {
            if k != "state" && k != "expiration_date:<" {
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
                .map(HoldEntity::from).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

#[async_trait]
impl HoldRepository for DDBHoldRepository {
    async fn query_expired(&self, predicate: &HashMap<String, String>, page: Option<&str>, page_size: usize) -> PoolResult<PaginatedResult<HoldEntity>> {
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

impl From<&HashMap<String, AttributeValue>> for HoldEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        HoldEntity {
            id: parse_string_attribute("id", map).unwrap_or_default(),
            version: parse_number_attribute("version", map),
            hold_id: parse_opt_string_attribute("hold_id", map),
            child_id: parse_opt_string_attribute("child_id", map),
            name: parse_opt_string_attribute("name", map),
            hold_type: parse_string_attribute("hold_type", map)
                .and_then(|label| HoldType::from_label(label.as_str())).unwrap_or_default(),
            expiration_date: parse_date_attribute("expiration_date", map).unwrap_or(Utc::now().naive_utc()),
            primary_owner: parse_string_attribute("primary_owner", map).unwrap_or_default(),
            secondary_owner: parse_opt_string_attribute("secondary_owner", map),
            yield_rate: parse_float_attribute("yield_rate", map),
            no_money_yield_rate: parse_float_attribute("no_money_yield_rate", map),
            channel: parse_string_attribute("channel", map).and_then(|c| Channel::from_key(c.as_str())),
            source_code: parse_opt_string_attribute("source_code", map),
            comments: parse_opt_string_attribute("comments", map),
            mandatory_review: parse_bool_attribute("mandatory_review", map),
            state: HoldState::from(parse_string_attribute("state", map).unwrap_or(HoldState::Draft.to_string())),
            reinstatement_reason: parse_opt_string_attribute("reinstatement_reason", map),
            reservation_id: parse_opt_string_attribute("reservation_id", map),
            created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
        }
    }
}
