use std::collections::HashMap;
use serde::Serialize;
use serde_json::Value;
use crate::core::pool::{PoolResult, PaginatedResult};

// Evaluates a repository predicate against the serialized form of an entity. Keys follow
// the same `name:op` convention as the dynamodb filter expressions.
pub(crate) fn matches_predicate<T: Serialize>(entity: &T, predicate: &HashMap<String, String>) -> PoolResult<bool> {
    let val = serde_json::to_value(entity)?;
    for (k, expected) in predicate {
        let (name, op) = match k.split_once(':') {
            Some((name, op)) => (name, op),
            None => (k.as_str(), "="),
        };
        let actual = match val.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        let matched = match op {
            "<" => actual.as_str() < expected.as_str(),
            "<=" => actual.as_str() <= expected.as_str(),
            ">" => actual.as_str() > expected.as_str(),
            ">=" => actual.as_str() >= expected.as_str(),
            "<>" => actual != *expected,
            _ => actual == *expected,
        };
        if !matched {
            return Ok(false);
        }
    }
    Ok(true)
}

// Pages through records; the page token is the offset of the first record.
pub(crate) fn paginate<T>(mut records: Vec<T>, page: Option<&str>, page_size: usize) -> PaginatedResult<T> {
    let page_size = page_size.max(1);
    let offset = page.and_then(|p| p.parse::<usize>().ok()).unwrap_or(0).min(records.len());
    let mut rest = records.split_off(offset);
    let next_page = if rest.len() > page_size {
        Some((offset + page_size).to_string())
    } else {
        None
    };
    rest.truncate(page_size);
    PaginatedResult::new(page, page_size, next_page, rest)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use serde_json::json;
    use crate::utils::memory::{matches_predicate, paginate};

    #[tokio::test]
    async fn test_should_match_predicate() {
        let entity = json!({"state": "Active", "expiration_date": "2023-04-12T12:12:12", "hold_id": null, "active": true});
        let predicate = HashMap::from([
            ("state".to_string(), "Active".to_string()),
            ("expiration_date:<".to_string(), "2023-05-01T00:00:00".to_string()),
        ]);
        assert!(matches_predicate(&entity, &predicate).expect("should match"));
        let predicate = HashMap::from([("expiration_date:<".to_string(), "2023-04-01T00:00:00".to_string())]);
        assert!(!matches_predicate(&entity, &predicate).expect("should match"));
        let predicate = HashMap::from([("hold_id".to_string(), "".to_string()), ("active".to_string(), "true".to_string())]);
        assert!(matches_predicate(&entity, &predicate).expect("should match"));
    }

    #[tokio::test]
    async fn test_should_paginate() {
        let records: Vec<i32> = (0..25).collect();
        let first = paginate(records.clone(), None, 10);
        assert_eq!(10, first.records.len());
        assert_eq!(Some("10".to_string()), first.next_page);
        let last = paginate(records, Some("20"), 10);
        assert_eq!(vec![20, 21, 22, 23, 24], last.records);
        assert_eq!(None, last.next_page);
    }
}
