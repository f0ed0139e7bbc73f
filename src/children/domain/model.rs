use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::children::domain::Child;
use crate::core::domain::Identifiable;
use crate::core::pool::ChildStatus;
use crate::utils::date::serializer;

// ChildEntity is the part of the child record the hold lifecycle reads and writes; the
// rest of the child is managed elsewhere.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ChildEntity {
    pub child_id: String,
    pub version: i64,
    pub global_id: String,
    pub name: String,
    pub active: bool,
    pub status: ChildStatus,
    // internal id of the hold currently placed on the child
    pub hold_id: Option<String>,
    pub sponsor_id: Option<String>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl ChildEntity {
    pub fn new(global_id: &str) -> Self {
        Self {
            child_id: Uuid::new_v4().to_string(),
            version: 0,
            global_id: global_id.to_string(),
            name: "".to_string(),
            active: false,
            status: ChildStatus::Released,
            hold_id: None,
            sponsor_id: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for ChildEntity {
    fn id(&self) -> String {
        self.child_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Child for ChildEntity {
    fn is_sponsored(&self) -> bool {
        self.sponsor_id.as_ref().map(|s| !s.is_empty()).unwrap_or(false)
    }

    fn is_available(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use crate::children::domain::Child;
    use crate::children::domain::model::ChildEntity;
    use crate::core::pool::ChildStatus;

    #[tokio::test]
    async fn test_should_build_child() {
        let child = ChildEntity::new("01234567");
        assert_eq!("01234567", child.global_id.as_str());
        assert_eq!(ChildStatus::Released, child.status);
        assert!(!child.is_available());
        assert!(!child.is_sponsored());
    }

    #[tokio::test]
    async fn test_should_detect_sponsored_child() {
        let mut child = ChildEntity::new("01234567");
        child.sponsor_id = Some("".to_string());
        assert!(!child.is_sponsored());
        child.sponsor_id = Some("partner1".to_string());
        assert!(child.is_sponsored());
    }
}
