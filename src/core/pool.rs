use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum PoolError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    AccessDenied {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // The store is temporarily unavailable (throttled, timed out); the caller can retry
    // with or without a backoff.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    // A business rule forbids the operation in the current state of the records,
    // e.g. releasing the hold of a sponsored child. Nothing was changed.
    Precondition {
        message: String,
        reason_code: Option<String>,
    },
    // A required setting (such as a hold duration) is missing. Never defaulted.
    Configuration {
        message: String,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl PoolError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> PoolError {
        PoolError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn access_denied(message: &str, reason_code: Option<String>) -> PoolError {
        PoolError::AccessDenied { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> PoolError {
        PoolError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> PoolError {
        PoolError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> PoolError {
        PoolError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> PoolError {
        if retryable {
            PoolError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                PoolError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("400") {
                // conditional check failures on put_item come back as 400
                if message.contains("ConditionalCheckFailed") {
                    PoolError::duplicate_key(
                        format!("conditional check failed {:?} {:?}", message, reason).as_str())
                } else {
                    PoolError::access_denied(
                        format!("access-denied error {:?} {:?}", message, reason).as_str(), reason)
                }
            } else {
                PoolError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            PoolError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> PoolError {
        PoolError::Validation { message: message.to_string(), reason_code }
    }

    pub fn precondition(message: &str, reason_code: Option<String>) -> PoolError {
        PoolError::Precondition { message: message.to_string(), reason_code }
    }

    pub fn configuration(message: &str) -> PoolError {
        PoolError::Configuration { message: message.to_string() }
    }

    pub fn serialization(message: &str) -> PoolError {
        PoolError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> PoolError {
        PoolError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            PoolError::Database { retryable, .. } => { *retryable }
            PoolError::AccessDenied { .. } => { false }
            PoolError::DuplicateKey { .. } => { false }
            PoolError::NotFound { .. } => { false }
            PoolError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            PoolError::Validation { .. } => { false }
            PoolError::Precondition { .. } => { false }
            PoolError::Configuration { .. } => { false }
            PoolError::Serialization { .. } => { false }
            PoolError::Runtime { .. } => { false }
        }
    }
}

impl From<serde_json::Error> for PoolError {
    fn from(err: serde_json::Error) -> Self {
        PoolError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for PoolError {
    fn from(err: String) -> Self {
        PoolError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for PoolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            PoolError::AccessDenied { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            PoolError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            PoolError::NotFound { message } => {
                write!(f, "{}", message)
            }
            PoolError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            PoolError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            PoolError::Precondition { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            PoolError::Configuration { message } => {
                write!(f, "{}", message)
            }
            PoolError::Serialization { message } => {
                write!(f, "{}", message)
            }
            PoolError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

/// A specialized Result type for the child pool.
pub type PoolResult<T> = Result<T, PoolError>;

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // The page number or token
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // Next page if available
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: Option<&str>, page_size: usize,
                      next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

// HoldState is the lifecycle of a hold: draft until Connect confirms it, then active
// until it expires or gets released. Nothing leaves Expired.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum HoldState {
    Draft,
    Active,
    Expired,
}

impl HoldState {
    pub fn is_expired(&self) -> bool {
        *self == HoldState::Expired
    }
}

impl From<String> for HoldState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Draft" => HoldState::Draft,
            "Active" => HoldState::Active,
            "Expired" => HoldState::Expired,
            _ => HoldState::Draft,
        }
    }
}

impl Display for HoldState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            HoldState::Draft => write!(f, "Draft"),
            HoldState::Active => write!(f, "Active"),
            HoldState::Expired => write!(f, "Expired"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Web,
    Event,
    Ambassador,
}

impl Channel {
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Web => "Website",
            Channel::Event => "Event",
            Channel::Ambassador => "Ambassador",
        }
    }

    pub fn from_key(key: &str) -> Option<Channel> {
        match key {
            "web" => Some(Channel::Web),
            "event" => Some(Channel::Event),
            "ambassador" => Some(Channel::Ambassador),
            _ => None,
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Channel::Web => write!(f, "web"),
            Channel::Event => write!(f, "event"),
            Channel::Ambassador => write!(f, "ambassador"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum ChildStatus {
    Consigned,
    OnInternet,
    Sponsored,
    Departed,
    Released,
}

impl From<String> for ChildStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Consigned" => ChildStatus::Consigned,
            "OnInternet" => ChildStatus::OnInternet,
            "Sponsored" => ChildStatus::Sponsored,
            "Departed" => ChildStatus::Departed,
            "Released" => ChildStatus::Released,
            _ => ChildStatus::Released,
        }
    }
}

impl Display for ChildStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ChildStatus::Consigned => write!(f, "Consigned"),
            ChildStatus::OnInternet => write!(f, "OnInternet"),
            ChildStatus::Sponsored => write!(f, "Sponsored"),
            ChildStatus::Departed => write!(f, "Departed"),
            ChildStatus::Released => write!(f, "Released"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::pool::{Channel, ChildStatus, HoldState, PoolError};

    #[tokio::test]
    async fn test_should_create_database_error() {
        assert!(matches!(PoolError::database("test", None, false), PoolError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_precondition_error() {
        let err = PoolError::precondition("child is sponsored", None);
        assert!(matches!(err, PoolError::Precondition{ message: _, reason_code: _ }));
        assert_eq!("child is sponsored None", err.to_string());
    }

    #[tokio::test]
    async fn test_should_create_configuration_error() {
        assert!(matches!(PoolError::configuration("missing"), PoolError::Configuration{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_database_or_unavailable_error() {
        assert!(matches!(PoolError::database_or_unavailable("test", None, true), PoolError::CurrentlyUnavailable{ message: _, reason_code: _, retryable: _ }));
        assert!(matches!(PoolError::database_or_unavailable("test", Some("404".to_string()), false), PoolError::NotFound{ message: _ }));
        assert!(matches!(PoolError::database_or_unavailable("test", Some("400".to_string()), false), PoolError::AccessDenied{ message: _, reason_code: _ }));
        assert!(matches!(PoolError::database_or_unavailable("ConditionalCheckFailedException", Some("400".to_string()), false), PoolError::DuplicateKey{ message: _ }));
        assert!(matches!(PoolError::database_or_unavailable("test", Some("500".to_string()), false), PoolError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert_eq!(false, PoolError::database("test", None, false).retryable());
        assert_eq!(false, PoolError::duplicate_key("test").retryable());
        assert_eq!(true, PoolError::unavailable("test", None, true).retryable());
        assert_eq!(false, PoolError::precondition("test", None).retryable());
        assert_eq!(false, PoolError::configuration("test").retryable());
    }

    #[tokio::test]
    async fn test_should_format_hold_state() {
        for state in [HoldState::Draft, HoldState::Active, HoldState::Expired] {
            assert_eq!(state, HoldState::from(state.to_string()));
        }
        assert!(HoldState::Expired.is_expired());
        assert!(!HoldState::Active.is_expired());
    }

    #[tokio::test]
    async fn test_should_format_child_status() {
        let statuses = vec![
            ChildStatus::Consigned,
            ChildStatus::OnInternet,
            ChildStatus::Sponsored,
            ChildStatus::Departed,
            ChildStatus::Released,
        ];
        for status in statuses {
            assert_eq!(status, ChildStatus::from(status.to_string()));
        }
    }

    #[tokio::test]
    async fn test_should_resolve_channel() {
        assert_eq!(Some(Channel::Web), Channel::from_key("web"));
        assert_eq!(Some(Channel::Ambassador), Channel::from_key("ambassador"));
        assert_eq!(None, Channel::from_key("radio"));
        assert_eq!("Website", Channel::Web.label());
    }
}
