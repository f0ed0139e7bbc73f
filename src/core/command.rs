use async_trait::async_trait;
use crate::core::pool::PoolError;

#[derive(Debug)]
pub enum CommandError {
    Access {
        message: String,
        reason_code: Option<String>,
    },
    Configuration {
        message: String,
    },
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Precondition {
        message: String,
        reason_code: Option<String>,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<PoolError> for CommandError {
    fn from(other: PoolError) -> Self {
        match other {
            PoolError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            PoolError::AccessDenied { message, reason_code } => {
                CommandError::Access { message, reason_code }
            }
            PoolError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            PoolError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            PoolError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            PoolError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            PoolError::Precondition { message, reason_code } => {
                CommandError::Precondition { message, reason_code }
            }
            PoolError::Configuration { message } => {
                CommandError::Configuration { message }
            }
            PoolError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            PoolError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: true }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::pool::PoolError;

    #[tokio::test]
    async fn test_should_convert_pool_error() {
        assert!(matches!(CommandError::from(PoolError::precondition("sponsored", None)),
            CommandError::Precondition { .. }));
        assert!(matches!(CommandError::from(PoolError::configuration("missing")),
            CommandError::Configuration { .. }));
        assert!(matches!(CommandError::from(PoolError::duplicate_key("dup")),
            CommandError::DuplicateKey { .. }));
        assert!(matches!(CommandError::from(PoolError::unavailable("busy", None, true)),
            CommandError::Runtime { retryable: true, .. }));
    }
}
