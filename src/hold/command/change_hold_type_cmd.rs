use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::hold::domain::HoldService;
use crate::hold::domain::types::HoldType;
use crate::hold::dto::HoldDto;

pub(crate) struct ChangeHoldTypeCommand {
    hold_service: Box<dyn HoldService>,
}

impl ChangeHoldTypeCommand {
    pub(crate) fn new(hold_service: Box<dyn HoldService>) -> Self {
        Self {
            hold_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChangeHoldTypeCommandRequest {
    id: String,
    hold_type: HoldType,
}

impl ChangeHoldTypeCommandRequest {
    pub fn new(id: &str, hold_type: HoldType) -> Self {
        Self {
            id: id.to_string(),
            hold_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChangeHoldTypeCommandResponse {
    pub(crate) hold: HoldDto,
}

impl ChangeHoldTypeCommandResponse {
    pub fn new(hold: HoldDto) -> Self {
        Self {
            hold,
        }
    }
}

#[async_trait]
impl Command<ChangeHoldTypeCommandRequest, ChangeHoldTypeCommandResponse> for ChangeHoldTypeCommand {
    async fn execute(&self, req: ChangeHoldTypeCommandRequest) -> Result<ChangeHoldTypeCommandResponse, CommandError> {
        self.hold_service.change_type(req.id.as_str(), req.hold_type)
            .await.map_err(CommandError::from).map(ChangeHoldTypeCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use chrono::{Duration, Utc};
    use lazy_static::lazy_static;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::hold::command::change_hold_type_cmd::{ChangeHoldTypeCommand, ChangeHoldTypeCommandRequest};
    use crate::hold::command::create_hold_cmd::{CreateHoldCommand, CreateHoldCommandRequest};
    use crate::hold::domain::model::HoldValues;
    use crate::hold::domain::types::HoldType;
    use crate::hold::factory::create_hold_service;

    lazy_static! {
        static ref CREATE_CMD : AsyncOnce<CreateHoldCommand> = AsyncOnce::new(async {
                let svc = create_hold_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                CreateHoldCommand::new(svc)
            });
        static ref CHANGE_CMD : AsyncOnce<ChangeHoldTypeCommand> = AsyncOnce::new(async {
                let svc = create_hold_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                ChangeHoldTypeCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_change_hold_type() {
        let create_cmd: &CreateHoldCommand = CREATE_CMD.get().await;
        let change_cmd: &ChangeHoldTypeCommand = CHANGE_CMD.get().await;

        let created = create_cmd.execute(CreateHoldCommandRequest::new(HoldValues::default()))
            .await.expect("should create hold");
        let res = change_cmd.execute(ChangeHoldTypeCommandRequest::new(
            created.hold.id.as_str(), HoldType::Delinquent)).await.expect("should change type");
        assert_eq!(HoldType::Delinquent, res.hold.hold_type);
        assert!(res.hold.expiration_date < Utc::now().naive_utc() + Duration::days(3));
    }
}
