use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::hold::domain::HoldService;
use crate::hold::domain::model::HoldValues;
use crate::hold::dto::HoldDto;

pub(crate) struct UpdateHoldCommand {
    hold_service: Box<dyn HoldService>,
}

impl UpdateHoldCommand {
    pub(crate) fn new(hold_service: Box<dyn HoldService>) -> Self {
        Self {
            hold_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateHoldCommandRequest {
    id: String,
    #[serde(default)]
    values: HoldValues,
    #[serde(default)]
    no_upsert: bool,
}

impl UpdateHoldCommandRequest {
    pub fn new(id: &str, values: HoldValues, no_upsert: bool) -> Self {
        Self {
            id: id.to_string(),
            values,
            no_upsert,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateHoldCommandResponse {
    pub(crate) hold: HoldDto,
}

impl UpdateHoldCommandResponse {
    pub fn new(hold: HoldDto) -> Self {
        Self {
            hold,
        }
    }
}

#[async_trait]
impl Command<UpdateHoldCommandRequest, UpdateHoldCommandResponse> for UpdateHoldCommand {
    async fn execute(&self, req: UpdateHoldCommandRequest) -> Result<UpdateHoldCommandResponse, CommandError> {
        self.hold_service.update_hold(req.id.as_str(), &req.values, req.no_upsert)
            .await.map_err(CommandError::from).map(UpdateHoldCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::hold::command::create_hold_cmd::{CreateHoldCommand, CreateHoldCommandRequest};
    use crate::hold::command::update_hold_cmd::{UpdateHoldCommand, UpdateHoldCommandRequest};
    use crate::hold::domain::model::HoldValues;
    use crate::hold::factory::create_hold_service;

    lazy_static! {
        static ref CREATE_CMD : AsyncOnce<CreateHoldCommand> = AsyncOnce::new(async {
                let svc = create_hold_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                CreateHoldCommand::new(svc)
            });
        static ref UPDATE_CMD : AsyncOnce<UpdateHoldCommand> = AsyncOnce::new(async {
                let svc = create_hold_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                UpdateHoldCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_update_hold() {
        let create_cmd: &CreateHoldCommand = CREATE_CMD.get().await;
        let update_cmd: &UpdateHoldCommand = UPDATE_CMD.get().await;

        let created = create_cmd.execute(CreateHoldCommandRequest::new(HoldValues::default()))
            .await.expect("should create hold");
        let res = update_cmd.execute(UpdateHoldCommandRequest::new(
            created.hold.id.as_str(),
            HoldValues { comments: Some("call back".to_string()), ..Default::default() },
            true)).await.expect("should update hold");
        assert_eq!(Some("call back".to_string()), res.hold.comments);
        assert_eq!(created.hold.version + 1, res.hold.version);
    }

    #[tokio::test]
    async fn test_should_not_update_unknown_hold() {
        let update_cmd: &UpdateHoldCommand = UPDATE_CMD.get().await;
        let res = update_cmd.execute(UpdateHoldCommandRequest::new(
            "unknown", HoldValues::default(), false)).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
