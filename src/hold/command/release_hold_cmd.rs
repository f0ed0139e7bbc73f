use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::hold::domain::HoldService;
use crate::hold::dto::HoldDto;

pub(crate) struct ReleaseHoldCommand {
    hold_service: Box<dyn HoldService>,
}

impl ReleaseHoldCommand {
    pub(crate) fn new(hold_service: Box<dyn HoldService>) -> Self {
        Self {
            hold_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReleaseHoldCommandRequest {
    id: String,
}

impl ReleaseHoldCommandRequest {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReleaseHoldCommandResponse {
    pub(crate) hold: HoldDto,
}

impl ReleaseHoldCommandResponse {
    pub fn new(hold: HoldDto) -> Self {
        Self {
            hold,
        }
    }
}

#[async_trait]
impl Command<ReleaseHoldCommandRequest, ReleaseHoldCommandResponse> for ReleaseHoldCommand {
    async fn execute(&self, req: ReleaseHoldCommandRequest) -> Result<ReleaseHoldCommandResponse, CommandError> {
        self.hold_service.release(req.id.as_str())
            .await.map_err(CommandError::from).map(ReleaseHoldCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::pool::HoldState;
    use crate::core::repository::RepositoryStore;
    use crate::hold::command::create_hold_cmd::{CreateHoldCommand, CreateHoldCommandRequest};
    use crate::hold::command::release_hold_cmd::{ReleaseHoldCommand, ReleaseHoldCommandRequest};
    use crate::hold::domain::model::HoldValues;
    use crate::hold::factory::create_hold_service;

    lazy_static! {
        static ref CREATE_CMD : AsyncOnce<CreateHoldCommand> = AsyncOnce::new(async {
                let svc = create_hold_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                CreateHoldCommand::new(svc)
            });
        static ref RELEASE_CMD : AsyncOnce<ReleaseHoldCommand> = AsyncOnce::new(async {
                let svc = create_hold_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                ReleaseHoldCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_release_hold() {
        let create_cmd: &CreateHoldCommand = CREATE_CMD.get().await;
        let release_cmd: &ReleaseHoldCommand = RELEASE_CMD.get().await;

        let created = create_cmd.execute(CreateHoldCommandRequest::new(HoldValues::default()))
            .await.expect("should create hold");
        let res = release_cmd.execute(ReleaseHoldCommandRequest::new(created.hold.id.as_str()))
            .await.expect("should release hold");
        assert_eq!(HoldState::Expired, res.hold.state);
    }
}
