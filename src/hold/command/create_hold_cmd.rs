use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::hold::domain::HoldService;
use crate::hold::domain::model::HoldValues;
use crate::hold::dto::HoldDto;

pub(crate) struct CreateHoldCommand {
    hold_service: Box<dyn HoldService>,
}

impl CreateHoldCommand {
    pub(crate) fn new(hold_service: Box<dyn HoldService>) -> Self {
        Self {
            hold_service,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub(crate) struct CreateHoldCommandRequest {
    values: HoldValues,
}

impl CreateHoldCommandRequest {
    pub fn new(values: HoldValues) -> Self {
        Self {
            values,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateHoldCommandResponse {
    pub(crate) hold: HoldDto,
}

impl CreateHoldCommandResponse {
    pub fn new(hold: HoldDto) -> Self {
        Self {
            hold,
        }
    }
}

#[async_trait]
impl Command<CreateHoldCommandRequest, CreateHoldCommandResponse> for CreateHoldCommand {
    async fn execute(&self, req: CreateHoldCommandRequest) -> Result<CreateHoldCommandResponse, CommandError> {
        self.hold_service.create_hold(&req.values)
            .await.map_err(CommandError::from).map(CreateHoldCommandResponse::new)
    }
}
