use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::hold::domain::HoldService;
use crate::hold::dto::HoldDto;

pub(crate) struct DeleteHoldCommand {
    hold_service: Box<dyn HoldService>,
}

impl DeleteHoldCommand {
    pub(crate) fn new(hold_service: Box<dyn HoldService>) -> Self {
        Self {
            hold_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteHoldCommandRequest {
    id: String,
}

impl DeleteHoldCommandRequest {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteHoldCommandResponse {
    pub(crate) hold: HoldDto,
}

impl DeleteHoldCommandResponse {
    pub fn new(hold: HoldDto) -> Self {
        Self {
            hold,
        }
    }
}

#[async_trait]
impl Command<DeleteHoldCommandRequest, DeleteHoldCommandResponse> for DeleteHoldCommand {
    async fn execute(&self, req: DeleteHoldCommandRequest) -> Result<DeleteHoldCommandResponse, CommandError> {
        self.hold_service.delete(req.id.as_str())
            .await.map_err(CommandError::from).map(DeleteHoldCommandResponse::new)
    }
}
