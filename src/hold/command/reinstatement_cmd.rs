use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::core::command::{Command, CommandError};
use crate::hold::domain::HoldService;

// ReinstatementCommand handles a beneficiary reinstatement notification from Connect
pub(crate) struct ReinstatementCommand {
    hold_service: Box<dyn HoldService>,
}

impl ReinstatementCommand {
    pub(crate) fn new(hold_service: Box<dyn HoldService>) -> Self {
        Self {
            hold_service,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub(crate) struct ReinstatementCommandRequest {
    payload: Value,
}

impl ReinstatementCommandRequest {
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReinstatementCommandResponse {
    pub(crate) hold_ids: Vec<String>,
}

impl ReinstatementCommandResponse {
    pub fn new(hold_ids: Vec<String>) -> Self {
        Self {
            hold_ids,
        }
    }
}

#[async_trait]
impl Command<ReinstatementCommandRequest, ReinstatementCommandResponse> for ReinstatementCommand {
    async fn execute(&self, req: ReinstatementCommandRequest) -> Result<ReinstatementCommandResponse, CommandError> {
        self.hold_service.create_from_reinstatement(&req.payload)
            .await.map_err(CommandError::from).map(ReinstatementCommandResponse::new)
    }
}
