use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::hold::domain::HoldService;
use crate::hold::domain::model::HoldValues;
use crate::hold::dto::HoldDto;

// ConfirmHoldCommand applies the answer of Connect to a hold request
pub(crate) struct ConfirmHoldCommand {
    hold_service: Box<dyn HoldService>,
}

impl ConfirmHoldCommand {
    pub(crate) fn new(hold_service: Box<dyn HoldService>) -> Self {
        Self {
            hold_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConfirmHoldCommandRequest {
    id: String,
    #[serde(default)]
    values: HoldValues,
}

impl ConfirmHoldCommandRequest {
    pub fn new(id: &str, values: HoldValues) -> Self {
        Self {
            id: id.to_string(),
            values,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ConfirmHoldCommandResponse {
    // None when Connect refused the hold
    pub(crate) hold: Option<HoldDto>,
}

impl ConfirmHoldCommandResponse {
    pub fn new(hold: Option<HoldDto>) -> Self {
        Self {
            hold,
        }
    }
}

#[async_trait]
impl Command<ConfirmHoldCommandRequest, ConfirmHoldCommandResponse> for ConfirmHoldCommand {
    async fn execute(&self, req: ConfirmHoldCommandRequest) -> Result<ConfirmHoldCommandResponse, CommandError> {
        self.hold_service.apply_external_confirmation(req.id.as_str(), &req.values)
            .await.map_err(CommandError::from).map(ConfirmHoldCommandResponse::new)
    }
}
