use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::core::command::{Command, CommandError};
use crate::hold::domain::HoldService;

// ReservationToHoldCommand turns a reservation notified by Connect into a hold
pub(crate) struct ReservationToHoldCommand {
    hold_service: Box<dyn HoldService>,
}

impl ReservationToHoldCommand {
    pub(crate) fn new(hold_service: Box<dyn HoldService>) -> Self {
        Self {
            hold_service,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub(crate) struct ReservationToHoldCommandRequest {
    payload: Value,
}

impl ReservationToHoldCommandRequest {
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReservationToHoldCommandResponse {
    pub(crate) hold_ids: Vec<String>,
}

impl ReservationToHoldCommandResponse {
    pub fn new(hold_ids: Vec<String>) -> Self {
        Self {
            hold_ids,
        }
    }
}

#[async_trait]
impl Command<ReservationToHoldCommandRequest, ReservationToHoldCommandResponse> for ReservationToHoldCommand {
    async fn execute(&self, req: ReservationToHoldCommandRequest) -> Result<ReservationToHoldCommandResponse, CommandError> {
        self.hold_service.convert_reservation_to_hold(&req.payload)
            .await.map_err(CommandError::from).map(ReservationToHoldCommandResponse::new)
    }
}
