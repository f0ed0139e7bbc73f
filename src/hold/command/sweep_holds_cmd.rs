use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::hold::domain::HoldService;

// SweepHoldsCommand expires every overdue hold; invoked by a scheduler
pub(crate) struct SweepHoldsCommand {
    hold_service: Box<dyn HoldService>,
}

impl SweepHoldsCommand {
    pub(crate) fn new(hold_service: Box<dyn HoldService>) -> Self {
        Self {
            hold_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SweepHoldsCommandRequest {}

#[derive(Debug, Serialize)]
pub(crate) struct SweepHoldsCommandResponse {
    pub(crate) swept: bool,
}

impl SweepHoldsCommandResponse {
    pub fn new(swept: bool) -> Self {
        Self {
            swept,
        }
    }
}

#[async_trait]
impl Command<SweepHoldsCommandRequest, SweepHoldsCommandResponse> for SweepHoldsCommand {
    async fn execute(&self, _req: SweepHoldsCommandRequest) -> Result<SweepHoldsCommandResponse, CommandError> {
        self.hold_service.sweep_expired()
            .await.map_err(CommandError::from).map(SweepHoldsCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use chrono::{Duration, Utc};
    use lazy_static::lazy_static;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::pool::HoldState;
    use crate::core::repository::RepositoryStore;
    use crate::hold::command::create_hold_cmd::{CreateHoldCommand, CreateHoldCommandRequest};
    use crate::hold::command::sweep_holds_cmd::{SweepHoldsCommand, SweepHoldsCommandRequest};
    use crate::hold::domain::HoldService;
    use crate::hold::domain::model::HoldValues;
    use crate::hold::factory::create_hold_service;

    lazy_static! {
        static ref CREATE_CMD : AsyncOnce<CreateHoldCommand> = AsyncOnce::new(async {
                let svc = create_hold_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                CreateHoldCommand::new(svc)
            });
        static ref SWEEP_CMD : AsyncOnce<SweepHoldsCommand> = AsyncOnce::new(async {
                let svc = create_hold_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                SweepHoldsCommand::new(svc)
            });
        static ref HOLD_SVC : AsyncOnce<Box<dyn HoldService>> = AsyncOnce::new(async {
                create_hold_service(&Configuration::new("test"), RepositoryStore::InMemory).await
            });
    }

    #[tokio::test]
    async fn test_should_run_sweep_holds() {
        let create_cmd: &CreateHoldCommand = CREATE_CMD.get().await;
        let sweep_cmd: &SweepHoldsCommand = SWEEP_CMD.get().await;

        let overdue = create_cmd.execute(CreateHoldCommandRequest::new(HoldValues {
            expiration_date: Some(Utc::now().naive_utc() - Duration::minutes(5)),
            ..Default::default()
        })).await.expect("should create hold");
        let current = create_cmd.execute(CreateHoldCommandRequest::new(HoldValues::default()))
            .await.expect("should create hold");

        let res = sweep_cmd.execute(SweepHoldsCommandRequest::default()).await.expect("should sweep");
        assert!(res.swept);
        let svc = HOLD_SVC.get().await;
        assert_eq!(HoldState::Expired, svc.find_hold_by_id(overdue.hold.id.as_str()).await.expect("hold").state);
        assert_eq!(HoldState::Draft, svc.find_hold_by_id(current.hold.id.as_str()).await.expect("hold").state);
    }
}
