use tokio::time::{interval, Duration};
use tracing::{error, info};
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::hold::domain::HoldService;
use crate::hold::factory::create_hold_service;

// Expires overdue holds every period, for deployments without an external scheduler.
pub async fn run_hold_sweeper(hold_service: Box<dyn HoldService>, period: Duration) {
    let mut tick = interval(period);
    loop {
        tick.tick().await;
        match hold_service.sweep_expired().await {
            Ok(_) => {
                info!("background sweep of expired holds done");
            }
            Err(err) => {
                error!(error = %err, "background sweep of expired holds failed");
            }
        }
    }
}

pub async fn spawn_hold_sweeper(config: &Configuration, store: RepositoryStore) -> tokio::task::JoinHandle<()> {
    let hold_service = create_hold_service(config, store).await;
    let period = Duration::from_secs(config.sweep_interval_secs.max(1));
    tokio::spawn(run_hold_sweeper(hold_service, period))
}
