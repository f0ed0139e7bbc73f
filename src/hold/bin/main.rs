use lambda_http::{run, Error};
use childpool::utils::ddb::setup_tracing;
use childpool::core::controller::AppState;
use childpool::core::repository::RepositoryStore;
use childpool::hold::controller::router;
use childpool::hold::sweeper::spawn_hold_sweeper;

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = if DEV_MODE {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        AppState::new("dev", RepositoryStore::LocalDynamoDB)
    } else {
        AppState::new("prod", RepositoryStore::DynamoDB)
    };

    // in production /hold/sweep is called by a scheduled rule
    if DEV_MODE {
        let _ = spawn_hold_sweeper(&state.config, state.store).await;
    }

    run(router(state)).await
}
