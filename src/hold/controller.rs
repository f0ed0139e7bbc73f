use axum::{
    extract::State,
    response::Json,
    routing::post,
    Router,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::hold::command::change_hold_type_cmd::{ChangeHoldTypeCommand, ChangeHoldTypeCommandRequest, ChangeHoldTypeCommandResponse};
use crate::hold::command::confirm_hold_cmd::{ConfirmHoldCommand, ConfirmHoldCommandRequest, ConfirmHoldCommandResponse};
use crate::hold::command::create_hold_cmd::{CreateHoldCommand, CreateHoldCommandRequest, CreateHoldCommandResponse};
use crate::hold::command::delete_hold_cmd::{DeleteHoldCommand, DeleteHoldCommandRequest, DeleteHoldCommandResponse};
use crate::hold::command::reinstatement_cmd::{ReinstatementCommand, ReinstatementCommandRequest, ReinstatementCommandResponse};
use crate::hold::command::release_hold_cmd::{ReleaseHoldCommand, ReleaseHoldCommandRequest, ReleaseHoldCommandResponse};
use crate::hold::command::reservation_to_hold_cmd::{ReservationToHoldCommand, ReservationToHoldCommandRequest, ReservationToHoldCommandResponse};
use crate::hold::command::sweep_holds_cmd::{SweepHoldsCommand, SweepHoldsCommandRequest, SweepHoldsCommandResponse};
use crate::hold::command::update_hold_cmd::{UpdateHoldCommand, UpdateHoldCommandRequest, UpdateHoldCommandResponse};
use crate::hold::domain::HoldService;
use crate::hold::factory;

pub fn router(state: AppState) -> Router<(), lambda_http::Body> {
    Router::new()
        .route("/hold", post(create_hold))
        .route("/hold/update", post(update_hold))
        .route("/hold/type", post(change_hold_type))
        .route("/hold/confirm", post(confirm_hold))
        .route("/hold/release", post(release_hold))
        .route("/hold/delete", post(delete_hold))
        .route("/hold/reinstatement", post(reinstatement))
        .route("/hold/reservation", post(reservation_to_hold))
        .route("/hold/sweep", post(sweep_holds))
        .with_state(state)
}

async fn build_service(state: AppState) -> Box<dyn HoldService> {
    factory::create_hold_service(&state.config, state.store).await
}

pub(crate) async fn create_hold(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<CreateHoldCommandResponse>, ServerError> {
    let req: CreateHoldCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = CreateHoldCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_hold(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<UpdateHoldCommandResponse>, ServerError> {
    let req: UpdateHoldCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = UpdateHoldCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn change_hold_type(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<ChangeHoldTypeCommandResponse>, ServerError> {
    let req: ChangeHoldTypeCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = ChangeHoldTypeCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn confirm_hold(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<ConfirmHoldCommandResponse>, ServerError> {
    let req: ConfirmHoldCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = ConfirmHoldCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn release_hold(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<ReleaseHoldCommandResponse>, ServerError> {
    let req: ReleaseHoldCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = ReleaseHoldCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn delete_hold(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<DeleteHoldCommandResponse>, ServerError> {
    let req: DeleteHoldCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = DeleteHoldCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn reinstatement(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<ReinstatementCommandResponse>, ServerError> {
    let req: ReinstatementCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = ReinstatementCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn reservation_to_hold(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<ReservationToHoldCommandResponse>, ServerError> {
    let req: ReservationToHoldCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = ReservationToHoldCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

// the body is ignored, schedulers may post anything
pub(crate) async fn sweep_holds(
    State(state): State<AppState>) -> Result<Json<SweepHoldsCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = SweepHoldsCommand::new(svc).execute(SweepHoldsCommandRequest::default()).await?;
    Ok(Json(res))
}

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::response::Json;
    use serde_json::json;
    use crate::core::controller::AppState;
    use crate::core::repository::RepositoryStore;
    use crate::hold::controller::{create_hold, release_hold, sweep_holds, update_hold};

    fn state() -> AppState {
        AppState::new("test", RepositoryStore::InMemory)
    }

    #[tokio::test]
    async fn test_should_create_and_release_hold() {
        let Json(created) = create_hold(State(state()), Json(json!({"primary_owner": "owner1"})))
            .await.expect("should create hold");
        let created = serde_json::to_value(created).expect("should serialize");
        let id = created["hold"]["id"].as_str().expect("should return id").to_string();
        assert_eq!("Consignment Hold", created["hold"]["hold_type"]);

        let Json(released) = release_hold(State(state()), Json(json!({"id": id})))
            .await.expect("should release hold");
        let released = serde_json::to_value(released).expect("should serialize");
        assert_eq!("Expired", released["hold"]["state"]);
    }

    #[tokio::test]
    async fn test_should_map_errors_to_status() {
        let res = update_hold(State(state()), Json(json!({"id": "unknown"}))).await;
        assert_eq!(StatusCode::NOT_FOUND, res.err().expect("should fail").0);

        let res = update_hold(State(state()), Json(json!({"values": {}}))).await;
        assert_eq!(StatusCode::BAD_REQUEST, res.err().expect("should fail").0);
    }

    #[tokio::test]
    async fn test_should_sweep() {
        let Json(res) = sweep_holds(State(state())).await.expect("should sweep");
        let res = serde_json::to_value(res).expect("should serialize");
        assert_eq!(true, res["swept"]);
    }
}
