//! JSON mirror of the inventory API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use server_api::statistics;
use shared::{
    domain::SystemName,
    error::ApiError,
    protocol::{OsDistribution, OsFamilyDistribution, SystemInfo, SystemView},
};

use super::json_error;
use crate::app_state::AppState;

type JsonResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub(crate) async fn list_systems(State(state): State<Arc<AppState>>) -> JsonResult<Vec<SystemInfo>> {
    let systems = server_api::list_systems(&state.api)
        .await
        .map_err(json_error)?;
    Ok(Json(systems))
}

pub(crate) async fn system(
    State(state): State<Arc<AppState>>,
    Path(raw_name): Path<String>,
) -> JsonResult<SystemView> {
    let system_name = SystemName::parse(&raw_name).map_err(|e| json_error(e.into()))?;
    let view = server_api::load_system_view(&state.api, &system_name)
        .await
        .map_err(json_error)?;
    Ok(Json(view))
}

pub(crate) async fn os_distribution(
    State(state): State<Arc<AppState>>,
) -> JsonResult<OsDistribution> {
    let data = statistics::os_distribution(&state.api)
        .await
        .map_err(json_error)?;
    Ok(Json(data))
}

pub(crate) async fn os_family_distribution(
    State(state): State<Arc<AppState>>,
) -> JsonResult<OsFamilyDistribution> {
    let data = statistics::os_family_distribution(&state.api)
        .await
        .map_err(json_error)?;
    Ok(Json(data))
}
