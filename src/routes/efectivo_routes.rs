//! Rutas de efectivo por planilla - CRUD de back-office, solo admin

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::controllers::efectivo_controller::{
    CreateEfectivoRequest, EfectivoController, UpdateEfectivoRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{admin_only_middleware, auth_middleware};
use crate::models::planilla::PlanillaEfectivo;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_efectivo_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(add))
        .route("/:id", get(find_one).put(update).patch(update).delete(remove))
        .route_layer(middleware::from_fn(admin_only_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn find_all(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PlanillaEfectivo>>>, AppError> {
    let efectivos = EfectivoController::new(state.pool.clone()).find_all().await?;
    Ok(Json(ApiResponse::success(efectivos)))
}

async fn find_one(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PlanillaEfectivo>>, AppError> {
    let efectivo = EfectivoController::new(state.pool.clone()).find_one(id).await?;
    Ok(Json(ApiResponse::success(efectivo)))
}

async fn add(
    State(state): State<AppState>,
    Json(request): Json<CreateEfectivoRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PlanillaEfectivo>>), AppError> {
    let response = EfectivoController::new(state.pool.clone()).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateEfectivoRequest>,
) -> Result<Json<ApiResponse<PlanillaEfectivo>>, AppError> {
    let response = EfectivoController::new(state.pool.clone()).update(id, request).await?;
    Ok(Json(response))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    EfectivoController::new(state.pool.clone()).delete(id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Efectivo borrado",
        "data": { "id": id }
    })))
}
