//! Rutas de recorridos - CRUD de back-office, solo admin

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::controllers::recorrido_controller::{
    CreateRecorridoRequest, RecorridoController, UpdateRecorridoRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{admin_only_middleware, auth_middleware};
use crate::models::planilla::Recorrido;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_recorrido_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(add))
        .route("/:id", get(find_one).put(update).patch(update).delete(remove))
        .route_layer(middleware::from_fn(admin_only_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn find_all(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Recorrido>>>, AppError> {
    let recorridos = RecorridoController::new(state.pool.clone()).find_all().await?;
    Ok(Json(ApiResponse::success(recorridos)))
}

async fn find_one(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Recorrido>>, AppError> {
    let recorrido = RecorridoController::new(state.pool.clone()).find_one(id).await?;
    Ok(Json(ApiResponse::success(recorrido)))
}

async fn add(
    State(state): State<AppState>,
    Json(request): Json<CreateRecorridoRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Recorrido>>), AppError> {
    let response = RecorridoController::new(state.pool.clone()).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRecorridoRequest>,
) -> Result<Json<ApiResponse<Recorrido>>, AppError> {
    let response = RecorridoController::new(state.pool.clone()).update(id, request).await?;
    Ok(Json(response))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    RecorridoController::new(state.pool.clone()).delete(id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Recorrido borrado",
        "data": { "id": id }
    })))
}
