//! Rutas de usuarios - todas requieren rol admin

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::controllers::usuario_controller::UsuarioController;
use crate::dto::usuario_dto::{
    ChoferResponse, CreateUsuarioRequest, UpdateUsuarioRequest, UsuarioResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{admin_only_middleware, auth_middleware};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_usuario_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/choferes", get(list_choferes))
        .route("/", get(find_all).post(add))
        .route("/:id", get(find_one).put(update).patch(update).delete(remove))
        .route_layer(middleware::from_fn(admin_only_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn list_choferes(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ChoferResponse>>>, AppError> {
    let choferes = UsuarioController::new(state.pool.clone()).list_choferes().await?;
    Ok(Json(ApiResponse::success(choferes)))
}

async fn find_all(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UsuarioResponse>>>, AppError> {
    let usuarios = UsuarioController::new(state.pool.clone()).find_all().await?;
    Ok(Json(ApiResponse::success(usuarios)))
}

async fn find_one(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UsuarioResponse>>, AppError> {
    let usuario = UsuarioController::new(state.pool.clone()).find_one(id).await?;
    Ok(Json(ApiResponse::success(usuario)))
}

async fn add(
    State(state): State<AppState>,
    Json(request): Json<CreateUsuarioRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UsuarioResponse>>), AppError> {
    let response = UsuarioController::new(state.pool.clone()).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUsuarioRequest>,
) -> Result<Json<ApiResponse<UsuarioResponse>>, AppError> {
    let response = UsuarioController::new(state.pool.clone()).update(id, request).await?;
    Ok(Json(response))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    UsuarioController::new(state.pool.clone()).delete(id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Usuario borrado",
        "data": { "id": id }
    })))
}
