//! Rutas de planillas
//!
//! `/submit` es del chofer autenticado; las rutas de dashboard y las
//! administrativas exigen rol admin dentro del handler.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use tracing::warn;

use crate::controllers::planilla_controller::PlanillaController;
use crate::dto::planilla_dto::{
    CreatePlanillaRequest, PlanillaDetalleResponse, PorChoferFechaQuery, SubmitPlanillaRequest,
    SubmitPlanillaResponse, TotalDiaQuery, UpdatePlanillaRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::models::planilla::Planilla;
use crate::repositories::usuario_repository::UsuarioRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_planilla_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/por-chofer-fecha", get(por_chofer_fecha))
        .route("/total-dia", get(total_dia))
        .route("/submit", post(submit))
        .route("/", get(find_all).post(add))
        .route("/:id", get(find_one).put(update).patch(update).delete(remove))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn controller(state: &AppState) -> PlanillaController {
    PlanillaController::new(state.pool.clone(), state.config.business_time_zone)
}

/// Envío de la planilla del día del chofer autenticado.
///
/// El email al jefe se despacha después de armar la respuesta y su
/// resultado no afecta el status devuelto.
async fn submit(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<SubmitPlanillaRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SubmitPlanillaResponse>>), AppError> {
    let (response, mut payload) = controller(&state).submit(&user, request).await?;

    let chofer_id = user.id;
    let pool = state.pool.clone();
    let mailer = state.mailer.clone();
    tokio::spawn(async move {
        let repo = UsuarioRepository::new(pool);
        if let Ok(Some(chofer)) = repo.find_by_id(chofer_id).await {
            let nombre = format!("{} {}", chofer.nombre, chofer.apellido)
                .trim()
                .to_string();
            if !nombre.is_empty() {
                payload.chofer_label = nombre;
            }
        }
        if let Err(e) = mailer.send_planilla_submitted(&payload).await {
            warn!(
                "Error enviando email de planilla {}: {}",
                payload.planilla_id, e
            );
        }
    });

    Ok((StatusCode::CREATED, Json(response)))
}

async fn por_chofer_fecha(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<PorChoferFechaQuery>,
) -> Result<Json<ApiResponse<Vec<PlanillaDetalleResponse>>>, AppError> {
    user.require_admin()?;
    let detalles = controller(&state).find_by_chofer_fecha(query).await?;
    Ok(Json(ApiResponse::success(detalles)))
}

async fn total_dia(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<TotalDiaQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    user.require_admin()?;
    let total = controller(&state).total_dia(query).await?;
    Ok(Json(json!({ "data": { "total": total } })))
}

async fn find_all(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<Planilla>>>, AppError> {
    let planillas = controller(&state).find_all(&user).await?;
    Ok(Json(ApiResponse::success(planillas)))
}

async fn find_one(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PlanillaDetalleResponse>>, AppError> {
    let detalle = controller(&state).find_one(&user, id).await?;
    Ok(Json(ApiResponse::success(detalle)))
}

async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreatePlanillaRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Planilla>>), AppError> {
    user.require_admin()?;
    let response = controller(&state).add(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePlanillaRequest>,
) -> Result<Json<ApiResponse<Planilla>>, AppError> {
    user.require_admin()?;
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    user.require_admin()?;
    controller(&state).remove(id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Planilla borrada",
        "data": { "id": id }
    })))
}
