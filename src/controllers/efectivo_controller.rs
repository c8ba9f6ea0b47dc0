use serde::Deserialize;
use sqlx::PgPool;

use crate::dto::ApiResponse;
use crate::models::planilla::PlanillaEfectivo;
use crate::repositories::efectivo_repository::EfectivoRepository;
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct CreateEfectivoRequest {
    pub planilla_id: i64,
    pub denominacion: i64,
    pub cantidad: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEfectivoRequest {
    pub denominacion: Option<i64>,
    pub cantidad: Option<i64>,
}

pub struct EfectivoController {
    repository: EfectivoRepository,
}

impl EfectivoController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: EfectivoRepository::new(pool),
        }
    }

    pub async fn find_all(&self) -> AppResult<Vec<PlanillaEfectivo>> {
        self.repository.find_all().await
    }

    pub async fn find_one(&self, id: i64) -> AppResult<PlanillaEfectivo> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Efectivo no encontrado".to_string()))
    }

    pub async fn create(
        &self,
        request: CreateEfectivoRequest,
    ) -> AppResult<ApiResponse<PlanillaEfectivo>> {
        if request.denominacion <= 0 || request.cantidad <= 0 {
            return Err(AppError::BadRequest(
                "Denominación y cantidad deben ser positivas".to_string(),
            ));
        }

        let efectivo = self
            .repository
            .create(request.planilla_id, request.denominacion, request.cantidad)
            .await?;

        Ok(ApiResponse::success_with_message(
            efectivo,
            "Efectivo creado".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateEfectivoRequest,
    ) -> AppResult<ApiResponse<PlanillaEfectivo>> {
        if request.denominacion.is_some_and(|d| d <= 0)
            || request.cantidad.is_some_and(|c| c <= 0)
        {
            return Err(AppError::BadRequest(
                "Denominación y cantidad deben ser positivas".to_string(),
            ));
        }

        let efectivo = self
            .repository
            .update(id, request.denominacion, request.cantidad)
            .await?;

        Ok(ApiResponse::success_with_message(
            efectivo,
            "Efectivo actualizado".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.delete(id).await
    }
}
