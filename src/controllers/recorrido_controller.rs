use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::ApiResponse;
use crate::models::planilla::Recorrido;
use crate::repositories::recorrido_repository::RecorridoRepository;
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecorridoRequest {
    pub planilla_id: i64,
    pub horario: Option<String>,
    pub numero_recorrido: Option<String>,
    pub importe: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRecorridoRequest {
    pub horario: Option<String>,
    pub numero_recorrido: Option<String>,
    pub importe: Option<Decimal>,
}

pub struct RecorridoController {
    repository: RecorridoRepository,
}

impl RecorridoController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RecorridoRepository::new(pool),
        }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Recorrido>> {
        self.repository.find_all().await
    }

    pub async fn find_one(&self, id: i64) -> AppResult<Recorrido> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Recorrido no encontrado".to_string()))
    }

    pub async fn create(
        &self,
        request: CreateRecorridoRequest,
    ) -> AppResult<ApiResponse<Recorrido>> {
        if request.importe <= Decimal::ZERO {
            return Err(AppError::BadRequest(
                "El importe debe ser positivo".to_string(),
            ));
        }

        let recorrido = self
            .repository
            .create(
                request.planilla_id,
                request.horario,
                request.numero_recorrido,
                request.importe,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            recorrido,
            "Recorrido creado".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateRecorridoRequest,
    ) -> AppResult<ApiResponse<Recorrido>> {
        if let Some(importe) = request.importe {
            if importe <= Decimal::ZERO {
                return Err(AppError::BadRequest(
                    "El importe debe ser positivo".to_string(),
                ));
            }
        }

        let recorrido = self
            .repository
            .update(id, request.horario, request.numero_recorrido, request.importe)
            .await?;

        Ok(ApiResponse::success_with_message(
            recorrido,
            "Recorrido actualizado".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.delete(id).await
    }
}
