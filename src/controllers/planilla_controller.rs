//! Controller de planillas
//!
//! Todo el flujo valida primero, persiste después: el cálculo del día de
//! negocio decide bajo qué instante se archiva la planilla y qué rango
//! consultan los agregados del dashboard.
//!
//! Política de unicidad: una planilla por chofer por día de negocio; un
//! segundo envío para el mismo día se rechaza con 409.

use chrono::Utc;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::planilla_dto::{
    CreatePlanillaRequest, PlanillaDetalleResponse, PorChoferFechaQuery, SubmitPlanillaRequest,
    SubmitPlanillaResponse, TotalDiaQuery, UpdatePlanillaRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::planilla::{Planilla, PlanillaStatus};
use crate::repositories::planilla_repository::PlanillaRepository;
use crate::services::mail_service::PlanillaEmailPayload;
use crate::utils::business_day::{day_range, format_local_date, submission_instant};
use crate::utils::errors::{AppError, AppResult};

pub struct PlanillaController {
    repository: PlanillaRepository,
    tz: Tz,
}

impl PlanillaController {
    pub fn new(pool: PgPool, tz: Tz) -> Self {
        Self {
            repository: PlanillaRepository::new(pool),
            tz,
        }
    }

    /// Envío de la planilla del chofer autenticado.
    ///
    /// Devuelve la respuesta y el payload de notificación; el despacho del
    /// email queda a cargo del caller, fuera del camino de la respuesta.
    pub async fn submit(
        &self,
        user: &AuthenticatedUser,
        request: SubmitPlanillaRequest,
    ) -> AppResult<(ApiResponse<SubmitPlanillaResponse>, PlanillaEmailPayload)> {
        let cmd = request.into_command()?;

        let now = Utc::now();
        let fecha_iso = cmd
            .fecha
            .clone()
            .unwrap_or_else(|| format_local_date(now, self.tz));

        let range = day_range(&fecha_iso, self.tz)?;

        if self
            .repository
            .exists_for_chofer_in_range(user.id, range.start, range.end)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Ya existe una planilla para el día {}",
                fecha_iso
            )));
        }

        let fecha_hora_planilla = submission_instant(&fecha_iso, now, self.tz)?;

        let planilla = self
            .repository
            .create_submission(user.id, fecha_hora_planilla, &cmd)
            .await?;

        let payload = PlanillaEmailPayload {
            planilla_id: planilla.id,
            fecha_iso,
            numero_coche: cmd.numero_coche.clone(),
            chofer_label: user.usuario.clone(),
            total_recorrido: cmd.total_recorrido,
            total_efectivo: cmd.total_efectivo,
            diferencia: cmd.diferencia,
            comentarios: cmd.comentarios.clone(),
        };

        let response = ApiResponse::success_with_message(
            SubmitPlanillaResponse {
                id: planilla.id,
                total_recorrido: cmd.total_recorrido,
                total_efectivo: cmd.total_efectivo,
                diferencia: cmd.diferencia,
            },
            "Planilla enviada".to_string(),
        );

        Ok((response, payload))
    }

    /// Planillas de un chofer en una fecha, con hijos poblados
    pub async fn find_by_chofer_fecha(
        &self,
        query: PorChoferFechaQuery,
    ) -> AppResult<Vec<PlanillaDetalleResponse>> {
        let range = day_range(&query.fecha, self.tz)?;

        let planillas = self
            .repository
            .find_by_chofer_in_range(query.chofer_id, range.start, range.end)
            .await?;

        let mut detalles = Vec::with_capacity(planillas.len());
        for planilla in planillas {
            let recorridos = self.repository.recorridos_of(planilla.id).await?;
            let efectivos = self.repository.efectivos_of(planilla.id).await?;
            detalles.push(PlanillaDetalleResponse {
                planilla,
                recorridos,
                efectivos,
            });
        }

        Ok(detalles)
    }

    /// Total recaudado del día de negocio, opcionalmente de un solo chofer
    pub async fn total_dia(&self, query: TotalDiaQuery) -> AppResult<Decimal> {
        let range = day_range(&query.fecha, self.tz)?;
        self.repository
            .total_in_range(range.start, range.end, query.chofer_id)
            .await
    }

    /// Un admin ve todas las planillas; un chofer solo las propias
    pub async fn find_all(&self, user: &AuthenticatedUser) -> AppResult<Vec<Planilla>> {
        if user.is_admin() {
            self.repository.find_all().await
        } else {
            self.repository.find_by_chofer(user.id).await
        }
    }

    pub async fn find_one(
        &self,
        user: &AuthenticatedUser,
        id: i64,
    ) -> AppResult<PlanillaDetalleResponse> {
        let planilla = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Planilla no encontrada".to_string()))?;

        if !user.is_admin() && planilla.chofer_id != user.id {
            return Err(AppError::NotFound("Planilla no encontrada".to_string()));
        }

        let recorridos = self.repository.recorridos_of(planilla.id).await?;
        let efectivos = self.repository.efectivos_of(planilla.id).await?;

        Ok(PlanillaDetalleResponse {
            planilla,
            recorridos,
            efectivos,
        })
    }

    /// Alta administrativa sin hijos
    pub async fn add(&self, request: CreatePlanillaRequest) -> AppResult<ApiResponse<Planilla>> {
        request.validate()?;

        let fecha_hora_planilla = submission_instant(&request.fecha, Utc::now(), self.tz)?;

        let planilla = self
            .repository
            .create_raw(
                request.chofer_id,
                request.numero_coche.trim(),
                fecha_hora_planilla,
                request.total_recorrido,
                request.total_efectivo,
                request.comentarios.as_deref(),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            planilla,
            "Planilla creada".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdatePlanillaRequest,
    ) -> AppResult<ApiResponse<Planilla>> {
        request.validate()?;

        // Se valida el valor del status pero no la transición
        let status = match &request.status {
            Some(s) => Some(
                PlanillaStatus::parse(s)
                    .ok_or_else(|| AppError::BadRequest("Status inválido".to_string()))?
                    .as_str()
                    .to_string(),
            ),
            None => None,
        };

        let planilla = self
            .repository
            .update(id, request.numero_coche, status, request.comentarios)
            .await?;

        Ok(ApiResponse::success_with_message(
            planilla,
            "Planilla actualizada".to_string(),
        ))
    }

    pub async fn remove(&self, id: i64) -> AppResult<()> {
        self.repository.delete_with_children(id).await
    }
}
