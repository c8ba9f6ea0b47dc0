use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::planilla::PlanillaEfectivo;
use crate::utils::errors::{AppError, AppResult};

pub struct EfectivoRepository {
    pool: PgPool,
}

impl EfectivoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> AppResult<Vec<PlanillaEfectivo>> {
        let rows =
            sqlx::query_as::<_, PlanillaEfectivo>("SELECT * FROM planilla_efectivo ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<PlanillaEfectivo>> {
        let row =
            sqlx::query_as::<_, PlanillaEfectivo>("SELECT * FROM planilla_efectivo WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row)
    }

    /// El subtotal se recalcula siempre como denominacion * cantidad
    pub async fn create(
        &self,
        planilla_id: i64,
        denominacion: i64,
        cantidad: i64,
    ) -> AppResult<PlanillaEfectivo> {
        let subtotal = Decimal::from(denominacion) * Decimal::from(cantidad);

        let row = sqlx::query_as::<_, PlanillaEfectivo>(
            r#"
            INSERT INTO planilla_efectivo (planilla_id, denominacion, cantidad, subtotal)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(planilla_id)
        .bind(denominacion)
        .bind(cantidad)
        .bind(subtotal)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(
        &self,
        id: i64,
        denominacion: Option<i64>,
        cantidad: Option<i64>,
    ) -> AppResult<PlanillaEfectivo> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Efectivo no encontrado".to_string()))?;

        let denominacion = denominacion.unwrap_or(current.denominacion);
        let cantidad = cantidad.unwrap_or(current.cantidad);
        let subtotal = Decimal::from(denominacion) * Decimal::from(cantidad);

        let row = sqlx::query_as::<_, PlanillaEfectivo>(
            r#"
            UPDATE planilla_efectivo
            SET denominacion = $2, cantidad = $3, subtotal = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(denominacion)
        .bind(cantidad)
        .bind(subtotal)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM planilla_efectivo WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Efectivo no encontrado".to_string()));
        }

        Ok(())
    }
}
