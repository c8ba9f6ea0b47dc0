//! Repositorio de planillas
//!
//! La creación con hijos y el borrado del subárbol son transaccionales:
//! o entran todas las filas (planilla + recorridos + efectivo) o ninguna.
//! El borrado elimina hijos antes que padre porque no se asume cascada a
//! nivel de storage.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::dto::planilla_dto::PlanillaCommand;
use crate::models::planilla::{Planilla, PlanillaEfectivo, PlanillaStatus, Recorrido};
use crate::utils::errors::{AppError, AppResult};

pub struct PlanillaRepository {
    pool: PgPool,
}

impl PlanillaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear la planilla del chofer junto con todos sus hijos, atómicamente
    pub async fn create_submission(
        &self,
        chofer_id: i64,
        fecha_hora_planilla: DateTime<Utc>,
        cmd: &PlanillaCommand,
    ) -> AppResult<Planilla> {
        let mut tx = self.pool.begin().await?;

        let planilla = sqlx::query_as::<_, Planilla>(
            r#"
            INSERT INTO planilla
                (chofer_id, numero_coche, fecha_hora_planilla,
                 total_recorrido, total_efectivo, diferencia, comentarios, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(chofer_id)
        .bind(&cmd.numero_coche)
        .bind(fecha_hora_planilla)
        .bind(cmd.total_recorrido)
        .bind(cmd.total_efectivo)
        .bind(cmd.diferencia)
        .bind(&cmd.comentarios)
        .bind(PlanillaStatus::Enviado.as_str())
        .fetch_one(&mut *tx)
        .await?;

        for r in &cmd.recorridos {
            sqlx::query(
                r#"
                INSERT INTO recorridos (planilla_id, horario, numero_recorrido, importe)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(planilla.id)
            .bind(&r.horario)
            .bind(&r.numero_recorrido)
            .bind(r.importe)
            .execute(&mut *tx)
            .await?;
        }

        for e in &cmd.efectivos {
            sqlx::query(
                r#"
                INSERT INTO planilla_efectivo (planilla_id, denominacion, cantidad, subtotal)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(planilla.id)
            .bind(e.denominacion)
            .bind(e.cantidad)
            .bind(e.subtotal)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(planilla)
    }

    /// Alta administrativa sin hijos; la diferencia se recalcula siempre
    pub async fn create_raw(
        &self,
        chofer_id: i64,
        numero_coche: &str,
        fecha_hora_planilla: DateTime<Utc>,
        total_recorrido: Decimal,
        total_efectivo: Decimal,
        comentarios: Option<&str>,
    ) -> AppResult<Planilla> {
        let planilla = sqlx::query_as::<_, Planilla>(
            r#"
            INSERT INTO planilla
                (chofer_id, numero_coche, fecha_hora_planilla,
                 total_recorrido, total_efectivo, diferencia, comentarios, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(chofer_id)
        .bind(numero_coche)
        .bind(fecha_hora_planilla)
        .bind(total_recorrido)
        .bind(total_efectivo)
        .bind(total_recorrido - total_efectivo)
        .bind(comentarios)
        .bind(PlanillaStatus::Enviado.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(planilla)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Planilla>> {
        let row = sqlx::query_as::<_, Planilla>("SELECT * FROM planilla WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Planilla>> {
        let rows = sqlx::query_as::<_, Planilla>(
            "SELECT * FROM planilla ORDER BY fecha_hora_planilla DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_by_chofer(&self, chofer_id: i64) -> AppResult<Vec<Planilla>> {
        let rows = sqlx::query_as::<_, Planilla>(
            "SELECT * FROM planilla WHERE chofer_id = $1 ORDER BY fecha_hora_planilla DESC",
        )
        .bind(chofer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Planillas de un chofer dentro de un rango half-open `[start, end)`
    pub async fn find_by_chofer_in_range(
        &self,
        chofer_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Planilla>> {
        let rows = sqlx::query_as::<_, Planilla>(
            r#"
            SELECT * FROM planilla
            WHERE chofer_id = $1
              AND fecha_hora_planilla >= $2
              AND fecha_hora_planilla < $3
            ORDER BY fecha_hora_planilla DESC
            "#,
        )
        .bind(chofer_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// ¿Ya existe una planilla del chofer en ese día de negocio?
    pub async fn exists_for_chofer_in_range(
        &self,
        chofer_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM planilla
                WHERE chofer_id = $1
                  AND fecha_hora_planilla >= $2
                  AND fecha_hora_planilla < $3
            )
            "#,
        )
        .bind(chofer_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Total recaudado del día: un solo agregado SQL con predicado half-open,
    /// sin conversión de zona horaria por fila
    pub async fn total_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        chofer_id: Option<i64>,
    ) -> AppResult<Decimal> {
        let total: Decimal = match chofer_id {
            Some(chofer) => {
                sqlx::query_scalar(
                    r#"
                    SELECT COALESCE(SUM(total_recorrido), 0)
                    FROM planilla
                    WHERE fecha_hora_planilla >= $1
                      AND fecha_hora_planilla < $2
                      AND chofer_id = $3
                    "#,
                )
                .bind(start)
                .bind(end)
                .bind(chofer)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar(
                    r#"
                    SELECT COALESCE(SUM(total_recorrido), 0)
                    FROM planilla
                    WHERE fecha_hora_planilla >= $1
                      AND fecha_hora_planilla < $2
                    "#,
                )
                .bind(start)
                .bind(end)
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(total)
    }

    pub async fn recorridos_of(&self, planilla_id: i64) -> AppResult<Vec<Recorrido>> {
        let rows = sqlx::query_as::<_, Recorrido>(
            "SELECT * FROM recorridos WHERE planilla_id = $1 ORDER BY id ASC",
        )
        .bind(planilla_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn efectivos_of(&self, planilla_id: i64) -> AppResult<Vec<PlanillaEfectivo>> {
        let rows = sqlx::query_as::<_, PlanillaEfectivo>(
            "SELECT * FROM planilla_efectivo WHERE planilla_id = $1 ORDER BY denominacion DESC",
        )
        .bind(planilla_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update(
        &self,
        id: i64,
        numero_coche: Option<String>,
        status: Option<String>,
        comentarios: Option<String>,
    ) -> AppResult<Planilla> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Planilla no encontrada".to_string()))?;

        let row = sqlx::query_as::<_, Planilla>(
            r#"
            UPDATE planilla
            SET numero_coche = $2, status = $3, comentarios = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(numero_coche.unwrap_or(current.numero_coche))
        .bind(status.unwrap_or(current.status))
        .bind(comentarios.or(current.comentarios))
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Borrar la planilla y su subárbol completo, hijos antes que padre
    pub async fn delete_with_children(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM recorridos WHERE planilla_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM planilla_efectivo WHERE planilla_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM planilla WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound("Planilla no encontrada".to_string()));
        }

        tx.commit().await?;

        Ok(())
    }
}
