use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::planilla::Recorrido;
use crate::utils::errors::{AppError, AppResult};

pub struct RecorridoRepository {
    pool: PgPool,
}

impl RecorridoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Recorrido>> {
        let rows = sqlx::query_as::<_, Recorrido>("SELECT * FROM recorridos ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Recorrido>> {
        let row = sqlx::query_as::<_, Recorrido>("SELECT * FROM recorridos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn create(
        &self,
        planilla_id: i64,
        horario: Option<String>,
        numero_recorrido: Option<String>,
        importe: Decimal,
    ) -> AppResult<Recorrido> {
        let row = sqlx::query_as::<_, Recorrido>(
            r#"
            INSERT INTO recorridos (planilla_id, horario, numero_recorrido, importe)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(planilla_id)
        .bind(horario)
        .bind(numero_recorrido)
        .bind(importe)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(
        &self,
        id: i64,
        horario: Option<String>,
        numero_recorrido: Option<String>,
        importe: Option<Decimal>,
    ) -> AppResult<Recorrido> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Recorrido no encontrado".to_string()))?;

        let row = sqlx::query_as::<_, Recorrido>(
            r#"
            UPDATE recorridos
            SET horario = $2, numero_recorrido = $3, importe = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(horario.or(current.horario))
        .bind(numero_recorrido.or(current.numero_recorrido))
        .bind(importe.unwrap_or(current.importe))
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM recorridos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Recorrido no encontrado".to_string()));
        }

        Ok(())
    }
}
