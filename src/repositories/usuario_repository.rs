use sqlx::PgPool;

use crate::dto::usuario_dto::ChoferResponse;
use crate::models::usuario::Usuario;
use crate::utils::errors::{AppError, AppResult};

pub struct UsuarioRepository {
    pool: PgPool,
}

impl UsuarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Buscar un usuario activo por su nombre de login (para el login)
    pub async fn find_active_by_usuario(&self, usuario: &str) -> AppResult<Option<Usuario>> {
        let row = sqlx::query_as::<_, Usuario>(
            "SELECT * FROM usuario WHERE usuario = $1 AND is_active = TRUE",
        )
        .bind(usuario)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Usuario>> {
        let row = sqlx::query_as::<_, Usuario>("SELECT * FROM usuario WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Usuario>> {
        let rows = sqlx::query_as::<_, Usuario>("SELECT * FROM usuario ORDER BY nombre ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Solo choferes (no admin) y campos mínimos para selectores
    pub async fn list_choferes(&self) -> AppResult<Vec<ChoferResponse>> {
        let rows = sqlx::query_as::<_, ChoferResponse>(
            r#"
            SELECT id, usuario, nombre, apellido, rol
            FROM usuario
            WHERE rol <> 'admin'
            ORDER BY nombre ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn usuario_exists(&self, usuario: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM usuario WHERE usuario = $1)")
                .bind(usuario)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn create(
        &self,
        usuario: String,
        nombre: String,
        apellido: String,
        contrasena_hash: String,
        rol: String,
    ) -> AppResult<Usuario> {
        let row = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuario (usuario, nombre, apellido, contrasena, rol, is_active)
            VALUES ($1, $2, $3, $4, $5, TRUE)
            RETURNING *
            "#,
        )
        .bind(usuario)
        .bind(nombre)
        .bind(apellido)
        .bind(contrasena_hash)
        .bind(rol)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(
        &self,
        id: i64,
        usuario: Option<String>,
        nombre: Option<String>,
        apellido: Option<String>,
        contrasena_hash: Option<String>,
        rol: Option<String>,
        is_active: Option<bool>,
    ) -> AppResult<Usuario> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        let row = sqlx::query_as::<_, Usuario>(
            r#"
            UPDATE usuario
            SET usuario = $2, nombre = $3, apellido = $4, contrasena = $5, rol = $6, is_active = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(usuario.unwrap_or(current.usuario))
        .bind(nombre.unwrap_or(current.nombre))
        .bind(apellido.unwrap_or(current.apellido))
        .bind(contrasena_hash.unwrap_or(current.contrasena))
        .bind(rol.unwrap_or(current.rol))
        .bind(is_active.unwrap_or(current.is_active))
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM usuario WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Usuario no encontrado".to_string()));
        }

        Ok(())
    }
}
