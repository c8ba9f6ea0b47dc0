use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;
use validator::Validate;

use crate::dto::usuario_dto::{
    ChoferResponse, CreateUsuarioRequest, UpdateUsuarioRequest, UsuarioResponse,
};
use crate::dto::ApiResponse;
use crate::models::usuario::UserRole;
use crate::repositories::usuario_repository::UsuarioRepository;
use crate::utils::errors::{AppError, AppResult};

pub struct UsuarioController {
    repository: UsuarioRepository,
}

impl UsuarioController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UsuarioRepository::new(pool),
        }
    }

    pub async fn list_choferes(&self) -> AppResult<Vec<ChoferResponse>> {
        self.repository.list_choferes().await
    }

    pub async fn find_all(&self) -> AppResult<Vec<UsuarioResponse>> {
        let usuarios = self.repository.find_all().await?;
        Ok(usuarios.into_iter().map(UsuarioResponse::from).collect())
    }

    pub async fn find_one(&self, id: i64) -> AppResult<UsuarioResponse> {
        let usuario = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(UsuarioResponse::from(usuario))
    }

    pub async fn create(
        &self,
        request: CreateUsuarioRequest,
    ) -> AppResult<ApiResponse<UsuarioResponse>> {
        request.validate()?;

        let rol = match &request.rol {
            Some(r) => UserRole::parse(r)
                .ok_or_else(|| AppError::BadRequest("Rol inválido".to_string()))?,
            None => UserRole::Chofer,
        };

        if self.repository.usuario_exists(request.usuario.trim()).await? {
            return Err(AppError::Conflict("El usuario ya existe".to_string()));
        }

        let contrasena_hash = hash(&request.contrasena, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error hasheando contraseña: {}", e)))?;

        let usuario = self
            .repository
            .create(
                request.usuario.trim().to_string(),
                request.nombre.trim().to_string(),
                request.apellido.trim().to_string(),
                contrasena_hash,
                rol.as_str().to_string(),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            UsuarioResponse::from(usuario),
            "Usuario creado".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateUsuarioRequest,
    ) -> AppResult<ApiResponse<UsuarioResponse>> {
        request.validate()?;

        let rol = match &request.rol {
            Some(r) => Some(
                UserRole::parse(r)
                    .ok_or_else(|| AppError::BadRequest("Rol inválido".to_string()))?
                    .as_str()
                    .to_string(),
            ),
            None => None,
        };

        let contrasena_hash = match &request.contrasena {
            Some(c) => Some(
                hash(c, DEFAULT_COST)
                    .map_err(|e| AppError::Internal(format!("Error hasheando contraseña: {}", e)))?,
            ),
            None => None,
        };

        let usuario = self
            .repository
            .update(
                id,
                request.usuario,
                request.nombre,
                request.apellido,
                contrasena_hash,
                rol,
                request.is_active,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            UsuarioResponse::from(usuario),
            "Usuario actualizado".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.delete(id).await
    }
}
