//! Controller de autenticación
//!
//! Login con usuario/contraseña contra la tabla `usuario`; devuelve un JWT.
//! Los mensajes de error no distinguen usuario inexistente de contraseña
//! incorrecta.

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::middleware::auth::generate_token;
use crate::repositories::usuario_repository::UsuarioRepository;
use crate::utils::errors::{AppError, AppResult};

pub struct AuthController {
    repository: UsuarioRepository,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UsuarioRepository::new(pool),
        }
    }

    pub async fn login(
        &self,
        config: &EnvironmentConfig,
        request: LoginRequest,
    ) -> AppResult<LoginResponse> {
        if request.usuario.trim().is_empty() || request.contrasena.is_empty() {
            return Err(AppError::BadRequest("Faltan credenciales".to_string()));
        }

        let usuario = self
            .repository
            .find_active_by_usuario(request.usuario.trim())
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized("Usuario o contraseña inválidos".to_string())
            })?;

        let valid = bcrypt::verify(&request.contrasena, &usuario.contrasena)
            .map_err(|e| AppError::Internal(format!("Error verificando contraseña: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized(
                "Usuario o contraseña inválidos".to_string(),
            ));
        }

        let token = generate_token(&usuario, config)?;

        Ok(LoginResponse { token })
    }
}
