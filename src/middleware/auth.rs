//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de usuarios autenticados.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    config::environment::EnvironmentConfig,
    models::usuario::{UserRole, Usuario},
    state::AppState,
    utils::errors::{AppError, AppResult},
};

/// Claims del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // usuario id
    pub rol: String,
    pub usuario: String,
    pub exp: usize,
    pub iat: usize,
}

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub rol: UserRole,
    pub usuario: String,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.rol == UserRole::Admin
    }

    pub fn require_admin(&self) -> AppResult<()> {
        if !self.is_admin() {
            return Err(AppError::Forbidden(
                "Se requieren permisos de administrador".to_string(),
            ));
        }
        Ok(())
    }
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    // Decodificar y validar JWT
    let token_data = decode::<Claims>(
        auth_header,
        &DecodingKey::from_secret(state.config.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

    let claims = token_data.claims;

    let user_id: i64 = claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

    // Verificar que el usuario sigue existiendo y activo
    let row: Option<(i64, String, String, bool)> = sqlx::query_as(
        "SELECT id, usuario, rol, is_active FROM usuario WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(&state.pool)
    .await?;

    let (id, usuario, rol, is_active) =
        row.ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    if !is_active {
        return Err(AppError::Unauthorized(
            "Usuario inactivo o suspendido".to_string(),
        ));
    }

    let rol = UserRole::parse(&rol)
        .ok_or_else(|| AppError::Unauthorized("Rol de usuario inválido".to_string()))?;

    let authenticated_user = AuthenticatedUser { id, rol, usuario };

    // Inyectar usuario autenticado en las extensions
    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

/// Middleware para verificar permisos de admin
pub async fn admin_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    user.require_admin()?;
    Ok(next.run(request).await)
}

/// Generar JWT token para un usuario
pub fn generate_token(usuario: &Usuario, config: &EnvironmentConfig) -> AppResult<String> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.jwt_expiration as i64);

    let claims = Claims {
        sub: usuario.id.to_string(),
        rol: usuario.rol.clone(),
        usuario: usuario.usuario.clone(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Internal(format!("Error generando JWT: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let usuario = Usuario {
            id: 7,
            usuario: "jperez".to_string(),
            nombre: "Juan".to_string(),
            apellido: "Pérez".to_string(),
            contrasena: "$2b$12$hash".to_string(),
            rol: "chofer".to_string(),
            is_active: true,
        };
        let config = EnvironmentConfig::for_tests();

        let token = generate_token(&usuario, &config).unwrap();
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(config.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, "7");
        assert_eq!(decoded.claims.rol, "chofer");
        assert_eq!(decoded.claims.usuario, "jperez");
    }

    #[test]
    fn test_require_admin() {
        let chofer = AuthenticatedUser {
            id: 1,
            rol: UserRole::Chofer,
            usuario: "jperez".to_string(),
        };
        let admin = AuthenticatedUser {
            id: 2,
            rol: UserRole::Admin,
            usuario: "jefa".to_string(),
        };

        assert!(chofer.require_admin().is_err());
        assert!(admin.require_admin().is_ok());
    }
}
