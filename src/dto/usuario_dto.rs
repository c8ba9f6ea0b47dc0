use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usuario::Usuario;

/// Request para crear un usuario
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUsuarioRequest {
    #[validate(length(min = 3, max = 50))]
    pub usuario: String,

    #[validate(length(min = 1, max = 100))]
    pub nombre: String,

    #[validate(length(min = 1, max = 100))]
    pub apellido: String,

    #[serde(rename = "contraseña", alias = "contrasena")]
    #[validate(length(min = 6, max = 100))]
    pub contrasena: String,

    /// "chofer" o "admin"; por defecto chofer
    pub rol: Option<String>,
}

/// Request para actualizar un usuario existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUsuarioRequest {
    #[validate(length(min = 3, max = 50))]
    pub usuario: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub nombre: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub apellido: Option<String>,

    #[serde(rename = "contraseña", alias = "contrasena")]
    #[validate(length(min = 6, max = 100))]
    pub contrasena: Option<String>,

    pub rol: Option<String>,
    pub is_active: Option<bool>,
}

/// Response de usuario (sin contraseña)
#[derive(Debug, Serialize)]
pub struct UsuarioResponse {
    pub id: i64,
    pub usuario: String,
    pub nombre: String,
    pub apellido: String,
    pub rol: String,
    pub is_active: bool,
}

/// Response mínima de chofer para selectores del dashboard
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ChoferResponse {
    pub id: i64,
    pub usuario: String,
    pub nombre: String,
    pub apellido: String,
    pub rol: String,
}

impl From<Usuario> for UsuarioResponse {
    fn from(u: Usuario) -> Self {
        Self {
            id: u.id,
            usuario: u.usuario,
            nombre: u.nombre,
            apellido: u.apellido,
            rol: u.rol,
            is_active: u.is_active,
        }
    }
}
