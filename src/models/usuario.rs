//! Modelo de Usuario
//!
//! Choferes y administradores. La contraseña se guarda hasheada con bcrypt
//! y nunca se serializa hacia la API.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Rol del usuario - guardado como texto en la columna `rol`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Chofer,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Chofer => "chofer",
            UserRole::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "chofer" => Some(UserRole::Chofer),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// Usuario principal - mapea a la tabla `usuario`
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Usuario {
    pub id: i64,
    pub usuario: String,
    pub nombre: String,
    pub apellido: String,
    #[serde(skip_serializing)]
    pub contrasena: String,
    pub rol: String,
    pub is_active: bool,
}

impl Usuario {
    pub fn rol(&self) -> Option<UserRole> {
        UserRole::parse(&self.rol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_parse() {
        assert_eq!(UserRole::parse("chofer"), Some(UserRole::Chofer));
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("root"), None);
        assert_eq!(UserRole::Admin.as_str(), "admin");
    }
}
