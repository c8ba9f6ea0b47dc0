use serde::{Deserialize, Serialize};

/// Request de login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub usuario: String,
    #[serde(rename = "contraseña", alias = "contrasena")]
    pub contrasena: String,
}

/// Response de login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}
