//! Middleware del sistema
//!
//! Este módulo contiene el middleware para autenticación, CORS
//! y control de acceso por rol.

pub mod auth;
pub mod cors;
