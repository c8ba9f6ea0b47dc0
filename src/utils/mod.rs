//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y el cálculo del día de negocio.

pub mod business_day;
pub mod errors;
pub mod validation;
