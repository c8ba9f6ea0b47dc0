//! Servicios del sistema

pub mod mail_service;
