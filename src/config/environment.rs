//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de
//! configuración. La zona horaria del negocio se valida al arranque:
//! todo el bucketing por día depende de ella.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use std::env;

/// Configuración del mailer (SendGrid API)
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub enabled: bool,
    pub to: Option<String>,
    pub from: Option<String>,
    pub sendgrid_api_key: Option<String>,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub business_time_zone: Tz,
    pub cors_origins: Vec<String>,
    pub mail: MailConfig,
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self> {
        let business_time_zone = env::var("BUSINESS_TIME_ZONE")
            .unwrap_or_else(|_| "America/Argentina/Buenos_Aires".to_string());
        let business_time_zone: Tz = business_time_zone
            .parse()
            .map_err(|_| anyhow::anyhow!("BUSINESS_TIME_ZONE inválida: {}", business_time_zone))?;

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_expiration: env::var("JWT_EXPIRATION")
                .unwrap_or_else(|_| "43200".to_string()) // 12h
                .parse()
                .context("JWT_EXPIRATION must be a valid number")?,
            business_time_zone,
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            mail: MailConfig {
                enabled: env::var("MAIL_ENABLED")
                    .map(|v| v.to_lowercase() != "false")
                    .unwrap_or(true),
                to: env::var("MAIL_TO").ok().filter(|v| !v.trim().is_empty()),
                from: env::var("MAIL_FROM").ok().filter(|v| !v.trim().is_empty()),
                sendgrid_api_key: env::var("SENDGRID_API_KEY")
                    .ok()
                    .filter(|v| !v.trim().is_empty()),
            },
        })
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            environment: "test".to_string(),
            port: 3000,
            host: "127.0.0.1".to_string(),
            jwt_secret: "secreto-de-test".to_string(),
            jwt_expiration: 3600,
            business_time_zone: chrono_tz::America::Argentina::Buenos_Aires,
            cors_origins: vec![],
            mail: MailConfig {
                enabled: false,
                to: None,
                from: None,
                sendgrid_api_key: None,
            },
        }
    }
}
