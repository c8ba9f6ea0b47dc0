//! Configuración de conexión a PostgreSQL
//!
//! El tamaño máximo del pool es el único control de admisión del sistema:
//! una request lenta bloquea solo su conexión.

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Crear un pool de conexiones a la base de datos
pub async fn create_pool(database_url: Option<&str>) -> Result<PgPool> {
    let database_url = match database_url {
        Some(url) => url.to_string(),
        None => std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
    };

    let max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
        .unwrap_or_else(|_| "5".to_string())
        .parse()
        .context("DATABASE_MAX_CONNECTIONS must be a valid number")?;

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .context("Error conectando a PostgreSQL")?;

    Ok(pool)
}
