mod config;
mod controllers;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::database::create_pool;
use config::environment::EnvironmentConfig;
use middleware::cors::cors_middleware_with_origins;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("📋 Planilla Backend - Rendición diaria de choferes");
    info!("==================================================");

    let config = EnvironmentConfig::from_env()?;
    info!("🕐 Zona horaria del negocio: {}", config.business_time_zone);

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(e);
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(pool, config);

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/auth", routes::auth_routes::create_auth_router())
        .nest(
            "/usuarios",
            routes::usuario_routes::create_usuario_router(app_state.clone()),
        )
        .nest(
            "/planillas",
            routes::planilla_routes::create_planilla_router(app_state.clone()),
        )
        .nest(
            "/recorridos",
            routes::recorrido_routes::create_recorrido_router(app_state.clone()),
        )
        .nest(
            "/planilla-efectivo",
            routes::efectivo_routes::create_efectivo_router(app_state.clone()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware_with_origins(&app_state.config.cors_origins))
        .with_state(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /auth/login - Login (chofer o admin)");
    info!("📋 Planillas:");
    info!("   POST /planillas/submit - Enviar planilla del día (chofer)");
    info!("   GET  /planillas/por-chofer-fecha - Detalle por chofer y fecha (admin)");
    info!("   GET  /planillas/total-dia - Total recaudado del día (admin)");
    info!("   GET  /planillas - Listar planillas");
    info!("   GET  /planillas/:id - Obtener planilla con detalle");
    info!("   POST /planillas - Alta manual (admin)");
    info!("   PUT  /planillas/:id - Actualizar planilla (admin)");
    info!("   DELETE /planillas/:id - Eliminar planilla con detalle (admin)");
    info!("👤 Usuarios (admin):");
    info!("   GET  /usuarios/choferes - Listar choferes");
    info!("   GET  /usuarios - Listar usuarios");
    info!("   POST /usuarios - Crear usuario");
    info!("   PUT  /usuarios/:id - Actualizar usuario");
    info!("   DELETE /usuarios/:id - Eliminar usuario");
    info!("🚌 Recorridos y efectivo (admin):");
    info!("   CRUD /recorridos y /planilla-efectivo");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "planilla-backend",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
