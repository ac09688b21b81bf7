use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use vehicle_maintenance::config::{DatabaseConfig, EnvironmentConfig};
use vehicle_maintenance::database::DatabaseConnection;
use vehicle_maintenance::repositories::PgMaintenanceStore;
use vehicle_maintenance::routes::create_router;
use vehicle_maintenance::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🔧 Vehicle Maintenance API ({})", config.environment);
    info!("================================================");

    // Inicializar base de datos
    let db_config = DatabaseConfig::from_env()?;
    let db_connection = match DatabaseConnection::new(&db_config).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    info!(
        "🔒 Transacciones con aislamiento {}",
        db_config.isolation_level.to_sql()
    );

    let store = Arc::new(PgMaintenanceStore::new(
        db_connection.pool().clone(),
        db_config.isolation_level,
    ));
    let app_state = AppState::new(store, config.clone());
    let app = create_router(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health");
    info!("   POST   /api/maintenances - Crear mantenimiento");
    info!("   GET    /api/maintenances?vehicle_id= - Listar por vehículo");
    info!("   GET    /api/maintenances/:id - Obtener mantenimiento");
    info!("   PATCH  /api/maintenances/:id - Actualizar mantenimiento");
    info!("   DELETE /api/maintenances/:id - Eliminar mantenimiento");
    info!("   POST   /api/history - Registrar servicio realizado");
    info!("   GET    /api/history/list/:maintenance_id - Listar historial");
    info!("   GET    /api/history/details/:history_id - Detalle de historial");
    info!("   PATCH  /api/history/:history_id - Corregir historial");
    info!("   DELETE /api/history/:history_id - Eliminar historial");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
