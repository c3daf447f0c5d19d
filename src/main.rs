use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use vehicle_reservations::config::EnvironmentConfig;
use vehicle_reservations::database::create_pool;
use vehicle_reservations::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenvy::dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Vehicle Reservation API");
    info!("==========================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let state = AppState::new(pool, config);
    let app = create_router(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("🔐 Autenticación:");
    info!("   POST   /auth/register - Registrar usuario");
    info!("   POST   /auth/login - Login (cookie de sesión)");
    info!("   GET    /auth/me - Usuario actual");
    info!("   POST   /auth/logout - Cerrar sesión");
    info!("👤 Usuarios:");
    info!("   PATCH  /users - Actualizar perfil");
    info!("   DELETE /users - Dar de baja la cuenta");
    info!("🚙 Vehículos:");
    info!("   POST   /vehicles - Crear vehículo");
    info!("   GET    /vehicles - Listar vehículos (con disponibilidad)");
    info!("   PATCH  /vehicles/:id - Actualizar vehículo");
    info!("   DELETE /vehicles/:id - Eliminar vehículo (borrado lógico)");
    info!("📝 Reservas:");
    info!("   POST   /reservations - Crear reserva");
    info!("   GET    /reservations - Listar reservas del usuario");
    info!("   PATCH  /reservations/:id - Actualizar fecha de fin");
    info!("   PATCH  /reservations/:id/cancel - Cancelar reserva");
    info!("   PATCH  /reservations/:id/complete - Finalizar reserva");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
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
