use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use flight_history_explorer::config::{DatabaseConfig, EnvironmentConfig};
use flight_history_explorer::database::DatabaseConnection;
use flight_history_explorer::repositories::{MariaDbRouteRepository, RouteStore};
use flight_history_explorer::routes::create_app;
use flight_history_explorer::state::{AppState, SchemaStatus};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("✈️ Flight History Explorer - MariaDB system versioning");
    info!("=====================================================");

    // Configuración: las credenciales que faltan son fatales
    let env_config = EnvironmentConfig::from_env()?;
    let db_config = match DatabaseConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuración de base de datos incompleta: {}", e);
            return Err(e.into());
        }
    };

    let db = DatabaseConnection::new(&db_config);
    info!("🗄️ Base de datos: {}", db.description());
    let store: Arc<dyn RouteStore> = Arc::new(MariaDbRouteRepository::new(db));

    // Inicializar esquema una sola vez; si falla, el servidor sigue vivo
    let schema = match store.ensure_schema().await {
        Ok(()) => SchemaStatus::Ready,
        Err(e) => {
            error!("❌ Error creando la tabla 'routes': {}", e);
            SchemaStatus::Failed(e.user_message())
        }
    };

    info!("🌍 Entorno: {}", env_config.environment);
    let addr: SocketAddr = env_config.server_url().parse()?;
    let app = create_app(AppState::new(store, schema));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /                - Página con las pestañas Add / Update / History");
    info!("   POST /routes/add      - Alta de ruta");
    info!("   POST /routes/update   - Modificar un campo de una ruta");
    info!("   GET  /routes/history  - Historial de una ruta en un rango de fechas");
    info!("   GET  /health          - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Servidor terminó con error: {}", e);
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
            Ok(mut sig) => {
                sig.recv().await;
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
