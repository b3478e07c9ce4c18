use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use parking_reservation::config::{DatabaseConfig, EnvironmentConfig, StoreBackend};
use parking_reservation::database::DatabaseConnection;
use parking_reservation::repositories::{
    MemoryParkingRepository, ParkingRepository, PgParkingRepository,
};
use parking_reservation::routes::create_app;
use parking_reservation::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("parking_reservation=debug,tower_http=info")),
        )
        .init();

    info!("Parking reservation API");

    let config = EnvironmentConfig::from_env()?;
    let addr = config.socket_addr()?;

    let repository: Arc<dyn ParkingRepository> = match config.store {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let db_connection = match DatabaseConnection::new(&db_config).await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("Error connecting to database: {:#}", e);
                    return Err(e);
                }
            };
            db_connection.run_migrations().await?;
            Arc::new(PgParkingRepository::new(db_connection.pool().clone()))
        }
        StoreBackend::Memory => {
            info!("Using in-memory store, data is lost on shutdown");
            Arc::new(MemoryParkingRepository::new())
        }
    };

    let app = create_app(AppState::new(repository, config));

    info!("Server listening on http://{}", addr);
    info!("   GET    /health");
    info!("   GET    /parking-spots");
    info!("   POST   /parking-spots");
    info!("   PUT    /parking-spots/:id");
    info!("   DELETE /parking-spots/:id");
    info!("   POST   /book-spot");
    info!("   PUT    /reservation/edit");
    info!("   DELETE /reservation/delete/:id");
    info!("   GET    /reservations");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("Server error: {}", e);
            e
        })?;

    info!("Server stopped");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Ctrl+C received, shutting down");
        },
        _ = terminate => {
            info!("SIGTERM received, shutting down");
        },
    }
}
