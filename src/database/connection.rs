//! Conexión a PostgreSQL
//!
//! Crea el pool a partir de `DatabaseConfig`, verifica la conexión y
//! aplica las migraciones embebidas en el binario.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Crear el pool y verificar que la base de datos responde
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let location = config.display_location();
        info!(database = %location, "Connecting to database");

        let pool = config
            .create_pool()
            .await
            .with_context(|| format!("failed to connect to {}", location))?;

        test_connection(&pool)
            .await
            .context("database connection check failed")?;

        info!("Database connected successfully");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ejecutar migraciones de la base de datos
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("failed to run database migrations")?;

        info!("Database migrations applied");
        Ok(())
    }
}

/// Verificar que la conexión funciona
async fn test_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
