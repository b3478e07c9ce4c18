//! Configuración de base de datos
//!
//! Este módulo maneja la conexión y configuración de PostgreSQL con SQLx.

use std::env;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use super::{parse_var, ConfigError};

/// Ubicación de la base de datos: URL completa o variables separadas
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    Url(String),
    Parts {
        host: String,
        port: u16,
        username: String,
        password: String,
        database: String,
    },
}

/// Configuración de la base de datos
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub location: DatabaseLocation,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let location = match lookup("DATABASE_URL") {
            Some(url) if !url.trim().is_empty() => DatabaseLocation::Url(url),
            _ => match (lookup("DB_USER"), lookup("DB_HOST"), lookup("DB_NAME")) {
                (Some(username), Some(host), Some(database)) => DatabaseLocation::Parts {
                    host,
                    port: parse_var(&lookup, "DB_PORT", 5432)?,
                    username,
                    password: lookup("DB_PASSWORD").unwrap_or_default(),
                    database,
                },
                _ => return Err(ConfigError::MissingDatabase),
            },
        };

        Ok(Self {
            location,
            max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS", 20)?,
            min_connections: parse_var(&lookup, "DB_MIN_CONNECTIONS", 1)?,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(3600),
        })
    }

    /// Opciones de conexión de SQLx
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.location {
            DatabaseLocation::Url(url) => url.parse(),
            DatabaseLocation::Parts {
                host,
                port,
                username,
                password,
                database,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(username)
                .password(password)
                .database(database)),
        }
    }

    /// Descripción de la conexión apta para logs, sin credenciales
    pub fn display_location(&self) -> String {
        match &self.location {
            DatabaseLocation::Url(url) => mask_database_url(url),
            DatabaseLocation::Parts {
                host,
                port,
                username,
                database,
                ..
            } => format!("postgres://{}:***@{}:{}/{}", username, host, port, database),
        }
    }

    /// Crear un nuevo pool de conexiones
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .connect_with(self.connect_options()?)
            .await
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    let scheme_end = url.find("://").map(|pos| pos + 3).unwrap_or(0);
    if at_pos < scheme_end {
        return url.to_string();
    }

    format!("{}***:***@{}", &url[..scheme_end], &url[at_pos + 1..])
}
