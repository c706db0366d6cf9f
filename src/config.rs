use std::env;
use anyhow::{bail, Context, Result};

/// Which key-value store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Spanner,
}

impl StoreBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "spanner" => Ok(StoreBackend::Spanner),
            other => bail!("STORE_BACKEND must be one of: memory, spanner, got '{}'", other),
        }
    }
}

/// Connection settings for the Spanner backend
#[derive(Debug, Clone)]
pub struct SpannerConfig {
    pub emulator_host: Option<String>,
    pub project: String,
    pub instance: String,
    pub database: String,
}

impl SpannerConfig {
    pub fn database_path(&self) -> String {
        format!(
            "projects/{}/instances/{}/databases/{}",
            self.project, self.instance, self.database
        )
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub spanner: Option<SpannerConfig>,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = match lookup("STORE_BACKEND") {
            Some(value) => StoreBackend::parse(&value)?,
            None => StoreBackend::Memory,
        };

        let spanner = match store_backend {
            StoreBackend::Memory => None,
            StoreBackend::Spanner => Some(SpannerConfig {
                emulator_host: lookup("SPANNER_EMULATOR_HOST"),
                project: lookup("SPANNER_PROJECT")
                    .context("SPANNER_PROJECT environment variable is required")?,
                instance: lookup("SPANNER_INSTANCE")
                    .context("SPANNER_INSTANCE environment variable is required")?,
                database: lookup("SPANNER_DATABASE")
                    .context("SPANNER_DATABASE environment variable is required")?,
            }),
        };

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            store_backend,
            spanner,
            service_port,
            service_host,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Store backend: {:?}", self.store_backend);
        if let Some(spanner) = &self.spanner {
            tracing::info!("  Spanner emulator: {}",
                spanner.emulator_host.as_deref().unwrap_or("disabled (using production)"));
            tracing::info!("  Spanner database: {}", spanner.database_path());
        }
        tracing::info!("  Service listening on: {}", self.bind_addr());
    }
}
