//! Process-level settings: bind address and storage backend.
//!
//! # Environment Variables
//!
//! - `SERVER_ADDR`: socket address to bind (default: `0.0.0.0:3000`)
//! - `STORAGE_BACKEND`: `postgres` (default) or `memory`
//! - `DATABASE_URL`: PostgreSQL connection string (required for `postgres`)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)

use std::str::FromStr;

use anyhow::{Result, anyhow};

use crate::{env_var, parse_or};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(anyhow!("unknown storage backend: {}", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: String,
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let storage = match env_var("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::Postgres,
        };

        Ok(Self {
            addr: env_var("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            storage,
            database_url: env_var("DATABASE_URL"),
            max_connections: parse_or(env_var("DATABASE_MAX_CONNECTIONS"), 10),
        })
    }

    pub fn database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .ok_or_else(|| anyhow!("DATABASE_URL must be set for the postgres storage backend"))
    }
}
