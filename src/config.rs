use std::path::PathBuf;

use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub admin_password: Option<String>,
    pub export_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::Config("DATABASE_URL must be set".to_string()))?;

        let admin_password = std::env::var("ADMIN_PASSWORD")
            .ok()
            .filter(|v| !v.is_empty());

        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let export_dir = base_dir.join(
            std::env::var("EXPORT_DIR").unwrap_or_else(|_| "exports".to_string()),
        );

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| Error::Config(format!("PORT is not a valid port: {}", raw)))?,
            Err(_) => 8501,
        };

        Ok(Self {
            database_url,
            admin_password,
            export_dir,
            host,
            port,
        })
    }

    /// The admin password, required before the server may start.
    pub fn require_admin_password(&self) -> Result<&str> {
        self.admin_password
            .as_deref()
            .ok_or_else(|| Error::Config("ADMIN_PASSWORD must be set".to_string()))
    }
}
