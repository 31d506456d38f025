use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub uploads: UploadsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the built SPA front end.
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_max_size: u32,
    pub busy_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_expiration_seconds: u64,
    pub default_admin_username: String,
    pub default_admin_password: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UploadsConfig {
    pub dir: String,
    pub max_file_size_mb: usize,
}

impl Settings {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.static_dir", "web/dist")?
            .set_default("database.path", "data/nav.db")?
            .set_default("database.pool_max_size", 5)?
            .set_default("database.busy_timeout_seconds", 5)?
            .set_default("auth.jwt_secret", "change-me")?
            .set_default("auth.token_expiration_seconds", 86400)?
            .set_default("auth.default_admin_username", "admin")?
            .set_default("auth.default_admin_password", "admin123")?
            .set_default("uploads.dir", "uploads")?
            .set_default("uploads.max_file_size_mb", 10)?
            .add_source(File::with_name("config/settings").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }
}
