use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Drives the `Secure` flag on the session cookie.
    pub production: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is required")?;
        // The signing secret must exist before any request is served.
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is required")?,
        };
        let production = std::env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);
        Ok(Self {
            database_url,
            jwt,
            production,
        })
    }
}
