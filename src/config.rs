use anyhow::Context;
use sqlx::postgres::PgConnectOptions;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_user: String,
    pub db_password: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, falling back to defaults
    /// for anything the lookup doesn't provide.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            db_host: var("DB_HOST", "localhost"),
            db_port: var("DB_PORT", "5432")
                .parse()
                .context("DB_PORT must be a valid port number")?,
            db_name: var("POSTGRES_DB", "erpdb"),
            db_user: var("POSTGRES_USER", "erpuser"),
            db_password: var("POSTGRES_PASSWORD", "erppassword"),
            db_max_connections: var("DB_MAX_CONNECTIONS", "20")
                .parse()
                .context("DB_MAX_CONNECTIONS must be a valid number")?,
            host: var("HOST", "0.0.0.0"),
            port: var("PORT", "5000")
                .parse()
                .context("PORT must be a valid number")?,
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .database(&self.db_name)
            .username(&self.db_user)
            .password(&self.db_password)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
