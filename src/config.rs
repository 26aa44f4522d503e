use std::env;

/// Runtime settings, read from the environment with defaults suitable for a
/// local run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection string, e.g. `sqlite::memory:` or `postgres://…`.
    pub database_url: String,
    /// Listen address of the HTTP server.
    pub bind_addr: String,
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite::memory:".to_owned()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_owned()),
        }
    }
}
