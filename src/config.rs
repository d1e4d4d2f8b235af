use std::net::SocketAddr;

/// Runtime settings, read from the environment (and `.env` via dotenvy).
///
/// | Env var          | Default                      |
/// |------------------|------------------------------|
/// | `DATABASE_URL`   | `sqlite:data/einesteine.db`  |
/// | `BIND_ADDR`      | `0.0.0.0:3000`               |
/// | `SECURE_COOKIES` | `false`                      |
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:data/einesteine.db".to_string());

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| format!("BIND_ADDR '{bind_addr}' is not a socket address: {e}"))?;

        let secure_cookies = std::env::var("SECURE_COOKIES")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            bind_addr,
            secure_cookies,
        })
    }
}
