use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,

    // Messages
    pub messages_dir: PathBuf,
    pub preload_all_locales: bool,

    // Locale detection
    pub locale_cookie_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            messages_dir: PathBuf::from("locales"),
            preload_all_locales: true,
            locale_cookie_name: "NEXT_LOCALE".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: match std::env::var("PORT") {
                Ok(port) => port
                    .parse()
                    .with_context(|| format!("PORT must be a valid port number, got '{}'", port))?,
                Err(_) => defaults.port,
            },

            messages_dir: std::env::var("MESSAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.messages_dir),
            preload_all_locales: std::env::var("PRELOAD_ALL_LOCALES")
                .ok()
                .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(defaults.preload_all_locales),

            locale_cookie_name: std::env::var("LOCALE_COOKIE_NAME")
                .ok()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.locale_cookie_name),
        })
    }

    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}
