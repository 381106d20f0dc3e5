//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults suit local development.
//!
//! - `MEET_GOIAS_HOST` - Bind address (default: 127.0.0.1)
//! - `MEET_GOIAS_PORT` - Listen port (default: 3000)
//! - `MEET_GOIAS_BASE_URL` - Public URL (default: <http://localhost:3000>);
//!   an https URL turns on secure session cookies
//! - `MEET_GOIAS_DATA_PATH` - Path of the JSON storage file
//!   (default: data/meet-goias.json)
//! - `MEET_GOIAS_ADMIN_EMAIL` / `MEET_GOIAS_ADMIN_PASSWORD` /
//!   `MEET_GOIAS_ADMIN_NAME` - The single admin credential pair and display
//!   name. This is an exact-match placeholder credential, not a hardened
//!   security boundary.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use meet_goias_core::AdminUser;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// Path of the JSON storage file
    pub data_path: PathBuf,
    /// Admin login email
    pub admin_email: String,
    /// Admin login password (exact match, never hashed - see module docs)
    pub admin_password: SecretString,
    /// Admin display name
    pub admin_name: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("MEET_GOIAS_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("MEET_GOIAS_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("MEET_GOIAS_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("MEET_GOIAS_PORT".to_owned(), e.to_string()))?;
        let base_url = get_env_or_default("MEET_GOIAS_BASE_URL", "http://localhost:3000");
        let data_path = PathBuf::from(get_env_or_default(
            "MEET_GOIAS_DATA_PATH",
            "data/meet-goias.json",
        ));
        let admin_email = get_env_or_default("MEET_GOIAS_ADMIN_EMAIL", "admin@goias.com.br");
        let admin_password =
            SecretString::from(get_env_or_default("MEET_GOIAS_ADMIN_PASSWORD", "123"));
        let admin_name = get_env_or_default("MEET_GOIAS_ADMIN_NAME", "Administrador Principal");

        Ok(Self {
            host,
            port,
            base_url,
            data_path,
            admin_email,
            admin_password,
            admin_name,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the Secure attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// Exact-match credential check for the single configured admin.
    #[must_use]
    pub fn verify_login(&self, email: &str, password: &str) -> bool {
        email == self.admin_email && password == self.admin_password.expose_secret()
    }

    /// The configured administrator's identity record.
    #[must_use]
    pub fn admin_user(&self) -> AdminUser {
        AdminUser {
            id: "admin-1".to_owned(),
            email: self.admin_email.clone(),
            name: self.admin_name.clone(),
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
