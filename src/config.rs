//! Service configuration.
//!
//! Configuration is layered: an optional TOML file supplies listener and
//! query settings, and environment variables override it. The shared
//! secret is environment-only so it never lands in a checked-in file.

use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use axum::http::HeaderValue;
use serde::Deserialize;

/// Environment variable naming the TOML config file to load.
pub const CONFIG_PATH_VAR: &str = "RESMON_CONFIG";
/// Config file picked up from the working directory when the variable is unset.
pub const DEFAULT_CONFIG_FILE: &str = "resmon.toml";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;

/// Shared secret expected on every `/api` request.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub username: String,
    pub password: String,
}

impl ApiCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Manual Debug keeps the password out of log output.
impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Resolved runtime configuration for the gateway.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub credentials: ApiCredentials,
    /// Origins allowed by the CORS layer, as exact `scheme://host[:port]` strings.
    pub allowed_origins: Vec<String>,
    /// Upper bound on the time spent answering a single data query.
    pub query_timeout_secs: u64,
}

impl ServiceConfig {
    /// Loads configuration from the optional TOML file and the process
    /// environment. Environment variables win over file values.
    pub fn from_env() -> Result<Self, String> {
        let file = FileConfig::discover()?;
        Self::resolve(file, |key| env::var(key).ok())
    }

    fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let username = env("API_USERNAME")
            .ok_or_else(|| "API_USERNAME environment variable not set".to_string())?;
        let password = env("API_PASSWORD")
            .ok_or_else(|| "API_PASSWORD environment variable not set".to_string())?;

        let host = env("HOST")
            .or(file.server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match env("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| format!("Invalid PORT value: {raw}"))?,
            None => file.server.port.unwrap_or(DEFAULT_PORT),
        };

        let allowed_origins = match env("RESMON_ALLOWED_ORIGINS") {
            Some(raw) => parse_origin_list(&raw),
            None => file
                .cors
                .allowed_origins
                .unwrap_or_else(|| vec![DEFAULT_ALLOWED_ORIGIN.to_string()]),
        };
        if allowed_origins.is_empty() {
            return Err("Allowed origin list must name at least one origin".to_string());
        }
        // Each origin is used verbatim as a CORS allow-list header value.
        for origin in &allowed_origins {
            HeaderValue::from_str(origin)
                .map_err(|_| format!("Invalid allowed origin value: {origin:?}"))?;
        }

        let query_timeout_secs = match env("RESMON_QUERY_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| format!("Invalid RESMON_QUERY_TIMEOUT_SECS value: {raw}"))?,
            None => file
                .query
                .timeout_secs
                .unwrap_or(DEFAULT_QUERY_TIMEOUT_SECS),
        };
        if query_timeout_secs == 0 {
            return Err("Query timeout must be at least one second".to_string());
        }

        Ok(Self {
            host,
            port,
            credentials: ApiCredentials::new(username, password),
            allowed_origins,
            query_timeout_secs,
        })
    }

    pub fn query_deadline(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Optional settings read from a TOML file. Every field has an
/// environment override, so all of them are optional here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub cors: CorsSection,
    #[serde(default)]
    pub query: QuerySection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsSection {
    pub allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuerySection {
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Reads the file named by `RESMON_CONFIG`, falling back to
    /// `./resmon.toml` when present. Absence of both is not an error.
    fn discover() -> Result<Self, String> {
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            return Self::from_file(Path::new(&path));
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            return Self::from_file(fallback);
        }
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;
        toml::from_str(&raw)
            .map_err(|e| format!("Failed to parse config file {}: {}", path.display(), e))
    }
}
