use std::path::PathBuf;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./data | Working directory (database, logs) |
/// | HTTP_PORT | 8000 | HTTP listen port |
/// | DATABASE_URL | sqlite:{WORK_DIR}/recipe.db | SQLite connection string |
/// | MEDIA_DIR | {WORK_DIR}/media | Root for uploaded files |
/// | ENVIRONMENT | development | Runtime environment |
/// | LOG_LEVEL | info | Default log filter when RUST_LOG is unset |
/// | LOG_JSON | false | Emit JSON log lines |
/// | LOG_DIR | (none) | Daily rolling log file directory |
/// | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | Graceful shutdown window |
/// | ADMIN_EMAIL / ADMIN_PASSWORD | (none) | Superuser provisioned at startup |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/recipes HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// SQLite connection string
    pub database_url: String,
    /// Directory holding uploaded media
    pub media_dir: PathBuf,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// Request timeout (ms)
    pub request_timeout_ms: u64,
    /// Shutdown timeout (ms)
    pub shutdown_timeout_ms: u64,
    /// Superuser credentials provisioned on startup when both are set
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| format!("sqlite:{}/recipe.db", work_dir));
        let media_dir = std::env::var("MEDIA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(&work_dir).join("media"));

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            database_url,
            media_dir,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.is_empty()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
            admin_email: std::env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty()),
            admin_password: std::env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
            work_dir,
        }
    }

    /// Override the storage locations, keeping everything else from the environment
    ///
    /// Used by tests
    pub fn with_overrides(work_dir: impl Into<String>, media_dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_url = format!("sqlite:{}/recipe.db", config.work_dir);
        config.media_dir = media_dir.into();
        config.admin_email = None;
        config.admin_password = None;
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
