//! Recipe Server - recipe management backend
//!
//! # Architecture
//!
//! - **Database** (`db`): SQLite via sqlx, one repository module per table
//! - **Auth** (`auth`): argon2 password hashing + opaque token authentication
//! - **HTTP API** (`api`): per-resource routers for users, recipes, tags, ingredients
//! - **Services** (`services`): router assembly and media storage
//!
//! # Module layout
//!
//! ```text
//! recipe-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # tokens, passwords, middleware
//! ├── services/      # http app, image storage
//! ├── api/           # routes and handlers
//! ├── utils/         # logger, validation, error re-exports
//! └── db/            # pool, migrations, repositories
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::CurrentUser;
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env`, prepare the work directory and install the logger.
pub fn setup_environment() -> anyhow::Result<Config> {
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    std::fs::create_dir_all(&config.media_dir)?;
    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir)?;
    }

    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    );

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ____            _
   / __ \___  _____(_)___  ___
  / /_/ / _ \/ ___/ / __ \/ _ \
 / _, _/  __/ /__/ / /_/ /  __/
/_/ |_|\___/\___/_/ .___/\___/
                 /_/
    "#
    );
}
