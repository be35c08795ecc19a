use std::time::Instant;

use sqlx::SqlitePool;

use crate::core::{Config, Result};
use crate::db::DbService;
use crate::db::repository::user;
use crate::services::MediaStorage;

/// Server state - shared handles for every request
///
/// Cloning is cheap: the pool and media storage are reference counted.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Immutable configuration |
/// | pool | SqlitePool | Database pool |
/// | media | MediaStorage | Uploaded file storage |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Uploaded media
    pub media: MediaStorage,
    started_at: Instant,
}

impl ServerState {
    /// Build state from existing parts
    ///
    /// Usually [`initialize()`](Self::initialize) is used instead
    pub fn new(config: Config, pool: SqlitePool, media: MediaStorage) -> Self {
        Self {
            config,
            pool,
            media,
            started_at: Instant::now(),
        }
    }

    /// Open the database, run migrations and provision the configured superuser
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_url).await?;
        let state = Self::new(config.clone(), db.pool, MediaStorage::new(&config.media_dir));
        state.provision_admin().await?;
        Ok(state)
    }

    /// State over a fresh in-memory database
    pub async fn in_memory(config: &Config) -> Result<Self> {
        let db = DbService::in_memory().await?;
        Ok(Self::new(
            config.clone(),
            db.pool,
            MediaStorage::new(&config.media_dir),
        ))
    }

    async fn provision_admin(&self) -> Result<()> {
        let (Some(email), Some(password)) =
            (&self.config.admin_email, &self.config.admin_password)
        else {
            return Ok(());
        };

        if user::find_by_email(&self.pool, email).await?.is_some() {
            tracing::debug!(email = %email, "Superuser already present");
            return Ok(());
        }

        let admin = user::create_superuser(&self.pool, email, password, "").await?;
        tracing::info!(user_id = admin.id, email = %admin.email, "Superuser provisioned");
        Ok(())
    }

    /// Seconds since the state was created
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
