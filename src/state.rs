use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::storage::{CvStore, FsCvStore};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub cv_store: Arc<dyn CvStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let cv_store = Arc::new(FsCvStore::new(&config.cv_upload_dir)) as Arc<dyn CvStore>;

        Ok(Self {
            db,
            config,
            cv_store,
        })
    }

}
