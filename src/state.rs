use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::auth::jwt::TokenIssuer;
use crate::config::AppConfig;
use crate::users::repo::{PgUserStore, UserStore};
use crate::users::service::UserService;

/// Everything wired once at process start: pool, config, service, token keys.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub users: UserService,
    pub tokens: TokenIssuer,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self::from_parts(db, config))
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>) -> Self {
        let store = Arc::new(PgUserStore::new(db.clone())) as Arc<dyn UserStore>;
        let users = UserService::new(store);
        let tokens = TokenIssuer::new(&config.jwt);
        Self {
            db,
            config,
            users,
            tokens,
        }
    }
}
