//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        goods::{GoodsService, PgGoodsService},
        shop::{DefaultShopService, NoopSupportService, ShopService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub goods: Arc<dyn GoodsService>,
    pub carts: Arc<dyn CartsService>,
    pub shop: Arc<dyn ShopService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str, max_connections: u32) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool)))
    }

    /// Wire the Postgres-backed services over an existing pool.
    #[must_use]
    pub fn from_db(db: Db) -> Self {
        let goods: Arc<dyn GoodsService> = Arc::new(PgGoodsService::new(db.clone()));
        let carts: Arc<dyn CartsService> = Arc::new(PgCartsService::new(db));

        let shop = Arc::new(DefaultShopService::new(
            goods.clone(),
            carts.clone(),
            Arc::new(NoopSupportService),
        ));

        Self { goods, carts, shop }
    }
}
