//! Goods service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::goods::{
        errors::GoodsServiceError,
        models::{Goods, GoodsId, GoodsQuery, NewGoods, StockAction},
        repository::PgGoodsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgGoodsService {
    db: Db,
    repository: PgGoodsRepository,
}

impl PgGoodsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgGoodsRepository::new(),
        }
    }
}

#[async_trait]
impl GoodsService for PgGoodsService {
    async fn list_goods(&self, query: GoodsQuery) -> Result<Vec<Goods>, GoodsServiceError> {
        let offset = query.offset()?;

        let mut tx = self.db.begin().await?;

        let goods = self.repository.list_goods(&mut tx, &query, offset).await?;

        tx.commit().await?;

        Ok(goods)
    }

    async fn get_goods(&self, goods: GoodsId) -> Result<Goods, GoodsServiceError> {
        let mut tx = self.db.begin().await?;

        let goods = self.repository.get_goods(&mut tx, goods).await?;

        tx.commit().await?;

        Ok(goods)
    }

    async fn create_goods(&self, goods: NewGoods) -> Result<Goods, GoodsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_goods(&mut tx, goods).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_stock(
        &self,
        goods: GoodsId,
        action: StockAction,
        quantity: i64,
    ) -> Result<Goods, GoodsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut locked = self.repository.lock_goods(&mut tx, goods).await?;

        locked.apply_stock_action(action, quantity)?;

        let updated = self
            .repository
            .update_stock(&mut tx, goods, locked.stock)
            .await?;

        tx.commit().await?;

        debug!(goods = %goods, ?action, quantity, stock = updated.stock, "stock updated");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait GoodsService: Send + Sync {
    /// Retrieves one page of goods.
    async fn list_goods(&self, query: GoodsQuery) -> Result<Vec<Goods>, GoodsServiceError>;

    /// Retrieves a single goods.
    async fn get_goods(&self, goods: GoodsId) -> Result<Goods, GoodsServiceError>;

    /// Adds goods to the catalog.
    async fn create_goods(&self, goods: NewGoods) -> Result<Goods, GoodsServiceError>;

    /// Increments or decrements the stock of a goods under a row lock.
    async fn update_stock(
        &self,
        goods: GoodsId,
        action: StockAction,
        quantity: i64,
    ) -> Result<Goods, GoodsServiceError>;
}
