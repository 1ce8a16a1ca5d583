//! Update Stock Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use umkm_app::domain::{
    goods::models::{GoodsId, StockAction},
    shop::data::StockUpdate,
};

use crate::{
    extensions::*,
    goods::handlers::GoodsResponse,
    response::{ApiError, SuccessResponse},
    state::State,
};

/// Update Stock Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStockRequest {
    /// `INCR` or `DECR`
    pub action: String,
    pub goods_id: i64,

    /// Number of units to add or remove
    pub total: i64,
}

impl TryFrom<UpdateStockRequest> for StockUpdate {
    type Error = ApiError;

    fn try_from(request: UpdateStockRequest) -> Result<Self, Self::Error> {
        Ok(StockUpdate {
            action: request.action.parse::<StockAction>()?,
            goods_id: GoodsId::from_i64(request.goods_id),
            quantity: request.total,
        })
    }
}

/// Update Stock Handler
#[endpoint(tags("goods"), summary = "Increment or Decrement Stock")]
pub(crate) async fn handler(
    json: JsonBody<UpdateStockRequest>,
    depot: &mut Depot,
) -> Result<Json<SuccessResponse<GoodsResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let update = StockUpdate::try_from(json.into_inner())?;

    let goods = state.app.shop.update_stock(update).await?;

    Ok(SuccessResponse::ok(goods.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use umkm_app::domain::{
        errors::ValidationError,
        shop::{MockShopService, ShopServiceError},
    };

    use crate::{
        goods::handlers::tests::make_goods, response::ErrorResponse, test_helpers::shop_service,
    };

    use super::*;

    fn make_service(shop: MockShopService) -> Service {
        shop_service(shop, Router::with_path("api/huge/stock").post(handler))
    }

    #[tokio::test]
    async fn test_increment_stock_returns_updated_goods() -> TestResult {
        let mut shop = MockShopService::new();

        shop.expect_update_stock()
            .once()
            .withf(|update| {
                *update
                    == StockUpdate {
                        action: StockAction::Increase,
                        goods_id: GoodsId::from_i64(3),
                        quantity: 5,
                    }
            })
            .return_once(|_| Ok(make_goods(3, 15, 1500)));

        let mut res = TestClient::post("http://example.com/api/huge/stock")
            .json(&json!({ "action": "INCR", "goods_id": 3, "total": 5 }))
            .send(&make_service(shop))
            .await;

        let body: SuccessResponse<GoodsResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.id, 3);
        assert_eq!(body.data.stocks, 15);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_action_returns_400() -> TestResult {
        let mut shop = MockShopService::new();

        shop.expect_update_stock().never();

        let res = TestClient::post("http://example.com/api/huge/stock")
            .json(&json!({ "action": "SWAP", "goods_id": 3, "total": 5 }))
            .send(&make_service(shop))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_decrement_below_zero_returns_400() -> TestResult {
        let mut shop = MockShopService::new();

        shop.expect_update_stock().once().return_once(|_| {
            Err(ShopServiceError::Validation(
                ValidationError::InsufficientStock {
                    available: 2,
                    requested: 5,
                },
            ))
        });

        let mut res = TestClient::post("http://example.com/api/huge/stock")
            .json(&json!({ "action": "DECR", "goods_id": 3, "total": 5 }))
            .send(&make_service(shop))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            body.errors,
            vec!["insufficient stock: 2 available, 5 requested".to_string()]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_goods_returns_404() -> TestResult {
        let mut shop = MockShopService::new();

        shop.expect_update_stock()
            .once()
            .return_once(|_| Err(ShopServiceError::NotFound("goods")));

        let res = TestClient::post("http://example.com/api/huge/stock")
            .json(&json!({ "action": "INCR", "goods_id": 404, "total": 1 }))
            .send(&make_service(shop))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
