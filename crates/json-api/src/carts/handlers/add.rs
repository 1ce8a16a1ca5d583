//! Add To Cart Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use umkm_app::domain::{
    carts::models::{CartId, UserId},
    goods::models::GoodsId,
    shop::data::{AddToCart, CartAdded},
};

use crate::{
    extensions::*,
    observability::record_cart_updated,
    response::{ApiError, SuccessResponse},
    state::State,
};

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToCartRequest {
    /// Existing open cart; omit to start a new one
    pub cart_id: Option<i64>,
    pub user_id: i64,
    pub goods_id: i64,

    /// Unit price charged for the goods
    #[salvo(schema(value_type = f64))]
    pub goods_price: Decimal,

    /// Quantity to add
    pub total_goods: i64,
}

impl From<AddToCartRequest> for AddToCart {
    fn from(request: AddToCartRequest) -> Self {
        AddToCart {
            cart_id: request.cart_id.map(CartId::from_i64),
            user_id: UserId::from_i64(request.user_id),
            goods_id: GoodsId::from_i64(request.goods_id),
            unit_price: request.goods_price,
            quantity: request.total_goods,
        }
    }
}

/// Cart Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartUpdatedResponse {
    pub cart_id: i64,
    pub user_id: i64,

    /// Units across every line item
    pub total_goods: i64,

    #[salvo(schema(value_type = f64))]
    pub total_amount: Decimal,
}

impl From<CartAdded> for CartUpdatedResponse {
    fn from(added: CartAdded) -> Self {
        Self {
            cart_id: added.cart_id.into_i64(),
            user_id: added.user_id.into_i64(),
            total_goods: added.total_quantity,
            total_amount: added.total_amount,
        }
    }
}

/// Add To Cart Handler
///
/// Appends goods to an open cart, creating the cart when no `cart_id` is sent.
#[endpoint(tags("carts"), summary = "Add Goods To Cart")]
pub(crate) async fn handler(
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
) -> Result<Json<SuccessResponse<CartUpdatedResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = AddToCart::from(json.into_inner());
    let created = request.cart_id.is_none();

    let added = state.app.shop.add_to_cart(request).await?;

    record_cart_updated(created);

    Ok(SuccessResponse::ok(added.into()))
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

    use crate::{response::ErrorResponse, test_helpers::shop_service};

    use super::*;

    fn make_service(shop: MockShopService) -> Service {
        shop_service(shop, Router::with_path("api/small/cart").post(handler))
    }

    fn cart_added(cart: i64, quantity: i64, amount: i64) -> CartAdded {
        CartAdded {
            cart_id: CartId::from_i64(cart),
            user_id: UserId::from_i64(100),
            total_quantity: quantity,
            total_amount: Decimal::from(amount),
        }
    }

    #[tokio::test]
    async fn test_add_without_cart_id_starts_a_cart() -> TestResult {
        let mut shop = MockShopService::new();

        shop.expect_add_to_cart()
            .once()
            .withf(|request| {
                *request
                    == AddToCart {
                        cart_id: None,
                        user_id: UserId::from_i64(100),
                        goods_id: GoodsId::from_i64(1),
                        unit_price: Decimal::from(2000),
                        quantity: 2,
                    }
            })
            .return_once(|_| Ok(cart_added(1, 2, 4000)));

        let mut res = TestClient::post("http://example.com/api/small/cart")
            .json(&json!({
                "user_id": 100,
                "goods_id": 1,
                "goods_price": 2000,
                "total_goods": 2,
            }))
            .send(&make_service(shop))
            .await;

        let body: SuccessResponse<CartUpdatedResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.cart_id, 1);
        assert_eq!(body.data.user_id, 100);
        assert_eq!(body.data.total_goods, 2);
        assert_eq!(body.data.total_amount, Decimal::from(4000));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_with_cart_id_appends_to_that_cart() -> TestResult {
        let mut shop = MockShopService::new();

        shop.expect_add_to_cart()
            .once()
            .withf(|request| {
                request.cart_id == Some(CartId::from_i64(1))
                    && request.goods_id == GoodsId::from_i64(3)
                    && request.quantity == 4
            })
            .return_once(|_| Ok(cart_added(1, 6, 10_000)));

        let mut res = TestClient::post("http://example.com/api/small/cart")
            .json(&json!({
                "cart_id": 1,
                "user_id": 100,
                "goods_id": 3,
                "goods_price": 1500,
                "total_goods": 4,
            }))
            .send(&make_service(shop))
            .await;

        let body: SuccessResponse<CartUpdatedResponse> = res.take_json().await?;

        assert_eq!(body.data.cart_id, 1);
        assert_eq!(body.data.total_goods, 6);
        assert_eq!(body.data.total_amount, Decimal::from(10_000));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_to_closed_cart_returns_404() -> TestResult {
        let mut shop = MockShopService::new();

        shop.expect_add_to_cart()
            .once()
            .return_once(|_| Err(ShopServiceError::NotFound("cart")));

        let mut res = TestClient::post("http://example.com/api/small/cart")
            .json(&json!({
                "cart_id": 9,
                "user_id": 100,
                "goods_id": 3,
                "goods_price": 1500,
                "total_goods": 1,
            }))
            .send(&make_service(shop))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.errors, vec!["cart not found".to_string()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_zero_quantity_returns_400() -> TestResult {
        let mut shop = MockShopService::new();

        shop.expect_add_to_cart().once().return_once(|_| {
            Err(ShopServiceError::Validation(
                ValidationError::NonPositiveQuantity(0),
            ))
        });

        let res = TestClient::post("http://example.com/api/small/cart")
            .json(&json!({
                "user_id": 100,
                "goods_id": 3,
                "goods_price": 1500,
                "total_goods": 0,
            }))
            .send(&make_service(shop))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_malformed_body_returns_error_envelope() -> TestResult {
        let mut shop = MockShopService::new();

        shop.expect_add_to_cart().never();

        let mut res = TestClient::post("http://example.com/api/small/cart")
            .json(&json!({ "user_id": "nobody" }))
            .send(&make_service(shop))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.status, "ERR_BAD_REQUEST");

        Ok(())
    }
}
