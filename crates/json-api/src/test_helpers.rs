//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, catcher::Catcher, prelude::*};

use umkm_app::{
    context::AppContext,
    domain::{carts::MockCartsService, goods::MockGoodsService, shop::MockShopService},
};

use crate::{response::envelope_status_errors, state::State};

pub(crate) const TEST_PAGE_SIZE: u32 = 3;

fn strict_goods_mock() -> MockGoodsService {
    let mut goods = MockGoodsService::new();

    goods.expect_list_goods().never();
    goods.expect_get_goods().never();
    goods.expect_create_goods().never();
    goods.expect_update_stock().never();

    goods
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_fetch_open_cart().never();
    carts.expect_upsert_cart().never();
    carts.expect_promote_to_transaction().never();
    carts.expect_reset().never();

    carts
}

pub(crate) fn state_with_shop(shop: MockShopService) -> Arc<State> {
    State::shared(
        AppContext {
            goods: Arc::new(strict_goods_mock()),
            carts: Arc::new(strict_carts_mock()),
            shop: Arc::new(shop),
        },
        TEST_PAGE_SIZE,
    )
}

/// Mounts `route` behind the injected state and the error envelope catcher.
pub(crate) fn shop_service(shop: MockShopService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_shop(shop)))
            .push(route),
    )
    .catcher(Catcher::default().hoop(envelope_status_errors))
}
