//! App Router

use salvo::Router;

use crate::{carts, goods, payments, reset};

/// Shop routes. `/clear-db` is only mounted when `enable_reset` is set.
pub fn app_router(enable_reset: bool) -> Router {
    let router = Router::new()
        .push(
            Router::with_path("api/small")
                .push(Router::with_path("stocks").get(goods::index::handler))
                .push(
                    Router::with_path("cart")
                        .post(carts::add::handler)
                        .push(Router::with_path("{cart}").get(carts::get::handler)),
                )
                .push(Router::with_path("pay").post(payments::pay::handler)),
        )
        .push(Router::with_path("api/huge/stock").post(goods::stock::handler));

    if enable_reset {
        router.push(Router::with_path("clear-db").post(reset::handler))
    } else {
        router
    }
}
