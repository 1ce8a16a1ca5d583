//! State

use std::sync::Arc;

use umkm_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) default_page_size: u32,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, default_page_size: u32) -> Self {
        Self {
            app,
            default_page_size,
        }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, default_page_size: u32) -> Arc<Self> {
        Arc::new(Self::new(app, default_page_size))
    }
}
