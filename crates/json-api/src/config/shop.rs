//! Shop Config

use clap::Args;

/// Shop endpoint settings.
#[derive(Debug, Args)]
pub struct ShopConfig {
    /// Mount `POST /clear-db`, which wipes every cart and transaction
    #[arg(long, env = "ENABLE_RESET_ENDPOINT", default_value_t = false)]
    pub enable_reset_endpoint: bool,

    /// Page size used when `total_goods` is not given
    #[arg(long, env = "DEFAULT_PAGE_SIZE", default_value_t = 3)]
    pub default_page_size: u32,
}
