//! Load test configuration

use std::path::PathBuf;

use clap::Parser;

/// Load generator for the shop API.
#[derive(Debug, Clone, Parser)]
#[command(name = "umkm-load-test", version, about)]
pub struct LoadTestConfig {
    /// Base URL of the shop API
    #[arg(long, env = "SERVER_ADDR", default_value = "http://127.0.0.1:9900")]
    pub server_addr: String,

    /// How long each attack runs
    #[arg(long, env = "LOAD_TEST_DURATION_SECS", default_value_t = 5)]
    pub duration_secs: u64,

    /// Add-to-cart requests per second
    #[arg(
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub add_to_cart_rate: u32,

    /// List-goods requests per second
    #[arg(
        long,
        default_value_t = 100,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub list_goods_rate: u32,

    /// Seed for the request generator; a random seed is drawn and logged when omitted
    #[arg(long, env = "LOAD_TEST_SEED")]
    pub seed: Option<u64>,

    /// File the text report is written to
    #[arg(long, default_value = "report.txt")]
    pub report: PathBuf,

    /// Log level filter
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl LoadTestConfig {
    /// Load configuration from `.env`, the environment and CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when arguments fail to parse.
    pub fn load() -> Result<Self, clap::Error> {
        dotenvy::dotenv().ok();

        Self::try_parse()
    }

    /// The seed to run with.
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
