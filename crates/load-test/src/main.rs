//! UMKM Shop load generator
//!
//! Runs an add-to-cart attack and a list-goods attack side by side against a running
//! server, pays every seventh cart, writes a text report and clears the cart tables.

use std::process;

use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    client::{ClientError, ShopClient},
    config::LoadTestConfig,
    metrics::AttackMetrics,
    targets::{AddToCartTargeter, payment_for},
};

mod attack;
mod client;
mod config;
mod metrics;
mod report;
mod targets;

#[derive(Debug, Error)]
enum LoadTestError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("failed to render report: {0}")]
    Render(#[from] std::fmt::Error),

    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    let config = LoadTestConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    if let Err(run_error) = run(&config).await {
        error!("load test failed: {run_error}");

        process::exit(1);
    }
}

async fn run(config: &LoadTestConfig) -> Result<(), LoadTestError> {
    let client = ShopClient::new(&config.server_addr)?;
    let seed = config.resolved_seed();

    info!(
        server = %config.server_addr,
        seed,
        duration_secs = config.duration_secs,
        add_to_cart_rate = config.add_to_cart_rate,
        list_goods_rate = config.list_goods_rate,
        "starting load test"
    );

    let (carts, goods) = tokio::join!(
        add_to_cart_attack(client.clone(), config, seed),
        list_goods_attack(client.clone(), config),
    );

    let (add_to_cart, pay) = carts;

    let report = report::render(&[
        ("add to cart", &add_to_cart),
        ("pay", &pay),
        ("list goods", &goods),
    ])?;

    report::write(&config.report, &report)?;

    info!(
        report = %config.report.display(),
        add_to_cart_requests = add_to_cart.requests(),
        pay_requests = pay.requests(),
        list_goods_requests = goods.requests(),
        "load test finished"
    );

    Ok(())
}

async fn add_to_cart_attack(
    client: ShopClient,
    config: &LoadTestConfig,
    seed: u64,
) -> (AttackMetrics, AttackMetrics) {
    let mut targeter = AddToCartTargeter::new(seed);

    let results = attack::attack(config.add_to_cart_rate, config.duration_secs, || {
        let client = client.clone();
        let body = targeter.next_body();

        async move {
            let (sample, cart) = client.add_to_cart(&body).await;

            let paid = match cart.as_ref().and_then(payment_for) {
                Some(payment) => Some(client.pay(&payment).await),
                None => None,
            };

            (sample, paid)
        }
    })
    .await;

    let mut add_to_cart = AttackMetrics::default();
    let mut pay = AttackMetrics::default();

    for (sample, paid) in results {
        add_to_cart.record(sample);

        if let Some(paid) = paid {
            pay.record(paid);
        }
    }

    match client.clear_db().await {
        Ok(()) => info!("cart tables cleared"),
        Err(clear_error) => warn!("failed to clear cart tables: {clear_error}"),
    }

    (add_to_cart, pay)
}

async fn list_goods_attack(client: ShopClient, config: &LoadTestConfig) -> AttackMetrics {
    let samples = attack::attack(config.list_goods_rate, config.duration_secs, || {
        let client = client.clone();

        async move { client.list_goods().await }
    })
    .await;

    let mut metrics = AttackMetrics::default();

    for sample in samples {
        metrics.record(sample);
    }

    metrics
}
