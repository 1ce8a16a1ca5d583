//! Rate-limited request driver

use std::time::Duration;

use tokio::{task::JoinSet, time};
use tracing::warn;

/// Fires `next()` `rate` times per second for `duration_secs` seconds and gathers the results.
///
/// Requests are spawned on the tick, so a slow response never delays the next one.
pub async fn attack<F, Fut, T>(rate: u32, duration_secs: u64, mut next: F) -> Vec<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let hits = u64::from(rate) * duration_secs;

    let mut ticker = time::interval(Duration::from_secs(1) / rate.max(1));

    let mut tasks = JoinSet::new();

    for _ in 0..hits {
        ticker.tick().await;

        tasks.spawn(next());
    }

    let mut results = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(error) => warn!("attack task failed: {error}"),
        }
    }

    results
}
