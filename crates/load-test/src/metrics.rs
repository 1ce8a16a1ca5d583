//! Attack metrics

use std::{collections::BTreeMap, time::Duration};

use crate::client::Sample;

/// Aggregated results of one attack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttackMetrics {
    latencies: Vec<Duration>,
    successes: u64,
    status_codes: BTreeMap<String, u64>,
}

/// Latency distribution of an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latencies {
    pub mean: Duration,
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
    pub max: Duration,
}

impl AttackMetrics {
    pub fn record(&mut self, sample: Sample) {
        if sample.is_success() {
            self.successes += 1;
        }

        // Transport failures are counted under status 0.
        let status = sample.status.unwrap_or(0).to_string();

        *self.status_codes.entry(status).or_default() += 1;

        self.latencies.push(sample.latency);
    }

    pub fn requests(&self) -> usize {
        self.latencies.len()
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn status_codes(&self) -> &BTreeMap<String, u64> {
        &self.status_codes
    }

    /// Share of requests that got a 2xx response, between 0 and 1.
    #[expect(
        clippy::cast_precision_loss,
        reason = "request counts stay far below 2^52"
    )]
    pub fn success_ratio(&self) -> f64 {
        if self.latencies.is_empty() {
            return 0.0;
        }

        self.successes as f64 / self.latencies.len() as f64
    }

    /// `None` until at least one request was recorded.
    pub fn latencies(&self) -> Option<Latencies> {
        let mut sorted = self.latencies.clone();

        sorted.sort_unstable();

        let count = u32::try_from(sorted.len()).ok().filter(|count| *count > 0)?;

        let total: Duration = sorted.iter().sum();

        Some(Latencies {
            mean: total / count,
            p50: percentile(&sorted, 500)?,
            p95: percentile(&sorted, 950)?,
            p99: percentile(&sorted, 990)?,
            max: *sorted.last()?,
        })
    }
}

/// Nearest-rank percentile of `sorted`, with `per_mille` in thousandths.
fn percentile(sorted: &[Duration], per_mille: usize) -> Option<Duration> {
    let rank = (sorted.len() * per_mille).div_ceil(1000).max(1);

    sorted.get(rank - 1).copied()
}
