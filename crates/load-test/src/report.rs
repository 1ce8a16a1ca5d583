//! Text report

use std::{
    fmt::{self, Write as _},
    fs, io,
    path::Path,
};

use crate::metrics::AttackMetrics;

/// Renders one titled section per attack.
///
/// # Errors
///
/// Only fails if formatting into the buffer fails.
pub fn render(sections: &[(&str, &AttackMetrics)]) -> Result<String, fmt::Error> {
    let mut out = String::new();

    for (title, metrics) in sections {
        writeln!(out, "== {title} ==")?;
        writeln!(
            out,
            "Requests      [total, successes]        {}, {}",
            metrics.requests(),
            metrics.successes()
        )?;
        writeln!(
            out,
            "Success       [ratio]                   {:.2}%",
            metrics.success_ratio() * 100.0
        )?;

        if let Some(latencies) = metrics.latencies() {
            writeln!(
                out,
                "Latencies     [mean, 50, 95, 99, max]  {:?}, {:?}, {:?}, {:?}, {:?}",
                latencies.mean, latencies.p50, latencies.p95, latencies.p99, latencies.max
            )?;
        }

        let codes: Vec<String> = metrics
            .status_codes()
            .iter()
            .map(|(code, count)| format!("{code}:{count}"))
            .collect();

        writeln!(
            out,
            "Status Codes  [code:count]              {}",
            codes.join("  ")
        )?;
        writeln!(out)?;
    }

    Ok(out)
}

/// # Errors
///
/// Returns an error when the report file cannot be written.
pub fn write(path: &Path, report: &str) -> io::Result<()> {
    fs::write(path, report)
}
