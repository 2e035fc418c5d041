//! Load-test command - times sequential requests against every number endpoint

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use chrono::Utc;
use clap::Args;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::api::NumberRoute;
use crate::config::{AppConfig, LoadTestConfig};
use crate::infrastructure::logging;

/// Arguments for the load-test command; unset values come from configuration
#[derive(Args, Debug, Clone)]
pub struct LoadTestArgs {
    /// Server to test
    #[arg(long)]
    pub base_url: Option<String>,

    /// Requests sent to each endpoint
    #[arg(long, short = 'n')]
    pub requests: Option<usize>,

    /// Directory receiving the JSON reports
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

impl LoadTestArgs {
    fn resolve(self, defaults: LoadTestConfig) -> LoadTestConfig {
        LoadTestConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            requests: self.requests.unwrap_or(defaults.requests),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
        }
    }
}

/// Outcome of a single request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestResult {
    pub request_index: usize,
    pub elapsed_ms: f64,
    pub status: u16,
}

/// Timing statistics for all requests that ended with one status code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSummary {
    pub status: u16,
    pub count: usize,
    pub min_ms: f64,
    pub max_ms: f64,
    pub avg_ms: f64,
}

pub async fn run(args: LoadTestArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let settings = args.resolve(config.load_test);
    let client = Client::new();
    let base_url = settings.base_url.trim_end_matches('/');

    std::fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!("Failed to create output directory {}", settings.output_dir.display())
    })?;

    for route in NumberRoute::ALL {
        let url = format!("{}{}", base_url, route.path());
        info!(url = %url, requests = settings.requests, "Starting load test");

        let results = hit_endpoint(&client, &url, settings.requests).await?;
        for summary in summarize(&results) {
            println!(
                "[{}] {}/{} | Min: {:.2}ms | Max: {:.2}ms | Avg Time: {:.2}ms | {}",
                summary.status,
                summary.count,
                results.len(),
                summary.min_ms,
                summary.max_ms,
                summary.avg_ms,
                url
            );
        }

        let report = write_report(&settings.output_dir, route.name(), &results)?;
        info!(report = %report.display(), "Wrote load test report");
    }

    Ok(())
}

/// Sends `count` sequential GET requests, timing each until its body is read
pub async fn hit_endpoint(
    client: &Client,
    url: &str,
    count: usize,
) -> anyhow::Result<Vec<RequestResult>> {
    let mut results = Vec::with_capacity(count);

    for request_index in 0..count {
        let start = Instant::now();
        let response = client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;
        let status = response.status().as_u16();
        response.bytes().await?;

        results.push(RequestResult {
            request_index,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
            status,
        });
    }

    Ok(results)
}

/// Groups results by status code, ordered by status
pub fn summarize(results: &[RequestResult]) -> Vec<StatusSummary> {
    let mut by_status: BTreeMap<u16, Vec<f64>> = BTreeMap::new();
    for result in results {
        by_status.entry(result.status).or_default().push(result.elapsed_ms);
    }

    by_status
        .into_iter()
        .map(|(status, timings)| {
            let count = timings.len();
            let min_ms = timings.iter().copied().fold(f64::INFINITY, f64::min);
            let max_ms = timings.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let avg_ms = timings.iter().sum::<f64>() / count as f64;
            StatusSummary {
                status,
                count,
                min_ms,
                max_ms,
                avg_ms,
            }
        })
        .collect()
}

/// Writes `<endpoint>--<timestamp>.json` into `dir` and returns its path
pub fn write_report(
    dir: &Path,
    endpoint: &str,
    results: &[RequestResult],
) -> anyhow::Result<PathBuf> {
    let path = dir.join(format!(
        "{}--{}.json",
        endpoint,
        Utc::now().format("%Y%m%d%H%M%S%3f")
    ));
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    Ok(path)
}
