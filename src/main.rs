use std::process;
use tracing::error;

mod config;
mod errors;
mod extract;
mod fetch;
mod filter;
mod logging;
mod pipeline;
mod scheduler;
mod spreadsheets;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::extract::{DetailExtractor, SummaryExtractor};
use crate::fetch::{HttpFetcher, RetryPolicy};
use crate::filter::exclude_structure;
use crate::pipeline::Pipeline;
use crate::scheduler::DailySchedule;
use crate::spreadsheets::XlsxSink;

fn main() {
    let config = AppConfig::load("config.toml");
    logging::init(&config.log_file);

    let policy = RetryPolicy {
        max_attempts: config.max_attempts,
        interval: config.retry_interval,
    };
    let fetcher = match HttpFetcher::new(config.request_timeout, policy) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!("HTTP client init failed: {e}");
            process::exit(1);
        }
    };

    let summaries = match SummaryExtractor::new(&config.base_url) {
        Ok(extractor) => extractor,
        Err(e) => {
            error!("Summary extractor init failed: {e}");
            process::exit(1);
        }
    };
    let details = match DetailExtractor::new() {
        Ok(extractor) => extractor,
        Err(e) => {
            error!("Detail extractor init failed: {e}");
            process::exit(1);
        }
    };

    let sink = XlsxSink::new(config.output_file.clone());

    let pipeline = Pipeline::new(
        config.search_url.clone(),
        &fetcher,
        summaries,
        details,
        Box::new(exclude_structure(config.exclude_structure.clone())),
        &sink,
    );

    DailySchedule::new(config.schedule_at, config.poll_interval).run_forever(|| pipeline.run());
}
