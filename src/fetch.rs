// fetch.rs
use crate::errors::ScrapeError;
use reqwest::blocking::Client;
use std::thread;
use std::time::Duration;
use tracing::{error, info};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Page retrieval seam. The pipeline only ever talks to this trait,
/// so tests can substitute an in-memory implementation.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Fixed pause between attempts. Constant, not a backoff.
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            interval: Duration::from_secs(5),
        }
    }
}

/// Blocking HTTP fetcher with bounded retry.
pub struct HttpFetcher {
    client: Client,
    policy: RetryPolicy,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, policy: RetryPolicy) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ScrapeError::Transport(e.to_string()))?;

        Ok(Self { client, policy })
    }

    fn get_once(&self, url: &str) -> Result<String, ScrapeError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScrapeError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        resp.text().map_err(|e| ScrapeError::Transport(e.to_string()))
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        fetch_with_retry(&self.policy, url, || self.get_once(url))
    }
}

/// Runs `attempt` until it succeeds or `policy.max_attempts` tries are
/// spent, pausing `policy.interval` between tries but not after the
/// last one. Transport and HTTP-status failures retry alike.
pub fn fetch_with_retry<T, F>(
    policy: &RetryPolicy,
    url: &str,
    mut attempt: F,
) -> Result<T, ScrapeError>
where
    F: FnMut() -> Result<T, ScrapeError>,
{
    let mut last_err = None;

    for i in 1..=policy.max_attempts {
        match attempt() {
            Ok(body) => return Ok(body),
            Err(e) => {
                error!("Error fetching {url}: {e}");
                last_err = Some(e);

                if i < policy.max_attempts {
                    info!("Retrying after {} seconds...", policy.interval.as_secs());
                    thread::sleep(policy.interval);
                }
            }
        }
    }

    Err(last_err
        .unwrap_or_else(|| ScrapeError::Transport(format!("no attempts made for {url}"))))
}
