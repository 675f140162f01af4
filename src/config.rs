// config.rs
use chrono::NaiveTime;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything the composition root needs to wire the scraper together.
/// Defaults mirror the production deployment; a `config.toml` next to
/// the binary can override individual fields.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Search-results page to scrape.
    pub search_url: String,
    /// Base for resolving relative detail-page hrefs.
    pub base_url: String,
    pub output_file: PathBuf,
    pub log_file: PathBuf,
    /// Local wall-clock time of the daily run.
    pub schedule_at: NaiveTime,
    pub poll_interval: Duration,
    pub max_attempts: u32,
    pub retry_interval: Duration,
    pub request_timeout: Duration,
    /// Listings whose structure mentions this are dropped.
    pub exclude_structure: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search_url:
                "https://suumo.jp/jj/chintai/ichiran/FR301FC001/?ar=030&bs=040&ta=13&sc=13113"
                    .to_string(),
            base_url: "https://suumo.jp".to_string(),
            output_file: PathBuf::from("賃貸物件情報.xlsx"),
            log_file: PathBuf::from("scraping.log"),
            schedule_at: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            poll_interval: Duration::from_secs(60),
            max_attempts: 3,
            retry_interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            exclude_structure: "木造".to_string(),
        }
    }
}

/// On-disk shape of `config.toml`. Every field is optional; anything
/// absent keeps its default.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    search_url: Option<String>,
    base_url: Option<String>,
    output_file: Option<PathBuf>,
    log_file: Option<PathBuf>,
    /// "HH:MM", local time.
    schedule_at: Option<String>,
    poll_interval_secs: Option<u64>,
    max_attempts: Option<u32>,
    retry_interval_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
    exclude_structure: Option<String>,
}

impl AppConfig {
    /// Defaults merged with `path` if it exists. Runs before logging is
    /// up, so problems go to stderr and the defaults stand.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let mut cfg = Self::default();

        let data = match fs::read_to_string(path.as_ref()) {
            Ok(data) => data,
            Err(_) => return cfg,
        };

        let file: FileConfig = match toml::from_str(&data) {
            Ok(file) => file,
            Err(e) => {
                eprintln!(
                    "Ignoring malformed config {}: {e}",
                    path.as_ref().display()
                );
                return cfg;
            }
        };

        cfg.apply(file);
        cfg
    }

    fn apply(&mut self, file: FileConfig) {
        if let Some(v) = file.search_url {
            self.search_url = v;
        }
        if let Some(v) = file.base_url {
            self.base_url = v;
        }
        if let Some(v) = file.output_file {
            self.output_file = v;
        }
        if let Some(v) = file.log_file {
            self.log_file = v;
        }
        if let Some(v) = file.schedule_at {
            match NaiveTime::parse_from_str(&v, "%H:%M") {
                Ok(t) => self.schedule_at = t,
                Err(e) => eprintln!("Ignoring bad schedule_at {v:?}: {e}"),
            }
        }
        if let Some(v) = file.poll_interval_secs {
            self.poll_interval = Duration::from_secs(v);
        }
        if let Some(v) = file.max_attempts {
            self.max_attempts = v;
        }
        if let Some(v) = file.retry_interval_secs {
            self.retry_interval = Duration::from_secs(v);
        }
        if let Some(v) = file.request_timeout_secs {
            self.request_timeout = Duration::from_secs(v);
        }
        if let Some(v) = file.exclude_structure {
            self.exclude_structure = v;
        }
    }
}
