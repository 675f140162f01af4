// pipeline.rs
use crate::errors::ScrapeError;
use crate::extract::{DetailExtractor, Listing, SummaryExtractor};
use crate::fetch::PageFetcher;
use crate::filter::apply_filter;
use tracing::{error, info, warn};

/// Where the finished record set goes. Production writes a
/// spreadsheet; tests capture the records in memory.
pub trait RecordSink {
    fn write(&self, records: &[Listing]) -> Result<(), ScrapeError>;
}

/// One fetch → extract → merge → filter → sink pass. Holds no state
/// between runs; everything a run produces is local to `run()`.
pub struct Pipeline<'a> {
    search_url: String,
    fetcher: &'a dyn PageFetcher,
    summaries: SummaryExtractor,
    details: DetailExtractor,
    keep: Box<dyn Fn(&Listing) -> bool>,
    sink: &'a dyn RecordSink,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        search_url: String,
        fetcher: &'a dyn PageFetcher,
        summaries: SummaryExtractor,
        details: DetailExtractor,
        keep: Box<dyn Fn(&Listing) -> bool>,
        sink: &'a dyn RecordSink,
    ) -> Self {
        Self {
            search_url,
            fetcher,
            summaries,
            details,
            keep,
            sink,
        }
    }

    /// Retry lives in the fetcher; here a failed index fetch ends the
    /// run and a failed detail fetch drops that one record. Every exit
    /// path returns control to the scheduler.
    pub fn run(&self) {
        info!("Start scraping...");

        let html = match self.fetcher.fetch(&self.search_url) {
            Ok(html) => html,
            Err(e) => {
                error!("Failed to get search results: {e}");
                return;
            }
        };

        let partials = self.summaries.extract(&html);
        if partials.is_empty() {
            warn!("No properties found.");
            return;
        }
        info!("Found {} properties", partials.len());

        let mut records = Vec::with_capacity(partials.len());
        for mut listing in partials {
            let detail_html = match self.fetcher.fetch(&listing.detail_url) {
                Ok(html) => html,
                Err(e) => {
                    warn!("Failed to fetch detail {}: {e}", listing.detail_url);
                    continue;
                }
            };

            listing.merge_details(self.details.extract(&detail_html));
            records.push(listing);
        }

        let kept = apply_filter(records, &self.keep);
        info!("{} records after filtering", kept.len());

        if let Err(e) = self.sink.write(&kept) {
            error!("Failed to persist records: {e}");
        }

        info!("Scraping done.");
    }
}
