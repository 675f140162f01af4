// extract/detail.rs
use super::DetailFields;
use crate::errors::ScrapeError;
use scraper::{Html, Selector};

// Pinned to suumo.jp's current detail-page markup.
const ROWS: &str = "table.data_table tr";
const STRUCTURE_KEY: &str = "構造";
const DEPOSIT_KEY: &str = "敷金";

/// Pulls structure and deposit/key-money out of the detail page's
/// key/value table. Best-effort: anything it cannot find stays at the
/// sentinel default, and extraction itself never fails a run.
pub struct DetailExtractor {
    rows: Selector,
    th: Selector,
    td: Selector,
}

impl DetailExtractor {
    pub fn new() -> Result<Self, ScrapeError> {
        let sel = |css: &str| {
            Selector::parse(css).map_err(|e| ScrapeError::SelectorParse(e.to_string()))
        };

        Ok(Self {
            rows: sel(ROWS)?,
            th: sel("th")?,
            td: sel("td")?,
        })
    }

    pub fn extract(&self, html: &str) -> DetailFields {
        let document = Html::parse_document(html);
        let mut details = DetailFields::default();

        for row in document.select(&self.rows) {
            let header = match row.select(&self.th).next() {
                Some(th) => th,
                None => continue,
            };
            let value = match row.select(&self.td).next() {
                Some(td) => td,
                None => continue,
            };

            let key = header.text().collect::<String>();
            if key.contains(STRUCTURE_KEY) {
                details.structure = value.text().collect::<String>().trim().to_string();
            } else if key.contains(DEPOSIT_KEY) {
                details.deposit = value.text().collect::<String>().trim().to_string();
            }
        }

        details
    }
}
