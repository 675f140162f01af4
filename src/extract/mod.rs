mod detail;
mod summary;

pub use detail::DetailExtractor;
pub use summary::SummaryExtractor;

/// Placeholder for detail fields the site did not provide.
pub const NO_INFO: &str = "情報なし";

/// One rental listing. Built as a partial record from the search-results
/// page; `structure` and `deposit` hold [`NO_INFO`] until the detail
/// page is merged in.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub name: String,
    pub price: String,
    pub layout: String,
    /// Nearest-station blurbs, in page order.
    pub stations: Vec<String>,
    pub detail_url: String,
    pub structure: String,
    pub deposit: String,
}

impl Listing {
    /// Attach detail-page fields. Happens once per record.
    pub fn merge_details(&mut self, details: DetailFields) {
        self.structure = details.structure;
        self.deposit = details.deposit;
    }
}

/// Supplemental fields scraped from a listing's detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailFields {
    pub structure: String,
    pub deposit: String,
}

impl Default for DetailFields {
    fn default() -> Self {
        Self {
            structure: NO_INFO.to_string(),
            deposit: NO_INFO.to_string(),
        }
    }
}
