// errors.rs
use std::fmt;

/// Errors originating from the fetch layer, the extractors,
/// or the spreadsheet sink.
#[derive(Debug)]
pub enum ScrapeError {
    /// Connection-level failure: DNS, refused connection, timeout.
    Transport(String),
    /// The server answered, but with a non-success status.
    HttpStatus { status: u16, url: String },
    UrlParse(String),
    SelectorParse(String),
    Xlsx(String),
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeError::Transport(msg) => write!(f, "Transport error: {msg}"),
            ScrapeError::HttpStatus { status, url } => write!(f, "HTTP {status} from {url}"),
            ScrapeError::UrlParse(msg) => write!(f, "URL parse error: {msg}"),
            ScrapeError::SelectorParse(msg) => write!(f, "Selector parse error: {msg}"),
            ScrapeError::Xlsx(msg) => write!(f, "Spreadsheet error: {msg}"),
        }
    }
}

impl std::error::Error for ScrapeError {}
