// extract/summary.rs
use super::{Listing, NO_INFO};
use crate::errors::ScrapeError;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

// Pinned to suumo.jp's current search-results markup.
const UNIT: &str = "div.property_unit-content";
const TITLE: &str = "div.property_unit-title";
const PRICE: &str = "span.price";
const LAYOUT: &str = "span.madori";
const BODY: &str = "div.property_unit-body";
const DETAIL_LINK: &str = "a.js-物件概要";
const STATION_DELIMITER: char = '、';

/// Parses the search-results page into partial [`Listing`]s.
pub struct SummaryExtractor {
    base: Url,
    unit: Selector,
    title: Selector,
    price: Selector,
    layout: Selector,
    body: Selector,
    body_div: Selector,
    detail_link: Selector,
}

fn sel(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::SelectorParse(e.to_string()))
}

impl SummaryExtractor {
    pub fn new(base_url: &str) -> Result<Self, ScrapeError> {
        Ok(Self {
            base: Url::parse(base_url).map_err(|e| ScrapeError::UrlParse(e.to_string()))?,
            unit: sel(UNIT)?,
            title: sel(TITLE)?,
            price: sel(PRICE)?,
            layout: sel(LAYOUT)?,
            body: sel(BODY)?,
            body_div: sel("div")?,
            detail_link: sel(DETAIL_LINK)?,
        })
    }

    /// One partial record per well-formed listing unit. A unit missing
    /// any required field is skipped with a warning; the rest of the
    /// batch is unaffected. Empty result means the page had no usable
    /// listings, which the caller treats as terminal for the run.
    pub fn extract(&self, html: &str) -> Vec<Listing> {
        let document = Html::parse_document(html);
        let mut listings = Vec::new();

        for unit in document.select(&self.unit) {
            match self.extract_unit(unit) {
                Ok(listing) => listings.push(listing),
                Err(reason) => warn!("Failed to extract property: {reason}"),
            }
        }

        listings
    }

    fn extract_unit(&self, unit: ElementRef<'_>) -> Result<Listing, &'static str> {
        let name = text_of(unit, &self.title).ok_or("missing title")?;
        let price = text_of(unit, &self.price).ok_or("missing price")?;
        let layout = text_of(unit, &self.layout).ok_or("missing layout")?;

        // The station info sits in the second div of the unit body.
        let body = unit.select(&self.body).next().ok_or("missing unit body")?;
        let station_block = body
            .select(&self.body_div)
            .nth(1)
            .ok_or("missing station block")?;
        let stations: Vec<String> = element_text(station_block)
            .split(STATION_DELIMITER)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let href = unit
            .select(&self.detail_link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or("missing detail link")?;
        let detail_url = self
            .base
            .join(href)
            .map_err(|_| "unresolvable detail link")?
            .to_string();

        Ok(Listing {
            name,
            price,
            layout,
            stations,
            detail_url,
            structure: NO_INFO.to_string(),
            deposit: NO_INFO.to_string(),
        })
    }
}

fn text_of(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(element_text)
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
