// src/tests/pipeline_tests.rs
//
// Full pipeline runs against canned documents: a fake fetcher serves
// HTML from memory and a fake sink records what would have been
// written, so nothing touches the network or the filesystem.

use crate::errors::ScrapeError;
use crate::extract::{DetailExtractor, Listing, SummaryExtractor, NO_INFO};
use crate::fetch::PageFetcher;
use crate::filter::exclude_structure;
use crate::pipeline::{Pipeline, RecordSink};
use std::cell::RefCell;
use std::collections::HashMap;

const BASE: &str = "https://example.test";
const SEARCH: &str = "https://example.test/search";

struct FakeFetcher {
    pages: HashMap<String, String>,
}

impl FakeFetcher {
    fn new(pages: &[(&str, String)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, body)| (url.to_string(), body.clone()))
                .collect(),
        }
    }
}

impl PageFetcher for FakeFetcher {
    fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        // Any unregistered URL behaves like a fetch whose retries were
        // exhausted.
        self.pages.get(url).cloned().ok_or(ScrapeError::HttpStatus {
            status: 503,
            url: url.to_string(),
        })
    }
}

#[derive(Default)]
struct FakeSink {
    writes: RefCell<Vec<Vec<Listing>>>,
}

impl RecordSink for FakeSink {
    fn write(&self, records: &[Listing]) -> Result<(), ScrapeError> {
        self.writes.borrow_mut().push(records.to_vec());
        Ok(())
    }
}

fn summary_unit(name: &str, href: &str) -> String {
    format!(
        r#"<div class="property_unit-content">
             <div class="property_unit-title">{name}</div>
             <div class="property_unit-body">
               <div><span class="price">8.5万円</span><span class="madori">1LDK</span></div>
               <div>山手線/恵比寿駅 歩5分、東急東横線/代官山駅 歩7分</div>
             </div>
             <a class="js-物件概要" href="{href}">詳細</a>
           </div>"#
    )
}

fn malformed_unit() -> String {
    r#"<div class="property_unit-content"><div class="property_unit-title">名前だけ</div></div>"#
        .to_string()
}

fn detail_page(structure: &str) -> String {
    format!(
        r#"<table class="data_table">
             <tr><th>建物構造</th><td>{structure}</td></tr>
             <tr><th>敷金/礼金</th><td>1ヶ月/1ヶ月</td></tr>
           </table>"#
    )
}

fn build_pipeline<'a>(fetcher: &'a FakeFetcher, sink: &'a FakeSink) -> Pipeline<'a> {
    Pipeline::new(
        SEARCH.to_string(),
        fetcher,
        SummaryExtractor::new(BASE).unwrap(),
        DetailExtractor::new().unwrap(),
        Box::new(exclude_structure("木造".into())),
        sink,
    )
}

#[test]
fn merges_details_and_filters_excluded_structures() {
    // Two valid units plus one malformed; one detail page is wood
    // construction and must be filtered out.
    let index = format!(
        "{}{}{}",
        summary_unit("木造の物件", "/bukken/wood/"),
        malformed_unit(),
        summary_unit("コンクリの物件", "/bukken/rc/"),
    );
    let fetcher = FakeFetcher::new(&[
        (SEARCH, index),
        ("https://example.test/bukken/wood/", detail_page("木造アパート")),
        ("https://example.test/bukken/rc/", detail_page("RC造")),
    ]);
    let sink = FakeSink::default();

    build_pipeline(&fetcher, &sink).run();

    let writes = sink.writes.borrow();
    assert_eq!(writes.len(), 1);
    let records = &writes[0];
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "コンクリの物件");
    assert_eq!(records[0].structure, "RC造");
    assert_eq!(records[0].deposit, "1ヶ月/1ヶ月");
}

#[test]
fn index_fetch_failure_never_reaches_the_sink() {
    let fetcher = FakeFetcher::new(&[]);
    let sink = FakeSink::default();

    build_pipeline(&fetcher, &sink).run();

    assert!(sink.writes.borrow().is_empty());
}

#[test]
fn empty_index_page_never_reaches_the_sink() {
    let fetcher = FakeFetcher::new(&[(SEARCH, "<html><body></body></html>".to_string())]);
    let sink = FakeSink::default();

    build_pipeline(&fetcher, &sink).run();

    assert!(sink.writes.borrow().is_empty());
}

#[test]
fn failed_detail_fetch_drops_only_that_record() {
    // /bukken/b/ is not registered, so its fetch fails; the record is
    // dropped rather than written with sentinel details.
    let index = format!(
        "{}{}",
        summary_unit("物件あ", "/bukken/a/"),
        summary_unit("物件い", "/bukken/b/"),
    );
    let fetcher = FakeFetcher::new(&[
        (SEARCH, index),
        ("https://example.test/bukken/a/", detail_page("鉄骨造")),
    ]);
    let sink = FakeSink::default();

    build_pipeline(&fetcher, &sink).run();

    let writes = sink.writes.borrow();
    assert_eq!(writes.len(), 1);
    let records = &writes[0];
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "物件あ");
    assert!(records.iter().all(|r| r.structure != NO_INFO));
}

#[test]
fn summary_order_is_preserved_in_output() {
    let index = format!(
        "{}{}{}",
        summary_unit("一番目", "/bukken/1/"),
        summary_unit("二番目", "/bukken/2/"),
        summary_unit("三番目", "/bukken/3/"),
    );
    let fetcher = FakeFetcher::new(&[
        (SEARCH, index),
        ("https://example.test/bukken/1/", detail_page("RC造")),
        ("https://example.test/bukken/2/", detail_page("鉄骨造")),
        ("https://example.test/bukken/3/", detail_page("SRC造")),
    ]);
    let sink = FakeSink::default();

    build_pipeline(&fetcher, &sink).run();

    let writes = sink.writes.borrow();
    let names: Vec<&str> = writes[0].iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["一番目", "二番目", "三番目"]);
}

#[test]
fn identical_inputs_produce_identical_output() {
    let index = format!(
        "{}{}",
        summary_unit("物件あ", "/bukken/a/"),
        summary_unit("物件い", "/bukken/b/"),
    );
    let fetcher = FakeFetcher::new(&[
        (SEARCH, index),
        ("https://example.test/bukken/a/", detail_page("RC造")),
        ("https://example.test/bukken/b/", detail_page("鉄骨造")),
    ]);
    let sink = FakeSink::default();
    let pipeline = build_pipeline(&fetcher, &sink);

    pipeline.run();
    pipeline.run();

    let writes = sink.writes.borrow();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0], writes[1]);
}
