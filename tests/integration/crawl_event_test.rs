// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{MockSite, EVENT_ID};
use lotcrawl::application::use_cases::crawl_event_use_case::CrawlEventUseCase;
use lotcrawl::config::settings::ErrorPolicy;
use lotcrawl::domain::models::event::Event;
use lotcrawl::domain::models::lot::LotField;
use lotcrawl::engines::reqwest_engine::ReqwestEngine;
use lotcrawl::infrastructure::report::{CsvReporter, JsonReporter};
use lotcrawl::utils::errors::CrawlError;

async fn three_lot_site() -> MockSite {
    let site = MockSite::start().await;
    site.listing(0, &[101, 102], 1).await;
    site.listing(1, &[102, 103], 1).await;
    site.listing(2, &[], 0).await;
    site.lot(101, "Oak Dining Table", "125.00").await;
    site.lot(102, "Brass Floor Lamp", "40.00").await;
    site.lot(103, "Walnut Bookcase", "310.50").await;
    site
}

#[tokio::test]
async fn test_crawl_event_end_to_end() {
    let site = three_lot_site().await;
    let settings = site.settings();
    let engine = ReqwestEngine::new(&settings.http).unwrap();
    let use_case = CrawlEventUseCase::from_settings(engine, &settings).unwrap();

    let report = use_case.run(&Event::new(EVENT_ID)).await.unwrap();

    assert_eq!(report.discovery.last_page_hint, 1);
    assert_eq!(report.discovery.pages_walked, 3);
    assert_eq!(report.results.len(), 3);

    let urls: Vec<&str> = report.results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            site.lot_url(101).as_str(),
            site.lot_url(102).as_str(),
            site.lot_url(103).as_str()
        ]
    );

    let first = report.results.first().unwrap();
    assert_eq!(first.get(LotField::Title), Some("Oak Dining Table"));
    assert_eq!(first.get(LotField::Bid), Some("125.00"));
    assert_eq!(first.get(LotField::NumBids), Some("2"));
    assert_eq!(first.get(LotField::HighBidder), Some("bidder101"));
    assert_eq!(first.get(LotField::Seller), None);
    assert_eq!(first.get(LotField::LotNum), Some("101"));
    assert_eq!(first.get(LotField::SystemId), Some("9101"));
    assert_eq!(first.get(LotField::StartDate), Some("2024-05-01 09:00"));
    assert_eq!(first.get(LotField::EndDate), Some("2024-05-08 19:00"));
    assert_eq!(first.get(LotField::Desc), Some("is"));
}

#[tokio::test]
async fn test_full_description_setting() {
    let site = three_lot_site().await;
    let mut settings = site.settings();
    settings.extract.full_description = true;
    let engine = ReqwestEngine::new(&settings.http).unwrap();
    let use_case = CrawlEventUseCase::from_settings(engine, &settings).unwrap();

    let report = use_case.run(&Event::new(EVENT_ID)).await.unwrap();

    assert_eq!(
        report.results.first().unwrap().get(LotField::Desc),
        Some("Lot 101 sold as is")
    );
}

#[tokio::test]
async fn test_reports_written_from_crawl() {
    let site = three_lot_site().await;
    let settings = site.settings();
    let engine = ReqwestEngine::new(&settings.http).unwrap();
    let use_case = CrawlEventUseCase::from_settings(engine, &settings).unwrap();
    let report = use_case.run(&Event::new(EVENT_ID)).await.unwrap();

    let mut csv = Vec::new();
    CsvReporter::write(&report.results, &mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        r#""url","title","bid","num_bids","high_bidder","seller","lot_num","system_id","start_date","end_date","desc""#
    );
    assert_eq!(lines.len(), 4);
    assert!(lines[3].contains(r#""Walnut Bookcase",310.50,2,"bidder103","""#));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("event.json");
    JsonReporter::write_file(&report.results, &path).unwrap();
    assert_eq!(JsonReporter::read_file(&path).unwrap(), report.results);
}

#[tokio::test]
async fn test_skip_errors_continues_past_broken_lot() {
    let site = MockSite::start().await;
    site.listing(0, &[1, 2, 3], 0).await;
    site.listing(1, &[], 0).await;
    site.lot(1, "First", "1.00").await;
    site.failing_lot(2, 500).await;
    site.lot(3, "Third", "3.00").await;

    let mut settings = site.settings();
    settings.crawl.on_error = ErrorPolicy::Skip;
    let engine = ReqwestEngine::new(&settings.http).unwrap();
    let use_case = CrawlEventUseCase::from_settings(engine, &settings).unwrap();

    let report = use_case.run(&Event::new(EVENT_ID)).await.unwrap();

    let titles: Vec<_> = report
        .results
        .iter()
        .filter_map(|r| r.get(LotField::Title))
        .collect();
    assert_eq!(titles, vec!["First", "Third"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].url.as_str(), site.lot_url(2));
}

#[tokio::test]
async fn test_broken_lot_aborts_by_default() {
    let site = MockSite::start().await;
    site.listing(0, &[1, 2], 0).await;
    site.listing(1, &[], 0).await;
    site.lot(1, "First", "1.00").await;
    site.failing_lot(2, 503).await;

    let settings = site.settings();
    let engine = ReqwestEngine::new(&settings.http).unwrap();
    let use_case = CrawlEventUseCase::from_settings(engine, &settings).unwrap();

    let err = use_case.run(&Event::new(EVENT_ID)).await.unwrap_err();

    match err {
        CrawlError::Fetch { url, source } => {
            assert_eq!(url, site.lot_url(2));
            assert_eq!(source.status(), Some(503));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_event_cannot_produce_csv() {
    let site = MockSite::start().await;
    site.listing(0, &[], 0).await;

    let settings = site.settings();
    let engine = ReqwestEngine::new(&settings.http).unwrap();
    let use_case = CrawlEventUseCase::from_settings(engine, &settings).unwrap();

    let report = use_case.run(&Event::new(EVENT_ID)).await.unwrap();
    assert!(report.results.is_empty());
    assert_eq!(report.discovery.pages_walked, 1);

    let mut out = Vec::new();
    let err = CsvReporter::write(&report.results, &mut out).unwrap_err();
    assert!(matches!(err, CrawlError::EmptyResult));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_concurrent_crawl_preserves_order() {
    let site = MockSite::start().await;
    let ids: Vec<u32> = (1..=10).collect();
    site.listing(0, &ids, 0).await;
    site.listing(1, &[], 0).await;
    for id in &ids {
        site.lot(*id, &format!("Item {id}"), "5.00").await;
    }

    let mut settings = site.settings();
    settings.crawl.concurrency = 4;
    let engine = ReqwestEngine::new(&settings.http).unwrap();
    let use_case = CrawlEventUseCase::from_settings(engine, &settings).unwrap();

    let report = use_case.run(&Event::new(EVENT_ID)).await.unwrap();

    let titles: Vec<String> = report
        .results
        .iter()
        .filter_map(|r| r.get(LotField::Title).map(str::to_string))
        .collect();
    let expected: Vec<String> = ids.iter().map(|id| format!("Item {id}")).collect();
    assert_eq!(titles, expected);
}
