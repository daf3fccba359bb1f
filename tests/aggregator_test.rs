use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokenscope::modules::holders::domain::records::TokenRow;
use tokenscope::modules::holders::{
    select_source, FilterSet, HoldersAggregator, Owner, RawRecord, RecordSource, SourcePage,
    SourceRequest, MIN_MATCHING, PAGE_SIZE,
};
use tokenscope::shared::errors::{AppError, AppResult};

/// Source that replays a fixed list of page results and records every
/// request it receives.
struct ScriptedSource {
    pages: Mutex<VecDeque<AppResult<SourcePage>>>,
    requests: Mutex<Vec<SourceRequest>>,
}

impl ScriptedSource {
    fn new(pages: Vec<AppResult<SourcePage>>) -> Arc<Self> {
        Arc::new(Self {
            pages: Mutex::new(pages.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn request_cursor(&self, index: usize) -> Option<String> {
        self.requests.lock().unwrap()[index].cursor.clone()
    }
}

#[async_trait]
impl RecordSource for ScriptedSource {
    async fn fetch(&self, request: &SourceRequest) -> AppResult<SourcePage> {
        self.requests.lock().unwrap().push(request.clone());
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(SourcePage {
                    records: Vec::new(),
                    next_cursor: None,
                })
            })
    }
}

fn token_record(identity: &str, blockchain: &str, token_type: &str) -> RawRecord {
    RawRecord::Token(TokenRow {
        token_address: "0xdead".to_string(),
        token_id: "1".to_string(),
        blockchain: blockchain.to_string(),
        token_type: token_type.to_string(),
        formatted_amount: None,
        owner: Owner {
            identity: identity.to_string(),
            ..Default::default()
        },
    })
}

fn eth_records(prefix: &str, count: usize) -> Vec<RawRecord> {
    (0..count)
        .map(|i| token_record(&format!("{prefix}{i}"), "ethereum", "ERC721"))
        .collect()
}

fn page(records: Vec<RawRecord>, next_cursor: Option<&str>) -> AppResult<SourcePage> {
    Ok(SourcePage {
        records,
        next_cursor: next_cursor.map(str::to_string),
    })
}

fn aggregator_for(source: Arc<ScriptedSource>) -> HoldersAggregator {
    let mut aggregator = HoldersAggregator::new(source);
    let kind = select_source(&["0xdead".to_string()], &[]);
    aggregator.set_query(kind, "ethereum", FilterSet::default());
    aggregator
}

#[tokio::test]
async fn test_backfills_until_min_matching() {
    let source = ScriptedSource::new(vec![
        page(eth_records("a", 10), Some("c1")),
        page(eth_records("b", 15), None),
    ]);
    let mut aggregator = aggregator_for(source.clone());

    aggregator.run().await.unwrap();

    assert_eq!(aggregator.records().len(), 25);
    assert_eq!(aggregator.stats().matching, 25);
    assert_eq!(aggregator.stats().total, PAGE_SIZE + 25);
    assert!(!aggregator.has_next_page());
    assert_eq!(source.request_count(), 2);
    assert_eq!(source.request_cursor(0), None);
    assert_eq!(source.request_cursor(1), Some("c1".to_string()));
}

#[tokio::test]
async fn test_stops_at_min_matching_with_more_pages_available() {
    let source = ScriptedSource::new(vec![page(eth_records("a", 25), Some("c1"))]);
    let mut aggregator = aggregator_for(source.clone());

    aggregator.run().await.unwrap();

    assert!(aggregator.stats().matching >= MIN_MATCHING);
    assert_eq!(source.request_count(), 1);
    assert!(aggregator.has_next_page());
    assert!(aggregator.state().is_idle());
}

#[tokio::test]
async fn test_stops_at_source_exhaustion_below_min_matching() {
    let source = ScriptedSource::new(vec![page(eth_records("a", 5), None)]);
    let mut aggregator = aggregator_for(source.clone());

    aggregator.run().await.unwrap();

    assert_eq!(aggregator.stats().matching, 5);
    assert_eq!(source.request_count(), 1);
    assert!(!aggregator.has_next_page());
}

#[tokio::test]
async fn test_filters_and_dedup_applied_per_page() {
    let mut records = eth_records("a", 3);
    records.push(token_record("poly0", "polygon", "ERC721"));
    records.push(token_record("a0", "ethereum", "ERC721")); // duplicate identity
    records.push(token_record("", "ethereum", "ERC721")); // empty identity
    let source = ScriptedSource::new(vec![page(records, None)]);

    let mut aggregator = HoldersAggregator::new(source);
    let kind = select_source(&["0xdead".to_string()], &[]);
    aggregator.set_query(
        kind,
        "ethereum",
        FilterSet::new(vec!["ethereum".to_string()]),
    );
    aggregator.run().await.unwrap();

    assert_eq!(aggregator.stats().matching, 3);
    assert_eq!(aggregator.stats().total, PAGE_SIZE + 6);
    assert!(aggregator
        .records()
        .iter()
        .all(|r| r.blockchain == "ethereum"));
}

#[tokio::test]
async fn test_redelivered_page_adds_nothing() {
    let source = ScriptedSource::new(vec![]);
    let mut aggregator = aggregator_for(source);
    let generation = aggregator.generation();
    let page = SourcePage {
        records: eth_records("a", 4),
        next_cursor: None,
    };

    assert!(aggregator.deliver_page(generation, page.clone()));
    assert_eq!(aggregator.stats().matching, 4);

    assert!(aggregator.deliver_page(generation, page));
    assert_eq!(aggregator.stats().matching, 4);
    assert_eq!(aggregator.records().len(), 4);
}

#[tokio::test]
async fn test_stale_generation_page_is_discarded() {
    let source = ScriptedSource::new(vec![]);
    let mut aggregator = aggregator_for(source);
    let stale = aggregator.generation();

    let kind = select_source(&["0xbeef".to_string()], &[]);
    aggregator.set_query(kind, "ethereum", FilterSet::default());

    let delivered = aggregator.deliver_page(
        stale,
        SourcePage {
            records: eth_records("a", 4),
            next_cursor: Some("c1".to_string()),
        },
    );

    assert!(!delivered);
    assert!(aggregator.records().is_empty());
    assert_eq!(aggregator.stats().matching, 0);
    assert!(!aggregator.has_next_page());
}

#[tokio::test]
async fn test_fetch_error_keeps_partial_results() {
    let source = ScriptedSource::new(vec![
        page(eth_records("a", 5), Some("c1")),
        Err(AppError::ApiError("backend unavailable".to_string())),
    ]);
    let mut aggregator = aggregator_for(source);

    let result = aggregator.run().await;

    assert!(result.is_err());
    assert!(aggregator.state().is_failed());
    assert_eq!(aggregator.records().len(), 5);
}

#[tokio::test]
async fn test_load_more_fetches_one_page_then_stops() {
    let source = ScriptedSource::new(vec![
        page(eth_records("a", 25), Some("c1")),
        page(eth_records("b", 5), None),
    ]);
    let mut aggregator = aggregator_for(source.clone());
    aggregator.run().await.unwrap();

    let added = aggregator.load_more().await.unwrap();
    assert_eq!(added, 5);
    assert_eq!(aggregator.records().len(), 30);
    assert!(!aggregator.has_next_page());

    let added = aggregator.load_more().await.unwrap();
    assert_eq!(added, 0);
    assert_eq!(source.request_count(), 2);
}

#[tokio::test]
async fn test_no_query_means_no_fetch() {
    let source = ScriptedSource::new(vec![]);
    let mut aggregator = HoldersAggregator::new(source.clone());
    aggregator.set_query(None, "ethereum", FilterSet::default());

    aggregator.run().await.unwrap();

    assert_eq!(source.request_count(), 0);
    assert!(aggregator.records().is_empty());
}
