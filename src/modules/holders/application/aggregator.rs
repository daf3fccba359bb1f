use crate::modules::holders::domain::filters::FilterSet;
use crate::modules::holders::domain::records::{LoaderStats, ResultRecord};
use crate::modules::holders::domain::source_selector::SourceKind;
use crate::modules::holders::traits::{RecordSource, SourcePage, SourceRequest};
use crate::shared::errors::{AppError, AppResult};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Page size requested from the source.
pub const PAGE_SIZE: usize = 200;
/// Minimum number of matching (post-filter, post-dedup) records before
/// auto-fetching stops.
pub const MIN_MATCHING: usize = 20;

#[derive(Debug, Clone)]
pub enum AggregatorState {
    Idle,
    Fetching,
    /// Recoverable: partial results are kept, the caller may re-issue the
    /// same generation's fetch.
    Failed(AppError),
}

impl AggregatorState {
    pub fn is_idle(&self) -> bool {
        matches!(self, AggregatorState::Idle)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, AggregatorState::Failed(_))
    }
}

/// Generation-counted fetch/merge/dedup/backfill loop over a
/// [`RecordSource`].
///
/// The dedup set and result sequence are exclusively owned by the
/// aggregator; within one generation pages are requested strictly
/// sequentially and appended in arrival order, so the displayed order is
/// deterministic given deterministic source pagination. A page delivered
/// for a generation that is no longer active is discarded unconditionally.
pub struct HoldersAggregator {
    source: Arc<dyn RecordSource>,
    generation: u64,
    state: AggregatorState,
    request: Option<SourceRequest>,
    filters: FilterSet,
    has_next_page: bool,
    pages_delivered: usize,
    records: Vec<ResultRecord>,
    seen_owners: HashSet<String>,
    stats: LoaderStats,
}

impl HoldersAggregator {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self {
            source,
            generation: 0,
            state: AggregatorState::Idle,
            request: None,
            filters: FilterSet::default(),
            has_next_page: false,
            pages_delivered: 0,
            records: Vec::new(),
            seen_owners: HashSet::new(),
            stats: LoaderStats {
                total: PAGE_SIZE,
                matching: 0,
            },
        }
    }

    /// Hard reset: every query-defining change (address list, blockchain,
    /// filters, mode) lands here. Bumps the generation synchronously so
    /// any in-flight delivery becomes detectably stale, clears the result
    /// sequence and dedup set, and re-seeds the loader stats.
    pub fn set_query(
        &mut self,
        kind: Option<SourceKind>,
        blockchain: &str,
        filters: FilterSet,
    ) -> u64 {
        self.generation += 1;
        self.records.clear();
        self.seen_owners.clear();
        self.stats = LoaderStats {
            total: PAGE_SIZE,
            matching: 0,
        };
        self.has_next_page = false;
        self.pages_delivered = 0;
        self.state = AggregatorState::Idle;
        self.request = kind.map(|kind| SourceRequest {
            kind,
            limit: PAGE_SIZE,
            blockchain: blockchain.to_string(),
            filters: filters.request_filters(),
            cursor: None,
        });
        self.filters = filters;
        debug!(generation = self.generation, "aggregator reset");
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &AggregatorState {
        &self.state
    }

    /// Append-only result sequence for the active generation.
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn stats(&self) -> LoaderStats {
        self.stats
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// Drive the auto-fetch loop: request pages sequentially until the
    /// matching count for this generation reaches [`MIN_MATCHING`] or the
    /// source is exhausted. This guarantees the consumer never sees a
    /// near-empty filtered page purely because the filter rejected most
    /// of a raw page while more raw data exists.
    pub async fn run(&mut self) -> AppResult<()> {
        let generation = self.generation;
        loop {
            let Some(request) = self.request.clone() else {
                return Ok(());
            };
            if self.pages_delivered > 0 && !self.has_next_page {
                break;
            }

            self.state = AggregatorState::Fetching;
            let page = match self.source.fetch(&request).await {
                Ok(page) => page,
                Err(err) => {
                    self.state = AggregatorState::Failed(err.clone());
                    return Err(err);
                }
            };

            if !self.deliver_page(generation, page) {
                // A newer query owns the aggregator now; leave its state
                // alone.
                return Ok(());
            }

            if self.stats.matching >= MIN_MATCHING {
                break;
            }
        }
        self.state = AggregatorState::Idle;
        Ok(())
    }

    /// Fetch one further page on explicit caller demand. Returns the
    /// number of matching records the page contributed.
    pub async fn load_more(&mut self) -> AppResult<usize> {
        if self.pages_delivered > 0 && !self.has_next_page {
            return Ok(0);
        }
        let Some(request) = self.request.clone() else {
            return Ok(0);
        };

        let generation = self.generation;
        self.state = AggregatorState::Fetching;
        match self.source.fetch(&request).await {
            Ok(page) => {
                let before = self.stats.matching;
                if self.deliver_page(generation, page) {
                    self.state = AggregatorState::Idle;
                    Ok(self.stats.matching - before)
                } else {
                    Ok(0)
                }
            }
            Err(err) => {
                self.state = AggregatorState::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Merge one delivered page into the aggregator, if it still belongs
    /// to the active generation. Returns false for stale deliveries,
    /// which are discarded without any state mutation.
    pub fn deliver_page(&mut self, generation: u64, page: SourcePage) -> bool {
        if generation != self.generation {
            debug!(
                stale = generation,
                active = self.generation,
                "discarding stale page delivery"
            );
            return false;
        }

        let has_next_page = page.has_next_page();
        let raw_page_size = page.records.len();
        let mut survivors = 0usize;

        for raw in page.records {
            let record = ResultRecord::from(raw);
            if !self.filters.matches(&record) {
                continue;
            }
            let identity = record.owner.identity.clone();
            if identity.is_empty() || self.seen_owners.contains(&identity) {
                continue;
            }
            self.seen_owners.insert(identity);
            self.records.push(record);
            survivors += 1;
        }

        self.stats.total += raw_page_size;
        self.stats.matching += survivors;
        self.has_next_page = has_next_page;
        self.pages_delivered += 1;
        if let Some(request) = &mut self.request {
            request.cursor = page.next_cursor;
        }

        debug!(
            generation,
            raw_page_size, survivors, "page merged into result sequence"
        );
        true
    }
}
