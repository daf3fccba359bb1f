pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod traits;

// Re-exports for easy external access
pub use application::aggregator::{
    AggregatorState, HoldersAggregator, MIN_MATCHING, PAGE_SIZE,
};
pub use domain::filters::{FilterSet, RequestFilters};
pub use domain::records::{LoaderStats, Owner, RawRecord, RecordKind, ResultRecord};
pub use domain::source_selector::{select_source, RankedToken, SourceKind, SourceOperand};
pub use traits::{RecordSource, SourcePage, SourceRequest};
