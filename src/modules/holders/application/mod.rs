pub mod aggregator;

pub use aggregator::{AggregatorState, HoldersAggregator, MIN_MATCHING, PAGE_SIZE};
