//! Token ownership search pipeline: free-text input is tokenized and
//! classified into a structured query, the query is cached per search
//! mode and mirrored into URL parameters, and holder records are fetched
//! page by page with filtering, dedup and backfill.

pub mod modules;
pub mod shared;

pub use modules::holders::{HoldersAggregator, RecordSource};
pub use modules::query_state::application::store::SearchStateStore;
pub use modules::search_input::application::service::SearchInputService;
pub use shared::errors::{AppError, AppResult};
