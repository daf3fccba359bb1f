pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::store::{SearchStateStore, SetOptions};
pub use domain::entities::{InputType, SearchMode, SearchQuery, SearchQueryUpdate, MAX_IDENTIFIERS};
pub use infrastructure::url_params::{InMemoryUrlAdapter, UrlAdapter};
