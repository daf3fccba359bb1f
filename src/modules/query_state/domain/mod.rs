pub mod entities;

pub use entities::{InputType, SearchMode, SearchQuery, SearchQueryUpdate};
