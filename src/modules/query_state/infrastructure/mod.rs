pub mod url_params;

pub use url_params::{InMemoryUrlAdapter, UrlAdapter};
