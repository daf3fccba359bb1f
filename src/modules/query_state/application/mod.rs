pub mod store;

pub use store::{SearchStateStore, SetOptions};
