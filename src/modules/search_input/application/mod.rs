pub mod classifier;
pub mod service;

pub use classifier::{
    classify_token_balances, classify_token_holders, ClassificationError, ClassifiedInput,
};
pub use service::SearchInputService;
