pub mod application;
pub mod domain;

// Re-exports for easy external access
pub use application::classifier::{
    classify_token_balances, classify_token_holders, ClassificationError, ClassifiedInput,
};
pub use application::service::SearchInputService;
pub use domain::mention::{InputSegment, Mention, MentionSpan};
pub use domain::tokenizer::tokenize;
