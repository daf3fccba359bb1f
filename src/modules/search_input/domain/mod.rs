pub mod mention;
pub mod tokenizer;

pub use mention::{InputSegment, Mention, MentionSpan};
pub use tokenizer::tokenize;
