pub mod holders;
pub mod query_state;
pub mod search_input;
