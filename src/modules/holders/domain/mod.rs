pub mod filters;
pub mod records;
pub mod source_selector;

pub use filters::{FilterSet, RequestFilters};
pub use records::{LoaderStats, Owner, RawRecord, RecordKind, ResultRecord};
pub use source_selector::{select_source, RankedToken, SourceKind, SourceOperand};
