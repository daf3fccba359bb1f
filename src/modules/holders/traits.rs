use crate::modules::holders::domain::filters::RequestFilters;
use crate::modules::holders::domain::records::RawRecord;
use crate::modules::holders::domain::source_selector::SourceKind;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use serde::Serialize;

/// Opaque request descriptor handed to a source.
///
/// Carries the selected kind with operands in canonical order, the page
/// size, the blockchain, the request-side filters, and the cursor of the
/// previous page (absent for the first page).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRequest {
    #[serde(flatten)]
    pub kind: SourceKind,
    pub limit: usize,
    pub blockchain: String,
    #[serde(flatten)]
    pub filters: RequestFilters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// One delivered page: raw records plus the opaque cursor for the next
/// page, if one exists.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePage {
    pub records: Vec<RawRecord>,
    pub next_cursor: Option<String>,
}

impl SourcePage {
    pub fn has_next_page(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// The backend pagination contract, consumed but not implemented by the
/// aggregation pipeline. Implementations must request pages strictly
/// sequentially per caller; the aggregator never has two pages of the
/// same generation in flight.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, request: &SourceRequest) -> AppResult<SourcePage>;
}
