use serde::{Deserialize, Serialize};

/// Hard cap on identifiers per query; the UI compares at most two.
pub const MAX_IDENTIFIERS: usize = 2;

/// The two independent search contexts, each with its own cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchMode {
    TokenBalances,
    TokenHolders,
}

/// How the accepted identifiers should be interpreted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputType {
    #[serde(rename = "ADDRESS")]
    Address,
    #[serde(rename = "POAP")]
    Poap,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Address => "ADDRESS",
            InputType::Poap => "POAP",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ADDRESS" => Some(InputType::Address),
            "POAP" => Some(InputType::Poap),
            _ => None,
        }
    }
}

/// The committed search state for one mode.
///
/// Immutable once published to a cache slot; replaced wholesale or merged
/// field-by-field through [`SearchQueryUpdate`]. Only `addresses`,
/// `blockchain`, `input_type`, `raw_input` and `token_filters` are
/// interpreted by the pipeline; the remaining fields are view state carried
/// alongside for the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// 0, 1 or 2 identifiers; invariant: length <= MAX_IDENTIFIERS.
    #[serde(rename = "address")]
    pub addresses: Vec<String>,
    pub blockchain: String,
    pub token_type: String,
    pub raw_input: String,
    pub input_type: Option<InputType>,
    pub token_filters: Vec<String>,
    pub active_view: String,
    pub active_view_token: String,
    pub active_view_count: String,
    pub blockchain_type: Vec<String>,
    pub active_token_info: String,
    pub sort_order: String,
}

impl SearchQuery {
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// More than one identifier means a comparison query.
    pub fn is_comparison(&self) -> bool {
        self.addresses.len() > 1
    }

    /// Merge a partial update on top of this query, field by field.
    pub fn merged_with(&self, update: &SearchQueryUpdate) -> SearchQuery {
        let mut merged = self.clone();
        if let Some(addresses) = &update.addresses {
            merged.addresses = addresses.clone();
        }
        if let Some(blockchain) = &update.blockchain {
            merged.blockchain = blockchain.clone();
        }
        if let Some(token_type) = &update.token_type {
            merged.token_type = token_type.clone();
        }
        if let Some(raw_input) = &update.raw_input {
            merged.raw_input = raw_input.clone();
        }
        if let Some(input_type) = &update.input_type {
            merged.input_type = *input_type;
        }
        if let Some(token_filters) = &update.token_filters {
            merged.token_filters = token_filters.clone();
        }
        if let Some(active_view) = &update.active_view {
            merged.active_view = active_view.clone();
        }
        if let Some(active_view_token) = &update.active_view_token {
            merged.active_view_token = active_view_token.clone();
        }
        if let Some(active_view_count) = &update.active_view_count {
            merged.active_view_count = active_view_count.clone();
        }
        if let Some(blockchain_type) = &update.blockchain_type {
            merged.blockchain_type = blockchain_type.clone();
        }
        if let Some(active_token_info) = &update.active_token_info {
            merged.active_token_info = active_token_info.clone();
        }
        if let Some(sort_order) = &update.sort_order {
            merged.sort_order = sort_order.clone();
        }
        merged
    }
}

/// Partial form of [`SearchQuery`] used for merge-updates.
///
/// `None` leaves the cached field untouched; `Some` overwrites it. For
/// `input_type`, `Some(None)` explicitly clears the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQueryUpdate {
    pub addresses: Option<Vec<String>>,
    pub blockchain: Option<String>,
    pub token_type: Option<String>,
    pub raw_input: Option<String>,
    pub input_type: Option<Option<InputType>>,
    pub token_filters: Option<Vec<String>>,
    pub active_view: Option<String>,
    pub active_view_token: Option<String>,
    pub active_view_count: Option<String>,
    pub blockchain_type: Option<Vec<String>>,
    pub active_token_info: Option<String>,
    pub sort_order: Option<String>,
}

impl SearchQueryUpdate {
    pub fn has_token_filters(&self) -> bool {
        self.token_filters
            .as_ref()
            .map(|filters| !filters.is_empty())
            .unwrap_or(false)
    }
}
