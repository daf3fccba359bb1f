use crate::modules::query_state::domain::entities::{
    InputType, SearchMode, SearchQuery, SearchQueryUpdate,
};
use crate::modules::query_state::infrastructure::url_params::UrlAdapter;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Options for [`SearchStateStore::set`].
#[derive(Debug, Clone, Default)]
pub struct SetOptions {
    /// Replace the cached query instead of merging into it.
    pub reset: bool,
    /// Mirror the resulting query into the URL parameters.
    pub update_query_params: bool,
    /// Navigate to this path instead of updating the URL in place.
    pub redirect_to: Option<String>,
    /// Replace the current history entry rather than pushing a new one.
    pub replace: bool,
}

/// Session-scoped store for the last committed query of each mode.
///
/// Two named slots (token-balances and token-holders) live for the whole
/// session; they are only ever overwritten or reset, never destroyed. The
/// store also mirrors committed state into a URL-parameter representation
/// and reconciles the two on read, with the URL winning per field.
///
/// Constructed once and passed by reference to consumers. Reads and writes
/// are serialized per slot by the backing map, so the store can be shared
/// across tasks.
pub struct SearchStateStore {
    slots: DashMap<SearchMode, SearchQuery>,
    url: Arc<dyn UrlAdapter>,
}

impl SearchStateStore {
    pub fn new(url: Arc<dyn UrlAdapter>) -> Self {
        let slots = DashMap::new();
        slots.insert(SearchMode::TokenBalances, SearchQuery::default());
        slots.insert(SearchMode::TokenHolders, SearchQuery::default());
        Self { slots, url }
    }

    /// The committed query for `mode`, with any field also present in the
    /// URL overridden by the URL value. An empty URL value is an explicit
    /// clear; an absent key falls back to the cache.
    pub fn get(&self, mode: SearchMode) -> SearchQuery {
        let cached = self
            .slots
            .get(&mode)
            .map(|slot| slot.clone())
            .unwrap_or_default();

        let mut query = SearchQuery {
            addresses: self.array_field("address", &cached.addresses),
            blockchain: self.scalar_field("blockchain", &cached.blockchain),
            token_type: self.scalar_field("tokenType", &cached.token_type),
            raw_input: self.scalar_field("rawInput", &cached.raw_input),
            input_type: self.input_type_field(cached.input_type),
            token_filters: self.array_field("tokenFilters", &cached.token_filters),
            active_view: self.scalar_field("activeView", &cached.active_view),
            active_view_token: self.scalar_field("activeViewToken", &cached.active_view_token),
            active_view_count: self.scalar_field("activeViewCount", &cached.active_view_count),
            blockchain_type: self.array_field("blockchainType", &cached.blockchain_type),
            active_token_info: self.scalar_field("activeTokenInfo", &cached.active_token_info),
            sort_order: self.scalar_field("sortOrder", &cached.sort_order),
        };

        // Token-balances queries never carry holder-view state; the input
        // type is pinned to null until a query is classified.
        if mode == SearchMode::TokenBalances {
            query.input_type = None;
            query.token_filters = Vec::new();
            query.active_view = String::new();
            query.active_view_token = String::new();
            query.active_view_count = String::new();
        }

        query
    }

    /// Merge (or, with `reset`, replace) a partial query into the slot for
    /// `mode`, optionally mirroring the result into the URL.
    pub fn set(&self, mode: SearchMode, update: SearchQueryUpdate, options: &SetOptions) {
        // Filter changes must not spam back-history: when filters are
        // being replaced over existing filters, reuse the history entry.
        let cached_has_filters = self
            .slots
            .get(&mode)
            .map(|slot| !slot.token_filters.is_empty())
            .unwrap_or(false);
        let should_replace = options.replace || (update.has_token_filters() && cached_has_filters);

        let base = if options.reset {
            SearchQuery::default()
        } else {
            self.slots
                .get(&mode)
                .map(|slot| slot.clone())
                .unwrap_or_default()
        };
        let merged = base.merged_with(&update);
        debug!(?mode, addresses = ?merged.addresses, "committing search query");
        self.slots.insert(mode, merged.clone());

        if options.update_query_params {
            let params = url_params(&merged);
            match &options.redirect_to {
                Some(path) => self.url.navigate(path, params),
                None => self.url.set_params(params, should_replace),
            }
        }
    }

    /// Mode switches must not leak state: entering token-balances clears
    /// the token-holder slot's transient detail view.
    pub fn enter_mode(&self, mode: SearchMode) {
        if mode == SearchMode::TokenBalances {
            if let Some(mut slot) = self.slots.get_mut(&SearchMode::TokenHolders) {
                slot.active_view.clear();
            }
        }
    }

    /// Reset both slots to empty.
    pub fn reset_all(&self) {
        self.slots
            .insert(SearchMode::TokenBalances, SearchQuery::default());
        self.slots
            .insert(SearchMode::TokenHolders, SearchQuery::default());
    }

    fn scalar_field(&self, key: &str, cached: &str) -> String {
        match self.url.get(key) {
            Some(value) => value,
            None => cached.to_string(),
        }
    }

    fn input_type_field(&self, cached: Option<InputType>) -> Option<InputType> {
        match self.url.get("inputType") {
            Some(value) => InputType::parse(&value),
            None => cached,
        }
    }

    /// Array fields are comma-joined in the URL. When the URL value equals
    /// the cached value structurally, the cached value is returned as-is so
    /// downstream memoized computations stay stable.
    fn array_field(&self, key: &str, cached: &[String]) -> Vec<String> {
        match self.url.get(key) {
            None => cached.to_vec(),
            Some(value) => {
                if value == cached.join(",") {
                    cached.to_vec()
                } else if value.is_empty() {
                    Vec::new()
                } else {
                    value.split(',').map(str::to_string).collect()
                }
            }
        }
    }
}

/// Serialize every field of a query into URL parameters. Empty scalar
/// fields become the empty string; array fields are comma-joined.
fn url_params(query: &SearchQuery) -> Vec<(String, String)> {
    vec![
        ("address".to_string(), query.addresses.join(",")),
        ("blockchain".to_string(), query.blockchain.clone()),
        ("tokenType".to_string(), query.token_type.clone()),
        ("rawInput".to_string(), query.raw_input.clone()),
        (
            "inputType".to_string(),
            query
                .input_type
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
        ),
        ("tokenFilters".to_string(), query.token_filters.join(",")),
        ("activeView".to_string(), query.active_view.clone()),
        (
            "activeViewToken".to_string(),
            query.active_view_token.clone(),
        ),
        (
            "activeViewCount".to_string(),
            query.active_view_count.clone(),
        ),
        (
            "blockchainType".to_string(),
            query.blockchain_type.join(","),
        ),
        (
            "activeTokenInfo".to_string(),
            query.active_token_info.clone(),
        ),
        ("sortOrder".to_string(), query.sort_order.clone()),
    ]
}
