use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::debug;

/// Boundary to whatever owns the address bar.
///
/// The store mirrors committed queries into URL parameters and reads them
/// back out; in the browser-hosted original this was the router, here it is
/// abstracted so the store can be embedded and tested in isolation.
pub trait UrlAdapter: Send + Sync {
    /// Current value for a query parameter, if the key is present.
    /// `Some("")` is meaningful: it is an explicit clear, not an absence.
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the full parameter set in place. `replace` reuses the
    /// current history entry instead of pushing a new one.
    fn set_params(&self, params: Vec<(String, String)>, replace: bool);

    /// Navigate to a new path carrying the given parameters.
    fn navigate(&self, path: &str, params: Vec<(String, String)>);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub path: String,
    pub query: String,
}

#[derive(Debug, Default)]
struct UrlState {
    path: String,
    params: BTreeMap<String, String>,
    history: Vec<HistoryEntry>,
}

/// In-memory [`UrlAdapter`] with a push/replace history model.
#[derive(Debug, Default)]
pub struct InMemoryUrlAdapter {
    state: Mutex<UrlState>,
}

impl InMemoryUrlAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the adapter with pre-existing parameters, as if the session
    /// started from a shared link.
    pub fn with_params(params: Vec<(String, String)>) -> Self {
        let adapter = Self::default();
        {
            let mut state = adapter.state.lock().unwrap();
            state.params = params.into_iter().collect();
        }
        adapter
    }

    pub fn current_path(&self) -> String {
        self.state.lock().unwrap().path.clone()
    }

    /// Percent-encoded `key=value&...` rendering of the current params.
    pub fn query_string(&self) -> String {
        let state = self.state.lock().unwrap();
        encode_query(&state.params)
    }

    pub fn history_len(&self) -> usize {
        self.state.lock().unwrap().history.len()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.state.lock().unwrap().history.clone()
    }
}

impl UrlAdapter for InMemoryUrlAdapter {
    fn get(&self, key: &str) -> Option<String> {
        self.state.lock().unwrap().params.get(key).cloned()
    }

    fn set_params(&self, params: Vec<(String, String)>, replace: bool) {
        let mut state = self.state.lock().unwrap();
        state.params = params.into_iter().collect();
        let entry = HistoryEntry {
            path: state.path.clone(),
            query: encode_query(&state.params),
        };
        if replace {
            debug!("replacing current history entry");
            state.history.pop();
        }
        state.history.push(entry);
    }

    fn navigate(&self, path: &str, params: Vec<(String, String)>) {
        let mut state = self.state.lock().unwrap();
        state.path = path.to_string();
        state.params = params.into_iter().collect();
        let entry = HistoryEntry {
            path: state.path.clone(),
            query: encode_query(&state.params),
        };
        state.history.push(entry);
    }
}

fn encode_query(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Parse a percent-encoded query string back into key/value pairs.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let key = urlencoding::decode(key).ok()?.into_owned();
            let value = urlencoding::decode(value).ok()?.into_owned();
            Some((key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_vs_empty_param() {
        let adapter = InMemoryUrlAdapter::with_params(vec![("rawInput".to_string(), String::new())]);
        assert_eq!(adapter.get("rawInput"), Some(String::new()));
        assert_eq!(adapter.get("blockchain"), None);
    }

    #[test]
    fn test_set_params_pushes_then_replaces() {
        let adapter = InMemoryUrlAdapter::new();
        adapter.set_params(vec![("address".to_string(), "0xabc".to_string())], false);
        adapter.set_params(vec![("address".to_string(), "0xdef".to_string())], false);
        assert_eq!(adapter.history_len(), 2);

        adapter.set_params(vec![("address".to_string(), "0x123".to_string())], true);
        assert_eq!(adapter.history_len(), 2);
        assert_eq!(adapter.get("address"), Some("0x123".to_string()));
    }

    #[test]
    fn test_navigate_changes_path() {
        let adapter = InMemoryUrlAdapter::new();
        adapter.navigate(
            "/token-holders",
            vec![("address".to_string(), "42".to_string())],
        );
        assert_eq!(adapter.current_path(), "/token-holders");
        assert_eq!(adapter.history_len(), 1);
    }

    #[test]
    fn test_query_round_trip_with_special_chars() {
        let adapter = InMemoryUrlAdapter::new();
        adapter.set_params(
            vec![("rawInput".to_string(), "0xabc  fc_fname:alice".to_string())],
            false,
        );
        let parsed = parse_query(&adapter.query_string());
        assert_eq!(
            parsed,
            vec![("rawInput".to_string(), "0xabc  fc_fname:alice".to_string())]
        );
    }
}
