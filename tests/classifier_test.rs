use std::sync::{Arc, Mutex};
use tokenscope::modules::query_state::{
    InMemoryUrlAdapter, InputType, SearchMode, SearchQueryUpdate, SearchStateStore, SetOptions,
    UrlAdapter,
};
use tokenscope::modules::search_input::{
    ClassificationError, Mention, MentionSpan, SearchInputService,
};
use tokenscope::shared::{Notifier, Severity};

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    fn last_message(&self) -> Option<(String, Severity)> {
        self.messages.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
    }
}

struct Harness {
    adapter: Arc<InMemoryUrlAdapter>,
    store: Arc<SearchStateStore>,
    notifier: Arc<RecordingNotifier>,
    service: SearchInputService,
}

fn harness() -> Harness {
    let adapter = Arc::new(InMemoryUrlAdapter::new());
    let store = Arc::new(SearchStateStore::new(adapter.clone()));
    let notifier = Arc::new(RecordingNotifier::default());
    let service = SearchInputService::new(store.clone(), notifier.clone());
    Harness {
        adapter,
        store,
        notifier,
        service,
    }
}

#[test]
fn test_balances_submission_commits_and_mirrors_url() {
    let h = harness();

    let query = h
        .service
        .submit(
            SearchMode::TokenBalances,
            " 0xC0ffee fc_fname:alice ",
            &[],
            None,
        )
        .unwrap();

    assert_eq!(query.addresses, vec!["0xC0ffee", "fc_fname:alice"]);
    assert_eq!(query.raw_input, "0xC0ffee  fc_fname:alice");
    assert_eq!(query.blockchain, "ethereum");
    assert_eq!(
        h.adapter.get("address"),
        Some("0xC0ffee,fc_fname:alice".to_string())
    );
    assert_eq!(h.adapter.get("rawInput"), Some("0xC0ffee  fc_fname:alice".to_string()));
}

#[test]
fn test_holders_numeric_submission_is_poap() {
    let h = harness();

    let query = h
        .service
        .submit(SearchMode::TokenHolders, "42", &[], None)
        .unwrap();

    assert_eq!(query.addresses, vec!["42"]);
    assert_eq!(h.adapter.get("inputType"), Some("POAP".to_string()));
}

#[test]
fn test_mention_token_type_is_committed() {
    let h = harness();
    let text = "@bored-apes";
    let span = MentionSpan {
        start: 0,
        end: text.len(),
        mention: Mention {
            address: "0xbayc".to_string(),
            event_id: None,
            blockchain: Some("ethereum".to_string()),
            token: Some("ERC721".to_string()),
            custom_input_type: Some(InputType::Address),
        },
    };

    let query = h
        .service
        .submit(SearchMode::TokenHolders, text, &[span], None)
        .unwrap();

    assert_eq!(query.addresses, vec!["0xbayc"]);
    assert_eq!(query.token_type, "ERC721");
    assert_eq!(h.adapter.get("tokenType"), Some("ERC721".to_string()));
}

#[test]
fn test_redirect_navigates_to_target_path() {
    let h = harness();

    h.service
        .submit(
            SearchMode::TokenBalances,
            "vitalik.eth",
            &[],
            Some("/token-balances"),
        )
        .unwrap();

    assert_eq!(h.adapter.current_path(), "/token-balances");
}

#[test]
fn test_too_many_identifiers_keeps_cache_and_notifies() {
    let h = harness();
    h.service
        .submit(SearchMode::TokenHolders, "0xabc", &[], None)
        .unwrap();

    let err = h
        .service
        .submit(SearchMode::TokenHolders, "0xaaa 0xbbb 0xccc", &[], None)
        .unwrap_err();

    assert_eq!(err, ClassificationError::TooManyIdentifiers { found: 3 });
    assert_eq!(
        h.notifier.last_message(),
        Some((
            "You can only compare 2 tokens at a time".to_string(),
            Severity::Negative
        ))
    );
    // The committed query survives the failed submission.
    assert_eq!(h.store.get(SearchMode::TokenHolders).addresses, vec!["0xabc"]);
}

#[test]
fn test_mixed_poap_and_token_is_refused() {
    let h = harness();

    let err = h
        .service
        .submit(SearchMode::TokenHolders, "0xabc 42", &[], None)
        .unwrap_err();

    assert_eq!(err, ClassificationError::InputTypeMismatch);
    assert_eq!(
        h.notifier.last_message(),
        Some((
            "You cannot compare a POAP and a token contract at the same time".to_string(),
            Severity::Negative
        ))
    );
}

#[test]
fn test_empty_balances_submission_clears_committed_query() {
    let h = harness();
    h.service
        .submit(SearchMode::TokenBalances, "vitalik.eth", &[], None)
        .unwrap();

    let err = h
        .service
        .submit(SearchMode::TokenBalances, "not an identifier", &[], None)
        .unwrap_err();

    assert_eq!(err, ClassificationError::NoValidIdentifier);
    assert_eq!(
        h.notifier.last_message(),
        Some((
            "Couldn't find any valid wallet address or ens/lens/farcaster name".to_string(),
            Severity::Negative
        ))
    );
    assert!(h.store.get(SearchMode::TokenBalances).addresses.is_empty());
}

#[test]
fn test_empty_holders_submission_keeps_committed_query() {
    let h = harness();
    h.service
        .submit(SearchMode::TokenHolders, "0xabc", &[], None)
        .unwrap();

    let err = h
        .service
        .submit(SearchMode::TokenHolders, "nothing usable", &[], None)
        .unwrap_err();

    assert_eq!(err, ClassificationError::NoValidIdentifier);
    assert_eq!(
        h.notifier.last_message(),
        Some(("Couldn't find any contract".to_string(), Severity::Negative))
    );
    assert_eq!(h.store.get(SearchMode::TokenHolders).addresses, vec!["0xabc"]);
}

#[test]
fn test_balances_submission_switches_mode() {
    let h = harness();
    h.store.set(
        SearchMode::TokenHolders,
        SearchQueryUpdate {
            active_view: Some("overview".to_string()),
            ..Default::default()
        },
        &SetOptions::default(),
    );

    h.service
        .submit(SearchMode::TokenBalances, "vitalik.eth", &[], None)
        .unwrap();

    assert_eq!(h.store.get(SearchMode::TokenHolders).active_view, "");
}
