use crate::modules::query_state::application::store::{SearchStateStore, SetOptions};
use crate::modules::query_state::domain::entities::{SearchMode, SearchQuery, SearchQueryUpdate};
use crate::modules::search_input::application::classifier::{
    classify_token_balances, classify_token_holders, ClassificationError,
};
use crate::modules::search_input::domain::mention::MentionSpan;
use crate::modules::search_input::domain::tokenizer::tokenize;
use crate::shared::utils::notify::{Notifier, Severity};
use std::sync::Arc;
use tracing::debug;

/// Entry point for raw search submissions.
///
/// Ties tokenizer, classifier, state store and notifier together: a
/// successful classification is committed to the mode's cache slot and
/// mirrored to the URL; a failed one surfaces a fixed message through the
/// notifier and mutates state only where the original behavior did.
pub struct SearchInputService {
    store: Arc<SearchStateStore>,
    notifier: Arc<dyn Notifier>,
}

impl SearchInputService {
    pub fn new(store: Arc<SearchStateStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Classify `text` for `mode` and commit the result.
    ///
    /// `redirect_to` carries the submission to a different route (the home
    /// page submits into one of the two result pages); otherwise the URL
    /// is updated in place.
    pub fn submit(
        &self,
        mode: SearchMode,
        text: &str,
        mentions: &[MentionSpan],
        redirect_to: Option<&str>,
    ) -> Result<SearchQuery, ClassificationError> {
        self.store.enter_mode(mode);

        let segments = tokenize(text.trim(), mentions);
        let classified = match mode {
            SearchMode::TokenBalances => classify_token_balances(&segments),
            SearchMode::TokenHolders => classify_token_holders(&segments),
        };

        match classified {
            Ok(classified) => {
                debug!(?mode, addresses = ?classified.addresses, "search input classified");
                let update = SearchQueryUpdate {
                    addresses: Some(classified.addresses),
                    blockchain: Some(classified.blockchain),
                    raw_input: Some(classified.raw_input),
                    input_type: Some(Some(classified.input_type)),
                    // A mention-resolved token type is committed alongside;
                    // plain-word submissions leave the field untouched.
                    token_type: classified.token,
                    ..Default::default()
                };
                self.store.set(
                    mode,
                    update,
                    &SetOptions {
                        // Balances submissions start a fresh query; holder
                        // submissions keep the slot's view state.
                        reset: mode == SearchMode::TokenBalances,
                        update_query_params: true,
                        redirect_to: redirect_to.map(str::to_string),
                        replace: false,
                    },
                );
                Ok(self.store.get(mode))
            }
            Err(err) => {
                self.notifier
                    .notify(error_message(mode, &err), Severity::Negative);

                // An empty balances submission clears the committed query;
                // every other failure leaves the current query untouched.
                if mode == SearchMode::TokenBalances
                    && err == ClassificationError::NoValidIdentifier
                {
                    self.store.set(
                        mode,
                        SearchQueryUpdate::default(),
                        &SetOptions {
                            reset: true,
                            update_query_params: true,
                            redirect_to: redirect_to.map(str::to_string),
                            replace: false,
                        },
                    );
                }

                Err(err)
            }
        }
    }
}

fn error_message(mode: SearchMode, err: &ClassificationError) -> &'static str {
    match (mode, err) {
        (SearchMode::TokenBalances, ClassificationError::NoValidIdentifier) => {
            "Couldn't find any valid wallet address or ens/lens/farcaster name"
        }
        (SearchMode::TokenHolders, ClassificationError::NoValidIdentifier) => {
            "Couldn't find any contract"
        }
        (SearchMode::TokenBalances, ClassificationError::TooManyIdentifiers { .. }) => {
            "You can only compare 2 identities at a time"
        }
        (SearchMode::TokenHolders, ClassificationError::TooManyIdentifiers { .. }) => {
            "You can only compare 2 tokens at a time"
        }
        (_, ClassificationError::InputTypeMismatch) => {
            "You cannot compare a POAP and a token contract at the same time"
        }
    }
}
