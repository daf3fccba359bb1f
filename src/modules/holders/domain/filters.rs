use super::records::ResultRecord;
use serde::Serialize;

/// Filter tags understood on the request side: these are translated into
/// parameters for the source query rather than evaluated locally.
const SOCIAL_FILTERS: [&str; 2] = ["farcaster", "lens"];
const PRIMARY_DOMAIN_FILTER: &str = "primaryEns";

/// Filter tags evaluated locally, per record, after fetch.
const BLOCKCHAIN_FILTERS: [&str; 4] = ["ethereum", "polygon", "base", "gnosis"];
const TOKEN_TYPE_FILTERS: [&str; 4] = ["ERC20", "ERC721", "ERC1155", "POAP"];

/// Request-side filter descriptor, consumable by the source-query builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFilters {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub social_filters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_primary_domain: Option<bool>,
}

/// A declarative set of free-form filter tags.
///
/// Tags split into request-side filters (social profile, primary domain)
/// and response-side predicates (blockchain, token type). Unknown tags are
/// ignored, never fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    tags: Vec<String>,
}

impl FilterSet {
    pub fn new(tags: Vec<String>) -> Self {
        Self { tags }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The structured request-filter descriptor for this set.
    pub fn request_filters(&self) -> RequestFilters {
        let mut request = RequestFilters::default();
        for tag in &self.tags {
            if SOCIAL_FILTERS.contains(&tag.as_str()) {
                request.social_filters.push(tag.clone());
            } else if tag == PRIMARY_DOMAIN_FILTER {
                request.has_primary_domain = Some(true);
            }
        }
        request
    }

    /// Local predicate applied to each fetched record, independent of
    /// source kind. Constraints of the same group are OR-ed, groups are
    /// AND-ed.
    pub fn matches(&self, record: &ResultRecord) -> bool {
        let chains: Vec<&str> = self
            .tags
            .iter()
            .map(String::as_str)
            .filter(|tag| BLOCKCHAIN_FILTERS.contains(tag))
            .collect();
        let token_types: Vec<&str> = self
            .tags
            .iter()
            .map(String::as_str)
            .filter(|tag| TOKEN_TYPE_FILTERS.contains(tag))
            .collect();

        let chain_ok = chains.is_empty() || chains.contains(&record.blockchain.as_str());
        let type_ok = token_types.is_empty() || token_types.contains(&record.token_type.as_str());
        chain_ok && type_ok
    }
}
