use serde::{Deserialize, Serialize};

/// A social profile attached to an owner (farcaster, lens, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Social {
    #[serde(default)]
    pub blockchain: String,
    #[serde(default)]
    pub dapp_slug: String,
    #[serde(default)]
    pub profile_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dapp_name: String,
    #[serde(default)]
    pub chain_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xmtp {
    #[serde(rename = "isXMTPEnabled", default)]
    pub is_xmtp_enabled: bool,
}

/// Backend-supplied identity behind an ownership record.
///
/// Opaque to the pipeline except for `identity`, which is the dedup key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    #[serde(default)]
    pub identity: String,
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(default)]
    pub socials: Vec<Social>,
    #[serde(default)]
    pub primary_domain: Option<Domain>,
    #[serde(default)]
    pub domains: Vec<Domain>,
    #[serde(default)]
    pub xmtp: Vec<Xmtp>,
}

impl Owner {
    pub fn has_xmtp(&self) -> bool {
        self.xmtp.iter().any(|x| x.is_xmtp_enabled)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoapEvent {
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub blockchain: String,
}

/// Raw token-balance row as delivered by the source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRow {
    #[serde(default)]
    pub token_address: String,
    #[serde(default)]
    pub token_id: String,
    #[serde(default)]
    pub blockchain: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub formatted_amount: Option<f64>,
    pub owner: Owner,
}

/// Raw POAP row as delivered by the source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoapRow {
    #[serde(default)]
    pub event_id: String,
    #[serde(default)]
    pub token_id: String,
    #[serde(default)]
    pub blockchain: String,
    #[serde(default)]
    pub poap_event: Option<PoapEvent>,
    pub owner: Owner,
}

/// Source-specific record shape, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RawRecord {
    Token(TokenRow),
    Poap(PoapRow),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    Token,
    Poap,
}

/// Normalized ownership record.
///
/// Created from a fetched page, survives unchanged through filtering and
/// dedup, destroyed only when the query changes. For POAPs,
/// `token_address` carries the event id and `token_type` is `"POAP"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub kind: RecordKind,
    pub blockchain: String,
    pub token_type: String,
    pub token_address: String,
    pub token_id: String,
    pub owner: Owner,
}

impl From<RawRecord> for ResultRecord {
    fn from(raw: RawRecord) -> Self {
        match raw {
            RawRecord::Token(row) => ResultRecord {
                kind: RecordKind::Token,
                blockchain: row.blockchain,
                token_type: row.token_type,
                token_address: row.token_address,
                token_id: row.token_id,
                owner: row.owner,
            },
            RawRecord::Poap(row) => ResultRecord {
                kind: RecordKind::Poap,
                blockchain: row.blockchain,
                token_type: "POAP".to_string(),
                token_address: row.event_id,
                token_id: row.token_id,
                owner: row.owner,
            },
        }
    }
}

/// Progress counters for one query generation.
///
/// `total` accumulates raw page sizes, `matching` the post-filter,
/// post-dedup survivors. Both are monotonically non-decreasing within a
/// generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoaderStats {
    pub total: usize,
    pub matching: usize,
}
