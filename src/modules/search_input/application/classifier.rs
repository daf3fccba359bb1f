use crate::modules::query_state::domain::entities::{InputType, MAX_IDENTIFIERS};
use crate::modules::search_input::domain::mention::InputSegment;
use crate::shared::errors::AppError;
use thiserror::Error;

/// Two accepted words are joined with a fixed two-space separator so the
/// text box redisplay stays stable across resolves.
pub const RAW_INPUT_SEPARATOR: &str = "  ";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("no valid identifier found in input")]
    NoValidIdentifier,

    #[error("too many identifiers: found {found}, maximum is {MAX_IDENTIFIERS}")]
    TooManyIdentifiers { found: usize },

    #[error("cannot mix POAP and token identifiers in one query")]
    InputTypeMismatch,
}

impl From<ClassificationError> for AppError {
    fn from(err: ClassificationError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

/// A validated query produced from tokenized input, ready to be committed
/// to the state store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedInput {
    pub addresses: Vec<String>,
    pub raw_input: String,
    pub blockchain: String,
    pub input_type: InputType,
    /// Token type carried by a mention, when the autocomplete resolved
    /// one; committed into the query's `tokenType` field.
    pub token: Option<String>,
}

/// Token-balances classification.
///
/// A word is accepted as an identifier if it is a mention, starts with
/// `fc_fname:`, ends in `.eth`/`.lens`, or starts with `0x`. The
/// blockchain is fixed to ethereum and the input type to `ADDRESS`.
pub fn classify_token_balances(
    segments: &[InputSegment],
) -> Result<ClassifiedInput, ClassificationError> {
    let mut addresses = Vec::new();
    let mut raw_parts = Vec::new();

    for segment in segments {
        if let Some(mention) = &segment.mention {
            addresses.push(mention.address.clone());
            raw_parts.push(segment.raw_value.clone());
            continue;
        }

        let word = &segment.word;
        let valid = word.starts_with("fc_fname:")
            || word.ends_with(".eth")
            || word.ends_with(".lens")
            || word.starts_with("0x");
        if !valid {
            continue;
        }

        addresses.push(word.clone());
        raw_parts.push(segment.raw_value.clone());
    }

    check_count(&addresses)?;

    Ok(ClassifiedInput {
        addresses,
        raw_input: raw_parts.join(RAW_INPUT_SEPARATOR),
        blockchain: "ethereum".to_string(),
        input_type: InputType::Address,
        token: None,
    })
}

/// Token-holders classification.
///
/// A word is accepted as `ADDRESS` if it starts with `0x`, or as `POAP`
/// if it parses as a number. The first typed word or mention pins the
/// input type for the rest; a later word of the other type is rejected
/// from the address list, and the whole query fails with
/// [`ClassificationError::InputTypeMismatch`] once both types were seen.
/// Words that are neither address nor number are skipped outright.
pub fn classify_token_holders(
    segments: &[InputSegment],
) -> Result<ClassifiedInput, ClassificationError> {
    let mut addresses = Vec::new();
    let mut raw_parts = Vec::new();
    let mut input_type: Option<InputType> = None;
    let mut has_mismatch = false;
    let mut blockchain = "ethereum".to_string();
    let mut token = None;

    for segment in segments {
        if let Some(mention) = &segment.mention {
            // Mentions are already resolved entities; a POAP mention
            // carries its event id in place of a contract address.
            addresses.push(
                mention
                    .event_id
                    .clone()
                    .unwrap_or_else(|| mention.address.clone()),
            );
            raw_parts.push(segment.raw_value.clone());
            if let Some(chain) = &mention.blockchain {
                blockchain = chain.clone();
            }
            if mention.token.is_some() {
                token = mention.token.clone();
            }
            if let Some(candidate) = mention.custom_input_type {
                match input_type {
                    Some(pinned) if pinned != candidate => has_mismatch = true,
                    None => input_type = Some(candidate),
                    _ => {}
                }
            }
            continue;
        }

        let candidate = if segment.word.starts_with("0x") {
            Some(InputType::Address)
        } else if segment.word.parse::<u64>().is_ok() {
            Some(InputType::Poap)
        } else {
            None
        };

        match (input_type, candidate) {
            (Some(pinned), Some(candidate)) if pinned != candidate => {
                // Rejected from the address list; remembered so the whole
                // query can be refused below.
                has_mismatch = true;
            }
            (Some(_), Some(_)) => {
                addresses.push(segment.word.clone());
                raw_parts.push(segment.raw_value.clone());
            }
            (None, Some(candidate)) => {
                input_type = Some(candidate);
                addresses.push(segment.word.clone());
                raw_parts.push(segment.raw_value.clone());
            }
            (_, None) => {}
        }
    }

    check_count(&addresses)?;

    if has_mismatch {
        return Err(ClassificationError::InputTypeMismatch);
    }

    Ok(ClassifiedInput {
        addresses,
        raw_input: raw_parts.join(RAW_INPUT_SEPARATOR),
        blockchain,
        input_type: input_type.unwrap_or(InputType::Address),
        token,
    })
}

fn check_count(addresses: &[String]) -> Result<(), ClassificationError> {
    if addresses.is_empty() {
        return Err(ClassificationError::NoValidIdentifier);
    }
    if addresses.len() > MAX_IDENTIFIERS {
        return Err(ClassificationError::TooManyIdentifiers {
            found: addresses.len(),
        });
    }
    Ok(())
}
