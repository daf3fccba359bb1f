use crate::modules::query_state::domain::entities::MAX_IDENTIFIERS;
use serde::{Deserialize, Serialize};

/// Ranking hint for one identifier, derived out of scope from the
/// holders-overview computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedToken {
    pub address: String,
    pub token_type: String,
}

/// One identifier in canonical position, with whatever ranking we have
/// for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceOperand {
    pub address: String,
    pub token_type: Option<String>,
}

impl SourceOperand {
    /// POAP identifiers are numeric event ids, never `0x` addresses.
    pub fn is_poap(&self) -> bool {
        !self.address.starts_with("0x")
    }

    fn is_non_erc20(&self) -> bool {
        self.token_type
            .as_deref()
            .map(|token_type| token_type != "ERC20")
            .unwrap_or(false)
    }
}

/// The four mutually exclusive backend query shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SourceKind {
    /// Holders of a single token contract.
    TokenHolders { operand: SourceOperand },
    /// Owners common to two token contracts, in canonical order.
    CommonTokenHolders {
        first: SourceOperand,
        second: SourceOperand,
    },
    /// Holders of one or two POAP events.
    PoapHolders { operands: Vec<SourceOperand> },
    /// Owners common to a POAP event and a token contract; the POAP
    /// operand always comes first.
    PoapAndTokenHolders {
        poap: SourceOperand,
        token: SourceOperand,
    },
}

/// Decide which source kind a resolved address list needs, and in what
/// canonical order its operands must be presented.
pub fn select_source(addresses: &[String], hint: &[RankedToken]) -> Option<SourceKind> {
    if addresses.is_empty() {
        return None;
    }

    let every_poap = addresses.iter().all(|address| !address.starts_with("0x"));
    let operands = sort_by_non_erc20_first(addresses, hint);

    if every_poap {
        return Some(SourceKind::PoapHolders { operands });
    }

    if operands.len() == 1 {
        let mut operands = operands;
        return Some(SourceKind::TokenHolders {
            operand: operands.remove(0),
        });
    }

    let has_some_poap = operands.iter().any(SourceOperand::is_poap);
    let mut operands = operands;
    if has_some_poap {
        // Tie-break for mixed pairs: POAP before fungible, not stable
        // input order.
        if !operands[0].is_poap() {
            operands.swap(0, 1);
        }
        let token = operands.remove(1);
        let poap = operands.remove(0);
        return Some(SourceKind::PoapAndTokenHolders { poap, token });
    }

    let second = operands.remove(1);
    let first = operands.remove(0);
    Some(SourceKind::CommonTokenHolders { first, second })
}

/// Attach rankings and apply the non-ERC-20-first ordering rule: when
/// exactly one of two operands is flagged non-ERC-20 by the hint, it is
/// placed first regardless of input order; ties preserve input order.
pub fn sort_by_non_erc20_first(addresses: &[String], hint: &[RankedToken]) -> Vec<SourceOperand> {
    let mut operands: Vec<SourceOperand> = addresses
        .iter()
        .take(MAX_IDENTIFIERS)
        .map(|address| SourceOperand {
            address: address.clone(),
            token_type: hint
                .iter()
                .find(|ranked| ranked.address.eq_ignore_ascii_case(address))
                .map(|ranked| ranked.token_type.clone()),
        })
        .collect();

    if operands.len() == 2 && !operands[0].is_non_erc20() && operands[1].is_non_erc20() {
        operands.swap(0, 1);
    }

    operands
}
