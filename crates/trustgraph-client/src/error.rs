//! Error taxonomy.
//!
//! Read failures ([`IndexerError`]) are non-fatal: callers surface them next
//! to the affected view and the rest of the UI stays usable. Write failures
//! ([`WriteError`]) are classified into a fixed set of user-facing kinds so
//! the presentation layer never has to show a raw provider message.
//!
//! Classification prefers the structured JSON-RPC error code when the bridge
//! supplies one; substring matching on the message is the fallback for
//! transports that only return text.

use crate::rpc::RpcError;
use trustgraph_core::model::AtomIdError;
use trustgraph_core::units::UnitError;

/// Display cap for unclassified provider messages. The full message is
/// logged before truncation.
const UNKNOWN_MESSAGE_LIMIT: usize = 120;

/// Failures while reading from the graph indexer.
#[derive(Debug, thiserror::Error)]
pub enum IndexerError {
    #[error("indexer request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("indexer rejected {operation}: {message}")]
    Graphql { operation: String, message: String },
    #[error("could not decode indexer response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failures on the write path, classified for presentation.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("no wallet account is connected")]
    NotConnected,
    #[error(
        "connected to chain {actual}, but {expected_name} is chain {expected}; \
         switch networks and retry"
    )]
    WrongNetwork {
        expected: u64,
        expected_name: String,
        actual: u64,
    },
    #[error("insufficient funds: need {needed} {symbol} but only have {available} {symbol}")]
    InsufficientFunds {
        needed: String,
        available: String,
        symbol: String,
    },
    #[error("this relationship already exists; endorse it instead of recreating it")]
    AlreadyExists,
    #[error("one or more term ids do not resolve on-chain")]
    EntityNotFound,
    #[error("transaction cancelled by the signer")]
    UserRejected,
    #[error("transaction reverted by the contract")]
    Reverted,
    #[error("invalid amount: {0}")]
    Amount(#[from] UnitError),
    #[error("invalid term id: {0}")]
    Id(#[from] AtomIdError),
    /// Infrastructure failure before the transaction was submitted (fee or
    /// balance fetch); nothing reached the chain.
    #[error("chain read failed: {0}")]
    Rpc(#[from] RpcError),
    #[error("write failed: {0}")]
    Unknown(String),
}

/// Pre-flight amounts known to the write pipeline, used to fill the
/// insufficient-funds kind when the chain's own gate fires after ours passed.
#[derive(Debug, Clone)]
pub struct SubmitContext {
    pub needed: String,
    pub available: String,
    pub symbol: String,
}

/// Map a failed submission into a [`WriteError`].
///
/// EIP-1193 provider codes are matched first, then contract revert reasons
/// carried in the message text, mirroring the failure modes of the upstream
/// protocol SDK.
pub fn classify_submit_failure(err: RpcError, ctx: Option<&SubmitContext>) -> WriteError {
    let RpcError::Protocol { code, message, .. } = &err else {
        return WriteError::Rpc(err);
    };

    match code {
        4001 => return WriteError::UserRejected,
        4100 | 4900 | 4901 => return WriteError::NotConnected,
        _ => {}
    }

    let lowered = message.to_lowercase();
    if lowered.contains("insufficient") {
        match ctx {
            Some(ctx) => WriteError::InsufficientFunds {
                needed: ctx.needed.clone(),
                available: ctx.available.clone(),
                symbol: ctx.symbol.clone(),
            },
            // No pre-flight amounts to report (balance moved under us).
            None => WriteError::Unknown(truncate_for_display(message)),
        }
    } else if lowered.contains("already exists") || message.contains("AlreadyExists") {
        WriteError::AlreadyExists
    } else if message.contains("TermDoesNotExist") || lowered.contains("not found") {
        WriteError::EntityNotFound
    } else if lowered.contains("user rejected") || lowered.contains("denied") {
        WriteError::UserRejected
    } else if lowered.contains("execution reverted") || *code == 3 {
        WriteError::Reverted
    } else {
        tracing::error!(code = *code, message = %message, "unclassified submission failure");
        WriteError::Unknown(truncate_for_display(message))
    }
}

fn truncate_for_display(message: &str) -> String {
    if message.chars().count() <= UNKNOWN_MESSAGE_LIMIT {
        message.to_string()
    } else {
        message.chars().take(UNKNOWN_MESSAGE_LIMIT).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protocol(code: i64, message: &str) -> RpcError {
        RpcError::Protocol {
            code,
            message: message.to_string(),
            data: None,
        }
    }

    #[test]
    fn eip1193_codes_win_over_message_text() {
        assert!(matches!(
            classify_submit_failure(protocol(4001, "execution reverted"), None),
            WriteError::UserRejected
        ));
        assert!(matches!(
            classify_submit_failure(protocol(4901, "whatever"), None),
            WriteError::NotConnected
        ));
    }

    #[test]
    fn revert_reasons_classify_by_substring() {
        assert!(matches!(
            classify_submit_failure(protocol(-32000, "TripleAlreadyExists(0x1, 0x2, 0x3)"), None),
            WriteError::AlreadyExists
        ));
        assert!(matches!(
            classify_submit_failure(protocol(-32000, "TermDoesNotExist"), None),
            WriteError::EntityNotFound
        ));
        assert!(matches!(
            classify_submit_failure(protocol(-32000, "execution reverted"), None),
            WriteError::Reverted
        ));
        assert!(matches!(
            classify_submit_failure(protocol(3, "opaque revert"), None),
            WriteError::Reverted
        ));
        assert!(matches!(
            classify_submit_failure(protocol(-32000, "User rejected the request."), None),
            WriteError::UserRejected
        ));
    }

    #[test]
    fn unknown_messages_are_truncated_for_display() {
        let long = "x".repeat(400);
        match classify_submit_failure(protocol(-32099, &long), None) {
            WriteError::Unknown(shown) => assert_eq!(shown.len(), 120),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn transport_failures_stay_unclassified() {
        let err = RpcError::Decode("bad quantity".to_string());
        assert!(matches!(classify_submit_failure(err, None), WriteError::Rpc(_)));
    }
}
