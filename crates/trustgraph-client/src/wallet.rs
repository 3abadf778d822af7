//! Wallet state and write gating.
//!
//! Signing happens behind the chain bridge; this side only knows which
//! account (if any) is connected and which chain the bridge reports. Every
//! write action is gated on both before any chain call is made.

use crate::chains::NetworkSpec;
use crate::error::WriteError;

/// The account the bridge is operating as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedAccount {
    pub address: String,
    pub chain_id: u64,
}

/// Connection state, refreshed by the embedder when the bridge reconnects.
#[derive(Debug, Clone, Default)]
pub struct WalletState {
    account: Option<ConnectedAccount>,
}

impl WalletState {
    pub fn disconnected() -> Self {
        Self { account: None }
    }

    pub fn connected(address: impl Into<String>, chain_id: u64) -> Self {
        Self {
            account: Some(ConnectedAccount {
                address: address.into(),
                chain_id,
            }),
        }
    }

    pub fn account(&self) -> Option<&ConnectedAccount> {
        self.account.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    /// Gate a write: requires a connected account on the expected network.
    /// Returns the account address to spend from.
    pub fn ensure_ready(&self, expected: &NetworkSpec) -> Result<&str, WriteError> {
        let account = self.account.as_ref().ok_or(WriteError::NotConnected)?;
        if account.chain_id != expected.chain_id {
            return Err(WriteError::WrongNetwork {
                expected: expected.chain_id,
                expected_name: expected.name.to_string(),
                actual: account.chain_id,
            });
        }
        Ok(&account.address)
    }
}
