//! Chain access seams.
//!
//! The traits mirror the narrow surface this system needs from the external
//! protocol: three reads and three writes. [`RpcChainClient`] is the real
//! implementation over the JSON-RPC bridge; [`MockChain`] records every
//! submission and serves scripted responses so pipelines can be exercised
//! without a chain.

use crate::rpc::{decode_quantity, encode_quantity, RpcClient, RpcError};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use trustgraph_core::model::AtomId;

/// Handle of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxHash(pub String);

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only chain state.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Native-token balance of an account, in base units.
    async fn balance(&self, account: &str) -> Result<u128, RpcError>;

    /// Current protocol fee for creating a relationship, in base units.
    /// Authoritative; never computed locally, and cached by callers for at
    /// most a minute since it can change with protocol state.
    async fn protocol_fee(&self) -> Result<u128, RpcError>;

    /// Chain id the bridge is connected to.
    async fn chain_id(&self) -> Result<u64, RpcError>;
}

/// Write access. Every call may fail asynchronously with an opaque provider
/// error that the caller classifies.
#[async_trait]
pub trait ChainWriter: Send + Sync {
    /// Create a new atom from a string payload. The identifier is derived
    /// off-chain by the protocol SDK behind the bridge.
    async fn submit_create_atom(&self, data: &str) -> Result<TxHash, RpcError>;

    /// Create relationships. The protocol call takes parallel arrays to
    /// support batching; this system always submits a batch of one.
    async fn submit_create_triples(
        &self,
        subjects: &[AtomId],
        predicates: &[AtomId],
        objects: &[AtomId],
        assets: &[u128],
        value: u128,
    ) -> Result<TxHash, RpcError>;

    /// Deposit into an existing term's vault.
    async fn submit_deposit(
        &self,
        receiver: &str,
        term: &AtomId,
        share_unit: u128,
        min_shares: u128,
        value: u128,
    ) -> Result<TxHash, RpcError>;
}

// ============================================================================
// JSON-RPC implementation
// ============================================================================

/// Chain client over the protocol bridge.
pub struct RpcChainClient {
    rpc: RpcClient,
}

impl RpcChainClient {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    async fn tx_hash(&self, method: &str, params: serde_json::Value) -> Result<TxHash, RpcError> {
        let result = self.rpc.call(method, params).await?;
        match result.as_str() {
            Some(hash) if !hash.is_empty() => Ok(TxHash(hash.to_string())),
            _ => Err(RpcError::Decode(format!(
                "{method}: transaction submitted but no hash returned"
            ))),
        }
    }
}

#[async_trait]
impl ChainReader for RpcChainClient {
    async fn balance(&self, account: &str) -> Result<u128, RpcError> {
        let result = self
            .rpc
            .call("eth_getBalance", json!([account, "latest"]))
            .await?;
        decode_quantity(&result)
    }

    async fn protocol_fee(&self) -> Result<u128, RpcError> {
        let result = self.rpc.call("multivault_getTripleCost", json!([])).await?;
        decode_quantity(&result)
    }

    async fn chain_id(&self) -> Result<u64, RpcError> {
        let result = self.rpc.call("eth_chainId", json!([])).await?;
        decode_quantity(&result).map(|id| id as u64)
    }
}

#[async_trait]
impl ChainWriter for RpcChainClient {
    async fn submit_create_atom(&self, data: &str) -> Result<TxHash, RpcError> {
        self.tx_hash("multivault_createAtomFromString", json!([data]))
            .await
    }

    async fn submit_create_triples(
        &self,
        subjects: &[AtomId],
        predicates: &[AtomId],
        objects: &[AtomId],
        assets: &[u128],
        value: u128,
    ) -> Result<TxHash, RpcError> {
        let hex_assets: Vec<String> = assets.iter().copied().map(encode_quantity).collect();
        self.tx_hash(
            "multivault_createTriples",
            json!([subjects, predicates, objects, hex_assets, encode_quantity(value)]),
        )
        .await
    }

    async fn submit_deposit(
        &self,
        receiver: &str,
        term: &AtomId,
        share_unit: u128,
        min_shares: u128,
        value: u128,
    ) -> Result<TxHash, RpcError> {
        self.tx_hash(
            "multivault_deposit",
            json!([
                receiver,
                term,
                encode_quantity(share_unit),
                encode_quantity(min_shares),
                encode_quantity(value),
            ]),
        )
        .await
    }
}

// ============================================================================
// Mock implementation
// ============================================================================

/// A submission recorded by [`MockChain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    CreateAtom {
        data: String,
    },
    CreateTriples {
        subjects: Vec<AtomId>,
        predicates: Vec<AtomId>,
        objects: Vec<AtomId>,
        assets: Vec<u128>,
        value: u128,
    },
    Deposit {
        receiver: String,
        term: AtomId,
        share_unit: u128,
        min_shares: u128,
        value: u128,
    },
}

/// Scripted chain for tests and dry runs.
pub struct MockChain {
    balance: Mutex<u128>,
    protocol_fee: Mutex<u128>,
    chain_id: u64,
    fail_next_submit: Mutex<Option<RpcError>>,
    submissions: Mutex<Vec<Submission>>,
}

impl MockChain {
    pub fn new(chain_id: u64) -> Self {
        Self {
            balance: Mutex::new(0),
            protocol_fee: Mutex::new(0),
            chain_id,
            fail_next_submit: Mutex::new(None),
            submissions: Mutex::new(Vec::new()),
        }
    }

    pub fn with_balance(self, balance: u128) -> Self {
        *self.balance.lock() = balance;
        self
    }

    pub fn with_protocol_fee(self, fee: u128) -> Self {
        *self.protocol_fee.lock() = fee;
        self
    }

    /// Make the next submission fail with the given provider error.
    pub fn fail_next_submit(&self, err: RpcError) {
        *self.fail_next_submit.lock() = Some(err);
    }

    pub fn set_balance(&self, balance: u128) {
        *self.balance.lock() = balance;
    }

    /// Everything submitted so far, in order.
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().clone()
    }

    fn record(&self, submission: Submission) -> Result<TxHash, RpcError> {
        if let Some(err) = self.fail_next_submit.lock().take() {
            return Err(err);
        }
        let mut submissions = self.submissions.lock();
        submissions.push(submission);
        Ok(TxHash(format!("0xmock{:04x}", submissions.len())))
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn balance(&self, _account: &str) -> Result<u128, RpcError> {
        Ok(*self.balance.lock())
    }

    async fn protocol_fee(&self) -> Result<u128, RpcError> {
        Ok(*self.protocol_fee.lock())
    }

    async fn chain_id(&self) -> Result<u64, RpcError> {
        Ok(self.chain_id)
    }
}

#[async_trait]
impl ChainWriter for MockChain {
    async fn submit_create_atom(&self, data: &str) -> Result<TxHash, RpcError> {
        self.record(Submission::CreateAtom {
            data: data.to_string(),
        })
    }

    async fn submit_create_triples(
        &self,
        subjects: &[AtomId],
        predicates: &[AtomId],
        objects: &[AtomId],
        assets: &[u128],
        value: u128,
    ) -> Result<TxHash, RpcError> {
        self.record(Submission::CreateTriples {
            subjects: subjects.to_vec(),
            predicates: predicates.to_vec(),
            objects: objects.to_vec(),
            assets: assets.to_vec(),
            value,
        })
    }

    async fn submit_deposit(
        &self,
        receiver: &str,
        term: &AtomId,
        share_unit: u128,
        min_shares: u128,
        value: u128,
    ) -> Result<TxHash, RpcError> {
        self.record(Submission::Deposit {
            receiver: receiver.to_string(),
            term: term.clone(),
            share_unit,
            min_shares,
            value,
        })
    }
}
