//! TrustGraph client: orchestration over the two external collaborators.
//!
//! The explorer owns no durable state. Reads go to the graph indexer
//! through a TTL/single-flight [`cache`], writes go to the chain bridge
//! after wallet gating and a balance check, and every successful write
//! invalidates the cache groups whose views it made stale.
//!
//! [`Explorer`] is the capability bundle: one configured set of clients,
//! constructed at process start and passed down by reference. Components
//! never reach for an implicit global, which keeps every dependency visible
//! and makes the whole pipeline runnable against [`chain::MockChain`] and a
//! mock [`indexer::GraphSource`].

pub mod cache;
pub mod chain;
pub mod chains;
pub mod error;
pub mod indexer;
pub mod reads;
pub mod rpc;
pub mod search;
pub mod wallet;
pub mod writes;

use std::sync::Arc;

pub use cache::{groups, QueryCache, COST_TTL, READ_TTL};
pub use chain::{ChainReader, ChainWriter, MockChain, RpcChainClient, Submission, TxHash};
pub use chains::{NetworkSpec, DEFAULT_INDEXER_URL, INTUITION_TESTNET};
pub use error::{classify_submit_failure, IndexerError, SubmitContext, WriteError};
pub use indexer::{GraphSource, IndexerClient};
pub use rpc::{RpcClient, RpcError};
pub use search::SearchSession;
pub use wallet::{ConnectedAccount, WalletState};
pub use writes::{CostBreakdown, CostQuote, TripleDraft};

/// One configured set of external-client capabilities.
pub struct Explorer {
    pub(crate) indexer: Arc<dyn GraphSource>,
    pub(crate) chain_reader: Arc<dyn ChainReader>,
    pub(crate) chain_writer: Arc<dyn ChainWriter>,
    pub(crate) wallet: WalletState,
    pub(crate) network: NetworkSpec,
    pub(crate) cache: QueryCache,
}

impl Explorer {
    pub fn new(
        indexer: Arc<dyn GraphSource>,
        chain_reader: Arc<dyn ChainReader>,
        chain_writer: Arc<dyn ChainWriter>,
        wallet: WalletState,
        network: NetworkSpec,
    ) -> Self {
        Self {
            indexer,
            chain_reader,
            chain_writer,
            wallet,
            network,
            cache: QueryCache::new(),
        }
    }

    /// Connect the real clients: GraphQL indexer plus the JSON-RPC chain
    /// bridge. When an account is configured, the bridge's chain id is read
    /// once so write gating can compare it against `network`.
    pub async fn connect(
        indexer_url: url::Url,
        rpc_url: url::Url,
        auth_token: Option<String>,
        account: Option<String>,
        network: NetworkSpec,
    ) -> Result<Self, RpcError> {
        let mut indexer = IndexerClient::new(indexer_url);
        if let Some(token) = auth_token {
            indexer = indexer.with_auth_token(token);
        }
        let chain = Arc::new(RpcChainClient::new(RpcClient::new(rpc_url)));

        let wallet = match account {
            Some(address) => {
                let chain_id = chain.chain_id().await?;
                WalletState::connected(address, chain_id)
            }
            None => WalletState::disconnected(),
        };

        Ok(Self::new(
            Arc::new(indexer),
            chain.clone(),
            chain,
            wallet,
            network,
        ))
    }

    pub fn wallet(&self) -> &WalletState {
        &self.wallet
    }

    pub fn set_wallet(&mut self, wallet: WalletState) {
        self.wallet = wallet;
    }

    pub fn network(&self) -> &NetworkSpec {
        &self.network
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }
}
