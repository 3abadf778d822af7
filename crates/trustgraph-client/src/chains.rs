//! Network descriptors for the protocol deployments this client can target.

/// Constants describing one protocol network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSpec {
    pub chain_id: u64,
    pub name: &'static str,
    /// Native token symbol; amounts are 18-decimal base units of this token.
    pub symbol: &'static str,
    pub rpc_url: &'static str,
    pub explorer_url: &'static str,
    pub testnet: bool,
}

/// The Intuition testnet, the deployment this explorer currently targets.
pub const INTUITION_TESTNET: NetworkSpec = NetworkSpec {
    chain_id: 13579,
    name: "Intuition Testnet",
    symbol: "TRUST",
    rpc_url: "https://testnet.rpc.intuition.systems/http",
    explorer_url: "https://testnet.explorer.intuition.systems",
    testnet: true,
};

/// Default indexer endpoint for [`INTUITION_TESTNET`].
pub const DEFAULT_INDEXER_URL: &str = "https://api.intuition.systems/graphql";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testnet_constants_match_the_deployment() {
        assert_eq!(INTUITION_TESTNET.chain_id, 13579);
        assert_eq!(INTUITION_TESTNET.symbol, "TRUST");
        assert!(INTUITION_TESTNET.testnet);
    }
}
