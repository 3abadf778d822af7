//! Read paths end to end: resolution, ranking, caching, and the write-side
//! invalidations that refresh them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use trustgraph_client::{
    Explorer, GraphSource, IndexerError, MockChain, TripleDraft, WalletState, INTUITION_TESTNET,
};
use trustgraph_core::model::{AtomId, RawAtom, RawTriple};

/// Scripted indexer that counts how many times each read actually runs.
#[derive(Default)]
struct CountingGraph {
    atoms: Vec<RawAtom>,
    triples: Vec<RawTriple>,
    search_calls: AtomicUsize,
    triples_calls: AtomicUsize,
}

#[async_trait::async_trait]
impl GraphSource for CountingGraph {
    async fn search_atoms(&self, _text: &str, _limit: u32) -> Result<Vec<RawAtom>, IndexerError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.atoms.clone())
    }

    async fn atom_details(&self, id: &str) -> Result<Option<RawAtom>, IndexerError> {
        Ok(self
            .atoms
            .iter()
            .find(|a| a.term_id.as_deref() == Some(id))
            .cloned())
    }

    async fn triples_for_subject(
        &self,
        _subject_id: &str,
        _limit: u32,
    ) -> Result<Vec<RawTriple>, IndexerError> {
        self.triples_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.triples.clone())
    }
}

fn sample_atoms() -> Vec<RawAtom> {
    vec![
        serde_json::from_value(serde_json::json!({
            "term_id": "0xa1",
            "label": "Bitcoin",
            "data": "A peer-to-peer electronic cash system.",
            "term": { "vaults": [{ "total_shares": "2000000000000000000", "position_count": 3 }] }
        }))
        .unwrap(),
        serde_json::from_value(serde_json::json!({
            "term_id": "0xa2",
            "value": { "person": { "name": "Satoshi", "description": null } },
            "data": "ipfs://QmHash"
        }))
        .unwrap(),
    ]
}

fn sample_triples() -> Vec<RawTriple> {
    let triple = |id: &str, shares: &str| -> RawTriple {
        serde_json::from_value(serde_json::json!({
            "term_id": id,
            "subject": { "term_id": "0xa1", "label": "Bitcoin" },
            "predicate": { "term_id": "0xp1", "label": "is a" },
            "object": { "term_id": "0xo1", "label": "currency" },
            "term": { "vaults": [{ "total_shares": shares, "position_count": 1, "positions": [] }] }
        }))
        .unwrap()
    };
    vec![
        triple("0xt1", "1000000000000000000"),
        triple("0xt2", "3000000000000000000"),
        triple("0xt3", "2000000000000000000"),
    ]
}

fn explorer(graph: Arc<CountingGraph>, chain: Arc<MockChain>) -> Explorer {
    Explorer::new(
        graph,
        chain.clone(),
        chain,
        WalletState::connected("0xme", INTUITION_TESTNET.chain_id),
        INTUITION_TESTNET,
    )
}

fn funded_chain() -> Arc<MockChain> {
    Arc::new(
        MockChain::new(INTUITION_TESTNET.chain_id)
            .with_protocol_fee(500_000_000_000_000)
            .with_balance(trustgraph_core::WAD),
    )
}

#[tokio::test]
async fn search_resolves_labels_descriptions_and_counts() {
    let graph = Arc::new(CountingGraph {
        atoms: sample_atoms(),
        ..Default::default()
    });
    let explorer = explorer(graph, funded_chain());

    let results = explorer.search_atoms("bit").await.unwrap();
    assert_eq!(results.len(), 2);

    assert_eq!(results[0].label, "Bitcoin");
    assert_eq!(results[0].description, "A peer-to-peer electronic cash system.");
    assert_eq!(results[0].triples_count, 3);

    // Label falls back to the nested person name; the ipfs payload is not a
    // usable description.
    assert_eq!(results[1].label, "Satoshi");
    assert_eq!(results[1].description, "No description available.");
}

#[tokio::test]
async fn repeated_search_is_served_from_cache() {
    let graph = Arc::new(CountingGraph {
        atoms: sample_atoms(),
        ..Default::default()
    });
    let explorer = explorer(graph.clone(), funded_chain());

    explorer.search_atoms("bit").await.unwrap();
    explorer.search_atoms("bit").await.unwrap();
    assert_eq!(graph.search_calls.load(Ordering::SeqCst), 1);

    // Different text is a different cache key.
    explorer.search_atoms("sat").await.unwrap();
    assert_eq!(graph.search_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn ranked_triples_come_back_sorted() {
    let graph = Arc::new(CountingGraph {
        triples: sample_triples(),
        ..Default::default()
    });
    let explorer = explorer(graph, funded_chain());

    let ranked = explorer.ranked_triples("0xa1").await.unwrap();
    let ids: Vec<&str> = ranked.iter().filter_map(|t| t.id.as_deref()).collect();
    assert_eq!(ids, vec!["0xt2", "0xt3", "0xt1"]);
}

#[tokio::test]
async fn successful_create_triple_refreshes_dependent_reads() {
    let graph = Arc::new(CountingGraph {
        atoms: sample_atoms(),
        triples: sample_triples(),
        ..Default::default()
    });
    let chain = funded_chain();
    let explorer = explorer(graph.clone(), chain);

    explorer.search_atoms("bit").await.unwrap();
    explorer.ranked_triples("0xa1").await.unwrap();
    assert_eq!(graph.search_calls.load(Ordering::SeqCst), 1);
    assert_eq!(graph.triples_calls.load(Ordering::SeqCst), 1);

    let draft = TripleDraft {
        subject: AtomId::new(format!("0x{}", "aa".repeat(20))).unwrap(),
        predicate: AtomId::new(format!("0x{}", "bb".repeat(20))).unwrap(),
        object: AtomId::new(format!("0x{}", "cc".repeat(20))).unwrap(),
        initial_deposit: None,
    };
    explorer.create_triple(&draft).await.unwrap();

    // Both groups were invalidated, so the next reads hit the indexer again.
    explorer.search_atoms("bit").await.unwrap();
    explorer.ranked_triples("0xa1").await.unwrap();
    assert_eq!(graph.search_calls.load(Ordering::SeqCst), 2);
    assert_eq!(graph.triples_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_write_leaves_caches_intact() {
    let graph = Arc::new(CountingGraph {
        atoms: sample_atoms(),
        ..Default::default()
    });
    // No funds: the balance gate fires before submission.
    let chain = Arc::new(
        MockChain::new(INTUITION_TESTNET.chain_id).with_protocol_fee(500_000_000_000_000),
    );
    let explorer = explorer(graph.clone(), chain);

    explorer.search_atoms("bit").await.unwrap();
    let draft = TripleDraft {
        subject: AtomId::new(format!("0x{}", "aa".repeat(20))).unwrap(),
        predicate: AtomId::new(format!("0x{}", "bb".repeat(20))).unwrap(),
        object: AtomId::new(format!("0x{}", "cc".repeat(20))).unwrap(),
        initial_deposit: None,
    };
    assert!(explorer.create_triple(&draft).await.is_err());

    explorer.search_atoms("bit").await.unwrap();
    assert_eq!(graph.search_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn triple_cost_formats_the_protocol_fee() {
    let graph = Arc::new(CountingGraph::default());
    let explorer = explorer(graph, funded_chain());

    let quote = explorer.triple_cost().await.unwrap();
    assert_eq!(quote.raw, 500_000_000_000_000);
    assert_eq!(quote.formatted, "0.0005");
}

#[tokio::test]
async fn atom_details_resolve_the_vault_aggregate() {
    let graph = Arc::new(CountingGraph {
        atoms: sample_atoms(),
        ..Default::default()
    });
    let explorer = explorer(graph, funded_chain());

    let atom = explorer.atom_details("0xa1").await.unwrap().unwrap();
    assert_eq!(atom.label, "Bitcoin");
    assert_eq!(atom.trust_signal, 2.0);
    assert_eq!(atom.position_count, 3);

    assert!(explorer.atom_details("0xmissing").await.unwrap().is_none());
}
