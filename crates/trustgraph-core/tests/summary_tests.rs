use trustgraph_core::model::{AtomRef, Endorsement, TripleSummary};
use trustgraph_core::{render_summary, SUMMARY_LIMIT};

fn labeled(label: &str) -> AtomRef {
    AtomRef {
        id: None,
        label: Some(label.to_string()),
    }
}

fn endorsed_triple(predicate: &str, object: &str, signal: f64, attesters: u32) -> TripleSummary {
    TripleSummary {
        id: None,
        subject: labeled("subject"),
        predicate: labeled(predicate),
        object: labeled(object),
        trust_signal: signal,
        attesters_count: attesters,
        provenance: vec![Endorsement {
            account: Some("0xaaa".to_string()),
            label: None,
            shares: signal,
        }],
    }
}

#[test]
fn renders_the_documented_shape() {
    let triples = vec![
        endorsed_triple("is a", "researcher", 3.0, 5),
        TripleSummary {
            provenance: vec![],
            ..endorsed_triple("works for", "Ethereum Foundation", 1.25, 0)
        },
    ];

    let text = render_summary("Vitalik", "0x123abc", &triples);
    assert_eq!(
        text,
        "Verified facts about \"Vitalik\" (ID: 0x123abc):\n\
         1. is a researcher - Trust: 3.0000 $TRUST (Endorsed by 5 accounts)\n\
         2. works for Ethereum Foundation - Trust: 1.2500 $TRUST (Unendorsed)\n\
         \n\
         Source: TrustGraph / Intuition Protocol (Intuition Testnet Beta)"
    );
}

#[test]
fn output_is_byte_deterministic() {
    let triples = vec![
        endorsed_triple("is a", "researcher", 3.0, 5),
        endorsed_triple("created", "Ethereum", 2.5, 2),
    ];
    let first = render_summary("Vitalik", "0x123abc", &triples);
    for _ in 0..5 {
        assert_eq!(render_summary("Vitalik", "0x123abc", &triples), first);
    }
}

#[test]
fn truncates_to_the_top_ten() {
    let triples: Vec<TripleSummary> = (0..25)
        .map(|i| endorsed_triple("claim", &format!("object-{i}"), 25.0 - i as f64, 1))
        .collect();
    let text = render_summary("Busy Atom", "0xfeed", &triples);
    assert!(text.contains(&format!("{SUMMARY_LIMIT}. claim object-9")));
    assert!(!text.contains("11."));
    assert!(!text.contains("object-10"));
}

#[test]
fn missing_labels_fall_back_to_placeholders() {
    let triple = TripleSummary {
        id: None,
        subject: AtomRef::default(),
        predicate: AtomRef::default(),
        object: AtomRef {
            id: None,
            label: Some("   ".to_string()),
        },
        trust_signal: 0.5,
        attesters_count: 0,
        provenance: vec![],
    };
    let text = render_summary("X", "0x1", &[triple]);
    assert!(text.contains("1. relates to unknown - Trust: 0.5000 $TRUST (Unendorsed)"));
}

#[test]
fn endorsement_clause_keys_on_provenance_not_count() {
    // The attester count can be positive while the indexer returned no
    // position rows; the clause follows the provenance list.
    let mut triple = endorsed_triple("is a", "thing", 1.0, 7);
    triple.provenance.clear();
    let text = render_summary("X", "0x1", &[triple]);
    assert!(text.contains("(Unendorsed)"));
}
