//! Terminal rendering for search results, atoms and ranked relationships.

use colored::Colorize;
use trustgraph_client::{CostQuote, NetworkSpec};
use trustgraph_core::model::{Atom, AtomSummary, TripleSummary};

pub fn print_search_results(query: &str, atoms: &[AtomSummary]) {
    if atoms.is_empty() {
        println!("no atoms match {query:?} — create one with `trustgraph create-atom`");
        return;
    }
    println!(
        "{} {} matching atoms",
        "found".green().bold(),
        atoms.len().to_string().bold()
    );
    for atom in atoms {
        println!();
        println!("  {}  {}", atom.label.bold(), atom.id.dimmed());
        println!("    {}", atom.description);
        if atom.triples_count > 0 {
            println!("    {} endorsement positions", atom.triples_count);
        }
    }
}

pub fn print_atom(atom: &Atom, triples: &[TripleSummary]) {
    println!("{}", atom.label.bold().underline());
    println!("{}", atom.id.dimmed());
    println!();
    println!("{}", atom.description);
    if let Some(creator) = &atom.creator {
        println!("created by {creator}");
    }
    println!(
        "total trust signal {} across {} positions",
        format!("{:.4}", atom.trust_signal).cyan().bold(),
        atom.position_count
    );
    println!();
    if triples.is_empty() {
        println!("no verified claims yet");
    } else {
        println!("{}", "top verified claims".bold());
        print_triples(triples);
    }
}

pub fn print_triples(triples: &[TripleSummary]) {
    for (rank, triple) in triples.iter().enumerate() {
        let predicate = triple.predicate.label.as_deref().unwrap_or("relates to");
        let object = triple.object.label.as_deref().unwrap_or("unknown");
        println!(
            "  {:>2}. {} {} {}  {} {}",
            rank + 1,
            predicate,
            object.bold(),
            format!("[{} attesters]", triple.attesters_count).dimmed(),
            format!("{:.4}", triple.trust_signal).cyan(),
            "$TRUST".dimmed(),
        );
        for endorsement in &triple.provenance {
            let who = endorsement
                .label
                .as_deref()
                .or(endorsement.account.as_deref())
                .unwrap_or("unknown account");
            println!(
                "        {} staked {:.4}",
                who.dimmed(),
                endorsement.shares
            );
        }
    }
}

pub fn print_cost(quote: &CostQuote, network: &NetworkSpec) {
    println!(
        "creating a relationship on {} currently costs {} {} ({} base units)",
        network.name,
        quote.formatted.bold(),
        network.symbol,
        quote.raw
    );
}
