//! Interactive explorer session.
//!
//! Line-oriented: each command runs to completion before the next prompt,
//! so at most one write is ever in flight.

use crate::output;
use anyhow::{anyhow, Result};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use trustgraph_client::{Explorer, TripleDraft};
use trustgraph_core::model::AtomId;
use trustgraph_core::render_summary;

const HELP: &str = "\
commands:
  search <text>                          search atoms by label
  atom <id>                              show an atom and its claims
  triples <id>                           ranked relationships for a subject
  summary <id>                           AI-ready digest of verified claims
  cost                                   current relationship-creation fee
  create-atom <payload>                  create a new atom
  create-triple <subj> <pred> <obj> [deposit]
  attest <id> <amount>                   stake on an atom or relationship
  help                                   this text
  quit";

pub async fn run(explorer: &Explorer) -> Result<()> {
    let network = explorer.network();
    println!(
        "{} on {} (chain {})",
        "trustgraph".bold(),
        network.name,
        network.chain_id
    );
    match explorer.wallet().account() {
        Some(account) => println!("writes enabled as {}", account.address.dimmed()),
        None => println!("{}", "read-only: no account configured".dimmed()),
    }
    println!("type `help` for commands\n");

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("trustgraph> ") {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);
                if line == "quit" || line == "exit" {
                    break;
                }
                if let Err(err) = dispatch(explorer, &line).await {
                    eprintln!("{} {err:#}", "error:".red().bold());
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

async fn dispatch(explorer: &Explorer, line: &str) -> Result<()> {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match command {
        "help" => println!("{HELP}"),

        "search" => {
            if args.is_empty() {
                return Err(anyhow!("usage: search <text>"));
            }
            let query = args.join(" ");
            let atoms = explorer.search_atoms(&query).await?;
            output::print_search_results(&query, &atoms);
        }

        "atom" => {
            let id = single_arg(&args, "atom <id>")?;
            let atom = explorer
                .atom_details(id)
                .await?
                .ok_or_else(|| anyhow!("no atom with id {id}"))?;
            let triples = explorer.ranked_triples(id).await?;
            output::print_atom(&atom, &triples);
        }

        "triples" => {
            let id = single_arg(&args, "triples <id>")?;
            output::print_triples(&explorer.ranked_triples(id).await?);
        }

        "summary" => {
            let id = single_arg(&args, "summary <id>")?;
            let atom = explorer
                .atom_details(id)
                .await?
                .ok_or_else(|| anyhow!("no atom with id {id}"))?;
            let triples = explorer.ranked_triples(id).await?;
            if triples.is_empty() {
                return Err(anyhow!("no verified claims for {id}"));
            }
            println!("{}", render_summary(&atom.label, &atom.id, &triples));
        }

        "cost" => {
            let quote = explorer.triple_cost().await?;
            output::print_cost(&quote, explorer.network());
        }

        "create-atom" => {
            if args.is_empty() {
                return Err(anyhow!("usage: create-atom <payload>"));
            }
            let tx = explorer.create_atom(&args.join(" ")).await?;
            println!("{} atom submitted in {tx}", "ok:".green().bold());
        }

        "create-triple" => {
            let (subject, predicate, object) = match args.as_slice() {
                [s, p, o] | [s, p, o, _] => (*s, *p, *o),
                _ => return Err(anyhow!("usage: create-triple <subj> <pred> <obj> [deposit]")),
            };
            let draft = TripleDraft {
                subject: AtomId::new(subject)?,
                predicate: AtomId::new(predicate)?,
                object: AtomId::new(object)?,
                initial_deposit: args.get(3).map(|d| d.to_string()),
            };
            let tx = explorer.create_triple(&draft).await?;
            println!("{} relationship submitted in {tx}", "ok:".green().bold());
        }

        "attest" => {
            let [id, amount] = args.as_slice() else {
                return Err(anyhow!("usage: attest <id> <amount>"));
            };
            let tx = explorer.attest(&AtomId::new(*id)?, amount).await?;
            println!("{} attestation submitted in {tx}", "ok:".green().bold());
        }

        other => return Err(anyhow!("unknown command {other:?}; try `help`")),
    }
    Ok(())
}

fn single_arg<'a>(args: &[&'a str], usage: &str) -> Result<&'a str> {
    match args {
        [only] => Ok(only),
        _ => Err(anyhow!("usage: {usage}")),
    }
}
