//! TrustGraph CLI
//!
//! Command-line explorer for a staked knowledge graph:
//! - Searching atoms and inspecting their ranked relationships
//! - Generating the AI-ready digest of an atom's verified claims
//! - Submitting writes (atoms, relationships, attestations) through the
//!   chain bridge, with cost estimation and a balance check up front

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use trustgraph_client::{Explorer, TripleDraft, DEFAULT_INDEXER_URL, INTUITION_TESTNET};
use trustgraph_core::model::AtomId;
use trustgraph_core::render_summary;
use url::Url;

mod output;
#[cfg(feature = "repl-rustyline")]
mod repl;

#[derive(Parser)]
#[command(name = "trustgraph")]
#[command(
    author,
    version,
    about = "TrustGraph: explore and curate a staked knowledge graph"
)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConnectionArgs {
    /// GraphQL indexer endpoint
    #[arg(long, env = "TRUSTGRAPH_INDEXER_URL", default_value = DEFAULT_INDEXER_URL)]
    indexer_url: Url,

    /// JSON-RPC endpoint of the chain bridge
    #[arg(long, env = "TRUSTGRAPH_RPC_URL", default_value = INTUITION_TESTNET.rpc_url)]
    rpc_url: Url,

    /// Bearer token for the indexer, if it requires one
    #[arg(long, env = "TRUSTGRAPH_INDEXER_TOKEN")]
    indexer_token: Option<String>,

    /// Account address writes are sent from. Reads work without it; every
    /// write requires it.
    #[arg(long, env = "TRUSTGRAPH_ACCOUNT")]
    account: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search atoms by label fragment
    Search {
        query: String,
    },

    /// Show one atom: resolved label/description, vault aggregate, and its
    /// top verified claims
    Atom {
        id: String,
    },

    /// List an atom's relationships, ranked by trust signal
    Triples {
        id: String,
    },

    /// Print the copyable AI digest of an atom's verified claims
    Summary {
        id: String,
    },

    /// Show the current relationship-creation fee
    Cost,

    /// Create a new atom from a string payload
    CreateAtom {
        data: String,
    },

    /// Create a relationship (subject → predicate → object)
    CreateTriple {
        subject: String,
        predicate: String,
        object: String,
        /// Optional extra stake in display units (e.g. "0.01")
        #[arg(long)]
        deposit: Option<String>,
    },

    /// Stake on an existing atom or relationship
    Attest {
        id: String,
        amount: String,
    },

    /// Interactive explorer session
    #[cfg(feature = "repl-rustyline")]
    Repl,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let explorer = Explorer::connect(
        cli.connection.indexer_url,
        cli.connection.rpc_url,
        cli.connection.indexer_token,
        cli.connection.account,
        INTUITION_TESTNET,
    )
    .await
    .map_err(|err| anyhow!("could not connect to the chain bridge: {err}"))?;
    tracing::debug!(
        network = explorer.network().name,
        connected = explorer.wallet().is_connected(),
        "clients ready"
    );

    run_command(&explorer, cli.command).await
}

async fn run_command(explorer: &Explorer, command: Commands) -> Result<()> {
    match command {
        Commands::Search { query } => {
            let atoms = explorer.search_atoms(&query).await?;
            output::print_search_results(&query, &atoms);
        }

        Commands::Atom { id } => {
            let atom = explorer
                .atom_details(&id)
                .await?
                .ok_or_else(|| anyhow!("no atom with id {id}"))?;
            let triples = explorer.ranked_triples(&id).await?;
            output::print_atom(&atom, &triples);
        }

        Commands::Triples { id } => {
            let triples = explorer.ranked_triples(&id).await?;
            output::print_triples(&triples);
        }

        Commands::Summary { id } => {
            let atom = explorer
                .atom_details(&id)
                .await?
                .ok_or_else(|| anyhow!("no atom with id {id}"))?;
            let triples = explorer.ranked_triples(&id).await?;
            if triples.is_empty() {
                return Err(anyhow!(
                    "no verified claims for {id}; add or endorse relationships first"
                ));
            }
            println!("{}", render_summary(&atom.label, &atom.id, &triples));
        }

        Commands::Cost => {
            let quote = explorer.triple_cost().await?;
            output::print_cost(&quote, explorer.network());
        }

        Commands::CreateAtom { data } => {
            let tx = explorer.create_atom(&data).await?;
            println!("{} atom submitted in {tx}", "ok:".green().bold());
        }

        Commands::CreateTriple {
            subject,
            predicate,
            object,
            deposit,
        } => {
            let draft = TripleDraft {
                subject: AtomId::new(subject)?,
                predicate: AtomId::new(predicate)?,
                object: AtomId::new(object)?,
                initial_deposit: deposit,
            };
            let quote = explorer.triple_cost().await?;
            println!(
                "protocol fee {} {} + deposit {}",
                quote.formatted,
                explorer.network().symbol,
                draft.initial_deposit.as_deref().unwrap_or("0"),
            );
            let tx = explorer.create_triple(&draft).await?;
            println!("{} relationship submitted in {tx}", "ok:".green().bold());
        }

        Commands::Attest { id, amount } => {
            let tx = explorer.attest(&AtomId::new(id)?, &amount).await?;
            println!("{} attestation submitted in {tx}", "ok:".green().bold());
        }

        #[cfg(feature = "repl-rustyline")]
        Commands::Repl => repl::run(explorer).await?,
    }
    Ok(())
}
