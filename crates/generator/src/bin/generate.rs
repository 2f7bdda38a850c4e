//! Generate a claim batch from a CSV dataset.
//!
//! Reads `address,amount` rows, builds the authenticated tree, produces
//! per-claim inclusion proofs and nullifiers, and writes the JSON results
//! for the circuit. The nullifier secret comes from the `SECRET`
//! environment variable.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::{error, info};

use airdrop_generator::{
    generate_batch, load_claims, secret_from_env, write_outputs, BatchConfig, GenerateError,
    TreeShape,
};
use airdrop_tree::field::to_decimal;

#[derive(Parser)]
#[command(name = "generate")]
#[command(about = "Build an airdrop claim tree with proofs and nullifiers")]
struct Args {
    /// CSV dataset with an address,amount header
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for the JSON results
    #[arg(short, long, default_value = "out")]
    out: PathBuf,

    /// Tree depth (capacity 2^depth for the dense shape)
    #[arg(long, default_value_t = 5)]
    depth: usize,

    /// Tree shape
    #[arg(long, value_enum, default_value_t = Shape::Dense)]
    shape: Shape,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Shape {
    Dense,
    Sparse,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), GenerateError> {
    let secret = secret_from_env()?;
    let rows = load_claims(&args.input)?;
    info!(rows = rows.len(), input = %args.input.display(), "dataset loaded");

    let config = BatchConfig {
        depth: args.depth,
        shape: match args.shape {
            Shape::Dense => TreeShape::Dense,
            Shape::Sparse => TreeShape::Sparse,
        },
        secret,
    };

    let batch = generate_batch(&rows, &config)?;
    info!(root = %to_decimal(&batch.root), "tree built");

    let (results_path, inputs_path) = write_outputs(&args.out, &batch)?;
    info!(
        results = %results_path.display(),
        inputs = %inputs_path.display(),
        "outputs written"
    );

    let invalid = batch.claims.iter().filter(|c| !c.is_valid).count();
    if invalid > 0 {
        error!(invalid, "some proofs failed self-check; inspect the results file");
    }

    Ok(())
}
