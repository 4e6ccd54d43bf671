//! sigclump binary.
//!
//! Greedy clustering of a pile of signatures by maximum containment.
//!
//! ```text
//! sigclump --signature-sources sigs/ extra.sig --siglist more.txt \
//!     -k 31 --moltype DNA --threshold 0.2 --batch-size 5000 --seed 1 \
//!     --seed-cluster-csv previous.summary.csv --prefix out/cluster
//! ```
//!
//! Writes `{prefix}.founders.siglist`, `{prefix}.members.siglist`, the matching
//! `identifier,origin` CSVs, `{prefix}.rarefaction.csv`, `{prefix}.clusters.csv`
//! and `{prefix}.summary.csv`. The summary can be passed back as
//! `--seed-cluster-csv` to grow an existing clustering. With `--cluster-sigs`,
//! each cluster's founder and members are also saved as signature files.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use sigclump::io::{
    load_sources, read_seed_founders, resolve_seeds, write_cluster_signatures, write_outputs,
    Selector,
};
use sigclump::Uniqify;

/// Greedy founder-based clustering of signatures
#[derive(Parser, Debug)]
#[command(name = "sigclump", version, about)]
struct Cli {
    /// Signature files or directories of signatures
    #[arg(long, num_args = 0..)]
    signature_sources: Vec<PathBuf>,

    /// File listing signature paths, one per line (repeatable)
    #[arg(long)]
    siglist: Vec<PathBuf>,

    /// K-mer size to select
    #[arg(short, long, default_value_t = 31)]
    ksize: u32,

    /// Molecule type to select
    #[arg(long, default_value = "DNA")]
    moltype: String,

    /// Shuffle seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Minimum max-containment to join a founder's cluster
    #[arg(long, default_value_t = 0.2)]
    threshold: f64,

    /// Summary CSV of a previous run; its founders are used as seeds
    #[arg(long)]
    seed_cluster_csv: Option<PathBuf>,

    /// Items per founder-discovery batch
    #[arg(long, default_value_t = 5000)]
    batch_size: usize,

    /// Output filename prefix (can include directories)
    #[arg(long, default_value = "cluster")]
    prefix: String,

    /// Also write `{prefix}.cluster.N.founder.sig` / `.cluster.sig` per cluster
    #[arg(long)]
    cluster_sigs: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.signature_sources.is_empty() && cli.siglist.is_empty() {
        bail!("please provide signatures via '--signature-sources' or '--siglist'");
    }

    let selector = Selector::new(cli.ksize, cli.moltype.clone());
    let items = load_sources(&cli.signature_sources, &cli.siglist, &selector)
        .context("loading signatures")?;

    let seeds = match &cli.seed_cluster_csv {
        Some(csv) => {
            let origins = read_seed_founders(csv)
                .with_context(|| format!("reading seed clusters from {}", csv.display()))?;
            let resolved = resolve_seeds(&origins, &selector);
            if !resolved.unresolved.is_empty() {
                warn!(
                    count = resolved.unresolved.len(),
                    "some seed founders could not be loaded"
                );
            }
            resolved.founders
        }
        None => Vec::new(),
    };

    let clusterer = Uniqify::new(cli.threshold)
        .with_batch_size(cli.batch_size)
        .with_seed(cli.seed);
    let fit = clusterer
        .fit_with_seeds(items, seeds)
        .context("clustering signatures")?;

    info!(
        founders = fit.founders.len(),
        members = fit.members.len(),
        "clustering done"
    );
    for path in write_outputs(&cli.prefix, &fit).context("writing results")? {
        info!(path = %path.display(), "wrote");
    }
    if cli.cluster_sigs {
        write_cluster_signatures(&cli.prefix, &fit).context("writing cluster signatures")?;
    }
    Ok(())
}
