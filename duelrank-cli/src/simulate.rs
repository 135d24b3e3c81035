//! Synthetic convergence runs: the input order is treated as ground truth
//! (strongest first) and judgments are generated from it until the ranking
//! stabilizes or the comparison budget runs out.

use clap::Parser;
use duelrank_core::{
    constants::DEFAULT_K_FACTOR, ComparisonOutcome, PairingMode, RankingSession, SessionConfig,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::{bail, input, output};

#[derive(Parser)]
pub struct SimulateArgs {
    /// File with one item per line, strongest first (or a JSON array)
    #[arg(long)]
    items: Option<PathBuf>,

    /// Inline item (repeatable); order is ground truth, strongest first
    #[arg(long = "item")]
    inline_items: Vec<String>,

    /// K-factor used for the run
    #[arg(long)]
    k_factor: Option<f64>,

    /// Use the express pairing filter
    #[arg(long)]
    express: bool,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Hard cap on simulated comparisons, as a multiple of the engine's
    /// own estimate
    #[arg(long, default_value_t = 10)]
    budget_multiplier: usize,

    /// Output JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Show each simulated judgment
    #[arg(short, long)]
    verbose: bool,
}

pub fn run_simulate(args: SimulateArgs) {
    let names = input::load_items(args.items.as_deref(), &args.inline_items, true);

    let k_factor = args.k_factor.unwrap_or(DEFAULT_K_FACTOR);
    if k_factor <= 0.0 {
        bail("--k-factor must be positive");
    }
    let pairing_mode = if args.express { PairingMode::Express } else { PairingMode::Standard };

    let mut session = RankingSession::new(names, SessionConfig { k_factor, pairing_mode });

    let mut rng: SmallRng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_rng(&mut rand::rng()),
    };

    // Ground truth: position in the input, earlier is stronger.
    let true_rank: HashMap<String, usize> = session
        .items()
        .iter()
        .enumerate()
        .map(|(pos, item)| (item.id().to_string(), pos))
        .collect();

    let estimate = session.estimated_total_comparisons();
    let budget = estimate * args.budget_multiplier;

    while !session.is_stable() && session.comparisons_recorded() < budget {
        let Some((first, second)) = session.next_pair_with_rng(&mut rng) else {
            break;
        };
        let (winner, loser) = if true_rank[first.id()] < true_rank[second.id()] {
            (first, second)
        } else {
            (second, first)
        };

        if args.verbose {
            eprintln!("  {} beats {}", winner.name(), loser.name());
        }

        let outcome = ComparisonOutcome::Decided {
            winner_id: winner.id().to_string(),
            loser_id: loser.id().to_string(),
        };
        if let Err(e) = session.record_outcome(&outcome) {
            bail(e);
        }
    }

    let stable = session.is_stable();
    eprintln!(
        "Simulated {} comparisons over {} items: {} (engine estimate was {}).",
        session.comparisons_recorded(),
        session.num_items(),
        if stable { "stable" } else { "budget exhausted before stability" },
        estimate,
    );

    let ranked = session.rankings();
    if args.json {
        output::print_json(&ranked, session.comparisons_recorded(), stable);
    } else {
        output::print_table(&ranked, session.comparisons_recorded(), stable);
    }
}
