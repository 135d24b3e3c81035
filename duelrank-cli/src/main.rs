mod config;
mod input;
mod interactive;
mod output;
mod simulate;

use clap::Parser;
use duelrank_core::{constants::DEFAULT_K_FACTOR, PairingMode, RankingSession, SessionConfig};
use std::path::PathBuf;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "duelrank", version, about = "Rank anything through pairwise choices")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Rank items interactively by answering this-or-that prompts
    Rank(RankArgs),
    /// Drive the engine with synthetic judgments and report convergence
    Simulate(simulate::SimulateArgs),
    /// Create a default config file at ~/.config/duelrank/config.toml
    Init,
}

#[derive(Parser)]
struct RankArgs {
    /// File with one item per line (or a JSON array of strings)
    #[arg(long)]
    items: Option<PathBuf>,

    /// Inline item (repeatable)
    #[arg(long = "item")]
    inline_items: Vec<String>,

    /// K-factor: maximum rating swing per comparison
    #[arg(long)]
    k_factor: Option<f64>,

    /// Skip lopsided matchups when similarly-rated opponents exist
    #[arg(long)]
    express: bool,

    /// Output JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Show progress during judging
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (default: ~/.config/duelrank/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank(args) => run_rank(args),
        Commands::Simulate(args) => simulate::run_simulate(args),
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your default k-factor or express mode.");
        }
    }
}

fn run_rank(args: RankArgs) {
    // Load config file, merge with CLI args (CLI wins)
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let k_factor = args.k_factor.or(cfg.k_factor).unwrap_or(DEFAULT_K_FACTOR);
    if k_factor <= 0.0 {
        bail("--k-factor must be positive");
    }

    let pairing_mode = if args.express || cfg.express.unwrap_or(false) {
        PairingMode::Express
    } else {
        PairingMode::Standard
    };

    // The judging loop owns stdin, so items must come from a file or flags.
    let names = input::load_items(args.items.as_deref(), &args.inline_items, false);

    let session = RankingSession::new(names, SessionConfig { k_factor, pairing_mode });
    let session = interactive::run_judging_loop(session, args.verbose);

    let ranked = session.rankings();
    if args.json {
        output::print_json(&ranked, session.comparisons_recorded(), session.is_stable());
    } else {
        output::print_table(&ranked, session.comparisons_recorded(), session.is_stable());
    }
}
