//! Chain Reaction match simulator CLI.
//!
//! Play AI-vs-AI games to compare heuristics and search depths.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # Default: 20 games, material vs threat
//!   cargo run --bin simulate -- -n 50 --blue random   # 50 games against the random player
//!   cargo run --bin simulate -- --seed 42             # Reproducible run

use chain_reaction::ai::AgentSpec;
use chain_reaction::constants::DEFAULT_SEARCH_DEPTH;
use chain_reaction::simulator::{run_matches, MatchConfig};
use std::env;
use std::path::PathBuf;

/// Command-line options, applied on top of the base config.
#[derive(Default)]
struct Options {
    config_path: Option<PathBuf>,
    num_games: Option<u32>,
    seed: Option<u64>,
    depth: Option<u32>,
    rows: Option<usize>,
    cols: Option<usize>,
    max_turns: Option<u32>,
    red: Option<String>,
    blue: Option<String>,
    json: bool,
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args)?;

    let level = if options.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = build_config(&options)?;

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              CHAIN REACTION MATCH SIMULATOR                   ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Games:          {}", config.num_games);
    println!("  Board:          {}x{}", config.rows, config.cols);
    println!("  Max Moves:      {}", config.max_turns);
    println!("  Red:            {}", config.red.label());
    println!("  Blue:           {}", config.blue.label());
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running matches...");
    println!();

    let report = run_matches(&config).map_err(|e| e.to_string())?;

    println!("{}", report.to_text());

    if options.json {
        let filename = format!(
            "match_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json())
            .map_err(|e| format!("Failed to write JSON report: {}", e))?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-n" | "--games" => options.num_games = Some(parse_value(args, &mut i)?),
            "-s" | "--seed" => options.seed = Some(parse_value(args, &mut i)?),
            "-d" | "--depth" => options.depth = Some(parse_value(args, &mut i)?),
            "--rows" => options.rows = Some(parse_value(args, &mut i)?),
            "--cols" => options.cols = Some(parse_value(args, &mut i)?),
            "--max-turns" => options.max_turns = Some(parse_value(args, &mut i)?),
            "--red" => options.red = Some(parse_value(args, &mut i)?),
            "--blue" => options.blue = Some(parse_value(args, &mut i)?),
            "--config" => options.config_path = Some(parse_value(args, &mut i)?),
            "--json" => options.json = true,
            "-v" | "--verbose" => options.verbose = true,
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(options)
}

/// Parse the value following the flag at `args[*i]`, advancing past it.
fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize) -> Result<T, String> {
    let flag = &args[*i];
    let raw = args
        .get(*i + 1)
        .ok_or_else(|| format!("Missing value for {}", flag))?;
    *i += 1;
    raw.parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, raw))
}

fn build_config(options: &Options) -> Result<MatchConfig, String> {
    let mut config = match &options.config_path {
        Some(path) => MatchConfig::load(path).map_err(|e| e.to_string())?,
        None => MatchConfig::default(),
    };

    if let Some(n) = options.num_games {
        config.num_games = n;
    }
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    if let Some(rows) = options.rows {
        config.rows = rows;
    }
    if let Some(cols) = options.cols {
        config.cols = cols;
    }
    if let Some(max_turns) = options.max_turns {
        config.max_turns = max_turns;
    }

    let depth = options.depth.unwrap_or(DEFAULT_SEARCH_DEPTH);
    if let Some(name) = &options.red {
        config.red = player(name, depth)?;
    } else if let Some(depth) = options.depth {
        config.red = with_depth(config.red, depth);
    }
    if let Some(name) = &options.blue {
        config.blue = player(name, depth)?;
    } else if let Some(depth) = options.depth {
        config.blue = with_depth(config.blue, depth);
    }

    Ok(config)
}

fn player(name: &str, depth: u32) -> Result<AgentSpec, String> {
    AgentSpec::from_name(name, depth).ok_or_else(|| format!("Unknown player: {}", name))
}

fn with_depth(spec: AgentSpec, depth: u32) -> AgentSpec {
    match spec {
        AgentSpec::Minimax { weights, .. } => AgentSpec::minimax(weights, depth),
        AgentSpec::Random => AgentSpec::Random,
    }
}

fn print_help() {
    println!("Chain Reaction Match Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --games <N>     Number of games (default: 20)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -d, --depth <D>     Search depth for minimax players (default: 3)");
    println!("    --rows <R>          Board rows (default: 6)");
    println!("    --cols <C>          Board columns (default: 9)");
    println!("    --max-turns <T>     Moves before a game is called unfinished (default: 500)");
    println!("    --red <PLAYER>      Red player (default: material)");
    println!("    --blue <PLAYER>     Blue player (default: threat)");
    println!("    --config <FILE>     Load a JSON match config; flags override it");
    println!("    --json              Save JSON report");
    println!("    -v, --verbose       Debug logging (RUST_LOG overrides)");
    println!("    -h, --help          Show this help");
    println!();
    println!("PLAYERS:");
    println!("    random              Uniform random legal move");
    println!("    minimax             Alpha-beta with every heuristic at weight 1");
    println!("    material            Alpha-beta favoring orb count");
    println!("    threat              Alpha-beta favoring threats and safe cells");
    println!("    h1 .. h5            Alpha-beta on a single heuristic");
    println!("                        (material, stability, threat, control, diversity)");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                           # Default run");
    println!("    cargo run --bin simulate -- --red h3 --blue random # Threat only vs random");
    println!("    cargo run --bin simulate -- -d 2 --rows 5 --cols 5 # Shallow search, small board");
}
