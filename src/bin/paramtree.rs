mod commands;

use clap::Parser;
use commands::{execute_command, Commands};
use log::LevelFilter;

/// Parse and build URL parameter strings with bracket-notation keys
#[derive(Parser)]
#[command(
    name = "paramtree",
    about = "Parse and build URL parameter strings with bracket-notation keys",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let args = Cli::parse();

    // RUST_LOG still wins over the verbose flag when set
    let mut logger = env_logger::Builder::new();
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.parse_default_env().init();

    if let Err(e) = execute_command(args.command) {
        eprintln!("Command failed: {e}");
        std::process::exit(1);
    }
}
