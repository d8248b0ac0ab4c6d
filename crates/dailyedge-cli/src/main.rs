use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod app;
mod commands;

#[derive(Parser)]
#[command(name = "dailyedge", version, about = "DailyEdge CLI")]
struct Cli {
    /// Directory holding config.toml and dailyedge.db (default: ~/.config/dailyedge)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Study timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Task list
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Grade calculator
    Grade {
        #[command(subcommand)]
        action: commands::grade::GradeAction,
    },
    /// Today's summary
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = app::App::load(cli.data_dir).and_then(|app| match cli.command {
        Commands::Timer { action } => commands::timer::run(&app, action),
        Commands::Task { action } => commands::task::run(&app, action),
        Commands::Grade { action } => commands::grade::run(action),
        Commands::Stats { action } => commands::stats::run(&app, action),
        Commands::Config { action } => commands::config::run(&app, action),
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
