use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use absensi_capture::SessionConfig;
use absensi_core::Settings;

mod commands;
mod output;

#[derive(Parser)]
#[command(
    name = "absensi",
    version,
    about = "QR-based student attendance capture and reporting"
)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: output::OutputFormat,

    /// Ledger file (default: ABSENSI_LEDGER or ./absensi.ledger.jsonl)
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: commands::Commands,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load();
    let ledger = cli.ledger.clone().unwrap_or(settings.ledger_path.clone());
    let session_config = SessionConfig {
        reset_delay: settings.reset_delay,
        fallback_location: settings.fallback_location,
    };

    match &cli.command {
        commands::Commands::Init(args) => commands::init::run(args, &ledger),
        commands::Commands::Token(args) => commands::token::run(args),
        commands::Commands::Record(args) => {
            commands::record::run(args, &ledger, &session_config, cli.format)
        }
        commands::Commands::Kiosk(args) => commands::kiosk::run(args, &ledger, &session_config),
        commands::Commands::Stats => commands::stats::run(&ledger, cli.format),
        commands::Commands::List(args) => commands::list::run(args, &ledger, cli.format),
        commands::Commands::Export => commands::export::run(&ledger),
    }
}
