use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use absensi_core::storage::LedgerStore;

#[derive(Args)]
pub struct InitArgs {
    /// Start over with an empty ledger even if one exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &InitArgs, ledger: &Path) -> Result<()> {
    if LedgerStore::is_initialized(ledger) && !args.force {
        println!("Ledger already exists at {}.", ledger.display());
        println!("Use --force to start over with an empty one.");
        return Ok(());
    }

    if args.force && ledger.exists() {
        std::fs::File::create(ledger).context("Failed to truncate ledger")?;
    }
    LedgerStore::init(ledger).context("Failed to create ledger")?;

    println!("Ledger created at {}.", ledger.display());
    println!();
    println!("Next steps:");
    println!("  absensi token --name \"Ahmad Rizki\" --class 10A --gender putra   Print a token payload");
    println!("  absensi kiosk                                                   Run the capture loop");
    println!("  absensi stats                                                   Dashboard aggregates");
    Ok(())
}
