use std::path::Path;

use anyhow::{Context, Result};

use absensi_core::storage::{AttendanceStore, LedgerStore};
use absensi_protocol::ReadReply;

/// Dump every record wrapped in the gateway read envelope, the exact shape a
/// dashboard client consumes.
pub fn run(ledger: &Path) -> Result<()> {
    let store =
        LedgerStore::open(ledger).context("Ledger not found. Run `absensi init` first.")?;

    let reply = match store.read_all() {
        Ok(records) => ReadReply::ok(records),
        Err(e) => ReadReply::fail(e.to_string()),
    };
    println!("{}", serde_json::to_string_pretty(&reply).unwrap_or_default());
    Ok(())
}
