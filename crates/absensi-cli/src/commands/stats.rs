use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use absensi_core::storage::{AttendanceStore, LedgerStore};
use absensi_report::DashboardStats;

use crate::output::format::format_stats;
use crate::output::OutputFormat;

pub fn run(ledger: &Path, format: OutputFormat) -> Result<()> {
    let store =
        LedgerStore::open(ledger).context("Ledger not found. Run `absensi init` first.")?;

    // A failed read renders as the empty dashboard, not a crash.
    let records = match store.read_all() {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("Gagal memuat data absensi: {e}");
            Vec::new()
        }
    };

    let stats = DashboardStats::compute(&records, Local::now().date_naive());
    print!("{}", format_stats(&stats, format));
    Ok(())
}
