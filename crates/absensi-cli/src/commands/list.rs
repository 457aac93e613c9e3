use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;

use absensi_core::storage::{AttendanceStore, LedgerStore};
use absensi_report::{query, ClassFilter, DatePeriod, RecordFilter, StatusFilter};

use crate::output::format::format_record_page;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct ListArgs {
    /// Filter by status (all|hadir|izin|sakit|alpha)
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    /// Filter by class (all, or a class name like 10A)
    #[arg(long, default_value = "all")]
    pub class: ClassFilter,

    /// Restrict to a period (all|week|month)
    #[arg(long, default_value = "all")]
    pub period: DatePeriod,

    /// Page number (20 records per page)
    #[arg(long, default_value = "1")]
    pub page: u32,
}

pub fn run(args: &ListArgs, ledger: &Path, format: OutputFormat) -> Result<()> {
    let store =
        LedgerStore::open(ledger).context("Ledger not found. Run `absensi init` first.")?;

    // A failed read renders as the empty table, not a crash.
    let records = match store.read_all() {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("Gagal memuat data absensi: {e}");
            Vec::new()
        }
    };

    let filter = RecordFilter::new()
        .with_status(args.status)
        .with_class(args.class.clone())
        .with_period(args.period)
        .with_page(args.page);
    let page = query(&records, &filter, Local::now().date_naive());

    print!("{}", format_record_page(&page, format));
    Ok(())
}
