use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;

use absensi_capture::{
    messages, CaptureSession, CaptureState, DeniedLocation, FixedLocation, QueuedDecoder,
    SessionConfig, SessionEvent,
};
use absensi_core::model::{AttendanceStatus, Coordinates};
use absensi_core::storage::LedgerStore;
use absensi_protocol::WriteReply;

use crate::output::OutputFormat;

#[derive(Args)]
pub struct RecordArgs {
    /// Decoded token payload (JSON)
    #[arg(long, conflicts_with = "payload_file")]
    pub payload: Option<String>,

    /// Read the decoded payload from a file
    #[arg(long)]
    pub payload_file: Option<PathBuf>,

    /// Attendance status (hadir|izin|sakit|alpha)
    #[arg(long, default_value = "hadir")]
    pub status: AttendanceStatus,

    /// Latitude reported by the device
    #[arg(long, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude reported by the device
    #[arg(long, requires = "lat")]
    pub lon: Option<f64>,
}

pub fn run(
    args: &RecordArgs,
    ledger: &Path,
    config: &SessionConfig,
    format: OutputFormat,
) -> Result<()> {
    let store =
        LedgerStore::open(ledger).context("Ledger not found. Run `absensi init` first.")?;

    let raw = match (&args.payload, &args.payload_file) {
        (Some(payload), _) => payload.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
            .trim()
            .to_string(),
        (None, None) => bail!("No payload. Pass --payload or --payload-file."),
    };

    // One pass through the same machine the kiosk drives.
    let mut session = match (args.lat, args.lon) {
        (Some(latitude), Some(longitude)) => CaptureSession::start(
            store,
            FixedLocation(Coordinates {
                latitude,
                longitude,
            }),
            config.clone(),
        ),
        _ => CaptureSession::start(store, DeniedLocation, config.clone()),
    };

    let mut decoder = QueuedDecoder::new();
    decoder.push_ok(raw);
    session.scan_from(&mut decoder);

    if session.machine().state() != CaptureState::Confirming {
        let message = session
            .machine()
            .error()
            .unwrap_or(messages::INVALID_TOKEN)
            .to_string();
        print_failure(format, &message);
        bail!(message);
    }

    session.wait_for_location(Duration::from_secs(2));
    session.handle(SessionEvent::StatusSelected(args.status));
    session.handle(SessionEvent::Submit);

    match session.machine().state() {
        CaptureState::Succeeded => {
            let record = session
                .machine()
                .last_stored()
                .cloned()
                .context("Write succeeded but no record was returned")?;
            match format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&WriteReply::ok(record)).unwrap_or_default()
                ),
                OutputFormat::Text => {
                    println!("Absensi tersimpan:");
                    println!("  Nama:    {}", record.name);
                    println!("  Kelas:   {}", record.class);
                    println!("  Gender:  {}", record.gender);
                    println!("  Status:  {}", record.status);
                    println!("  Tanggal: {} {}", record.date, record.time.format("%H:%M"));
                    println!("  Lokasi:  {}", record.location);
                }
            }
            Ok(())
        }
        _ => {
            let message = session
                .machine()
                .error()
                .unwrap_or(messages::WRITE_FAILED)
                .to_string();
            print_failure(format, &message);
            bail!(message);
        }
    }
}

fn print_failure(format: OutputFormat, message: &str) {
    if let OutputFormat::Json = format {
        println!(
            "{}",
            serde_json::to_string_pretty(&WriteReply::fail(message)).unwrap_or_default()
        );
    }
}
