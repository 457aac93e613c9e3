use std::io::{self, BufRead};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use absensi_capture::{
    CaptureMachine, CaptureSession, CaptureState, DeniedLocation, FixedLocation, SessionConfig,
    SessionEvent,
};
use absensi_core::model::{AttendanceStatus, Coordinates};
use absensi_core::storage::LedgerStore;

#[derive(Args)]
pub struct KioskArgs {
    /// Latitude reported by the device
    #[arg(long, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude reported by the device
    #[arg(long, requires = "lat")]
    pub lon: Option<f64>,
}

pub fn run(args: &KioskArgs, ledger: &Path, config: &SessionConfig) -> Result<()> {
    let store =
        LedgerStore::open(ledger).context("Ledger not found. Run `absensi init` first.")?;

    let reset_grace = config.reset_delay + Duration::from_secs(2);
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

    println!("Mode kiosk. Tempel payload QR untuk memindai.");
    println!("Perintah saat konfirmasi: hadir | izin | sakit | alpha | simpan | batal");
    println!("Ctrl-D untuk keluar.");
    render(session.machine());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        session.pump();
        if input.is_empty() {
            render(session.machine());
            continue;
        }

        match session.machine().state() {
            CaptureState::Scanning => {
                // In scanning, every line is a decoded token payload.
                session.handle(SessionEvent::ScanDecoded(input.to_string()));
            }
            CaptureState::Confirming => match input.to_lowercase().as_str() {
                "hadir" | "izin" | "sakit" | "alpha" => {
                    // The parse cannot fail for these four.
                    if let Ok(status) = input.parse::<AttendanceStatus>() {
                        session.handle(SessionEvent::StatusSelected(status));
                    }
                }
                "simpan" => session.handle(SessionEvent::Submit),
                "batal" => session.handle(SessionEvent::Cancel),
                other => println!("Perintah tidak dikenal: {other}"),
            },
            // The success window ignores input; writes resolve inline, so
            // Submitting is never observed between lines.
            CaptureState::Submitting | CaptureState::Succeeded => {}
        }

        if session.machine().state() == CaptureState::Succeeded {
            render(session.machine());
            session.wait_for_reset(reset_grace);
            println!("Kembali memindai.");
        }
        render(session.machine());
    }

    Ok(())
}

fn render(machine: &CaptureMachine) {
    match machine.state() {
        CaptureState::Scanning => {
            println!();
            println!("-- Pindai QR --");
            match machine.location() {
                Some(location) => println!("Lokasi terdeteksi: {location}"),
                None => println!("Mendeteksi lokasi..."),
            }
        }
        CaptureState::Confirming => {
            let Some(identity) = machine.pending() else {
                return;
            };
            println!();
            println!("-- Konfirmasi --");
            println!("Nama:   {}", identity.name);
            println!("Kelas:  {}", identity.class);
            println!("Gender: {}", identity.gender);
            println!("Status: {}", machine.status());
        }
        CaptureState::Submitting => println!("Menyimpan..."),
        CaptureState::Succeeded => {
            println!();
            println!("Berhasil! Absensi telah tersimpan.");
        }
    }
    if let Some(error) = machine.error() {
        println!("! {error}");
    }
}
