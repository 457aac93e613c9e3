use std::path::PathBuf;
use std::time::Duration;

use crate::model::Coordinates;

/// Runtime settings. Every key falls back to its default when the
/// corresponding `ABSENSI_*` environment variable is unset or malformed.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Where the attendance ledger lives.
    pub ledger_path: PathBuf,
    /// How long the success display stays up before the automatic return to
    /// scanning.
    pub reset_delay: Duration,
    /// Coordinates recorded when the location provider denies or fails.
    pub fallback_location: Coordinates,
}

impl Settings {
    /// Read settings from the environment.
    pub fn load() -> Self {
        let defaults = Settings::default();

        let ledger_path = std::env::var("ABSENSI_LEDGER")
            .map(PathBuf::from)
            .unwrap_or(defaults.ledger_path);

        let reset_delay = std::env::var("ABSENSI_RESET_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.reset_delay);

        let lat = std::env::var("ABSENSI_FALLBACK_LAT")
            .ok()
            .and_then(|v| v.parse::<f64>().ok());
        let lon = std::env::var("ABSENSI_FALLBACK_LON")
            .ok()
            .and_then(|v| v.parse::<f64>().ok());
        let fallback_location = match (lat, lon) {
            (Some(latitude), Some(longitude)) => Coordinates {
                latitude,
                longitude,
            },
            _ => defaults.fallback_location,
        };

        Self {
            ledger_path,
            reset_delay,
            fallback_location,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from("absensi.ledger.jsonl"),
            reset_delay: Duration::from_millis(3000),
            fallback_location: Coordinates::FALLBACK,
        }
    }
}
