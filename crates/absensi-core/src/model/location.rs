use serde::{Deserialize, Serialize};

/// A latitude/longitude pair attached to a record at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Used when the location provider denies or fails (central Jakarta).
    pub const FALLBACK: Coordinates = Coordinates {
        latitude: -6.2088,
        longitude: 106.8456,
    };
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
