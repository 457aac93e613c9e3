use thiserror::Error;

/// What a blocked submission was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    Identity,
    Location,
}

impl std::fmt::Display for MissingInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingInput::Identity => write!(f, "identity"),
            MissingInput::Location => write!(f, "location"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Token did not decode to a valid identity: {0}")]
    InvalidToken(#[from] absensi_protocol::ProtocolError),

    #[error("Submission blocked: missing {missing}")]
    SubmitBlocked { missing: MissingInput },
}

impl CaptureError {
    /// The short operator-facing message for this failure, one per kind.
    pub fn user_message(&self) -> &'static str {
        match self {
            CaptureError::InvalidToken(_) => messages::INVALID_TOKEN,
            CaptureError::SubmitBlocked {
                missing: MissingInput::Identity,
            } => messages::NO_IDENTITY,
            CaptureError::SubmitBlocked {
                missing: MissingInput::Location,
            } => messages::NO_LOCATION,
        }
    }
}

/// Operator-facing strings shown by the capture UI, one per failure kind.
pub mod messages {
    pub const INVALID_TOKEN: &str = "Kode QR tidak valid";
    pub const NO_IDENTITY: &str = "Belum ada siswa terpindai";
    pub const NO_LOCATION: &str = "Lokasi belum terdeteksi";
    pub const WRITE_FAILED: &str = "Gagal menyimpan absensi";
}
