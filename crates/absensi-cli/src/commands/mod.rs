pub mod export;
pub mod init;
pub mod kiosk;
pub mod list;
pub mod record;
pub mod stats;
pub mod token;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Create the attendance ledger
    Init(init::InitArgs),
    /// Print the QR token payload for a student
    Token(token::TokenArgs),
    /// Record one attendance pass from a decoded payload
    Record(record::RecordArgs),
    /// Run the interactive capture loop
    Kiosk(kiosk::KioskArgs),
    /// Dashboard aggregates over all records
    Stats,
    /// Filtered, paginated record list
    List(list::ListArgs),
    /// Dump all records as the gateway read envelope
    Export,
}
