pub mod decoder;
pub mod location;

pub use decoder::{QueuedDecoder, TokenDecoder};
pub use location::{DeniedLocation, FixedLocation, LocationProvider};
