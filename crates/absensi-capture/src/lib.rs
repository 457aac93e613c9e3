pub mod adapters;
pub mod error;
pub mod machine;
pub mod parser;
pub mod session;

pub use adapters::{DeniedLocation, FixedLocation, LocationProvider, QueuedDecoder, TokenDecoder};
pub use error::{messages, CaptureError, MissingInput};
pub use machine::{CaptureMachine, CaptureState, Effect, SessionEvent};
pub use parser::parse_identity;
pub use session::{CaptureSession, SessionConfig};
