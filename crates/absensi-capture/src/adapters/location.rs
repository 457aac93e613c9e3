use absensi_core::model::Coordinates;

/// Supplies the device position once per session. The capture runtime never
/// queries permission state itself; a refusal here is recovered with the
/// fallback coordinates and is not an operator-visible error.
pub trait LocationProvider {
    fn locate(&self) -> Result<Coordinates, String>;
}

/// Always yields the same reading. Used for CLI-supplied positions and tests.
#[derive(Debug, Clone)]
pub struct FixedLocation(pub Coordinates);

impl LocationProvider for FixedLocation {
    fn locate(&self) -> Result<Coordinates, String> {
        Ok(self.0)
    }
}

/// Always refuses, like a denied browser permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLocation;

impl LocationProvider for DeniedLocation {
    fn locate(&self) -> Result<Coordinates, String> {
        Err("permission denied".into())
    }
}
