use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("A city named '{0}' is already in the registry")]
    DuplicateName(String),

    #[error("Coordinate ({lat}, {lon}) is out of range (lat must be in [-90, 90], lon in [-180, 180])")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("City name must not be empty")]
    EmptyName,
}
