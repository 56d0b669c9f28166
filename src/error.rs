use crate::forecast::error::ForecastError;
use crate::geocode::error::GeocodeError;
use crate::registry::error::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherScopeError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}
