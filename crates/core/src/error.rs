use thiserror::Error;
use uuid::Uuid;

use crate::types::CampaignStatus;

pub type BlastResult<T> = Result<T, BlastError>;

#[derive(Error, Debug)]
pub enum BlastError {
    #[error("Invalid radius: {0} miles (must be positive)")]
    InvalidRadius(f64),

    #[error("Invalid coordinates: ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("Invalid address: address text is empty")]
    InvalidAddress,

    #[error("No radius tier defined for {0} miles")]
    TierNotFound(f64),

    #[error("Address not found: {0}")]
    AddressNotFound(String),

    #[error("Geocoding service error: {0}")]
    GeocodingService(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: CampaignStatus,
        to: CampaignStatus,
    },

    #[error("Campaign not found: {0}")]
    CampaignNotFound(Uuid),

    #[error("Invalid delivery report: {0}")]
    InvalidDeliveryReport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl BlastError {
    /// True only for provider faults. `AddressNotFound` is a terminal answer
    /// for the address as typed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BlastError::GeocodingService(_))
    }
}

impl From<config::ConfigError> for BlastError {
    fn from(e: config::ConfigError) -> Self {
        BlastError::Config(e.to_string())
    }
}
