//! Address-to-coordinate resolution.
//!
//! The provider itself lives outside this crate; anything implementing
//! [`Geocoder`] can be plugged in. Resolution follows a first-candidate
//! policy: when the provider returns several matches, the first one is
//! used and the rest are reported as discarded, never disambiguated.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use blast_core::config::GeocoderConfig;
use blast_core::{BlastError, BlastResult, GeoPoint};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One match returned by a geocoding provider, best first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeocodeCandidate {
    pub location: GeoPoint,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

/// External geocoding capability.
///
/// An empty list means the provider understood the request and found
/// nothing. Provider or transport faults are reported as
/// [`BlastError::GeocodingService`].
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> BlastResult<Vec<GeocodeCandidate>>;
}

/// Best match for an address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedAddress {
    pub location: GeoPoint,
    pub formatted_address: Option<String>,
    /// Alternate candidates dropped by the first-candidate policy.
    pub discarded_candidates: usize,
}

impl ResolvedAddress {
    /// The provider returned more than one plausible match.
    pub fn is_ambiguous(&self) -> bool {
        self.discarded_candidates > 0
    }
}

/// Validates the address and asks the geocoder for it. Blank input is
/// rejected before the provider is called.
pub async fn resolve_address(geocoder: &dyn Geocoder, address_text: &str) -> BlastResult<ResolvedAddress> {
    let address = address_text.trim();
    if address.is_empty() {
        return Err(BlastError::InvalidAddress);
    }

    metrics::counter!("targeting.geocode.requests").increment(1);
    debug!(address = %address, "Geocoding address");

    let mut candidates = geocoder.geocode(address).await?.into_iter();
    let first = candidates
        .next()
        .ok_or_else(|| BlastError::AddressNotFound(address.to_string()))?;
    if !first.location.is_valid() {
        return Err(BlastError::GeocodingService(format!(
            "provider returned out-of-range coordinates ({}, {})",
            first.location.latitude, first.location.longitude
        )));
    }

    Ok(ResolvedAddress {
        location: first.location,
        formatted_address: first.formatted_address,
        discarded_candidates: candidates.count(),
    })
}

/// A geocoder bound to a request timeout.
#[derive(Clone)]
pub struct AddressResolver {
    geocoder: Arc<dyn Geocoder>,
    timeout: Duration,
}

impl AddressResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>, config: &GeocoderConfig) -> Self {
        Self {
            geocoder,
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    /// A timed-out lookup surfaces as a service error so the caller may retry.
    pub async fn resolve(&self, address_text: &str) -> BlastResult<ResolvedAddress> {
        match tokio::time::timeout(self.timeout, resolve_address(self.geocoder.as_ref(), address_text)).await {
            Ok(result) => result,
            Err(_) => Err(BlastError::GeocodingService(format!(
                "no response within {} ms",
                self.timeout.as_millis()
            ))),
        }
    }
}

/// In-memory geocoder keyed by normalized address text (case and
/// whitespace insensitive). Used for demos and tests.
pub struct StaticGeocoder {
    entries: DashMap<String, Vec<GeocodeCandidate>>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Known addresses from the dashboard demo data.
    pub fn with_demo_addresses() -> Self {
        let geocoder = Self::new();
        geocoder.insert("123 Ocean Drive, Miami, FL", GeoPoint::new(25.7743, -80.1307));
        geocoder.insert("456 Palm Ave, Los Angeles, CA", GeoPoint::new(34.0522, -118.2437));
        geocoder.insert("789 Sunset Blvd, New York, NY", GeoPoint::new(40.7128, -74.0060));
        geocoder
    }

    /// Appends a candidate for `address`. Earlier candidates rank first.
    pub fn insert(&self, address: &str, location: GeoPoint) {
        self.entries
            .entry(normalize(address))
            .or_default()
            .push(GeocodeCandidate {
                location,
                formatted_address: Some(address.trim().to_string()),
            });
    }
}

impl Default for StaticGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, address: &str) -> BlastResult<Vec<GeocodeCandidate>> {
        Ok(self
            .entries
            .get(&normalize(address))
            .map(|r| r.value().clone())
            .unwrap_or_default())
    }
}

fn normalize(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
