//! Target-area selection for a blast — radius tiers, reach and price,
//! map zoom, and address resolution through an external geocoder.

pub mod area;
pub mod geocoding;
pub mod session;
pub mod tiers;

pub use area::{miles_to_meters, relocate, zoom_level_for_radius, TargetArea};
pub use geocoding::{resolve_address, AddressResolver, GeocodeCandidate, Geocoder, ResolvedAddress, StaticGeocoder};
pub use session::{EditSession, ResolutionOutcome, ResolutionRequest};
pub use tiers::{tier_for_radius, RadiusTier, RADIUS_TIERS};
