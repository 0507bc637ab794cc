//! Fixed radius pricing table.

use blast_core::{BlastError, BlastResult};
use serde::{Deserialize, Serialize};

/// A (radius, reach, price) triple offered in the radius selector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RadiusTier {
    pub radius_miles: f64,
    /// Upper bound on agents reachable within the radius.
    pub estimated_agents: u32,
    pub price_usd: f64,
}

impl RadiusTier {
    const fn new(radius_miles: f64, estimated_agents: u32, price_usd: f64) -> Self {
        Self {
            radius_miles,
            estimated_agents,
            price_usd,
        }
    }

    /// Selector label, e.g. `3 Miles (up to 1000 agents | $14.99)`.
    pub fn label(&self) -> String {
        format!(
            "{} Miles (up to {} agents | ${:.2})",
            self.radius_miles, self.estimated_agents, self.price_usd
        )
    }
}

/// Ordered by ascending radius. Reach and price never decrease down the table.
pub const RADIUS_TIERS: [RadiusTier; 7] = [
    RadiusTier::new(3.0, 1000, 14.99),
    RadiusTier::new(5.0, 1500, 19.99),
    RadiusTier::new(10.0, 2500, 24.99),
    RadiusTier::new(15.0, 3500, 29.99),
    RadiusTier::new(20.0, 5000, 34.99),
    RadiusTier::new(40.0, 8000, 59.99),
    RadiusTier::new(50.0, 10000, 69.99),
];

/// Exact-match lookup against [`RADIUS_TIERS`]. No interpolation between tiers.
pub fn tier_for_radius(radius_miles: f64) -> BlastResult<RadiusTier> {
    if radius_miles.is_nan() || radius_miles <= 0.0 {
        return Err(BlastError::InvalidRadius(radius_miles));
    }
    RADIUS_TIERS
        .iter()
        .find(|tier| tier.radius_miles == radius_miles)
        .copied()
        .ok_or(BlastError::TierNotFound(radius_miles))
}
