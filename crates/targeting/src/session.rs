//! Per-campaign target-area editing state.
//!
//! Address lookups are tagged with a sequence number when issued. Only the
//! response to the most recently issued lookup may move the center, and only
//! once. A marker drag supersedes any lookup still in flight.

use blast_core::config::TargetingConfig;
use blast_core::{BlastError, BlastResult, GeoPoint};
use tracing::{info, warn};
use uuid::Uuid;

use crate::area::{relocate, TargetArea};
use crate::geocoding::{AddressResolver, ResolvedAddress};
use crate::tiers::{tier_for_radius, RadiusTier};

/// An issued address lookup. Running it does not borrow the session, so
/// several can be in flight at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub sequence: u64,
    pub address: String,
}

impl ResolutionRequest {
    pub async fn run(&self, resolver: &AddressResolver) -> BlastResult<ResolvedAddress> {
        resolver.resolve(&self.address).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    /// The center moved to the resolved location.
    Applied(ResolvedAddress),
    /// Superseded by a newer lookup or a drag, or already applied. The
    /// response was dropped.
    Stale { sequence: u64, latest: u64 },
}

#[derive(Debug, Clone)]
pub struct EditSession {
    campaign_id: Uuid,
    tier: RadiusTier,
    area: TargetArea,
    address: String,
    latest_request: u64,
    /// Sequence whose response may still move the center.
    pending: Option<u64>,
}

impl EditSession {
    /// Starts at the configured default center and radius.
    pub fn new(campaign_id: Uuid, config: &TargetingConfig) -> BlastResult<Self> {
        let center = GeoPoint::new(config.default_latitude, config.default_longitude);
        Self::with_center(campaign_id, center, config.default_radius_miles)
    }

    /// `radius_miles` must be one of the defined tiers.
    pub fn with_center(campaign_id: Uuid, center: GeoPoint, radius_miles: f64) -> BlastResult<Self> {
        let center = center.validate()?;
        let tier = tier_for_radius(radius_miles)?;
        Ok(Self {
            campaign_id,
            tier,
            area: TargetArea::new(center, tier.radius_miles)?,
            address: String::new(),
            latest_request: 0,
            pending: None,
        })
    }

    pub fn campaign_id(&self) -> Uuid {
        self.campaign_id
    }

    pub fn tier(&self) -> &RadiusTier {
        &self.tier
    }

    pub fn area(&self) -> &TargetArea {
        &self.area
    }

    /// Address text of the last lookup issued.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Switches tier. The center stays where it is; zoom follows the radius.
    /// An unknown radius leaves the session untouched.
    pub fn select_radius(&mut self, radius_miles: f64) -> BlastResult<&TargetArea> {
        let tier = tier_for_radius(radius_miles)?;
        self.area = self.area.with_radius(tier.radius_miles)?;
        self.tier = tier;
        info!(
            campaign_id = %self.campaign_id,
            radius_miles = tier.radius_miles,
            zoom_level = self.area.zoom_level,
            "Radius tier selected"
        );
        Ok(&self.area)
    }

    /// Marker drag. Radius and zoom are unchanged, and any lookup still in
    /// flight becomes stale. Out-of-range coordinates leave the session untouched.
    pub fn relocate(&mut self, new_center: GeoPoint) -> BlastResult<&TargetArea> {
        let new_center = new_center.validate()?;
        self.pending = None;
        self.area = relocate(&self.area, new_center);
        Ok(&self.area)
    }

    /// Issues a new lookup, superseding any still in flight. Blank text is
    /// rejected and does not supersede anything.
    pub fn begin_resolution(&mut self, address_text: &str) -> BlastResult<ResolutionRequest> {
        let address = address_text.trim();
        if address.is_empty() {
            return Err(BlastError::InvalidAddress);
        }
        self.latest_request += 1;
        self.pending = Some(self.latest_request);
        self.address = address.to_string();
        Ok(ResolutionRequest {
            sequence: self.latest_request,
            address: self.address.clone(),
        })
    }

    /// Applies the response for lookup `sequence`. Responses to superseded or
    /// already-applied lookups are dropped, errors included.
    pub fn apply_resolution(
        &mut self,
        sequence: u64,
        result: BlastResult<ResolvedAddress>,
    ) -> BlastResult<ResolutionOutcome> {
        if self.pending != Some(sequence) {
            metrics::counter!("targeting.geocode.stale_discarded").increment(1);
            warn!(
                campaign_id = %self.campaign_id,
                sequence,
                latest = self.latest_request,
                "Discarding stale address resolution"
            );
            return Ok(ResolutionOutcome::Stale {
                sequence,
                latest: self.latest_request,
            });
        }

        self.pending = None;
        let resolved = result?;
        let location = resolved.location.validate()?;
        self.area = relocate(&self.area, location);
        if resolved.is_ambiguous() {
            info!(
                campaign_id = %self.campaign_id,
                discarded = resolved.discarded_candidates,
                "Address matched several locations; using best match only"
            );
        }
        Ok(ResolutionOutcome::Applied(resolved))
    }

    /// Issue, run and apply a lookup in one step.
    pub async fn resolve_address(
        &mut self,
        resolver: &AddressResolver,
        address_text: &str,
    ) -> BlastResult<ResolutionOutcome> {
        let request = self.begin_resolution(address_text)?;
        let result = request.run(resolver).await;
        self.apply_resolution(request.sequence, result)
    }
}
