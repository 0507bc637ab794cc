//! In-memory blast registry backed by DashMap.
//!
//! Campaigns are loaded from an external data source (or the demo fixture)
//! and never deleted. Listing follows insertion order.

use std::sync::atomic::{AtomicU64, Ordering};

use blast_core::config::DashboardConfig;
use blast_core::{BlastAction, BlastError, BlastResult, Campaign, CampaignStatus, StatusFilter};
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analytics::{summarize, DashboardSummary};
use crate::filter::matches;
use crate::lifecycle::{self, available_actions, can_transition};

struct Slot {
    position: u64,
    campaign: Campaign,
}

/// Thread-safe in-memory store for the current agent's blasts.
pub struct BlastStore {
    campaigns: DashMap<Uuid, Slot>,
    next_position: AtomicU64,
}

impl BlastStore {
    pub fn new() -> Self {
        Self {
            campaigns: DashMap::new(),
            next_position: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        let store = Self::new();
        if config.seed_demo_data {
            store.seed_demo_data();
        }
        info!(
            campaigns = store.campaigns.len(),
            "Blast store initialized (in-memory)"
        );
        store
    }

    /// Adds a campaign supplied by the data source. A campaign with an
    /// existing id replaces the stored one in place, keeping its position,
    /// provided the status stays put or moves forward. Campaigns whose
    /// delivery fields contradict their status are refused.
    pub fn insert(&self, campaign: Campaign) -> BlastResult<()> {
        if let Err(e) = lifecycle::validate(&campaign) {
            warn!(campaign_id = %campaign.id, error = %e, "Rejected campaign");
            return Err(e);
        }
        match self.campaigns.entry(campaign.id) {
            Entry::Occupied(mut slot) => {
                let (from, to) = (slot.get().campaign.status, campaign.status);
                if from != to && !can_transition(from, to) {
                    return Err(self.reject(campaign.id, from, to));
                }
                slot.get_mut().campaign = campaign;
            }
            Entry::Vacant(vacant) => {
                let position = self.next_position.fetch_add(1, Ordering::Relaxed);
                vacant.insert(Slot { position, campaign });
            }
        }
        Ok(())
    }

    pub fn create_draft(&self, title: &str, address: &str, price_tier_usd: f64) -> BlastResult<Campaign> {
        let campaign = Campaign::draft(title, address, price_tier_usd);
        self.insert(campaign.clone())?;
        info!(campaign_id = %campaign.id, title = %campaign.title, "Draft blast created");
        Ok(campaign)
    }

    pub fn get(&self, id: Uuid) -> Option<Campaign> {
        self.campaigns.get(&id).map(|r| r.value().campaign.clone())
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    pub fn list(&self) -> Vec<Campaign> {
        let mut entries: Vec<(u64, Campaign)> = self
            .campaigns
            .iter()
            .map(|r| (r.value().position, r.value().campaign.clone()))
            .collect();
        entries.sort_by_key(|(position, _)| *position);
        entries.into_iter().map(|(_, c)| c).collect()
    }

    pub fn filter(&self, status_filter: StatusFilter, search_text: &str) -> Vec<Campaign> {
        let needle = search_text.to_lowercase();
        self.list()
            .into_iter()
            .filter(|c| matches(c, status_filter, &needle))
            .collect()
    }

    pub fn summary(&self) -> DashboardSummary {
        summarize(&self.list())
    }

    // ─── Lifecycle ─────────────────────────────────────────────────────────

    /// Draft -> Scheduled.
    pub fn schedule(&self, id: Uuid) -> BlastResult<Campaign> {
        self.transition(id, CampaignStatus::Scheduled)
    }

    /// Draft -> Sent, skipping the schedule. Scheduled blasts go out through
    /// [`BlastStore::dispatch`] only.
    pub fn send_now(&self, id: Uuid) -> BlastResult<Campaign> {
        let campaign = self.get(id).ok_or(BlastError::CampaignNotFound(id))?;
        if !available_actions(&campaign).contains(&BlastAction::Send) {
            return Err(self.reject(id, campaign.status, CampaignStatus::Sent));
        }
        self.transition(id, CampaignStatus::Sent)
    }

    /// Scheduled -> Sent, fired by the dispatch service.
    pub fn dispatch(&self, id: Uuid) -> BlastResult<Campaign> {
        let status = self.get(id).ok_or(BlastError::CampaignNotFound(id))?.status;
        if status != CampaignStatus::Scheduled {
            return Err(self.reject(id, status, CampaignStatus::Sent));
        }
        self.transition(id, CampaignStatus::Sent)
    }

    /// Validates a resend request. Delivery itself happens elsewhere; the
    /// status stays `Sent`.
    pub fn resend(&self, id: Uuid) -> BlastResult<Campaign> {
        let campaign = self.get(id).ok_or(BlastError::CampaignNotFound(id))?;
        if !available_actions(&campaign).contains(&BlastAction::Resend) {
            return Err(self.reject(id, campaign.status, CampaignStatus::Sent));
        }
        info!(campaign_id = %id, "Resend requested");
        Ok(campaign)
    }

    fn transition(&self, id: Uuid, to: CampaignStatus) -> BlastResult<Campaign> {
        let mut entry = self
            .campaigns
            .get_mut(&id)
            .ok_or(BlastError::CampaignNotFound(id))?;
        let from = entry.campaign.status;
        match lifecycle::transition(&mut entry.campaign, to, Utc::now()) {
            Ok(trigger) => {
                metrics::counter!("management.transitions", "trigger" => trigger).increment(1);
                info!(campaign_id = %id, %from, %to, trigger, "Blast status changed");
                Ok(entry.campaign.clone())
            }
            Err(e) => {
                warn!(campaign_id = %id, %from, %to, "Rejected status transition");
                Err(e)
            }
        }
    }

    fn reject(&self, id: Uuid, from: CampaignStatus, to: CampaignStatus) -> BlastError {
        warn!(campaign_id = %id, %from, %to, "Rejected status transition");
        BlastError::InvalidTransition { from, to }
    }

    // ─── Delivery ──────────────────────────────────────────────────────────

    /// Records delivery counts reported by the dispatch service. Only sent
    /// blasts carry delivery data.
    pub fn apply_delivery_report(&self, id: Uuid, delivered: u64, opened: u64) -> BlastResult<Campaign> {
        let mut entry = self
            .campaigns
            .get_mut(&id)
            .ok_or(BlastError::CampaignNotFound(id))?;
        if entry.campaign.status != CampaignStatus::Sent {
            return Err(BlastError::InvalidDeliveryReport(format!(
                "campaign {id} is {}, not Sent",
                entry.campaign.status
            )));
        }
        if opened > delivered {
            return Err(BlastError::InvalidDeliveryReport(format!(
                "opened {opened} exceeds delivered {delivered}"
            )));
        }
        entry.campaign.delivered = delivered;
        entry.campaign.opened = opened;
        Ok(entry.campaign.clone())
    }

    // ─── Demo Data ─────────────────────────────────────────────────────────

    fn seed_demo_data(&self) {
        let blasts = vec![
            ("New Listing - Oceanview Condo", CampaignStatus::Sent, 150, 75, Some(("2025-02-24", "14:30 EST")), "/images/flyer1.jpg", "123 Ocean Drive, Miami, FL", 750.0),
            ("Price Drop Alert!", CampaignStatus::Scheduled, 0, 0, None, "/images/flyer2.jpg", "456 Palm Ave, Los Angeles, CA", 920.0),
            ("Just Sold - Success Story", CampaignStatus::Draft, 0, 0, None, "/images/flyer3.jpg", "789 Sunset Blvd, New York, NY", 680.0),
        ];

        for (title, status, delivered, opened, delivered_at, thumbnail, address, price) in blasts {
            let seeded = self.insert(Campaign {
                id: Uuid::new_v4(),
                title: title.to_string(),
                status,
                delivered,
                opened,
                date_delivered: delivered_at.map(|(d, _)| d.to_string()),
                time_delivered: delivered_at.map(|(_, t)| t.to_string()),
                thumbnail: Some(thumbnail.to_string()),
                address: address.to_string(),
                price_tier_usd: price,
            });
            if let Err(e) = seeded {
                warn!(title, error = %e, "Skipping demo blast");
            }
        }
    }
}

impl Default for BlastStore {
    fn default() -> Self {
        Self::new()
    }
}
