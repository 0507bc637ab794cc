use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{BlastError, BlastResult};

/// A point on the map in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180].
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Checked form of [`GeoPoint::new`] for coordinates from outside the crate.
    pub fn try_new(latitude: f64, longitude: f64) -> BlastResult<Self> {
        Self::new(latitude, longitude).validate()
    }

    pub fn validate(self) -> BlastResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(BlastError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

// ─── Campaign ──────────────────────────────────────────────────────────────

/// One marketing blast as shown on the agent dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub id: Uuid,
    pub title: String,
    pub status: CampaignStatus,
    /// Recipients reached. Zero unless `status` is `Sent`.
    pub delivered: u64,
    /// Recipients who opened. Never exceeds `delivered`.
    pub opened: u64,
    #[serde(default)]
    pub date_delivered: Option<String>,
    #[serde(default)]
    pub time_delivered: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub address: String,
    pub price_tier_usd: f64,
}

impl Campaign {
    /// A fresh draft with no delivery history.
    pub fn draft(title: impl Into<String>, address: impl Into<String>, price_tier_usd: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            status: CampaignStatus::Draft,
            delivered: 0,
            opened: 0,
            date_delivered: None,
            time_delivered: None,
            thumbnail: None,
            address: address.into(),
            price_tier_usd,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Sent,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "Draft",
            CampaignStatus::Scheduled => "Scheduled",
            CampaignStatus::Sent => "Sent",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(CampaignStatus::Draft),
            "scheduled" => Ok(CampaignStatus::Scheduled),
            "sent" => Ok(CampaignStatus::Sent),
            other => Err(format!("unknown campaign status: {other}")),
        }
    }
}

/// Status selector of the dashboard filter bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(CampaignStatus),
}

impl StatusFilter {
    /// Filter bar buttons, in display order.
    pub const OPTIONS: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Only(CampaignStatus::Sent),
        StatusFilter::Only(CampaignStatus::Scheduled),
        StatusFilter::Only(CampaignStatus::Draft),
    ];

    pub fn admits(&self, status: CampaignStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("All"),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

/// Controls the presentation layer may offer for a campaign.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlastAction {
    Preview,
    Edit,
    Resend,
    Send,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_bounds() {
        assert!(GeoPoint::try_new(25.7617, -80.1918).is_ok());
        assert!(GeoPoint::try_new(90.0, 180.0).is_ok());
        assert!(GeoPoint::try_new(-90.0, -180.0).is_ok());
        assert!(matches!(
            GeoPoint::try_new(200.0, 500.0),
            Err(BlastError::InvalidCoordinates { .. })
        ));
        assert!(GeoPoint::try_new(45.0, -180.5).is_err());
        assert!(GeoPoint::try_new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("sent".parse::<CampaignStatus>(), Ok(CampaignStatus::Sent));
        assert_eq!(" Draft ".parse::<CampaignStatus>(), Ok(CampaignStatus::Draft));
        assert!("archived".parse::<CampaignStatus>().is_err());
        assert_eq!(CampaignStatus::Scheduled.to_string(), "Scheduled");
    }

    #[test]
    fn test_filter_options_order() {
        let labels: Vec<String> = StatusFilter::OPTIONS.iter().map(|f| f.to_string()).collect();
        assert_eq!(labels, vec!["All", "Sent", "Scheduled", "Draft"]);
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("All".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "scheduled".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(CampaignStatus::Scheduled))
        );
        assert!(StatusFilter::All.admits(CampaignStatus::Draft));
        assert!(!StatusFilter::Only(CampaignStatus::Sent).admits(CampaignStatus::Draft));
    }

    #[test]
    fn test_draft_has_no_delivery() {
        let c = Campaign::draft("Open House", "1 Main St", 14.99);
        assert_eq!(c.status, CampaignStatus::Draft);
        assert_eq!((c.delivered, c.opened), (0, 0));
        assert!(c.date_delivered.is_none());
    }
}
