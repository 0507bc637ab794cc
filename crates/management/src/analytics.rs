//! Delivery and open-rate metrics for the dashboard cards and donut chart.

use blast_core::{Campaign, CampaignStatus};
use serde::{Deserialize, Serialize};

/// Percentage of delivered recipients who opened, to one decimal place.
/// Zero delivery yields exactly `0.0`.
pub fn open_rate(campaign: &Campaign) -> f64 {
    percent_one_decimal(campaign.opened, campaign.delivered)
}

fn percent_one_decimal(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}

/// Slices of the open-rate donut.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpenRateBreakdown {
    pub opened: u64,
    pub unopened: u64,
}

pub fn open_rate_breakdown(campaign: &Campaign) -> OpenRateBreakdown {
    OpenRateBreakdown {
        opened: campaign.opened,
        unopened: campaign.delivered.saturating_sub(campaign.opened),
    }
}

/// Totals across a slice of campaigns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub total_campaigns: usize,
    pub drafts: usize,
    pub scheduled: usize,
    pub sent: usize,
    pub total_delivered: u64,
    pub total_opened: u64,
    pub open_rate: f64,
}

pub fn summarize<'a>(campaigns: impl IntoIterator<Item = &'a Campaign>) -> DashboardSummary {
    let mut summary = DashboardSummary::default();
    for c in campaigns {
        summary.total_campaigns += 1;
        match c.status {
            CampaignStatus::Draft => summary.drafts += 1,
            CampaignStatus::Scheduled => summary.scheduled += 1,
            CampaignStatus::Sent => summary.sent += 1,
        }
        summary.total_delivered += c.delivered;
        summary.total_opened += c.opened;
    }
    summary.open_rate = percent_one_decimal(summary.total_opened, summary.total_delivered);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sent(delivered: u64, opened: u64) -> Campaign {
        let mut c = Campaign::draft("Open House", "1 Main St", 14.99);
        c.status = CampaignStatus::Sent;
        c.delivered = delivered;
        c.opened = opened;
        c
    }

    #[test]
    fn test_open_rate_half() {
        assert_eq!(open_rate(&sent(150, 75)), 50.0);
    }

    #[test]
    fn test_open_rate_rounds_to_one_decimal() {
        assert_eq!(open_rate(&sent(3, 1)), 33.3);
        assert_eq!(open_rate(&sent(3, 2)), 66.7);
        assert_eq!(open_rate(&sent(1000, 1)), 0.1);
        assert_eq!(open_rate(&sent(40, 40)), 100.0);
    }

    #[test]
    fn test_zero_delivery_is_zero() {
        let draft = Campaign::draft("Draft", "1 Main St", 0.0);
        assert_eq!(open_rate(&draft), 0.0);
        assert_eq!(open_rate(&sent(0, 0)), 0.0);
    }

    #[test]
    fn test_breakdown() {
        assert_eq!(
            open_rate_breakdown(&sent(150, 75)),
            OpenRateBreakdown { opened: 75, unopened: 75 }
        );
        assert_eq!(
            open_rate_breakdown(&Campaign::draft("Draft", "1 Main St", 0.0)),
            OpenRateBreakdown { opened: 0, unopened: 0 }
        );
    }

    #[test]
    fn test_summary() {
        let campaigns = vec![
            sent(150, 75),
            sent(50, 5),
            Campaign::draft("Draft", "1 Main St", 0.0),
        ];
        let summary = summarize(&campaigns);
        assert_eq!(summary.total_campaigns, 3);
        assert_eq!((summary.drafts, summary.scheduled, summary.sent), (1, 0, 2));
        assert_eq!(summary.total_delivered, 200);
        assert_eq!(summary.total_opened, 80);
        assert_eq!(summary.open_rate, 40.0);
        assert_eq!(summarize(&Vec::<Campaign>::new()).open_rate, 0.0);
    }
}
