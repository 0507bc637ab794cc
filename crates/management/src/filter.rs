//! Dashboard list filtering: status selector plus title search.

use blast_core::{Campaign, StatusFilter};
use serde::{Deserialize, Serialize};

/// Filter bar state owned by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardQuery {
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub search: String,
}

impl DashboardQuery {
    pub fn apply<'a>(&self, campaigns: &'a [Campaign]) -> Vec<&'a Campaign> {
        filter(campaigns, self.status, &self.search)
    }
}

/// Campaigns admitted by `status_filter` whose title contains `search_text`,
/// case-insensitively. Input order is preserved; empty search matches all.
pub fn filter<'a>(campaigns: &'a [Campaign], status_filter: StatusFilter, search_text: &str) -> Vec<&'a Campaign> {
    let needle = search_text.to_lowercase();
    campaigns
        .iter()
        .filter(|c| matches(c, status_filter, &needle))
        .collect()
}

/// `needle` must already be lowercase.
pub(crate) fn matches(campaign: &Campaign, status_filter: StatusFilter, needle: &str) -> bool {
    status_filter.admits(campaign.status) && campaign.title.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blast_core::CampaignStatus;

    fn fixture() -> Vec<Campaign> {
        let mut sent = Campaign::draft("New Listing - Oceanview Condo", "123 Ocean Drive, Miami, FL", 750.0);
        sent.status = CampaignStatus::Sent;
        let mut scheduled = Campaign::draft("Price Drop Alert!", "456 Palm Ave, Los Angeles, CA", 920.0);
        scheduled.status = CampaignStatus::Scheduled;
        let draft = Campaign::draft("Just Sold - Success Story", "789 Sunset Blvd, New York, NY", 680.0);
        vec![sent, scheduled, draft]
    }

    #[test]
    fn test_all_with_empty_search_returns_everything_in_order() {
        let campaigns = fixture();
        let result = filter(&campaigns, StatusFilter::All, "");
        let titles: Vec<&str> = result.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["New Listing - Oceanview Condo", "Price Drop Alert!", "Just Sold - Success Story"]
        );
    }

    #[test]
    fn test_status_only() {
        let campaigns = fixture();
        let result = filter(&campaigns, StatusFilter::Only(CampaignStatus::Sent), "");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, campaigns[0].id);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let campaigns = fixture();
        let result = filter(&campaigns, StatusFilter::All, "price");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Price Drop Alert!");

        let result = filter(&campaigns, StatusFilter::All, "SOLD");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Just Sold - Success Story");
    }

    #[test]
    fn test_status_and_search_combined() {
        let campaigns = fixture();
        assert!(filter(&campaigns, StatusFilter::Only(CampaignStatus::Draft), "price").is_empty());
        assert_eq!(
            filter(&campaigns, StatusFilter::Only(CampaignStatus::Scheduled), "drop").len(),
            1
        );
    }

    #[test]
    fn test_query_apply() {
        let campaigns = fixture();
        let query = DashboardQuery {
            status: StatusFilter::Only(CampaignStatus::Draft),
            search: String::new(),
        };
        let result = query.apply(&campaigns);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].status, CampaignStatus::Draft);
        assert!(DashboardQuery::default().apply(&[]).is_empty());
    }
}
