//! Blast status lifecycle: forward-only transitions, the delivery invariants
//! each status implies, and the actions the dashboard offers per status.

use std::collections::BTreeSet;

use blast_core::{BlastAction, BlastError, BlastResult, Campaign, CampaignStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Describes a single valid status transition for a blast.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusTransition {
    pub from: CampaignStatus,
    pub to: CampaignStatus,
    pub trigger: &'static str,
}

/// Forward-only lifecycle. Nothing leaves `Sent`.
pub static TRANSITIONS: [StatusTransition; 3] = [
    StatusTransition {
        from: CampaignStatus::Draft,
        to: CampaignStatus::Scheduled,
        trigger: "schedule",
    },
    StatusTransition {
        from: CampaignStatus::Scheduled,
        to: CampaignStatus::Sent,
        trigger: "dispatch",
    },
    StatusTransition {
        from: CampaignStatus::Draft,
        to: CampaignStatus::Sent,
        trigger: "send_now",
    },
];

fn find(from: CampaignStatus, to: CampaignStatus) -> Option<&'static StatusTransition> {
    TRANSITIONS.iter().find(|t| t.from == from && t.to == to)
}

/// Returns `true` if the given transition is allowed.
pub fn can_transition(from: CampaignStatus, to: CampaignStatus) -> bool {
    find(from, to).is_some()
}

/// Moves `campaign` to `to`, stamping delivery date and time when it becomes
/// `Sent`. On error the campaign is left unchanged.
pub fn transition(campaign: &mut Campaign, to: CampaignStatus, at: DateTime<Utc>) -> BlastResult<&'static str> {
    let t = find(campaign.status, to).ok_or(BlastError::InvalidTransition {
        from: campaign.status,
        to,
    })?;
    campaign.status = to;
    if to == CampaignStatus::Sent {
        campaign.date_delivered = Some(at.format("%Y-%m-%d").to_string());
        campaign.time_delivered = Some(at.format("%H:%M UTC").to_string());
    }
    Ok(t.trigger)
}

/// Checks the delivery fields against the status. Only `Sent` blasts carry
/// counts or a delivery date, and opens never exceed deliveries.
pub fn validate(campaign: &Campaign) -> BlastResult<()> {
    if campaign.opened > campaign.delivered {
        return Err(BlastError::InvalidDeliveryReport(format!(
            "opened {} exceeds delivered {}",
            campaign.opened, campaign.delivered
        )));
    }
    if campaign.status != CampaignStatus::Sent {
        if campaign.delivered > 0 || campaign.opened > 0 {
            return Err(BlastError::InvalidDeliveryReport(format!(
                "{} blast {} has delivery counts",
                campaign.status, campaign.id
            )));
        }
        if campaign.date_delivered.is_some() || campaign.time_delivered.is_some() {
            return Err(BlastError::InvalidDeliveryReport(format!(
                "{} blast {} has a delivery date",
                campaign.status, campaign.id
            )));
        }
    }
    Ok(())
}

pub fn actions_for_status(status: CampaignStatus) -> BTreeSet<BlastAction> {
    let actions: &[BlastAction] = match status {
        CampaignStatus::Draft => &[BlastAction::Preview, BlastAction::Send],
        CampaignStatus::Scheduled => &[BlastAction::Preview, BlastAction::Edit],
        CampaignStatus::Sent => &[BlastAction::Preview, BlastAction::Edit, BlastAction::Resend],
    };
    actions.iter().copied().collect()
}

/// Controls to show for `campaign`. Derived from status alone.
pub fn available_actions(campaign: &Campaign) -> BTreeSet<BlastAction> {
    actions_for_status(campaign.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 24, 14, 30, 0).unwrap()
    }

    fn with_status(status: CampaignStatus) -> Campaign {
        let mut c = Campaign::draft("Open House", "1 Main St", 14.99);
        c.status = status;
        c
    }

    #[test]
    fn test_actions_per_status() {
        assert_eq!(
            actions_for_status(CampaignStatus::Draft),
            BTreeSet::from([BlastAction::Preview, BlastAction::Send])
        );
        assert_eq!(
            actions_for_status(CampaignStatus::Scheduled),
            BTreeSet::from([BlastAction::Preview, BlastAction::Edit])
        );
        assert_eq!(
            available_actions(&with_status(CampaignStatus::Sent)),
            BTreeSet::from([BlastAction::Preview, BlastAction::Edit, BlastAction::Resend])
        );
    }

    #[test]
    fn test_allowed_transitions() {
        assert!(can_transition(CampaignStatus::Draft, CampaignStatus::Scheduled));
        assert!(can_transition(CampaignStatus::Scheduled, CampaignStatus::Sent));
        assert!(can_transition(CampaignStatus::Draft, CampaignStatus::Sent));
    }

    #[test]
    fn test_no_backward_or_self_transitions() {
        use CampaignStatus::*;
        for (from, to) in [
            (Sent, Scheduled),
            (Sent, Draft),
            (Sent, Sent),
            (Scheduled, Draft),
            (Scheduled, Scheduled),
            (Draft, Draft),
        ] {
            assert!(!can_transition(from, to), "{from} -> {to} should be rejected");
        }
    }

    #[test]
    fn test_send_now_stamps_delivery() {
        let mut c = with_status(CampaignStatus::Draft);
        let trigger = transition(&mut c, CampaignStatus::Sent, at()).unwrap();
        assert_eq!(trigger, "send_now");
        assert_eq!(c.status, CampaignStatus::Sent);
        assert_eq!(c.date_delivered.as_deref(), Some("2025-02-24"));
        assert_eq!(c.time_delivered.as_deref(), Some("14:30 UTC"));
    }

    #[test]
    fn test_schedule_does_not_stamp() {
        let mut c = with_status(CampaignStatus::Draft);
        assert_eq!(transition(&mut c, CampaignStatus::Scheduled, at()).unwrap(), "schedule");
        assert!(c.date_delivered.is_none());
        assert_eq!(transition(&mut c, CampaignStatus::Sent, at()).unwrap(), "dispatch");
    }

    #[test]
    fn test_rejected_transition_leaves_campaign() {
        let mut c = with_status(CampaignStatus::Sent);
        let before = c.clone();
        let err = transition(&mut c, CampaignStatus::Scheduled, at()).unwrap_err();
        assert!(matches!(
            err,
            BlastError::InvalidTransition {
                from: CampaignStatus::Sent,
                to: CampaignStatus::Scheduled
            }
        ));
        assert_eq!(c, before);
    }

    #[test]
    fn test_validate_delivery_fields() {
        let mut sent = with_status(CampaignStatus::Sent);
        sent.delivered = 150;
        sent.opened = 75;
        sent.date_delivered = Some("2025-02-24".into());
        assert!(validate(&sent).is_ok());
        assert!(validate(&with_status(CampaignStatus::Draft)).is_ok());

        sent.opened = 151;
        assert!(matches!(validate(&sent), Err(BlastError::InvalidDeliveryReport(_))));

        let mut draft = with_status(CampaignStatus::Draft);
        draft.delivered = 10;
        assert!(validate(&draft).is_err());

        let mut scheduled = with_status(CampaignStatus::Scheduled);
        scheduled.time_delivered = Some("14:30 UTC".into());
        assert!(validate(&scheduled).is_err());
    }
}
