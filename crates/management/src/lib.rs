//! Blast registry and analytics for the agent dashboard — list filtering,
//! open rates, status lifecycle and the actions each status allows.
//!
//! Data lives in DashMap; loading and persistence belong to the backend.

pub mod analytics;
pub mod filter;
pub mod lifecycle;
pub mod store;

pub use analytics::{open_rate, open_rate_breakdown, summarize, DashboardSummary, OpenRateBreakdown};
pub use filter::{filter, DashboardQuery};
pub use lifecycle::{available_actions, can_transition};
pub use store::BlastStore;
