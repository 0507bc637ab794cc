pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{BlastError, BlastResult};
pub use types::{BlastAction, Campaign, CampaignStatus, GeoPoint, StatusFilter};
