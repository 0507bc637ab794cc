use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `BLAST_DASHBOARD__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub targeting: TargetingConfig,
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Starting state of a target-area editing session.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetingConfig {
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,
    #[serde(default = "default_longitude")]
    pub default_longitude: f64,
    #[serde(default = "default_radius_miles")]
    pub default_radius_miles: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderConfig {
    #[serde(default = "default_geocoder_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

// Default functions
fn default_latitude() -> f64 {
    25.7617
}
fn default_longitude() -> f64 {
    -80.1918
}
fn default_radius_miles() -> f64 {
    3.0
}
fn default_geocoder_timeout_ms() -> u64 {
    5000
}
fn default_seed_demo_data() -> bool {
    true
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            default_latitude: default_latitude(),
            default_longitude: default_longitude(),
            default_radius_miles: default_radius_miles(),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_geocoder_timeout_ms(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: default_seed_demo_data(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            targeting: TargetingConfig::default(),
            geocoder: GeocoderConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("BLAST_DASHBOARD")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
