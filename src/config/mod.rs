//! Configuration loading and management

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Key of the persisted order collection in the browser widget
pub const DEFAULT_STORAGE_KEY: &str = "foodDeliveryOrders";

/// Bounds enforced by the order validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    /// Minimum order id length, in characters
    pub order_id_min_len: usize,

    /// Minimum restaurant name length, in characters
    pub restaurant_name_min_len: usize,

    pub item_count_min: u32,
    pub item_count_max: u32,

    /// Upper bound for delivery distance in KM (inclusive); the lower bound is
    /// always exclusive zero
    pub distance_max: f64,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            order_id_min_len: 3,
            restaurant_name_min_len: 2,
            item_count_min: 1,
            item_count_max: 100,
            distance_max: 1000.0,
        }
    }
}

/// Complete configuration for the order desk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Key under which the order collection is persisted
    pub storage_key: String,

    /// Directory for file-backed storage; `None` keeps orders in memory
    pub storage_dir: Option<String>,

    /// Re-check persisted orders against the validator when loading
    pub validate_on_load: bool,

    pub limits: ValidationLimits,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: None,
            validate_on_load: true,
            limits: ValidationLimits::default(),
        }
    }
}

impl FleetConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("loading config file {}", path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("parsing config YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would make every order invalid or the key unusable
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            bail!("storage_key must not be empty");
        }

        let limits = &self.limits;
        if limits.item_count_min > limits.item_count_max {
            bail!(
                "item_count_min ({}) exceeds item_count_max ({})",
                limits.item_count_min,
                limits.item_count_max
            );
        }
        if !limits.distance_max.is_finite() || limits.distance_max <= 0.0 {
            bail!(
                "distance_max must be a positive number (got {})",
                limits.distance_max
            );
        }

        Ok(())
    }
}
