//! Load-request configuration
//!
//! The parameters a caller supplies when requesting an ad load. These
//! arrive across the bridge; the dispatch layer deserializes them and
//! hands them to the format wrapper's constructor.

use serde::{Deserialize, Serialize};

/// Parameters for one ad load request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdRequest {
    /// The mediation ad unit to load for
    pub ad_unit_id: String,

    /// Placement name reported with the ad's events
    #[serde(default)]
    pub placement: Option<String>,

    /// Custom data forwarded to the ad networks
    #[serde(default)]
    pub custom_data: Option<String>,
}

impl AdRequest {
    /// Create a request for an ad unit with no extras
    pub fn new(ad_unit_id: impl Into<String>) -> Self {
        Self {
            ad_unit_id: ad_unit_id.into(),
            placement: None,
            custom_data: None,
        }
    }

    /// Set the placement
    pub fn with_placement(mut self, placement: impl Into<String>) -> Self {
        self.placement = Some(placement.into());
        self
    }

    /// Set the custom data
    pub fn with_custom_data(mut self, custom_data: impl Into<String>) -> Self {
        self.custom_data = Some(custom_data.into());
        self
    }

    /// Validate the request
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.ad_unit_id.is_empty() {
            return Err(crate::Error::config("ad unit id cannot be empty"));
        }
        Ok(())
    }
}
