//! Ad-domain value objects
//!
//! Immutable snapshots of SDK ad metadata, decoupled from the live SDK
//! objects so they can cross the bridge after the SDK object is gone.
//! Equality is structural for all three types.

use crate::traits::{MediatedAd, MediatedError};
use serde::{Deserialize, Serialize};

/// Size of an ad creative in density-independent pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdSize {
    /// Creative width
    pub width: i32,
    /// Creative height
    pub height: i32,
}

impl AdSize {
    /// Create a new ad size
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Error reported by the mediation SDK for a load or display failure
///
/// Carries both the mediation-level error and the error reported by
/// the mediated network that actually failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdError {
    /// Mediation-level error code
    pub code: i32,
    /// Mediation-level error message
    pub message: String,
    /// Error code reported by the mediated ad network
    pub mediated_code: i32,
    /// Error message reported by the mediated ad network
    pub mediated_message: String,
}

impl AdError {
    /// Create a new ad error
    pub fn new(
        code: i32,
        message: impl Into<String>,
        mediated_code: i32,
        mediated_message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            mediated_code,
            mediated_message: mediated_message.into(),
        }
    }
}

impl From<&MediatedError> for AdError {
    fn from(err: &MediatedError) -> Self {
        Self {
            code: err.code,
            message: err.message.clone(),
            mediated_code: err.mediated_code,
            mediated_message: err.mediated_message.clone(),
        }
    }
}

/// Metadata about a successfully loaded ad
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseInfo {
    /// The ad network the ad was loaded from
    pub network_name: String,

    /// The ad network placement the ad was loaded from
    pub network_placement: String,

    /// The placement that was set for this ad, if any
    pub placement: Option<String>,

    /// The creative id tied to the ad, if available. Useful for
    /// reporting creative issues to the serving network.
    pub creative_id: Option<String>,

    /// The revenue amount tied to the ad, string-encoded to preserve
    /// full precision and to keep "absent" distinct from "zero".
    pub revenue: Option<String>,

    /// The DSP that provided the ad when it was served through the
    /// mediation exchange
    pub dsp_name: Option<String>,
}

impl ResponseInfo {
    /// Create a response info with the required fields only
    pub fn new(network_name: impl Into<String>, network_placement: impl Into<String>) -> Self {
        Self {
            network_name: network_name.into(),
            network_placement: network_placement.into(),
            placement: None,
            creative_id: None,
            revenue: None,
            dsp_name: None,
        }
    }

    /// Set the placement
    pub fn with_placement(mut self, placement: impl Into<String>) -> Self {
        self.placement = Some(placement.into());
        self
    }

    /// Set the creative id
    pub fn with_creative_id(mut self, creative_id: impl Into<String>) -> Self {
        self.creative_id = Some(creative_id.into());
        self
    }

    /// Set the revenue amount
    pub fn with_revenue(mut self, revenue: impl Into<String>) -> Self {
        self.revenue = Some(revenue.into());
        self
    }

    /// Set the DSP name
    pub fn with_dsp_name(mut self, dsp_name: impl Into<String>) -> Self {
        self.dsp_name = Some(dsp_name.into());
        self
    }

    /// Snapshot the metadata of a loaded SDK ad
    pub fn from_mediated(ad: &dyn MediatedAd) -> Self {
        Self {
            network_name: ad.network_name().to_string(),
            network_placement: ad.network_placement().to_string(),
            placement: ad.placement().map(str::to_string),
            creative_id: ad.creative_id().map(str::to_string),
            revenue: Some(ad.revenue().to_string()),
            dsp_name: ad.dsp_name().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubAd;

    impl MediatedAd for StubAd {
        fn network_name(&self) -> &str {
            "APPLOVIN_NETWORK"
        }
        fn network_placement(&self) -> &str {
            "inline_banner"
        }
        fn placement(&self) -> Option<&str> {
            None
        }
        fn creative_id(&self) -> Option<&str> {
            Some("creative-42")
        }
        fn revenue(&self) -> f64 {
            0.0125
        }
        fn dsp_name(&self) -> Option<&str> {
            None
        }
    }

    #[test]
    fn response_info_equality_is_structural() {
        let a = ResponseInfo::new("net", "slot").with_revenue("0.5");
        let b = ResponseInfo::new("net", "slot").with_revenue("0.5");
        let c = ResponseInfo::new("net", "slot");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn snapshot_string_encodes_revenue() {
        let info = ResponseInfo::from_mediated(&StubAd);
        assert_eq!(info.network_name, "APPLOVIN_NETWORK");
        assert_eq!(info.revenue.as_deref(), Some("0.0125"));
        assert_eq!(info.creative_id.as_deref(), Some("creative-42"));
        assert_eq!(info.placement, None);
    }

    #[test]
    fn ad_size_equality_by_dimensions() {
        assert_eq!(AdSize::new(300, 250), AdSize::new(300, 250));
        assert_ne!(AdSize::new(300, 250), AdSize::new(320, 50));
    }
}
