// # Mediation SDK Traits
//
// Defines the interface to the opaque third-party ad mediation SDK.
//
// The SDK owns the hard problems (auction, waterfall, rendering); this
// binding only constructs its ad objects, registers listeners, and
// reacts to callbacks. Callbacks may arrive on arbitrary SDK-internal
// threads.
//
// ## Implementations
//
// - Production: a thin FFI shim over the vendor SDK (out of tree)
// - Tests and demos: scripted fakes that fire callbacks on demand

use crate::error::Result;
use crate::values::AdSize;
use std::sync::Arc;

use super::listener::{AdListener, AdViewListener};

/// Opaque identifier for a native view that can be embedded by the
/// host UI framework.
pub type NativeViewId = u64;

/// Handle to the host UI attachment
///
/// Provided when the host UI is attached and revoked on teardown. Ads
/// can only be constructed while a context is present; loads requested
/// without one are logged and dropped.
pub trait UiContext: Send + Sync {}

/// Ad formats supported by the mediation SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdFormat {
    /// 320x50 anchored banner
    Banner,
    /// 728x90 tablet leaderboard
    Leader,
    /// 300x250 medium rectangle
    Mrec,
}

impl AdFormat {
    /// Nominal creative size for the format
    pub fn size(&self) -> AdSize {
        match self {
            AdFormat::Banner => AdSize::new(320, 50),
            AdFormat::Leader => AdSize::new(728, 90),
            AdFormat::Mrec => AdSize::new(300, 250),
        }
    }
}

/// Error value surfaced by the SDK on load or display failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediatedError {
    /// Mediation-level error code
    pub code: i32,
    /// Mediation-level error message
    pub message: String,
    /// Error code from the mediated network
    pub mediated_code: i32,
    /// Error message from the mediated network
    pub mediated_message: String,
}

/// Metadata of a loaded ad, readable only while the SDK object lives
///
/// The relay snapshots this into [`crate::ResponseInfo`] before the
/// value crosses the bridge.
pub trait MediatedAd {
    /// The ad network the ad was loaded from
    fn network_name(&self) -> &str;

    /// The network placement the ad was loaded from
    fn network_placement(&self) -> &str;

    /// The placement set for this ad, if any
    fn placement(&self) -> Option<&str>;

    /// The ad's creative id, if available
    fn creative_id(&self) -> Option<&str>;

    /// The revenue amount tied to the ad
    fn revenue(&self) -> f64;

    /// The DSP that provided the ad, if served through the exchange
    fn dsp_name(&self) -> Option<&str>;
}

/// One view-based SDK ad object (banner, leader, MREC)
///
/// The wrapper owning this handle is responsible for destroying it and
/// clearing its listener before dropping it.
pub trait SdkAdView: Send {
    /// Register the callback listener. Replaces any previous listener.
    fn set_listener(&mut self, listener: Arc<dyn AdViewListener>);

    /// Remove the callback listener
    fn clear_listener(&mut self);

    /// Set the placement reported with this ad's events
    fn set_placement(&mut self, placement: Option<&str>);

    /// Attach custom data forwarded to the ad networks
    fn set_custom_data(&mut self, custom_data: Option<&str>);

    /// Start loading. Fire-and-forget; the outcome arrives through the
    /// listener on an SDK thread.
    fn load(&mut self);

    /// Destroy the underlying native object
    fn destroy(&mut self);

    /// The size the SDK reports for this view, if any
    fn size(&self) -> Option<AdSize>;

    /// The embeddable native view handle
    fn native_view(&self) -> NativeViewId;
}

/// One full-screen SDK ad object (interstitial)
pub trait SdkInterstitial: Send {
    /// Register the callback listener. Replaces any previous listener.
    fn set_listener(&mut self, listener: Arc<dyn AdListener>);

    /// Remove the callback listener
    fn clear_listener(&mut self);

    /// Start loading. Fire-and-forget, like [`SdkAdView::load`].
    fn load(&mut self);

    /// Whether a loaded ad is ready to be shown
    fn is_ready(&self) -> bool;

    /// Present the loaded ad full screen
    fn show(&mut self, placement: Option<&str>, custom_data: Option<&str>);

    /// Destroy the underlying native object
    fn destroy(&mut self);
}

/// Trait for the mediation SDK itself
///
/// # Thread Safety
///
/// Implementations must be thread-safe; ad construction is requested
/// from caller-driven dispatch while callbacks run on SDK threads.
pub trait AdMediationSdk: Send + Sync {
    /// Construct a view-based ad object for the given ad unit
    ///
    /// # Parameters
    ///
    /// - `ad_unit_id`: The mediation ad unit to load for
    /// - `format`: The requested creative format
    /// - `context`: The live host UI attachment
    fn create_ad_view(
        &self,
        ad_unit_id: &str,
        format: AdFormat,
        context: Arc<dyn UiContext>,
    ) -> Result<Box<dyn SdkAdView>>;

    /// Construct a full-screen interstitial ad object
    fn create_interstitial(
        &self,
        ad_unit_id: &str,
        context: Arc<dyn UiContext>,
    ) -> Result<Box<dyn SdkInterstitial>>;
}
