//! Core traits for the ad relay binding
//!
//! This module defines the seams between the relay core and everything
//! external to it.
//!
//! - [`AdMediationSdk`]: Construct opaque SDK ad objects
//! - [`BridgeChannel`]: Deliver event messages across the bridge
//! - [`AdListener`] / [`AdViewListener`]: The SDK callback capability set
//! - [`AdInstance`]: One live ad owned by the registry

pub mod ad_instance;
pub mod bridge;
pub mod listener;
pub mod sdk;

pub use ad_instance::AdInstance;
pub use bridge::{BridgeChannel, ON_AD_EVENT, PlatformView};
pub use listener::{AdListener, AdLoadCallback, AdViewListener};
pub use sdk::{
    AdFormat, AdMediationSdk, MediatedAd, MediatedError, NativeViewId, SdkAdView, SdkInterstitial,
    UiContext,
};
