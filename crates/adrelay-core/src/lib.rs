// # adrelay-core
//
// Core library for the ad mediation SDK bridge binding.
//
// ## Architecture Overview
//
// This library relays ad lifecycle events from an opaque mediation SDK
// to application code on the far side of a message-passing bridge:
//
// - **AdMediationSdk / SdkAdView / SdkInterstitial**: Traits for the
//   opaque SDK objects (construction, load, display, destroy)
// - **BridgeChannel**: Trait for the outbound bridge connection
// - **AdInstanceManager**: The id → ad-instance registry and the sole
//   authority for disposal and event emission
// - **UiDispatcher / UiTaskQueue**: Marshals bridge delivery onto the
//   single UI-owning thread (messages sent from any other thread are
//   silently dropped by the bridge)
// - **BridgeValue codec**: Binary encoding for the ad-domain value
//   objects layered on the bridge's extensible message format
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Registry and relay logic is separate
//    from SDK and bridge implementations
// 2. **No ambient state**: The registry and the SDK handle are
//    explicitly constructed and passed to every collaborator
// 3. **One event per callback**: Each SDK callback translates into at
//    most one outbound bridge message
// 4. **Best effort at the boundary**: Only duplicate-id registration
//    is a hard failure; every other abnormal condition becomes a
//    logged no-op or a normal event message

pub mod codec;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod listener;
pub mod registry;
pub mod traits;
pub mod values;

// Re-export core types for convenience
pub use codec::{BridgeValue, CodecError, decode_message, encode_message};
pub use config::AdRequest;
pub use dispatch::{UiDispatcher, UiTaskQueue, ui_task_queue};
pub use error::{Error, Result};
pub use listener::RelayAdListener;
pub use registry::AdInstanceManager;
pub use traits::{
    AdFormat, AdInstance, AdListener, AdLoadCallback, AdMediationSdk, AdViewListener,
    BridgeChannel, MediatedAd, MediatedError, PlatformView, SdkAdView, SdkInterstitial, UiContext,
};
pub use values::{AdError, AdSize, ResponseInfo};

/// Caller-supplied integer key identifying one live ad instance.
pub type AdId = i32;
