//! Outbound bridge channel
//!
//! The bridge connects this binding to application code on the far
//! side. Exactly one outbound message shape exists: an `onAdEvent`
//! invocation carrying a `{adId, eventName, ..payload}` map.

use crate::codec::BridgeValue;
use crate::error::Result;
use async_trait::async_trait;

use super::sdk::NativeViewId;

/// Method name of the single outbound event invocation
pub const ON_AD_EVENT: &str = "onAdEvent";

/// Embeddable platform view handle returned to the host framework
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformView {
    /// Native view backing the platform view
    pub view: NativeViewId,
}

impl PlatformView {
    /// Wrap a native view handle
    pub fn new(view: NativeViewId) -> Self {
        Self { view }
    }
}

/// Trait for the bridge connection
///
/// # Threading
///
/// `invoke` is only ever called from the UI task queue; the registry
/// marshals every emit there first because the bridge silently drops
/// messages sent from any other thread.
#[async_trait]
pub trait BridgeChannel: Send + Sync {
    /// Invoke a method on the far side of the bridge
    ///
    /// # Parameters
    ///
    /// - `method`: Method name ([`ON_AD_EVENT`] for event relay)
    /// - `arguments`: Message payload, encodable with the value codec
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The message was handed to the bridge
    /// - `Err(Error)`: Delivery failed; the registry logs and drops
    async fn invoke(&self, method: &str, arguments: BridgeValue) -> Result<()>;
}
