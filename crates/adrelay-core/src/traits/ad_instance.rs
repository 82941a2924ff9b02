//! Live ad instance entity
//!
//! One instance owns exactly one underlying SDK ad object (or none,
//! before load). The registry is the sole owner of the id → instance
//! mapping and the sole authority for disposal.

use crate::AdId;
use crate::traits::bridge::PlatformView;
use crate::values::AdSize;
use std::sync::Arc;

/// Trait implemented by every format-specific ad wrapper
///
/// Lifecycle: Unloaded → Loading → Loaded → (Displayed) → Disposed.
/// Displayed is reached when a platform view is actually retrieved,
/// not merely on load.
pub trait AdInstance: Send + Sync {
    /// The caller-supplied id this instance was registered under
    fn ad_id(&self) -> AdId;

    /// Construct the underlying SDK ad object and start loading
    ///
    /// A no-op (logged, no event) while no UI context is attached.
    /// Not idempotent: a second call constructs a second SDK object
    /// and orphans the first's listener registration.
    fn load(self: Arc<Self>);

    /// The embeddable view for this ad, if the format has one and the
    /// underlying SDK object exists
    ///
    /// The first non-empty return triggers the displayed transition
    /// and its event exactly once.
    fn platform_view(&self) -> Option<PlatformView> {
        None
    }

    /// The format's current size, if the underlying SDK object exists
    /// and reports one
    fn ad_size(&self) -> Option<AdSize> {
        None
    }

    /// Release the underlying SDK object and its listener registration
    ///
    /// Always safe to call multiple times.
    fn dispose(&self);
}
