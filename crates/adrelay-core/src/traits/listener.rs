//! SDK callback capability set
//!
//! The SDK invokes these on its own internal threads. Implementations
//! must translate each callback into at most one registry emit and
//! must not block.

use super::sdk::{MediatedAd, MediatedError};

/// Callbacks common to every ad format
pub trait AdListener: Send + Sync {
    /// The ad finished loading
    fn on_ad_loaded(&self, ad: &dyn MediatedAd);

    /// The load attempt failed. No automatic retry follows.
    fn on_ad_load_failed(&self, ad_unit_id: &str, error: &MediatedError);

    /// The ad was displayed
    fn on_ad_displayed(&self, ad: &dyn MediatedAd);

    /// Displaying the loaded ad failed
    fn on_ad_display_failed(&self, ad: &dyn MediatedAd, error: &MediatedError);

    /// The ad was hidden
    fn on_ad_hidden(&self, ad: &dyn MediatedAd);

    /// The ad was clicked
    fn on_ad_clicked(&self, ad: &dyn MediatedAd);
}

/// Additional callbacks for view-based (banner-like) formats
pub trait AdViewListener: AdListener {
    /// The ad view expanded to full screen
    fn on_ad_expanded(&self, ad: &dyn MediatedAd);

    /// The ad view collapsed back inline
    fn on_ad_collapsed(&self, ad: &dyn MediatedAd);
}

/// One-shot load-success notification
///
/// View-based listener variants redirect the load callback here
/// instead of emitting immediately, so the wrapper can decide when the
/// public loaded event fires. Held weakly by the listener: if the
/// wrapper is gone the notification is silently dropped.
pub trait AdLoadCallback: Send + Sync {
    /// The underlying SDK ad finished loading
    fn on_ad_loaded(&self, ad: &dyn MediatedAd);
}
