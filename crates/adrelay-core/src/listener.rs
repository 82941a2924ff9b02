//! Generic SDK listener adapter
//!
//! Translates each native SDK callback into exactly one registry emit.
//! Format crates either use this adapter directly (full-screen
//! formats) or wrap it with a view-listener variant that adds
//! expand/collapse and redirects the load callback.

use crate::registry::AdInstanceManager;
use crate::traits::{AdListener, AdViewListener, MediatedAd, MediatedError};
use crate::values::{AdError, ResponseInfo};
use crate::AdId;
use std::sync::{Arc, Weak};
use tracing::debug;

/// SDK-facing listener forwarding callbacks to the registry
///
/// Holds the registry weakly: callbacks arriving after the registry is
/// gone are dropped rather than kept alive by the SDK's listener
/// retention.
pub struct RelayAdListener {
    ad_id: AdId,
    manager: Weak<AdInstanceManager>,
}

impl RelayAdListener {
    /// Create a listener relaying events for one ad id
    pub fn new(ad_id: AdId, manager: Weak<AdInstanceManager>) -> Self {
        Self { ad_id, manager }
    }

    fn with_manager(&self, forward: impl FnOnce(&AdInstanceManager)) {
        match self.manager.upgrade() {
            Some(manager) => forward(&manager),
            None => debug!(ad_id = self.ad_id, "registry gone, dropping SDK callback"),
        }
    }
}

impl AdListener for RelayAdListener {
    fn on_ad_loaded(&self, ad: &dyn MediatedAd) {
        let response_info = ResponseInfo::from_mediated(ad);
        self.with_manager(|manager| manager.on_ad_loaded(self.ad_id, response_info));
    }

    fn on_ad_load_failed(&self, _ad_unit_id: &str, error: &MediatedError) {
        self.with_manager(|manager| manager.on_ad_load_failed(self.ad_id, AdError::from(error)));
    }

    fn on_ad_displayed(&self, _ad: &dyn MediatedAd) {
        self.with_manager(|manager| manager.on_ad_displayed(self.ad_id));
    }

    fn on_ad_display_failed(&self, _ad: &dyn MediatedAd, error: &MediatedError) {
        self.with_manager(|manager| {
            manager.on_ad_display_failed(self.ad_id, AdError::from(error))
        });
    }

    fn on_ad_hidden(&self, _ad: &dyn MediatedAd) {
        self.with_manager(|manager| manager.on_ad_hidden(self.ad_id));
    }

    fn on_ad_clicked(&self, _ad: &dyn MediatedAd) {
        self.with_manager(|manager| manager.on_ad_clicked(self.ad_id));
    }
}

impl AdViewListener for RelayAdListener {
    fn on_ad_expanded(&self, _ad: &dyn MediatedAd) {
        self.with_manager(|manager| manager.on_ad_expanded(self.ad_id));
    }

    fn on_ad_collapsed(&self, _ad: &dyn MediatedAd) {
        self.with_manager(|manager| manager.on_ad_collapsed(self.ad_id));
    }
}

/// Convenience for format crates that also need the registry handle
impl RelayAdListener {
    /// Create a listener from a shared registry handle
    pub fn for_manager(ad_id: AdId, manager: &Arc<AdInstanceManager>) -> Self {
        Self::new(ad_id, Arc::downgrade(manager))
    }
}
