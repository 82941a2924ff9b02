//! Full-screen interstitial ad format
//!
//! The interstitial has no platform view; its whole surface is load,
//! show, and dispose. The SDK presents the ad itself when `show` is
//! called, so the listener relays display events instead of a
//! platform-view handoff, and the registry's stock
//! [`RelayAdListener`] is attached unwrapped.

use adrelay_core::config::AdRequest;
use adrelay_core::listener::RelayAdListener;
use adrelay_core::registry::AdInstanceManager;
use adrelay_core::traits::{AdInstance, AdListener, AdMediationSdk, SdkInterstitial};
use adrelay_core::AdId;
use std::sync::{Arc, Mutex, Weak};
use tracing::{debug, error, warn};

/// An interstitial ad tracked by the registry
pub struct InterstitialAd {
    ad_id: AdId,
    manager: Weak<AdInstanceManager>,
    sdk: Arc<dyn AdMediationSdk>,
    request: AdRequest,
    inner: Mutex<Option<Box<dyn SdkInterstitial>>>,
}

impl InterstitialAd {
    /// Create a wrapper for one ad unit, not yet loading
    pub fn new(
        ad_id: AdId,
        manager: &Arc<AdInstanceManager>,
        sdk: Arc<dyn AdMediationSdk>,
        request: AdRequest,
    ) -> Arc<Self> {
        Arc::new(Self {
            ad_id,
            manager: Arc::downgrade(manager),
            sdk,
            request,
            inner: Mutex::new(None),
        })
    }

    /// Present the loaded ad full screen
    ///
    /// Logged no-op when no load completed; the SDK's listener relays
    /// the display outcome either way.
    pub fn show(&self) {
        let mut inner = self.inner.lock().unwrap();
        match inner.as_mut() {
            Some(interstitial) if interstitial.is_ready() => {
                interstitial.show(
                    self.request.placement.as_deref(),
                    self.request.custom_data.as_deref(),
                );
                debug!(ad_id = self.ad_id, "interstitial shown");
            }
            Some(_) => {
                error!(ad_id = self.ad_id, "show requested before the interstitial is ready");
            }
            None => {
                error!(ad_id = self.ad_id, "show requested before the interstitial was loaded");
            }
        }
    }
}

impl AdInstance for InterstitialAd {
    fn ad_id(&self) -> AdId {
        self.ad_id
    }

    fn load(self: Arc<Self>) {
        let Some(manager) = self.manager.upgrade() else {
            warn!(ad_id = self.ad_id, "registry gone before load, dropping request");
            return;
        };
        let Some(context) = manager.ui_context() else {
            error!(
                ad_id = self.ad_id,
                ad_unit_id = %self.request.ad_unit_id,
                "tried to load an interstitial before a UI context was attached"
            );
            return;
        };

        let mut interstitial = match self
            .sdk
            .create_interstitial(&self.request.ad_unit_id, context)
        {
            Ok(interstitial) => interstitial,
            Err(error) => {
                error!(
                    ad_id = self.ad_id,
                    ad_unit_id = %self.request.ad_unit_id,
                    %error,
                    "SDK refused to construct the interstitial"
                );
                return;
            }
        };

        let listener: Arc<dyn AdListener> =
            Arc::new(RelayAdListener::new(self.ad_id, self.manager.clone()));
        interstitial.set_listener(listener);
        interstitial.load();

        *self.inner.lock().unwrap() = Some(interstitial);
        debug!(ad_id = self.ad_id, ad_unit_id = %self.request.ad_unit_id, "interstitial load started");
    }

    fn dispose(&self) {
        let interstitial = self.inner.lock().unwrap().take();
        let Some(mut interstitial) = interstitial else {
            return;
        };
        interstitial.destroy();
        interstitial.clear_listener();
        debug!(ad_id = self.ad_id, "interstitial destroyed");
    }
}
