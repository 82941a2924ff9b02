//! Medium rectangle (MREC) ad format
//!
//! Wraps one SDK ad view in a 300x250 creative slot and binds it into
//! the relay: load requests go down to the SDK, SDK callbacks come
//! back up as registry emits, and the host UI embeds the view through
//! [`AdInstance::platform_view`].
//!
//! Lifecycle, in order:
//!
//! 1. Caller-driven dispatch constructs an [`MrecAd`], registers it,
//!    and calls `load`
//! 2. The SDK reports the load outcome through [`MrecAdListener`]
//! 3. The host UI requests the platform view; the first successful
//!    request emits `onAdDisplayed`
//! 4. Disposal destroys the SDK view and detaches the listener

use adrelay_core::config::AdRequest;
use adrelay_core::listener::RelayAdListener;
use adrelay_core::registry::AdInstanceManager;
use adrelay_core::traits::{
    AdFormat, AdInstance, AdListener, AdLoadCallback, AdMediationSdk, AdViewListener, MediatedAd,
    MediatedError, PlatformView, SdkAdView,
};
use adrelay_core::values::{AdSize, ResponseInfo};
use adrelay_core::AdId;
use std::sync::{Arc, Mutex, Weak};
use tracing::{debug, error, warn};

/// State owned by the wrapper once a load has been started
#[derive(Default)]
struct Inner {
    /// The live SDK view; `None` before load and after disposal
    ad_view: Option<Box<dyn SdkAdView>>,
    /// Whether a load success has already been relayed
    is_loaded: bool,
    /// Whether the first platform-view handoff has been relayed
    is_displayed: bool,
}

/// An MREC ad tracked by the registry
///
/// Holds the registry weakly so that the registry's map entry is the
/// only strong cycle-free owner; a wrapper outliving its registry
/// degrades to logged no-ops.
pub struct MrecAd {
    ad_id: AdId,
    manager: Weak<AdInstanceManager>,
    sdk: Arc<dyn AdMediationSdk>,
    request: AdRequest,
    inner: Mutex<Inner>,
}

impl MrecAd {
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
            inner: Mutex::new(Inner::default()),
        })
    }
}

impl AdInstance for MrecAd {
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
                "tried to load an MREC ad before a UI context was attached"
            );
            return;
        };

        let mut ad_view =
            match self
                .sdk
                .create_ad_view(&self.request.ad_unit_id, AdFormat::Mrec, context)
            {
                Ok(ad_view) => ad_view,
                Err(error) => {
                    error!(
                        ad_id = self.ad_id,
                        ad_unit_id = %self.request.ad_unit_id,
                        %error,
                        "SDK refused to construct the MREC ad view"
                    );
                    return;
                }
            };

        let weak_self = Arc::downgrade(&self);
        let load_callback: Weak<dyn AdLoadCallback> = weak_self;
        let listener: Arc<dyn AdViewListener> = Arc::new(MrecAdListener::new(
            RelayAdListener::new(self.ad_id, self.manager.clone()),
            load_callback,
        ));
        ad_view.set_listener(listener);
        ad_view.set_placement(self.request.placement.as_deref());
        ad_view.set_custom_data(self.request.custom_data.as_deref());
        ad_view.load();

        // Stored only after the load kickoff so a synchronous SDK
        // callback never contends with this lock.
        self.inner.lock().unwrap().ad_view = Some(ad_view);
        debug!(ad_id = self.ad_id, ad_unit_id = %self.request.ad_unit_id, "MREC load started");
    }

    fn platform_view(&self) -> Option<PlatformView> {
        let mut inner = self.inner.lock().unwrap();
        let native_view = inner.ad_view.as_ref()?.native_view();
        let first_handoff = !inner.is_displayed;
        inner.is_displayed = true;
        drop(inner);

        if first_handoff {
            if let Some(manager) = self.manager.upgrade() {
                manager.on_ad_displayed(self.ad_id);
            }
        }
        Some(PlatformView::new(native_view))
    }

    fn ad_size(&self) -> Option<AdSize> {
        self.inner
            .lock()
            .unwrap()
            .ad_view
            .as_ref()
            .and_then(|ad_view| ad_view.size())
    }

    fn dispose(&self) {
        let ad_view = self.inner.lock().unwrap().ad_view.take();
        let Some(mut ad_view) = ad_view else {
            return;
        };
        ad_view.destroy();
        ad_view.clear_listener();
        debug!(ad_id = self.ad_id, "MREC view destroyed");
    }
}

impl AdLoadCallback for MrecAd {
    /// Relay the first load success; later duplicates from the SDK are
    /// swallowed.
    fn on_ad_loaded(&self, ad: &dyn MediatedAd) {
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.is_loaded {
                debug!(ad_id = self.ad_id, "duplicate load callback ignored");
                return;
            }
            inner.is_loaded = true;
        }

        let response_info = ResponseInfo::from_mediated(ad);
        if let Some(manager) = self.manager.upgrade() {
            manager.on_ad_loaded(self.ad_id, response_info);
        }
    }
}

/// View listener that routes load successes through the wrapper
///
/// The wrapper dedupes SDK load callbacks, so `onAdLoaded` detours
/// through a weak [`AdLoadCallback`]; everything else relays straight
/// to the registry. A callback arriving after the wrapper is gone is
/// dropped.
pub struct MrecAdListener {
    relay: RelayAdListener,
    load_callback: Weak<dyn AdLoadCallback>,
}

impl MrecAdListener {
    pub fn new(relay: RelayAdListener, load_callback: Weak<dyn AdLoadCallback>) -> Self {
        Self {
            relay,
            load_callback,
        }
    }
}

impl AdListener for MrecAdListener {
    fn on_ad_loaded(&self, ad: &dyn MediatedAd) {
        match self.load_callback.upgrade() {
            Some(callback) => callback.on_ad_loaded(ad),
            None => debug!("MREC wrapper gone, dropping stale load callback"),
        }
    }

    fn on_ad_load_failed(&self, ad_unit_id: &str, error: &MediatedError) {
        self.relay.on_ad_load_failed(ad_unit_id, error);
    }

    fn on_ad_displayed(&self, ad: &dyn MediatedAd) {
        self.relay.on_ad_displayed(ad);
    }

    fn on_ad_display_failed(&self, ad: &dyn MediatedAd, error: &MediatedError) {
        self.relay.on_ad_display_failed(ad, error);
    }

    fn on_ad_hidden(&self, ad: &dyn MediatedAd) {
        self.relay.on_ad_hidden(ad);
    }

    fn on_ad_clicked(&self, ad: &dyn MediatedAd) {
        self.relay.on_ad_clicked(ad);
    }
}

impl AdViewListener for MrecAdListener {
    fn on_ad_expanded(&self, ad: &dyn MediatedAd) {
        self.relay.on_ad_expanded(ad);
    }

    fn on_ad_collapsed(&self, ad: &dyn MediatedAd) {
        self.relay.on_ad_collapsed(ad);
    }
}
