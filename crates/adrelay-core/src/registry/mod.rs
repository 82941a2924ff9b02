//! Ad instance registry and event relay
//!
//! When an ad is loaded from the far side of the bridge, an equivalent
//! ad object is created and tracked here to provide access until the
//! ad is disposed. The registry is the sole owner of the id → instance
//! mapping, the sole authority for disposal, and the single funnel for
//! outbound event messages.
//!
//! ## Event Flow
//!
//! 1. Caller-driven dispatch constructs a wrapper and calls
//!    [`AdInstanceManager::track_ad`]
//! 2. The wrapper attaches a listener and asks the SDK to load
//! 3. SDK callbacks (arbitrary threads) call the `on_ad_*` methods
//! 4. Each emit is posted to the UI task queue and delivered to the
//!    bridge as one `onAdEvent` message
//!
//! ## Thread Safety
//!
//! The mapping uses interior mutability with RwLock. Lock scopes never
//! enclose calls into instances or the bridge, so callback re-entrancy
//! cannot deadlock.

use crate::codec::BridgeValue;
use crate::dispatch::UiDispatcher;
use crate::error::{Error, Result};
use crate::traits::{AdInstance, BridgeChannel, ON_AD_EVENT, UiContext};
use crate::values::{AdError, ResponseInfo};
use crate::AdId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// The id → ad-instance registry and bridge event relay
///
/// One instance exists per bridge connection. Collaborators receive an
/// explicit `Arc<AdInstanceManager>` (there is no ambient singleton);
/// wrappers and listeners hold `Weak` back-references so the map's
/// ownership of its instances stays acyclic.
pub struct AdInstanceManager {
    /// Active host UI attachment; unset while the host UI is torn down
    ui_context: RwLock<Option<Arc<dyn UiContext>>>,

    /// Live ads keyed by caller-supplied id
    ads: RwLock<HashMap<AdId, Arc<dyn AdInstance>>>,

    /// Outbound bridge connection, valid for the manager's lifetime
    channel: Arc<dyn BridgeChannel>,

    /// Posting handle for the UI-owning thread
    dispatcher: UiDispatcher,
}

impl AdInstanceManager {
    /// Create a new registry
    ///
    /// Only a bridge channel and a dispatcher are needed to start
    /// loading ads; a UI context must additionally be attached before
    /// any ad can be constructed against the SDK.
    pub fn new(channel: Arc<dyn BridgeChannel>, dispatcher: UiDispatcher) -> Self {
        Self {
            ui_context: RwLock::new(None),
            ads: RwLock::new(HashMap::new()),
            channel,
            dispatcher,
        }
    }

    /// Replace the active UI context reference
    ///
    /// Called when the host UI is attached (`Some`) or detached
    /// (`None`). Ads loaded before a context is set defer any
    /// context-requiring action.
    pub fn set_ui_context(&self, context: Option<Arc<dyn UiContext>>) {
        *self.ui_context.write().unwrap() = context;
    }

    /// The active UI context, if one is attached
    pub fn ui_context(&self) -> Option<Arc<dyn UiContext>> {
        self.ui_context.read().unwrap().clone()
    }

    /// Look up the instance registered under an id
    pub fn ad_for_id(&self, ad_id: AdId) -> Option<Arc<dyn AdInstance>> {
        self.ads.read().unwrap().get(&ad_id).cloned()
    }

    /// Recover the id a given instance was registered under
    ///
    /// Identity comparison over a linear scan; call volume is bounded
    /// by concurrently-live ads, which stays small.
    pub fn ad_id_for(&self, ad: &Arc<dyn AdInstance>) -> Option<AdId> {
        self.ads
            .read()
            .unwrap()
            .iter()
            .find(|(_, tracked)| Arc::ptr_eq(tracked, ad))
            .map(|(ad_id, _)| *ad_id)
    }

    /// Register an instance under an id
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The instance is now tracked
    /// - `Err(Error::DuplicateAdId)`: The id is already in use; the
    ///   existing mapping is left unchanged
    pub fn track_ad(&self, ad: Arc<dyn AdInstance>, ad_id: AdId) -> Result<()> {
        let mut ads = self.ads.write().unwrap();
        if ads.contains_key(&ad_id) {
            return Err(Error::DuplicateAdId(ad_id));
        }
        ads.insert(ad_id, ad);
        debug!(ad_id, "tracking ad");
        Ok(())
    }

    /// Dispose the instance registered under an id
    ///
    /// A no-op for unknown ids. The instance releases its SDK handle
    /// and listener registration before the entry is removed, so a
    /// disposed entry's callbacks cannot fire after removal.
    pub fn dispose_ad(&self, ad_id: AdId) {
        let ad = self.ads.read().unwrap().get(&ad_id).cloned();
        let Some(ad) = ad else {
            return;
        };
        ad.dispose();
        self.ads.write().unwrap().remove(&ad_id);
        debug!(ad_id, "disposed ad");
    }

    /// Dispose every live instance and clear the mapping
    ///
    /// Entries are independent; disposal order is unspecified.
    pub fn dispose_all_ads(&self) {
        let ads: Vec<Arc<dyn AdInstance>> =
            self.ads.read().unwrap().values().cloned().collect();
        for ad in ads {
            ad.dispose();
        }
        self.ads.write().unwrap().clear();
        debug!("disposed all ads");
    }

    /// Relay a load success
    pub fn on_ad_loaded(&self, ad_id: AdId, response_info: ResponseInfo) {
        self.invoke_on_ad_event(event_message(
            ad_id,
            "onAdLoaded",
            Some(("responseInfo", response_info.into())),
        ));
    }

    /// Relay a load failure
    pub fn on_ad_load_failed(&self, ad_id: AdId, error: AdError) {
        self.invoke_on_ad_event(event_message(
            ad_id,
            "onAdLoadFailed",
            Some(("adError", error.into())),
        ));
    }

    /// Relay a display
    pub fn on_ad_displayed(&self, ad_id: AdId) {
        self.invoke_on_ad_event(event_message(ad_id, "onAdDisplayed", None));
    }

    /// Relay a display failure
    pub fn on_ad_display_failed(&self, ad_id: AdId, error: AdError) {
        self.invoke_on_ad_event(event_message(
            ad_id,
            "onAdDisplayFailed",
            Some(("adError", error.into())),
        ));
    }

    /// Relay a hide
    pub fn on_ad_hidden(&self, ad_id: AdId) {
        self.invoke_on_ad_event(event_message(ad_id, "onAdHidden", None));
    }

    /// Relay a click
    pub fn on_ad_clicked(&self, ad_id: AdId) {
        self.invoke_on_ad_event(event_message(ad_id, "onAdClicked", None));
    }

    /// Relay a view expansion
    pub fn on_ad_expanded(&self, ad_id: AdId) {
        self.invoke_on_ad_event(event_message(ad_id, "onAdExpanded", None));
    }

    /// Relay a view collapse
    pub fn on_ad_collapsed(&self, ad_id: AdId) {
        self.invoke_on_ad_event(event_message(ad_id, "onAdCollapsed", None));
    }

    /// Invoke the bridge channel from the UI thread. Otherwise the
    /// message gets silently dropped.
    fn invoke_on_ad_event(&self, arguments: BridgeValue) {
        let channel = Arc::clone(&self.channel);
        self.dispatcher.post(async move {
            if let Err(error) = channel.invoke(ON_AD_EVENT, arguments).await {
                warn!(%error, "failed to deliver ad event to the bridge");
            }
        });
    }
}

/// Build the one outbound message shape: `{adId, eventName, ..extra}`
fn event_message(
    ad_id: AdId,
    event_name: &str,
    extra: Option<(&str, BridgeValue)>,
) -> BridgeValue {
    let mut entries = vec![
        (BridgeValue::from("adId"), BridgeValue::I32(ad_id)),
        (BridgeValue::from("eventName"), BridgeValue::from(event_name)),
    ];
    if let Some((key, value)) = extra {
        entries.push((BridgeValue::from(key), value));
    }
    BridgeValue::Map(entries)
}
