//! Minimal embedding demo for the ad relay
//!
//! This demo wires the registry to a scripted mediation SDK and a
//! printing bridge channel, then walks one MREC and one interstitial
//! through their lifecycles. Every component the relay talks to is
//! custom here; no real SDK or UI framework is involved.

#![allow(dead_code)]

use adrelay_core::codec::BridgeValue;
use adrelay_core::config::AdRequest;
use adrelay_core::dispatch::ui_task_queue;
use adrelay_core::registry::AdInstanceManager;
use adrelay_core::traits::{
    AdFormat, AdInstance, AdListener, AdMediationSdk, AdViewListener, BridgeChannel, MediatedAd,
    SdkAdView, SdkInterstitial, UiContext,
};
use adrelay_core::values::AdSize;
use adrelay_core::Result;
use adrelay_interstitial::InterstitialAd;
use adrelay_mrec::MrecAd;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Bridge channel that prints every outbound invocation
struct PrintingChannel;

#[async_trait::async_trait]
impl BridgeChannel for PrintingChannel {
    async fn invoke(&self, method: &str, arguments: BridgeValue) -> Result<()> {
        println!("[Bridge] {} <- {:?}", method, arguments);
        Ok(())
    }
}

/// UI attachment stand-in
struct DemoContext;
impl UiContext for DemoContext {}

/// A loaded ad as the scripted SDK reports it
struct DemoLoadedAd;

impl MediatedAd for DemoLoadedAd {
    fn network_name(&self) -> &str {
        "DEMO_NETWORK"
    }
    fn network_placement(&self) -> &str {
        "demo_slot"
    }
    fn placement(&self) -> Option<&str> {
        Some("home")
    }
    fn creative_id(&self) -> Option<&str> {
        Some("demo-creative-1")
    }
    fn revenue(&self) -> f64 {
        0.003
    }
    fn dsp_name(&self) -> Option<&str> {
        None
    }
}

/// Scripted SDK ad view; the demo fires its callbacks by hand
struct DemoAdView {
    listener: Arc<Mutex<Option<Arc<dyn AdViewListener>>>>,
}

impl SdkAdView for DemoAdView {
    fn set_listener(&mut self, listener: Arc<dyn AdViewListener>) {
        *self.listener.lock().unwrap() = Some(listener);
    }

    fn clear_listener(&mut self) {
        *self.listener.lock().unwrap() = None;
    }

    fn set_placement(&mut self, placement: Option<&str>) {
        println!("[SDK] view placement = {:?}", placement);
    }

    fn set_custom_data(&mut self, _custom_data: Option<&str>) {}

    fn load(&mut self) {
        // The real SDK loads asynchronously and calls back from its
        // own thread; the demo mimics that with a short-lived thread.
        let listener = Arc::clone(&self.listener);
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            if let Some(listener) = listener.lock().unwrap().clone() {
                listener.on_ad_loaded(&DemoLoadedAd);
            }
        });
    }

    fn destroy(&mut self) {
        println!("[SDK] view destroyed");
    }

    fn size(&self) -> Option<AdSize> {
        Some(AdFormat::Mrec.size())
    }

    fn native_view(&self) -> u64 {
        1001
    }
}

struct DemoInterstitial {
    listener: Arc<Mutex<Option<Arc<dyn AdListener>>>>,
    ready: Arc<std::sync::atomic::AtomicBool>,
}

impl SdkInterstitial for DemoInterstitial {
    fn set_listener(&mut self, listener: Arc<dyn AdListener>) {
        *self.listener.lock().unwrap() = Some(listener);
    }

    fn clear_listener(&mut self) {
        *self.listener.lock().unwrap() = None;
    }

    fn load(&mut self) {
        let listener = Arc::clone(&self.listener);
        let ready = Arc::clone(&self.ready);
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            ready.store(true, std::sync::atomic::Ordering::SeqCst);
            if let Some(listener) = listener.lock().unwrap().clone() {
                listener.on_ad_loaded(&DemoLoadedAd);
            }
        });
    }

    fn is_ready(&self) -> bool {
        self.ready.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn show(&mut self, placement: Option<&str>, _custom_data: Option<&str>) {
        println!("[SDK] interstitial shown at {:?}", placement);
        if let Some(listener) = self.listener.lock().unwrap().clone() {
            listener.on_ad_displayed(&DemoLoadedAd);
        }
    }

    fn destroy(&mut self) {
        println!("[SDK] interstitial destroyed");
    }
}

struct DemoSdk;

impl AdMediationSdk for DemoSdk {
    fn create_ad_view(
        &self,
        ad_unit_id: &str,
        format: AdFormat,
        _context: Arc<dyn UiContext>,
    ) -> Result<Box<dyn SdkAdView>> {
        println!("[SDK] creating {:?} view for unit {}", format, ad_unit_id);
        Ok(Box::new(DemoAdView {
            listener: Arc::new(Mutex::new(None)),
        }))
    }

    fn create_interstitial(
        &self,
        ad_unit_id: &str,
        _context: Arc<dyn UiContext>,
    ) -> Result<Box<dyn SdkInterstitial>> {
        println!("[SDK] creating interstitial for unit {}", ad_unit_id);
        Ok(Box::new(DemoInterstitial {
            listener: Arc::new(Mutex::new(None)),
            ready: Arc::new(std::sync::atomic::AtomicBool::new(false)),
        }))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    println!("=== Ad Relay Embedding Demo ===\n");

    // The embedding application owns the UI task queue; here the tokio
    // runtime thread plays the UI thread.
    let (dispatcher, queue) = ui_task_queue();
    let queue_handle = tokio::spawn(queue.run());

    println!("1. Creating registry...");
    let sdk: Arc<dyn AdMediationSdk> = Arc::new(DemoSdk);
    let manager = Arc::new(AdInstanceManager::new(Arc::new(PrintingChannel), dispatcher));
    manager.set_ui_context(Some(Arc::new(DemoContext)));

    println!("2. Loading an MREC...");
    let mrec = MrecAd::new(
        1,
        &manager,
        Arc::clone(&sdk),
        AdRequest::new("demo-mrec-unit").with_placement("home"),
    );
    manager.track_ad(Arc::clone(&mrec) as Arc<dyn AdInstance>, 1)?;
    Arc::clone(&mrec).load();

    tokio::time::sleep(Duration::from_millis(150)).await;

    println!("3. Embedding the platform view...");
    if let Some(view) = mrec.platform_view() {
        println!("   host embeds native view {}", view.view);
    }

    println!("4. Loading and showing an interstitial...");
    let interstitial = InterstitialAd::new(
        2,
        &manager,
        Arc::clone(&sdk),
        AdRequest::new("demo-inter-unit").with_placement("level_end"),
    );
    manager.track_ad(Arc::clone(&interstitial) as Arc<dyn AdInstance>, 2)?;
    Arc::clone(&interstitial).load();
    tokio::time::sleep(Duration::from_millis(150)).await;
    interstitial.show();

    tokio::time::sleep(Duration::from_millis(100)).await;

    println!("5. Disposing everything...");
    manager.dispose_all_ads();

    drop(mrec);
    drop(interstitial);
    drop(manager);
    let _ = tokio::time::timeout(Duration::from_millis(100), queue_handle).await;

    println!("\n=== Demo Complete ===");
    Ok(())
}
