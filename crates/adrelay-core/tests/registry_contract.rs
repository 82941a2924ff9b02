//! Contract Test: Ad Instance Registry
//!
//! Verifies the registry's ownership contract:
//! - Ids map to exactly the instance registered under them
//! - Duplicate registration fails and leaves the original untouched
//! - Disposal happens exactly once per instance and is idempotent
//!   from the caller's perspective

mod common;

use adrelay_core::error::Error;
use adrelay_core::dispatch::ui_task_queue;
use adrelay_core::registry::AdInstanceManager;
use adrelay_core::traits::{AdInstance, BridgeChannel};
use common::*;
use std::sync::Arc;

fn standalone_manager() -> (AdInstanceManager, Arc<MockBridgeChannel>) {
    // Registry-only tests do not need a live UI thread; posted tasks
    // are dropped when the queue handle goes away.
    let (dispatcher, _queue) = ui_task_queue();
    let channel = MockBridgeChannel::new();
    let manager =
        AdInstanceManager::new(Arc::clone(&channel) as Arc<dyn BridgeChannel>, dispatcher);
    (manager, channel)
}

#[test]
fn registered_instances_are_retrievable_by_id() {
    let (manager, _channel) = standalone_manager();

    let first: Arc<dyn AdInstance> = Arc::new(MockAdInstance::new(1));
    let second: Arc<dyn AdInstance> = Arc::new(MockAdInstance::new(2));

    manager.track_ad(Arc::clone(&first), 1).unwrap();
    manager.track_ad(Arc::clone(&second), 2).unwrap();

    assert!(Arc::ptr_eq(&manager.ad_for_id(1).unwrap(), &first));
    assert!(Arc::ptr_eq(&manager.ad_for_id(2).unwrap(), &second));
    assert!(manager.ad_for_id(3).is_none());
}

#[test]
fn reverse_lookup_recovers_the_registered_id() {
    let (manager, _channel) = standalone_manager();

    let tracked: Arc<dyn AdInstance> = Arc::new(MockAdInstance::new(11));
    let untracked: Arc<dyn AdInstance> = Arc::new(MockAdInstance::new(12));

    manager.track_ad(Arc::clone(&tracked), 11).unwrap();

    assert_eq!(manager.ad_id_for(&tracked), Some(11));
    assert_eq!(manager.ad_id_for(&untracked), None);
}

#[test]
fn duplicate_id_registration_fails_and_keeps_original() {
    let (manager, _channel) = standalone_manager();

    let original: Arc<dyn AdInstance> = Arc::new(MockAdInstance::new(7));
    let replacement: Arc<dyn AdInstance> = Arc::new(MockAdInstance::new(7));

    manager.track_ad(Arc::clone(&original), 7).unwrap();
    let err = manager
        .track_ad(Arc::clone(&replacement), 7)
        .expect_err("second registration under a live id must fail");

    assert!(matches!(err, Error::DuplicateAdId(7)));
    assert!(
        Arc::ptr_eq(&manager.ad_for_id(7).unwrap(), &original),
        "failed registration must not replace the original mapping"
    );
}

#[test]
fn dispose_removes_entry_and_disposes_exactly_once() {
    let (manager, _channel) = standalone_manager();

    let ad = Arc::new(MockAdInstance::new(5));
    manager
        .track_ad(Arc::clone(&ad) as Arc<dyn AdInstance>, 5)
        .unwrap();

    manager.dispose_ad(5);
    assert!(manager.ad_for_id(5).is_none());
    assert_eq!(ad.dispose_count(), 1);

    // Second dispose of the same id: silent no-op, no second disposal.
    manager.dispose_ad(5);
    assert_eq!(ad.dispose_count(), 1);
}

#[test]
fn dispose_of_unknown_id_is_a_silent_noop() {
    let fixture = UiThreadFixture::spawn();
    let channel = MockBridgeChannel::new();
    let manager = new_manager(&fixture, &channel);

    manager.dispose_ad(99);

    fixture.drain();
    assert!(
        channel.invokes().is_empty(),
        "disposing an unknown id must not emit any event"
    );

    drop(manager);
    fixture.shutdown();
}

#[test]
fn dispose_all_empties_registry_and_disposes_each_once() {
    let (manager, _channel) = standalone_manager();

    let ads: Vec<Arc<MockAdInstance>> = (0..3).map(|i| Arc::new(MockAdInstance::new(i))).collect();
    for (i, ad) in ads.iter().enumerate() {
        manager
            .track_ad(Arc::clone(ad) as Arc<dyn AdInstance>, i as i32)
            .unwrap();
    }

    manager.dispose_all_ads();

    for (i, ad) in ads.iter().enumerate() {
        assert_eq!(ad.dispose_count(), 1, "ad {i} disposed exactly once");
        assert!(manager.ad_for_id(i as i32).is_none());
    }

    // A second sweep finds nothing to dispose.
    manager.dispose_all_ads();
    for ad in &ads {
        assert_eq!(ad.dispose_count(), 1);
    }
}
