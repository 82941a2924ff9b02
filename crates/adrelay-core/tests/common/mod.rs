//! Test doubles and common utilities for the relay contract tests
//!
//! Provides minimal doubles that verify the registry and relay
//! contracts without a real SDK or bridge: a recording bridge channel,
//! call-counting ad instances, and a real UI thread driving the task
//! queue so thread-affinity assertions are meaningful.

use adrelay_core::codec::BridgeValue;
use adrelay_core::dispatch::{UiDispatcher, ui_task_queue};
use adrelay_core::error::Result;
use adrelay_core::registry::AdInstanceManager;
use adrelay_core::traits::{AdInstance, BridgeChannel};
use adrelay_core::AdId;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::ThreadId;
use std::time::Duration;

/// One recorded bridge invocation
#[derive(Debug, Clone)]
pub struct RecordedInvoke {
    pub method: String,
    pub arguments: BridgeValue,
    /// Thread the invocation executed on
    pub thread: ThreadId,
}

/// A bridge channel that records every invocation
#[derive(Default)]
pub struct MockBridgeChannel {
    invokes: Mutex<Vec<RecordedInvoke>>,
}

impl MockBridgeChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of the recorded invocations, in delivery order
    pub fn invokes(&self) -> Vec<RecordedInvoke> {
        self.invokes.lock().unwrap().clone()
    }
}

#[async_trait]
impl BridgeChannel for MockBridgeChannel {
    async fn invoke(&self, method: &str, arguments: BridgeValue) -> Result<()> {
        self.invokes.lock().unwrap().push(RecordedInvoke {
            method: method.to_string(),
            arguments,
            thread: std::thread::current().id(),
        });
        Ok(())
    }
}

/// An ad instance that counts lifecycle calls
pub struct MockAdInstance {
    ad_id: AdId,
    load_count: AtomicUsize,
    dispose_count: AtomicUsize,
}

impl MockAdInstance {
    pub fn new(ad_id: AdId) -> Self {
        Self {
            ad_id,
            load_count: AtomicUsize::new(0),
            dispose_count: AtomicUsize::new(0),
        }
    }

    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }

    pub fn dispose_count(&self) -> usize {
        self.dispose_count.load(Ordering::SeqCst)
    }
}

impl AdInstance for MockAdInstance {
    fn ad_id(&self) -> AdId {
        self.ad_id
    }

    fn load(self: Arc<Self>) {
        self.load_count.fetch_add(1, Ordering::SeqCst);
    }

    fn dispose(&self) {
        self.dispose_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// A dedicated UI thread driving the task queue
///
/// Runs the queue on a current-thread runtime pinned to one named
/// thread, so tests can assert which thread bridge deliveries land on.
pub struct UiThreadFixture {
    pub dispatcher: UiDispatcher,
    pub thread_id: ThreadId,
    handle: std::thread::JoinHandle<()>,
}

impl UiThreadFixture {
    pub fn spawn() -> Self {
        let (dispatcher, queue) = ui_task_queue();
        let (id_tx, id_rx) = std::sync::mpsc::channel();

        let handle = std::thread::Builder::new()
            .name("adrelay-ui".to_string())
            .spawn(move || {
                let _ = id_tx.send(std::thread::current().id());
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .expect("UI runtime builds");
                runtime.block_on(queue.run());
            })
            .expect("UI thread spawns");

        let thread_id = id_rx.recv().expect("UI thread reports its id");

        Self {
            dispatcher,
            thread_id,
            handle,
        }
    }

    /// Wait until every task posted before this call has executed
    ///
    /// FIFO execution makes a posted barrier a happens-after point for
    /// all earlier posts.
    pub fn drain(&self) {
        let (tx, rx) = std::sync::mpsc::channel();
        self.dispatcher.post(async move {
            let _ = tx.send(());
        });
        rx.recv_timeout(Duration::from_secs(5))
            .expect("UI queue drains");
    }

    /// Join the UI thread. The caller must have dropped every other
    /// dispatcher clone (e.g. the manager) first.
    pub fn shutdown(self) {
        let Self {
            dispatcher, handle, ..
        } = self;
        drop(dispatcher);
        handle.join().expect("UI thread exits cleanly");
    }
}

/// Build a registry wired to the fixture's UI queue
pub fn new_manager(
    fixture: &UiThreadFixture,
    channel: &Arc<MockBridgeChannel>,
) -> Arc<AdInstanceManager> {
    Arc::new(AdInstanceManager::new(
        Arc::clone(channel) as Arc<dyn BridgeChannel>,
        fixture.dispatcher.clone(),
    ))
}

/// Look up a field of a map-shaped event message
pub fn field<'a>(arguments: &'a BridgeValue, key: &str) -> Option<&'a BridgeValue> {
    let BridgeValue::Map(entries) = arguments else {
        return None;
    };
    entries
        .iter()
        .find(|(k, _)| *k == BridgeValue::from(key))
        .map(|(_, v)| v)
}
