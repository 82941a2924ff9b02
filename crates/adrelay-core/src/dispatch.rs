//! UI-thread task dispatch
//!
//! The bridge silently drops messages sent from any thread other than
//! the single UI-owning one, so every outbound delivery is posted here
//! first. Posting is a synchronous fire-and-forget send usable from
//! arbitrary SDK callback threads; execution is single-consumer FIFO
//! on whatever thread or task the host drives [`UiTaskQueue::run`] on.

use std::future::Future;
use std::pin::Pin;
use tokio::sync::mpsc;
use tracing::warn;

type UiTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Create a connected dispatcher/queue pair
///
/// # Returns
///
/// A tuple of (dispatcher, queue). The host keeps the dispatcher (and
/// its clones) on the posting side and drives the queue on its UI
/// thread.
pub fn ui_task_queue() -> (UiDispatcher, UiTaskQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (UiDispatcher { tx }, UiTaskQueue { rx })
}

/// Posting handle for the UI task queue
///
/// Cheap to clone; safe to use from any thread.
#[derive(Clone)]
pub struct UiDispatcher {
    tx: mpsc::UnboundedSender<UiTask>,
}

impl UiDispatcher {
    /// Post a task for execution on the UI side
    ///
    /// Fire-and-forget: no return value, no blocking, no ordering
    /// guarantee beyond the queue's FIFO execution order. If the queue
    /// is gone the task is dropped with a warning.
    pub fn post<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.tx.send(Box::pin(task)).is_err() {
            warn!("UI task queue is closed, dropping posted task");
        }
    }
}

/// Consumer side of the UI task queue
///
/// The host must drive [`run`](Self::run) on the thread (or
/// single-threaded task) that owns the bridge.
pub struct UiTaskQueue {
    rx: mpsc::UnboundedReceiver<UiTask>,
}

impl UiTaskQueue {
    /// Execute posted tasks in FIFO order until every dispatcher
    /// handle has been dropped
    pub async fn run(mut self) {
        while let Some(task) = self.rx.recv().await {
            task.await;
        }
    }
}
