//! Single-use async workers.
//!
//! A worker runs one service call on its own tokio task and hands the
//! result to a callback exactly once. Failures never escape: a service
//! error or panic is logged, the worker marks itself interrupted, and the
//! callback receives an empty result instead. An error status reported by
//! the service is logged and also delivered as an empty result.
//!
//! The callback runs on the worker's task, after the final state is
//! recorded. A panicking callback is logged and does not change that state.
//! Marshalling onto another thread is up to the caller.

mod jobs;
mod state;

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::messages::{self as msg, Localizer};
use crate::services::{ServiceError, ServiceReply};

pub use jobs::{geocode_worker, stations_worker};
pub use state::WorkerState;

use state::SharedState;

/// Receives a worker's result.
pub type Callback<T> = Box<dyn FnOnce(T) + Send + 'static>;

type Job<T> = BoxFuture<'static, Result<ServiceReply<T>, ServiceError>>;

/// Misuse of a worker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkerError {
    /// `run` was called before a callback was set
    #[error("worker {0:?} started without a callback")]
    MissingCallback(String),
}

/// A service call waiting to run.
pub struct Worker<T> {
    label: String,
    job: Job<T>,
    callback: Option<Callback<T>>,
    messages: Arc<dyn Localizer>,
    shared: Arc<SharedState>,
}

impl<T> Worker<T>
where
    T: Default + Send + 'static,
{
    /// Wrap a service call. `label` names the call in log lines.
    pub fn new<F>(label: impl Into<String>, job: F, messages: Arc<dyn Localizer>) -> Self
    where
        F: Future<Output = Result<ServiceReply<T>, ServiceError>> + Send + 'static,
    {
        Self {
            label: label.into(),
            job: job.boxed(),
            callback: None,
            messages,
            shared: Arc::new(SharedState::new()),
        }
    }

    /// Register the callback. Replaces any earlier one.
    pub fn set_callback(&mut self, callback: impl FnOnce(T) + Send + 'static) {
        self.callback = Some(Box::new(callback));
    }

    /// Builder form of [`Worker::set_callback`].
    pub fn with_callback(mut self, callback: impl FnOnce(T) + Send + 'static) -> Self {
        self.set_callback(callback);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> WorkerState {
        self.shared.get()
    }

    /// Start the call on a new tokio task.
    ///
    /// Must be called from within a tokio runtime. Fails without starting
    /// anything if no callback is set.
    pub fn run(self) -> Result<WorkerHandle, WorkerError> {
        let Worker {
            label,
            job,
            callback,
            messages,
            shared,
        } = self;

        let callback = callback.ok_or_else(|| WorkerError::MissingCallback(label.clone()))?;

        shared.set(WorkerState::Running);
        debug!(worker = %label, "worker started");

        let task_shared = Arc::clone(&shared);
        let task = tokio::spawn(async move {
            let outcome = AssertUnwindSafe(job).catch_unwind().await;
            let (value, state) = settle(&label, outcome, messages.as_ref(), &task_shared);

            // Terminal before delivery, so the callback already sees it
            task_shared.set(state);
            if let Err(panic) = std::panic::catch_unwind(AssertUnwindSafe(|| callback(value))) {
                error!(
                    worker = %label,
                    reason = %panic_message(panic.as_ref()),
                    "worker callback panicked"
                );
            }
            debug!(worker = %label, %state, "worker finished");
        });

        Ok(WorkerHandle { shared, task })
    }
}

/// Turn the raw outcome of a job into the value to deliver.
fn settle<T: Default>(
    label: &str,
    outcome: Result<Result<ServiceReply<T>, ServiceError>, Box<dyn Any + Send>>,
    messages: &dyn Localizer,
    shared: &SharedState,
) -> (T, WorkerState) {
    match outcome {
        Ok(Ok(reply)) if reply.status.is_ok() => (reply.value, WorkerState::Delivered),
        Ok(Ok(reply)) => {
            let status = reply.status;
            let message = status.message.as_deref().unwrap_or("-");
            warn!(
                worker = %label,
                code = %status.code,
                "{}",
                messages.get(msg::SERVICE_STATUS_ERROR, &[&label, &status.code, &message])
            );
            (T::default(), WorkerState::DeliveredWithError)
        }
        Ok(Err(err)) => {
            shared.interrupt();
            error!(
                worker = %label,
                error = ?err,
                "{}",
                messages.get(msg::WORKER_FAILED, &[&label, &err])
            );
            (T::default(), WorkerState::DeliveredWithError)
        }
        Err(panic) => {
            shared.interrupt();
            let reason = panic_message(panic.as_ref());
            error!(
                worker = %label,
                "{}",
                messages.get(msg::WORKER_PANICKED, &[&label, &reason])
            );
            (T::default(), WorkerState::DeliveredWithError)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// A running worker.
#[derive(Debug)]
pub struct WorkerHandle {
    shared: Arc<SharedState>,
    task: JoinHandle<()>,
}

impl WorkerHandle {
    pub fn state(&self) -> WorkerState {
        self.shared.get()
    }

    /// Whether the call failed unexpectedly.
    pub fn is_interrupted(&self) -> bool {
        self.shared.is_interrupted()
    }

    /// Wait for the worker to finish and return its final state.
    pub async fn join(self) -> WorkerState {
        if let Err(err) = self.task.await {
            error!(error = %err, "worker task did not complete");
        }
        self.shared.get()
    }
}
