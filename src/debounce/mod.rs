//! Trailing-edge debouncing on the tokio timer queue
//!
//! A [`Debouncer`] wraps a target function. Every [`call`](Debouncer::call)
//! cancels the pending invocation (if any) and arms a new timer carrying the
//! latest arguments; the target runs once the delay elapses with no newer
//! call. Calls return immediately and never yield the target's result.
//!
//! The wrapper owns a single timer slot guarded by a mutex. Re-arming bumps a
//! generation counter under that lock, so a superseded timer that already woke
//! up sees a stale generation and exits without invoking the target.
//!
//! Failures of the deferred invocation cannot reach the caller, which has long
//! returned. They are logged and, if requested, forwarded on a channel
//! obtained from [`with_failure_channel`](Debouncer::with_failure_channel).
//!
//! Calling outside a tokio runtime fails with
//! [`DebounceError::SchedulerUnavailable`]. Calling from inside the context of
//! a runtime that has already shut down succeeds but is a no-op: the runtime
//! drops the timer task, so the target never runs and
//! [`is_pending`](Debouncer::is_pending) reports `false`. Dropping the wrapper
//! cancels the pending invocation.
//!
//! # Example
//!
//! ```
//! use fnkit::debounce::Debouncer;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let search = Debouncer::from_fn(Duration::from_millis(50), |query: String| {
//!     println!("searching for {query}");
//! });
//!
//! search.call("r".to_string()).unwrap();
//! search.call("ru".to_string()).unwrap();
//! search.call("rust".to_string()).unwrap();
//!
//! tokio::time::sleep(Duration::from_millis(100)).await;
//! assert!(!search.is_pending());
//! # }
//! ```

use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Boxed error produced by a debounced target
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

type Target<A> = Arc<dyn Fn(A) -> Result<(), BoxError> + Send + Sync>;

/// Errors raised synchronously by [`Debouncer::call`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DebounceError {
    #[error("cannot arm debounce timer: {0}")]
    SchedulerUnavailable(String),
}

/// A deferred invocation that returned an error
#[derive(Debug)]
pub struct DeferredFailure {
    /// Which arming of the timer produced the failure (1 for the first call)
    pub generation: u64,
    pub error: BoxError,
}

#[derive(Default)]
struct TimerSlot {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

fn lock(slot: &Mutex<TimerSlot>) -> MutexGuard<'_, TimerSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Collapses bursts of calls into one trailing invocation
pub struct Debouncer<A> {
    target: Target<A>,
    delay: Duration,
    slot: Arc<Mutex<TimerSlot>>,
    failures: Option<mpsc::UnboundedSender<DeferredFailure>>,
}

impl<A: Send + 'static> Debouncer<A> {
    /// Debounce a fallible target
    pub fn new<F, E>(delay: Duration, target: F) -> Self
    where
        F: Fn(A) -> Result<(), E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self {
            target: Arc::new(move |args| target(args).map_err(Into::into)),
            delay,
            slot: Arc::new(Mutex::new(TimerSlot::default())),
            failures: None,
        }
    }

    /// Debounce a target that cannot fail
    pub fn from_fn<F>(delay: Duration, target: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::new(delay, move |args| {
            target(args);
            Ok::<(), Infallible>(())
        })
    }

    /// Forward failures of deferred invocations to the returned receiver
    pub fn with_failure_channel(mut self) -> (Self, mpsc::UnboundedReceiver<DeferredFailure>) {
        let (tx, rx) = mpsc::unbounded_channel();
        self.failures = Some(tx);
        (self, rx)
    }

    /// Cancel the pending invocation and arm a new one with `args`
    pub fn call(&self, args: A) -> Result<(), DebounceError> {
        let runtime = Handle::try_current()
            .map_err(|e| DebounceError::SchedulerUnavailable(e.to_string()))?;

        let mut slot = lock(&self.slot);
        slot.generation += 1;
        let generation = slot.generation;

        if let Some(previous) = slot.handle.take() {
            previous.abort();
            debug!(generation, "Superseded pending debounced invocation");
        }

        let task_slot = Arc::clone(&self.slot);
        let target = Arc::clone(&self.target);
        let failures = self.failures.clone();
        let delay = self.delay;
        let deadline = Instant::now() + delay;

        slot.handle = Some(runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;

            {
                let mut slot = lock(&task_slot);
                if slot.generation != generation {
                    return;
                }
                slot.handle = None;
            }

            debug!(generation, "Debounce window closed, invoking target");
            if let Err(error) = target(args) {
                warn!(generation, error = %error, "Debounced invocation failed");
                if let Some(tx) = failures {
                    let _ = tx.send(DeferredFailure { generation, error });
                }
            }
        }));

        debug!(
            generation,
            delay_ms = delay.as_millis() as u64,
            "Armed debounce timer"
        );
        Ok(())
    }
}

impl<A> Debouncer<A> {
    /// Drop the pending invocation, returning whether one existed
    pub fn cancel(&self) -> bool {
        let mut slot = lock(&self.slot);
        slot.generation += 1;
        match slot.handle.take() {
            Some(handle) => {
                let live = !handle.is_finished();
                handle.abort();
                debug!("Cancelled pending debounced invocation");
                live
            }
            None => false,
        }
    }

    /// Whether a timer is currently armed
    ///
    /// A timer spawned onto a runtime that is already shutting down is dropped
    /// by that runtime and never counts as pending.
    pub fn is_pending(&self) -> bool {
        lock(&self.slot)
            .handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<A> std::fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        // Ensure the pending timer never fires for a dropped wrapper
        if let Some(handle) = lock(&self.slot).handle.take() {
            handle.abort();
        }
    }
}
