//! Per-call request context: cancellation, deadline and correlation id.
//!
//! A [`RequestContext`] is created by the caller (an HTTP handler, a test) and
//! passed by reference through the mediator, every pipeline behavior, the
//! handler and down into cache and store calls. Wrapping an I/O future in
//! [`RequestContext::run`] makes it abort as soon as the context is canceled
//! or its deadline passes.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::time::Instant;
use uuid::Uuid;

/// Why a context stopped a call before it completed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    #[error("Request canceled")]
    Canceled,
    #[error("Deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation signal, deadline and correlation id for one logical call.
///
/// Cloning is cheap and every clone observes the same cancellation signal.
#[derive(Debug, Clone)]
pub struct RequestContext {
    cancel: watch::Receiver<bool>,
    deadline: Option<Instant>,
    correlation_id: Uuid,
}

/// Cancels every clone of the [`RequestContext`] it was created with.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signals cancellation. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}

impl RequestContext {
    /// A context that is never canceled and has no deadline.
    pub fn background() -> Self {
        let (_, rx) = watch::channel(false);
        Self {
            cancel: rx,
            deadline: None,
            correlation_id: Uuid::new_v4(),
        }
    }

    /// A context plus the handle that cancels it.
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            cancel: rx,
            deadline: None,
            correlation_id: Uuid::new_v4(),
        };
        (ctx, CancelHandle { tx })
    }

    /// Tightens the deadline to `now + timeout`. An earlier deadline wins.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        self.with_deadline(deadline)
    }

    /// Tightens the deadline. An earlier existing deadline wins.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Replaces the correlation id (e.g. with one received from upstream).
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true once cancellation has been signaled.
    pub fn is_canceled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Fails if the context is already canceled or past its deadline.
    pub fn check(&self) -> Result<(), Interrupted> {
        if self.is_canceled() {
            return Err(Interrupted::Canceled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(Interrupted::DeadlineExceeded);
        }
        Ok(())
    }

    /// Resolves once cancellation is signaled. Never resolves for contexts
    /// whose cancel handle was dropped without canceling.
    pub async fn canceled(&self) {
        let mut rx = self.cancel.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    /// Runs `fut` until it completes, the context is canceled, or the
    /// deadline passes, whichever happens first.
    ///
    /// On interruption the future is dropped, which aborts any in-flight I/O
    /// it owns.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, Interrupted>
    where
        F: Future,
    {
        self.check()?;

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.canceled() => Err(Interrupted::Canceled),
            _ = deadline => Err(Interrupted::DeadlineExceeded),
            out = fut => Ok(out),
        }
    }
}
