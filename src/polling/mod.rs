//! Periodic refresh of a [`SessionClient`].
//!
//! A [`PollingLoop`] runs [`SessionClient::refresh_all`] on a fixed
//! interval in a background task. A failing cycle is logged and counted;
//! the loop keeps going until [`PollingLoop::stop`] is called or the
//! `PollingLoop` is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use renpho_api::{PollingLoop, SessionClient};
//!
//! let client = Arc::new(SessionClient::new(config, credentials, None));
//! let polling = PollingLoop::new(Arc::clone(&client));
//!
//! polling.start(Duration::from_secs(60));
//! // ... read client.snapshots() as cycles complete ...
//! polling.stop().await;
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::clients::{RefreshReport, SessionClient};

#[derive(Debug)]
struct Worker {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

#[derive(Debug, Default)]
struct Counters {
    cycles: AtomicU64,
    failed_cycles: AtomicU64,
    last_report: Mutex<Option<RefreshReport>>,
}

/// Background refresh driver for one [`SessionClient`].
#[derive(Debug)]
pub struct PollingLoop {
    client: Arc<SessionClient>,
    worker: Mutex<Option<Worker>>,
    counters: Arc<Counters>,
}

// Verify PollingLoop is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PollingLoop>();
};

impl PollingLoop {
    /// Creates a stopped loop for `client`.
    #[must_use]
    pub fn new(client: Arc<SessionClient>) -> Self {
        Self {
            client,
            worker: Mutex::new(None),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Returns the driven client.
    #[must_use]
    pub const fn client(&self) -> &Arc<SessionClient> {
        &self.client
    }

    /// Starts refreshing every `interval`, beginning immediately.
    ///
    /// Does nothing if the loop is already running.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start(&self, interval: Duration) {
        let mut worker = self.lock_worker();
        if worker.as_ref().is_some_and(|w| !w.handle.is_finished()) {
            tracing::warn!("Polling loop already running");
            return;
        }

        let (shutdown, shutdown_rx) = oneshot::channel();
        let client = Arc::clone(&self.client);
        let counters = Arc::clone(&self.counters);
        tracing::info!(interval_secs = interval.as_secs_f64(), "Starting polling loop");
        let handle = tokio::spawn(run(client, counters, interval, shutdown_rx));

        *worker = Some(Worker { shutdown, handle });
    }

    /// Starts refreshing at the client's configured interval.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start_default(&self) {
        self.start(self.client.config().refresh_interval());
    }

    /// Stops the loop and waits for the background task to finish.
    ///
    /// An in-flight cycle is abandoned. The client's session and transport
    /// are released. Calling this on a stopped loop does nothing.
    pub async fn stop(&self) {
        let worker = self.lock_worker().take();
        let Some(Worker { shutdown, handle }) = worker else {
            tracing::debug!("Polling loop not running");
            return;
        };

        // The task may already have exited; a closed channel is fine.
        let _ = shutdown.send(());
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "Polling task ended abnormally");
            self.client.close();
        }
        tracing::info!("Polling loop stopped");
    }

    /// Returns `true` while the background task is alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lock_worker()
            .as_ref()
            .is_some_and(|w| !w.handle.is_finished())
    }

    /// Number of completed cycles, failed ones included.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.counters.cycles.load(Ordering::Relaxed)
    }

    /// Number of cycles that ended in an error.
    #[must_use]
    pub fn failed_cycles(&self) -> u64 {
        self.counters.failed_cycles.load(Ordering::Relaxed)
    }

    /// Report of the last successful cycle.
    #[must_use]
    pub fn last_report(&self) -> Option<RefreshReport> {
        self.counters
            .last_report
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock_worker(&self) -> MutexGuard<'_, Option<Worker>> {
        self.worker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn run(
    client: Arc<SessionClient>,
    counters: Arc<Counters>,
    interval: Duration,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            () = cycle(&client, &counters) => {}
            _ = &mut shutdown_rx => break,
        }
        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            _ = &mut shutdown_rx => break,
        }
    }
    tracing::debug!("Polling task received shutdown signal");
    client.close();
}

async fn cycle(client: &SessionClient, counters: &Counters) {
    let outcome = client.refresh_all().await;
    counters.cycles.fetch_add(1, Ordering::Relaxed);
    match outcome {
        Ok(report) => {
            *counters
                .last_report
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = Some(report);
        }
        Err(e) => {
            counters.failed_cycles.fetch_add(1, Ordering::Relaxed);
            tracing::error!(error = %e, transient = e.is_transient(), "Refresh cycle failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use crate::config::{Email, Password, RenphoConfig};

    fn polling() -> PollingLoop {
        let client = SessionClient::new(
            RenphoConfig::default(),
            Credentials::new(
                Email::new("someone@example.com").unwrap(),
                Password::new("hunter2").unwrap(),
            ),
            None,
        );
        PollingLoop::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_stop_before_start_is_noop() {
        let polling = polling();
        polling.stop().await;
        assert!(!polling.is_running());
        assert_eq!(polling.cycles(), 0);
    }

    #[test]
    fn test_new_loop_is_stopped() {
        let polling = polling();
        assert!(!polling.is_running());
        assert!(polling.last_report().is_none());
    }
}
