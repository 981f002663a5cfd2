use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;

use crate::data_types::common::{Identifiable, VehicleId};
use crate::data_types::telemetry::VehiclePosition;
use crate::transit::api::TelemetrySource;
use crate::{logln, logvbln};

pub const POLL_INTERVAL_MS: u64 = 15_000;

pub type VehiclePositions = HashMap<VehicleId, VehiclePosition>;

/// Polls the realtime feed while enabled and publishes the latest snapshot.
///
/// The timer never waits on an in-flight request: every tick fires its own
/// fetch and the last one to *complete* wins, so overlapping responses may
/// land out of order. Accepted, since each response is a full snapshot.
pub struct LiveTracker {
    source: Arc<dyn TelemetrySource>,
    positions_tx: Arc<watch::Sender<VehiclePositions>>,
    positions_rx: watch::Receiver<VehiclePositions>,
    worker: Option<JoinHandle<()>>,
    alive: Arc<AtomicBool>,
}

impl LiveTracker {
    const CC: &str = "Live";

    pub fn new(source: Arc<dyn TelemetrySource>) -> Self {
        let (positions_tx, positions_rx) = watch::channel(VehiclePositions::new());

        Self {
            source,
            positions_tx: Arc::new(positions_tx),
            positions_rx,
            worker: None,
            alive: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Consumers observe either the empty initial map or the most recently
    /// completed fetch's result.
    pub fn positions(&self) -> watch::Receiver<VehiclePositions> {
        self.positions_rx.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.worker.is_some()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.start();
        } else {
            self.stop();
        }
    }

    fn start(&mut self) {
        if self.worker.is_some() {
            return;
        }

        let alive = Arc::new(AtomicBool::new(true));
        self.alive = alive.clone();

        let source = self.source.clone();
        let tx = self.positions_tx.clone();

        self.worker = Some(tokio::spawn(async move {
            // The first tick completes immediately: one fetch right away,
            // then one per interval.
            let mut timer = time::interval(Duration::from_millis(POLL_INTERVAL_MS));

            loop {
                timer.tick().await;

                let source = source.clone();
                let tx = tx.clone();
                let alive = alive.clone();

                tokio::spawn(async move {
                    match source.fetch_live_positions() {
                        Some(positions) => {
                            if !alive.load(Ordering::Acquire) {
                                // Resolved after teardown; must not touch
                                // published state
                                logvbln!("discarding live fetch that finished after teardown");
                                return;
                            }

                            logvbln!("updated {} live vehicles", positions.len());
                            tx.send_replace(Self::index_by_vehicle(positions));
                        }
                        None => {
                            // Keep the last successful snapshot on screen
                            logln!("live fetch failed; keeping previous positions");
                        }
                    }
                });
            }
        }));

        logln!("live tracking enabled");
    }

    fn stop(&mut self) {
        self.alive.store(false, Ordering::Release);

        if let Some(worker) = self.worker.take() {
            worker.abort();
        }

        // No stale data once tracking is off
        self.positions_tx.send_replace(VehiclePositions::new());

        logln!("live tracking disabled; cleared vehicle data");
    }

    fn index_by_vehicle(positions: Vec<VehiclePosition>) -> VehiclePositions {
        positions
            .into_iter()
            .map(|position| (position.id().to_owned(), position))
            .collect()
    }
}

impl Drop for LiveTracker {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);

        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}
