use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;

use crate::data_types::common::TransportMode;
use crate::data_types::route::RouteSegment;
use crate::data_types::telemetry::SimulatedVehicle;
use crate::util::DurationUtils;
use crate::{logln, logvbln};

pub const SIMULATION_TICK_MS: u64 = 2_000;

/// Fraction of a segment's cycle covered after `elapsed_ms`. In `[0, 1)` and
/// exactly periodic: the vehicle re-traverses the leg every `duration_min`
/// minutes, indefinitely. Zero-duration legs are filtered out before this is
/// called; the guard keeps a bad input from poisoning a whole tick.
pub fn cyclic_progress(elapsed_ms: u64, duration_min: u32) -> f64 {
    let cycle_ms = DurationUtils::minutes_to_ms(duration_min);
    if cycle_ms == 0 {
        return 0.0;
    }

    (elapsed_ms % cycle_ms) as f64 / cycle_ms as f64
}

// A transit-capable segment retained for simulation, remembering its index in
// the full route so renderers can line the vehicle up with its leg.
struct TransitLeg {
    segment_index: usize,
    mode: TransportMode,
    duration_min: u32,
}

impl TransitLeg {
    fn at_progress(&self, progress: f64) -> SimulatedVehicle {
        SimulatedVehicle {
            id: format!("vehicle-{}-{}", self.segment_index, self.mode),
            segment_index: self.segment_index,
            progress,
            mode: self.mode,
        }
    }
}

/// Estimates vehicle positions along one route's transit legs when there is
/// no live telemetry for them. One simulated vehicle per BUS/METRO segment,
/// recomputed every tick against a start time captured at activation.
pub struct JourneySimulation {
    vehicles_tx: Arc<watch::Sender<Vec<SimulatedVehicle>>>,
    vehicles_rx: watch::Receiver<Vec<SimulatedVehicle>>,
    worker: Option<JoinHandle<()>>,
}

impl Default for JourneySimulation {
    fn default() -> Self {
        Self::new()
    }
}

impl JourneySimulation {
    const CC: &str = "Sim";

    pub fn new() -> Self {
        let (vehicles_tx, vehicles_rx) = watch::channel(Vec::new());

        Self {
            vehicles_tx: Arc::new(vehicles_tx),
            vehicles_rx,
            worker: None,
        }
    }

    pub fn vehicles(&self) -> watch::Receiver<Vec<SimulatedVehicle>> {
        self.vehicles_rx.clone()
    }

    pub fn is_active(&self) -> bool {
        self.worker.is_some()
    }

    /// Swaps the simulated route. An empty segment list deactivates. Any
    /// change re-anchors the start time, resetting every leg's phase.
    pub fn set_segments(&mut self, segments: &[RouteSegment]) {
        self.stop();

        let legs = Self::transit_legs(segments);
        if legs.is_empty() {
            if !segments.is_empty() {
                logvbln!("no transit segments to simulate");
            }
            return;
        }

        logln!("simulating {} transit segments", legs.len());

        // Publish the starting positions right away so consumers never see an
        // undefined state while waiting for the first tick
        let initial = legs.iter().map(|leg| leg.at_progress(0.0)).collect();
        self.vehicles_tx.send_replace(initial);

        let t0 = time::Instant::now();
        let tx = self.vehicles_tx.clone();

        self.worker = Some(tokio::spawn(async move {
            let tick = Duration::from_millis(SIMULATION_TICK_MS);
            let mut timer = time::interval_at(t0 + tick, tick);

            loop {
                timer.tick().await;

                let elapsed_ms = t0.elapsed().as_millis() as u64;
                let vehicles = legs
                    .iter()
                    .map(|leg| leg.at_progress(cyclic_progress(elapsed_ms, leg.duration_min)))
                    .collect();

                tx.send_replace(vehicles);
            }
        }));
    }

    fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
            logvbln!("simulation stopped");
        }

        self.vehicles_tx.send_replace(Vec::new());
    }

    fn transit_legs(segments: &[RouteSegment]) -> Vec<TransitLeg> {
        segments
            .iter()
            .enumerate()
            .filter(|(_, segment)| segment.mode.is_transit())
            .filter_map(|(segment_index, segment)| {
                if segment.duration == 0 {
                    // Invalid upstream data; skip the leg rather than divide
                    // by zero on every tick
                    logln!("segment {} has zero duration, not simulating it", segment_index);
                    return None;
                }

                Some(TransitLeg {
                    segment_index,
                    mode: segment.mode,
                    duration_min: segment.duration,
                })
            })
            .collect()
    }
}

impl Drop for JourneySimulation {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(mode: TransportMode, duration: u32) -> RouteSegment {
        RouteSegment {
            mode,
            details: String::new(),
            duration,
            distance: None,
            stops: None,
            realtime_info: None,
            path: None,
            stops_list: None,
        }
    }

    #[test]
    fn progress_stays_in_unit_interval() {
        for elapsed in [0u64, 1, 59_999, 60_000, 90_000, 3_600_000, 86_400_000] {
            for duration in [1u32, 7, 25, 90] {
                let p = cyclic_progress(elapsed, duration);
                assert!((0.0..1.0).contains(&p), "progress {} out of range", p);
            }
        }
    }

    #[test]
    fn progress_is_exactly_periodic() {
        let duration = 25u32;
        let cycle_ms = DurationUtils::minutes_to_ms(duration);

        for elapsed in [0u64, 12_345, 777_777] {
            let base = cyclic_progress(elapsed, duration);
            for k in 1u64..=5 {
                assert_eq!(base, cyclic_progress(elapsed + k * cycle_ms, duration));
            }
        }
    }

    #[test]
    fn progress_advances_linearly_within_a_cycle() {
        // 10 minute leg, half elapsed
        assert_eq!(cyclic_progress(300_000, 10), 0.5);
        // wraps back to the start
        assert_eq!(cyclic_progress(600_000, 10), 0.0);
        assert_eq!(cyclic_progress(750_000, 10), 0.25);
    }

    #[tokio::test(start_paused = true)]
    async fn walk_only_routes_produce_no_vehicles() {
        let mut simulation = JourneySimulation::new();
        simulation.set_segments(&[
            segment(TransportMode::Walk, 5),
            segment(TransportMode::AutoRickshaw, 12),
        ]);

        assert!(!simulation.is_active());
        assert!(simulation.vehicles().borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn transit_segments_start_at_progress_zero_immediately() {
        let mut simulation = JourneySimulation::new();
        simulation.set_segments(&[
            segment(TransportMode::Walk, 5),
            segment(TransportMode::Bus, 10),
            segment(TransportMode::Metro, 5),
        ]);

        let vehicles = simulation.vehicles().borrow().clone();
        assert_eq!(vehicles.len(), 2);

        assert_eq!(vehicles[0].id, "vehicle-1-BUS");
        assert_eq!(vehicles[0].segment_index, 1);
        assert_eq!(vehicles[0].progress, 0.0);

        assert_eq!(vehicles[1].id, "vehicle-2-METRO");
        assert_eq!(vehicles[1].segment_index, 2);
        assert_eq!(vehicles[1].progress, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn progress_tracks_elapsed_time_and_wraps() {
        let mut simulation = JourneySimulation::new();
        simulation.set_segments(&[
            segment(TransportMode::Bus, 10),
            segment(TransportMode::Metro, 5),
        ]);

        // Half of the bus cycle, exactly one full metro cycle
        time::sleep(Duration::from_millis(300_050)).await;

        let vehicles = simulation.vehicles().borrow().clone();
        assert_eq!(vehicles[0].progress, 0.5);
        assert_eq!(vehicles[1].progress, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_segment_is_skipped_not_fatal() {
        let mut simulation = JourneySimulation::new();
        simulation.set_segments(&[
            segment(TransportMode::Bus, 0),
            segment(TransportMode::Bus, 10),
        ]);

        let vehicles = simulation.vehicles().borrow().clone();
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].segment_index, 1);

        // The tick loop keeps running for the valid leg
        time::sleep(Duration::from_millis(SIMULATION_TICK_MS + 50)).await;
        assert_eq!(simulation.vehicles().borrow().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_the_route_deactivates_and_empties_state() {
        let mut simulation = JourneySimulation::new();
        simulation.set_segments(&[segment(TransportMode::Bus, 10)]);
        assert!(simulation.is_active());

        time::sleep(Duration::from_millis(SIMULATION_TICK_MS + 50)).await;
        simulation.set_segments(&[]);

        assert!(!simulation.is_active());
        assert!(simulation.vehicles().borrow().is_empty());

        // And no further ticks arrive
        time::sleep(Duration::from_millis(SIMULATION_TICK_MS * 3)).await;
        assert!(simulation.vehicles().borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn swapping_the_route_resets_the_phase() {
        let mut simulation = JourneySimulation::new();
        simulation.set_segments(&[segment(TransportMode::Bus, 10)]);

        time::sleep(Duration::from_millis(300_050)).await;
        assert_eq!(simulation.vehicles().borrow()[0].progress, 0.5);

        simulation.set_segments(&[segment(TransportMode::Bus, 10)]);
        assert_eq!(simulation.vehicles().borrow()[0].progress, 0.0);
    }
}
