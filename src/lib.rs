use std::sync::Arc;

use tokio::sync::watch;

use crate::data_types::common::RoutePreferences;
use crate::data_types::route::Route;
use crate::data_types::telemetry::SimulatedVehicle;
use crate::processors::ranking;
use crate::tracking::live::{LiveTracker, VehiclePositions};
use crate::tracking::simulation::JourneySimulation;
use crate::transit::api::{ApiConfig, TelemetrySource, TransitApi};

pub mod data_types;
pub mod processors;
pub mod tracking;
pub mod transit;
pub mod util;

/// Facade over the live/simulated position core. The UI layer hands it a
/// selected route and a live-tracking toggle; positions flow back through
/// watch channels, one per producer.
pub struct App {
    live: LiveTracker,
    simulation: JourneySimulation,
}

impl App {
    const CC: &str = "App";

    pub fn new(source: Arc<dyn TelemetrySource>) -> Self {
        Self {
            live: LiveTracker::new(source),
            simulation: JourneySimulation::new(),
        }
    }

    pub fn with_api(config: ApiConfig) -> Self {
        Self::new(Arc::new(TransitApi::with_config(config)))
    }

    pub fn set_live_tracking(&mut self, enabled: bool) {
        self.live.set_enabled(enabled);
    }

    pub fn set_active_route(&mut self, route: Option<&Route>) {
        match route {
            Some(route) => {
                crate::logvbln!("selected route {}", route.id);
                self.simulation.set_segments(&route.segments);
            }
            None => self.simulation.set_segments(&[]),
        }
    }

    pub fn live_positions(&self) -> watch::Receiver<VehiclePositions> {
        self.live.positions()
    }

    pub fn simulated_vehicles(&self) -> watch::Receiver<Vec<SimulatedVehicle>> {
        self.simulation.vehicles()
    }

    /// Runs once per planning request, before results reach the UI.
    pub fn ranked_routes(&self, routes: Vec<Route>, preferences: &RoutePreferences) -> Vec<Route> {
        ranking::rank_routes(routes, preferences.priority)
    }
}
