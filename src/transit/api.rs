use curl::easy::Easy;
use serde_derive::Deserialize;

use crate::data_types::common::TransportMode;
use crate::data_types::telemetry::VehiclePosition;
use crate::{logln, logvbln};

const LIVE_FEED_PATH: &str = "/api/live";

/// Anything that can answer "where are the vehicles right now". The poller
/// only ever sees this trait; a failed fetch is `None`, never an error it has
/// to handle.
pub trait TelemetrySource: Send + Sync {
    fn fetch_live_positions(&self) -> Option<Vec<VehiclePosition>>;
}

/// Injected configuration for the realtime feed. Validated when built, so the
/// core never reads ambient process state.
#[derive(Deserialize, Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    const CC: &str = "Config";

    pub fn new(base_url: &str) -> Option<Self> {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
        .validated()
    }

    pub fn from_file(path: &str) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                logln!("unable to read config file {}: {}", path, err);
                return None;
            }
        };

        match toml::from_str::<ApiConfig>(&content) {
            Ok(config) => config.validated(),
            Err(err) => {
                logln!("malformed config file {}: {}", path, err);
                None
            }
        }
    }

    fn validated(self) -> Option<Self> {
        if self.base_url.starts_with("http://") || self.base_url.starts_with("https://") {
            Some(self)
        } else {
            logln!("invalid telemetry base url: {}", self.base_url);
            None
        }
    }
}

// Wire shape of one feed record. The backend has published both `vehicle_id`
// and `id` over time, so both spellings are accepted.
#[derive(Deserialize, Debug)]
struct LiveVehicleRecord {
    vehicle_id: Option<String>,
    id: Option<String>,
    latitude: f64,
    longitude: f64,
}

pub struct TransitApi {
    config: ApiConfig,
}

impl TransitApi {
    const CC: &str = "Api";

    pub fn with_config(config: ApiConfig) -> Self {
        Self { config }
    }

    fn get_request(url: &str) -> Option<serde_json::Value> {
        let mut handle = Easy::new();

        handle.get(true).ok()?;
        handle.url(url).ok()?;

        let mut buffer_response = Vec::new();
        {
            let mut transfer = handle.transfer();

            transfer
                .write_function(|data| {
                    buffer_response.extend_from_slice(data);
                    Ok(data.len())
                })
                .ok()?;

            transfer.perform().ok()?;
        }

        let status = handle.response_code().ok()?;
        if !(200..300).contains(&status) {
            logvbln!("GET {} answered {}", url, status);
            return None;
        }

        let body = std::str::from_utf8(&buffer_response).ok()?;
        serde_json::from_str(body).ok()
    }
}

impl TelemetrySource for TransitApi {
    fn fetch_live_positions(&self) -> Option<Vec<VehiclePosition>> {
        let url = self.config.base_url.clone() + LIVE_FEED_PATH;
        let body = Self::get_request(&url)?;

        let records: Vec<LiveVehicleRecord> = match serde_json::from_value(body) {
            Ok(records) => records,
            Err(err) => {
                logln!("unexpected live feed payload: {}", err);
                return None;
            }
        };

        // The feed carries buses only today
        let positions = records
            .into_iter()
            .filter_map(|record| {
                let id = record.vehicle_id.or(record.id)?;
                Some(VehiclePosition {
                    id,
                    lat: record.latitude,
                    lng: record.longitude,
                    mode: TransportMode::Bus,
                })
            })
            .collect::<Vec<_>>();

        logvbln!("fetched {} live bus positions", positions.len());

        Some(positions)
    }
}
