use geo_types::Coord;
use serde_derive::{Deserialize, Serialize};

use crate::data_types::common::{Identifiable, RouteId, TransportMode};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl From<GeoPoint> for Coord {
    fn from(point: GeoPoint) -> Self {
        Coord {
            x: point.lat,
            y: point.lng,
        }
    }
}

impl From<Coord> for GeoPoint {
    fn from(coord: Coord) -> Self {
        Self {
            lat: coord.x,
            lng: coord.y,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StopDetail {
    pub name: String,
    pub platform: Option<String>,
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
}

/// One leg of a journey, immutable once produced by the upstream planner.
/// `path` and `stops_list` are ordered; missing ones simply mean there is
/// nothing to render or simulate for the leg.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    pub mode: TransportMode,

    // e.g. "Bus 505" or "Walk to Rajiv Chowk Station"
    pub details: String,

    // Minutes
    pub duration: u32,

    // Kilometers
    pub distance: Option<f64>,

    pub stops: Option<u32>,

    pub realtime_info: Option<String>,

    pub path: Option<Vec<GeoPoint>>,

    pub stops_list: Option<Vec<StopDetail>>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: RouteId,
    pub route_name: String,

    // Minutes
    pub total_duration: u32,

    // INR
    pub total_cost: f64,

    // 1 to 10
    pub comfort_score: f64,

    // 0.0 to 1.0
    pub confidence_score: f64,

    pub segments: Vec<RouteSegment>,
    pub summary: String,

    pub realtime_info: Option<String>,
}

impl Identifiable for Route {
    fn id(&self) -> &str {
        &self.id
    }
}
