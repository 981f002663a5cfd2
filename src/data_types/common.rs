use std::fmt::{Display, Formatter};

use serde_derive::{Deserialize, Serialize};

pub type VehicleId = String;
pub type RouteId = String;

pub trait Identifiable {
    fn id(&self) -> &str;
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportMode {
    Walk,
    Bus,
    Metro,
    AutoRickshaw,
}

impl TransportMode {
    // Only scheduled transit legs get a simulated vehicle
    pub fn is_transit(&self) -> bool {
        matches!(self, TransportMode::Bus | TransportMode::Metro)
    }
}

impl Display for TransportMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TransportMode::Walk => "WALK",
            TransportMode::Bus => "BUS",
            TransportMode::Metro => "METRO",
            TransportMode::AutoRickshaw => "AUTO_RICKSHAW",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Fastest,
    Cheapest,
    #[default]
    Balanced,
    Comfort,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default)]
pub struct RoutePreferences {
    pub priority: Priority,
}
