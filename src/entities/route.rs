use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Route {
    pub steps: Vec<RouteStep>,
    /// Total duration in seconds.
    pub duration: f64,
}

/// One segment of a route, as returned by the routing provider.
///
/// An empty `name` means the segment continues on the last named road.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    pub name: String,
    /// Segment duration in seconds.
    pub duration: f64,
    /// Location of the segment's maneuver point.
    pub coordinates: Coordinates,
}

impl RouteStep {
    pub fn new(name: impl Into<String>, duration: f64, coordinates: Coordinates) -> Self {
        Self {
            name: name.into(),
            duration,
            coordinates,
        }
    }
}
