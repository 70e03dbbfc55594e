use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, Location, Weather};

/// A route step selected for a weather lookup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampledStep {
    pub name: String,
    /// Rounded segment duration in seconds.
    pub step_duration: i64,
    /// Rounded seconds from departure to this step.
    pub total_duration: i64,
    pub coordinates: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_weather: Option<Weather>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl SampledStep {
    pub fn new(
        name: String,
        step_duration: f64,
        total_duration: f64,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            name,
            step_duration: step_duration.round() as i64,
            total_duration: total_duration.round() as i64,
            coordinates,
            hourly_weather: None,
            location: None,
        }
    }
}
