use serde::{Deserialize, Serialize};

use crate::entities::SampledStep;

/// A validated `/journey` request.
#[derive(Clone, Debug, PartialEq)]
pub struct JourneyRequest {
    pub from: String,
    pub to: String,
    /// Minimum precipitation probability, 0.0 to 1.0.
    pub min_pop: f64,
    /// Departure delay in minutes.
    pub delay: i64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyResponse {
    pub summary: Vec<SummaryStep>,
    pub detailed_steps: Vec<SampledStep>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryStep {
    pub location: String,
    pub conditions: String,
    /// Percentage, 0 to 100.
    pub pop: i64,
}
