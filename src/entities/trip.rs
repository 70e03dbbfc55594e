use serde::{Deserialize, Serialize};

use crate::entities::Place;

/// Resolved endpoints of a journey.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trip {
    pub from: Place,
    pub to: Place,
}

impl Trip {
    pub fn new(from: Place, to: Place) -> Self {
        Self { from, to }
    }
}
