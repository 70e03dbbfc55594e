mod journey;
mod location;
mod route;
mod step;
mod trip;
mod weather;

pub use journey::{JourneyRequest, JourneyResponse, SummaryStep};
pub use location::{Coordinates, Location, Place};
pub use route::{Route, RouteStep};
pub use step::SampledStep;
pub use trip::Trip;
pub use weather::{CacheRecord, Conditions, Weather};
