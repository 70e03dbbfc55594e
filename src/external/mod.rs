pub mod http;
pub mod openweather;
pub mod osrm;
pub mod positionstack;

use async_trait::async_trait;

use crate::{
    entities::{Coordinates, Location, Place, Route, Trip, Weather},
    error::Error,
};

#[async_trait]
pub trait Geocoder {
    /// Address to candidate places. No match is an empty list.
    async fn forward(&self, address: &str) -> Result<Vec<Place>, Error>;

    /// Coordinates to candidate addresses. No match is an empty list.
    async fn reverse(&self, coordinates: Coordinates) -> Result<Vec<Location>, Error>;
}

#[async_trait]
pub trait RouteProvider {
    async fn route(&self, trip: &Trip) -> Result<Route, Error>;
}

#[async_trait]
pub trait ForecastProvider {
    /// Forecast for the hour starting at `hour` (unix seconds).
    async fn hourly_forecast(&self, coordinates: Coordinates, hour: i64)
        -> Result<Weather, Error>;
}

pub type DynGeocoder = std::sync::Arc<dyn Geocoder + Send + Sync>;
pub type DynRouteProvider = std::sync::Arc<dyn RouteProvider + Send + Sync>;
pub type DynForecastProvider = std::sync::Arc<dyn ForecastProvider + Send + Sync>;
