use super::Engine;

use crate::{
    entities::{Place, Trip},
    error::{not_found_error, upstream_error, Error},
};

impl Engine {
    /// Geocodes both endpoints concurrently. Either failure fails the trip.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_trip(&self, from: &str, to: &str) -> Result<Trip, Error> {
        let (from, to) = tokio::try_join!(self.geocode(from), self.geocode(to))?;

        Ok(Trip::new(from, to))
    }

    async fn geocode(&self, address: &str) -> Result<Place, Error> {
        let places = self.geocoder.forward(address).await.map_err(|err| {
            tracing::error!(address, action = "GeoCode", error = %err, "geocoding failed");
            upstream_error(format!("Internal error geocoding address '{}'.", address))
        })?;

        places
            .into_iter()
            .next()
            .ok_or_else(|| not_found_error(address))
    }
}
