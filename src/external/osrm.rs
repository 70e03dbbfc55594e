use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    entities::{Coordinates, Route, RouteStep, Trip},
    error::{upstream_error, Error},
    external::{
        http::{get_with_retry, truncate_body},
        RouteProvider,
    },
};

const PROVIDER: &str = "osrm";

#[derive(Clone, Debug)]
pub struct OsrmParams {
    /// Route service base, e.g. `http://router.project-osrm.org/route/v1/driving`.
    pub base_url: String,
}

#[derive(Clone, Debug)]
pub struct OsrmClient {
    params: OsrmParams,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct Response {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    duration: f64,
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
struct Leg {
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct Step {
    #[serde(default)]
    name: String,
    duration: f64,
    maneuver: Maneuver,
}

#[derive(Debug, Deserialize)]
struct Maneuver {
    /// `[longitude, latitude]`
    location: Vec<f64>,
}

impl OsrmClient {
    pub fn new(params: OsrmParams, http: Client) -> Self {
        Self { params, http }
    }

    fn route_url(&self, trip: &Trip) -> String {
        let from = trip.from.coordinates;
        let to = trip.to.coordinates;

        format!(
            "{}/{},{};{},{}",
            self.params.base_url.trim_end_matches('/'),
            from.longitude,
            from.latitude,
            to.longitude,
            to.latitude
        )
    }
}

/// Keeps the best route's first leg.
fn parse_route(body: &str) -> Result<Route, Error> {
    let response: Response = serde_json::from_str(body)?;

    if response.code != "Ok" {
        return Err(upstream_error(format!(
            "osrm returned code {}: {}",
            response.code,
            response.message.unwrap_or_default()
        )));
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| upstream_error("osrm response contained no routes"))?;

    let leg = route
        .legs
        .into_iter()
        .next()
        .ok_or_else(|| upstream_error("osrm route contained no legs"))?;

    let steps = leg
        .steps
        .into_iter()
        .map(|step| match step.maneuver.location.as_slice() {
            [longitude, latitude] => Ok(RouteStep::new(
                step.name,
                step.duration,
                Coordinates::new(*latitude, *longitude),
            )),
            other => Err(upstream_error(format!(
                "osrm maneuver location has {} components",
                other.len()
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Route {
        steps,
        duration: route.duration,
    })
}

#[async_trait]
impl RouteProvider for OsrmClient {
    #[tracing::instrument(skip(self, trip), fields(from = %trip.from.label, to = %trip.to.label))]
    async fn route(&self, trip: &Trip) -> Result<Route, Error> {
        let request = self
            .http
            .get(self.route_url(trip))
            .query(&[("steps", "true"), ("overview", "false")]);

        let body = get_with_retry(request, PROVIDER).await?.text().await?;

        parse_route(&body).map_err(|mut err| {
            err.message = format!("{} (body: {})", err.message, truncate_body(&body));
            err
        })
    }
}
