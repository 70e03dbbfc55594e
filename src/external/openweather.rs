use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    entities::{Conditions, Coordinates, Weather},
    error::{upstream_error, Error},
    external::{http::get_with_retry, ForecastProvider},
};

const PROVIDER: &str = "openweather";

#[derive(Clone, Debug)]
pub struct OpenWeatherParams {
    /// One Call endpoint, e.g. `https://api.openweathermap.org/data/2.5/onecall`.
    pub base_url: String,
    pub api_key: String,
}

#[derive(Clone, Debug)]
pub struct OpenWeatherClient {
    params: OpenWeatherParams,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct OwResponse {
    #[serde(default)]
    hourly: Vec<OwHourly>,
}

#[derive(Debug, Deserialize)]
struct OwHourly {
    dt: i64,
    #[serde(default)]
    pop: f64,
    #[serde(default)]
    weather: Vec<OwConditions>,
}

#[derive(Debug, Deserialize)]
struct OwConditions {
    id: i64,
    main: String,
    description: String,
}

impl From<OwHourly> for Weather {
    fn from(hourly: OwHourly) -> Self {
        let conditions = hourly
            .weather
            .into_iter()
            .next()
            .map(|w| Conditions {
                id: w.id,
                main: w.main,
                description: w.description,
            })
            .unwrap_or_default();

        Weather {
            time: hourly.dt,
            conditions,
            pop: hourly.pop,
        }
    }
}

impl OpenWeatherClient {
    pub fn new(params: OpenWeatherParams, http: Client) -> Self {
        Self { params, http }
    }
}

/// Picks the hourly entry that starts exactly at `hour`.
fn parse_hour(body: &str, hour: i64) -> Result<Weather, Error> {
    let response: OwResponse = serde_json::from_str(body)?;

    response
        .hourly
        .into_iter()
        .find(|entry| entry.dt == hour)
        .map(Weather::from)
        .ok_or_else(|| upstream_error(format!("no hourly weather found for time {}", hour)))
}

#[async_trait]
impl ForecastProvider for OpenWeatherClient {
    #[tracing::instrument(skip(self))]
    async fn hourly_forecast(&self, coordinates: Coordinates, hour: i64) -> Result<Weather, Error> {
        let request = self.http.get(&self.params.base_url).query(&[
            ("appid", self.params.api_key.clone()),
            ("lat", coordinates.latitude.to_string()),
            ("lon", coordinates.longitude.to_string()),
            ("units", "metric".into()),
            ("exclude", "current,minutely,daily,alerts".into()),
        ]);

        let body = get_with_retry(request, PROVIDER).await?.text().await?;

        parse_hour(&body, hour)
    }
}
