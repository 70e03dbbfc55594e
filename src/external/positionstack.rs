use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    entities::{Coordinates, Location, Place},
    error::{upstream_error, Error},
    external::{
        http::{get_with_retry, truncate_body},
        Geocoder,
    },
};

const PROVIDER: &str = "positionstack";

#[derive(Clone, Debug)]
pub struct PositionstackParams {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Clone, Debug)]
pub struct PositionstackClient {
    params: PositionstackParams,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct ForwardResult {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReverseResult {
    number: Option<String>,
    street: Option<String>,
    locality: Option<String>,
    region: Option<String>,
    country: Option<String>,
}

impl From<ForwardResult> for Place {
    fn from(result: ForwardResult) -> Self {
        Place {
            coordinates: Coordinates::new(result.latitude, result.longitude),
            label: result.label.unwrap_or_default(),
        }
    }
}

impl From<ReverseResult> for Location {
    fn from(result: ReverseResult) -> Self {
        Location {
            number: result.number,
            street: result.street,
            locality: result.locality,
            region: result.region,
            country: result.country,
        }
    }
}

impl PositionstackClient {
    pub fn new(params: PositionstackParams, http: Client) -> Self {
        Self { params, http }
    }

    async fn fetch<T>(&self, path: &str, query: String) -> Result<Vec<T>, Error>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/{}", self.params.base_url.trim_end_matches('/'), path);

        let request = self.http.get(url).query(&[
            ("access_key", self.params.api_key.as_str()),
            ("query", query.as_str()),
            ("limit", "1"),
        ]);

        let body = get_with_retry(request, PROVIDER).await?.text().await?;

        parse_results(&body)
    }
}

/// PositionStack answers `"data": []` (or `"data": [[]]` for reverse lookups
/// in the sea) when nothing matches. Anything without a `data` array is a
/// provider failure, not an empty result.
fn parse_results<T>(body: &str) -> Result<Vec<T>, Error>
where
    T: for<'de> Deserialize<'de>,
{
    let value: serde_json::Value = serde_json::from_str(body)?;

    let data: Vec<serde_json::Value> = match value.get("data") {
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter(|item| item.is_object())
            .cloned()
            .collect(),
        _ => {
            return Err(upstream_error(format!(
                "unexpected {} response: {}",
                PROVIDER,
                truncate_body(body)
            )))
        }
    };

    let results: Vec<T> = serde_json::from_value(serde_json::Value::Array(data))?;

    Ok(results)
}

#[async_trait]
impl Geocoder for PositionstackClient {
    #[tracing::instrument(skip(self))]
    async fn forward(&self, address: &str) -> Result<Vec<Place>, Error> {
        let results: Vec<ForwardResult> = self.fetch("forward", address.into()).await?;

        Ok(results.into_iter().map(Place::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn reverse(&self, coordinates: Coordinates) -> Result<Vec<Location>, Error> {
        let query = format!("{},{}", coordinates.latitude, coordinates.longitude);
        let results: Vec<ReverseResult> = self.fetch("reverse", query).await?;

        Ok(results.into_iter().map(Location::from).collect())
    }
}
