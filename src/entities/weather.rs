use serde::{Deserialize, Serialize};

/// Forecast for one hour bucket at one point.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// Unix timestamp of the top of the hour.
    #[serde(rename = "unixTime", default)]
    pub time: i64,
    #[serde(default)]
    pub conditions: Conditions,
    /// Probability of precipitation, 0.0 to 1.0.
    #[serde(default)]
    pub pop: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
}

/// Unit stored in the geospatial cache.
///
/// `nonce` only keeps otherwise identical payloads distinct inside one bucket.
/// Readers must ignore it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    #[serde(rename = "Rand", default)]
    pub nonce: f64,
    #[serde(rename = "Hourly")]
    pub weather: Weather,
}

impl CacheRecord {
    /// Parses a cached payload and stamps its weather with the bucket it was found under.
    pub fn decode(payload: &str, bucket: i64) -> Result<Weather, serde_json::Error> {
        let record: CacheRecord = serde_json::from_str(payload)?;
        let mut weather = record.weather;
        weather.time = bucket;

        Ok(weather)
    }
}
