use super::Engine;

use chrono::{DateTime, Duration, Utc};
use futures::{stream, StreamExt};

use crate::{
    db::CACHE_RADIUS_METERS,
    entities::{CacheRecord, Coordinates, SampledStep, Weather},
};

const HOUR: i64 = 3600;

/// Unix timestamp of the top of the hour containing `now + offset_seconds`.
pub fn hour_bucket(now: DateTime<Utc>, offset_seconds: i64) -> i64 {
    let target = (now + Duration::seconds(offset_seconds)).timestamp();
    target - target.rem_euclid(HOUR)
}

impl Engine {
    /// Attaches a forecast to every step that can get one and drops the rest.
    #[tracing::instrument(skip(self, steps), fields(steps = steps.len()))]
    pub async fn resolve_weather(
        &self,
        steps: Vec<SampledStep>,
        delay_minutes: i64,
        now: DateTime<Utc>,
    ) -> Vec<SampledStep> {
        // one slot per step, in step order
        let targets: Vec<(Coordinates, i64)> = steps
            .iter()
            .map(|step| (step.coordinates, step.total_duration))
            .collect();

        let slots: Vec<Option<Weather>> = stream::iter(targets)
            .map(|(coordinates, total_duration)| async move {
                self.step_weather(coordinates, total_duration, delay_minutes, now)
                    .await
            })
            .buffered(self.fan_out_limit)
            .collect()
            .await;

        steps
            .into_iter()
            .zip(slots)
            .filter_map(|(mut step, weather)| {
                step.hourly_weather = Some(weather?);
                Some(step)
            })
            .collect()
    }

    async fn step_weather(
        &self,
        coordinates: Coordinates,
        total_duration: i64,
        delay_minutes: i64,
        now: DateTime<Utc>,
    ) -> Option<Weather> {
        let bucket = hour_bucket(now, total_duration + delay_minutes * 60);

        if let Some(weather) = self.cached_weather(coordinates, bucket).await {
            return Some(weather);
        }

        match self
            .forecaster
            .hourly_forecast(coordinates, bucket)
            .await
        {
            Ok(mut weather) => {
                weather.time = bucket;
                Some(weather)
            }
            Err(err) => {
                tracing::warn!(
                    bucket,
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    error = %err,
                    "failed to get forecast for step"
                );
                None
            }
        }
    }

    /// Any cache problem is treated as a miss.
    async fn cached_weather(&self, coordinates: Coordinates, bucket: i64) -> Option<Weather> {
        let cache = self.cache.as_ref()?;

        let payload = match cache
            .nearest(&bucket.to_string(), coordinates, CACHE_RADIUS_METERS)
            .await
        {
            Ok(payload) => payload?,
            Err(err) => {
                tracing::warn!(bucket, error = %err, "weather cache query failed");
                return None;
            }
        };

        match CacheRecord::decode(&payload, bucket) {
            Ok(weather) => Some(weather),
            Err(err) => {
                tracing::warn!(bucket, error = %err, "unreadable weather cache record");
                None
            }
        }
    }
}
