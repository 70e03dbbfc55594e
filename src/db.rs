use async_trait::async_trait;
use geo_types::Geometry;
use geozero::wkb;
use sqlx::{postgres::PgPoolOptions, Executor, Pool, Postgres, Row};
use std::sync::Arc;

use crate::{entities::Coordinates, error::Error};

/// Search radius for cached forecasts around a point.
pub const CACHE_RADIUS_METERS: f64 = 10_000.0;

/// Read side of the geospatial forecast cache.
///
/// Members are partitioned by hour bucket (`"<unix seconds>"` of the top of
/// the hour) and written by an external process.
#[async_trait]
pub trait WeatherCache {
    /// Payload of the member closest to `coordinates` within `radius_meters`.
    async fn nearest(
        &self,
        bucket: &str,
        coordinates: Coordinates,
        radius_meters: f64,
    ) -> Result<Option<String>, Error>;
}

pub type DynWeatherCache = Arc<dyn WeatherCache + Send + Sync>;

#[derive(Debug, Clone)]
pub struct PgWeatherCache {
    pool: Pool<Postgres>,
}

impl PgWeatherCache {
    #[tracing::instrument(name = "PgWeatherCache::new", skip(db_uri))]
    pub async fn new(db_uri: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        pool.execute("CREATE EXTENSION IF NOT EXISTS postgis").await?;
        pool.execute(
            "CREATE TABLE IF NOT EXISTS weather_cache (bucket VARCHAR NOT NULL, location geometry(Point, 4326) NOT NULL, payload TEXT NOT NULL, expiry TIMESTAMPTZ NOT NULL, UNIQUE (bucket, payload))",
        )
        .await?;
        pool.execute(
            "CREATE INDEX IF NOT EXISTS weather_cache_location_idx ON weather_cache USING GIST (location)",
        )
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl WeatherCache for PgWeatherCache {
    #[tracing::instrument(skip(self))]
    async fn nearest(
        &self,
        bucket: &str,
        coordinates: Coordinates,
        radius_meters: f64,
    ) -> Result<Option<String>, Error> {
        let point: Geometry<f64> = coordinates.into();

        let query = "
            SELECT
                c.payload
            FROM
                weather_cache c
            WHERE
                c.bucket = $1
                AND c.expiry > now()
                AND ST_DWithin(c.location::geography, ST_SetSRID($2, 4326)::geography, $3)
            ORDER BY
                ST_Distance(c.location::geography, ST_SetSRID($2, 4326)::geography) ASC
            LIMIT 1
        ";

        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(
                sqlx::query(query)
                    .bind(bucket)
                    .bind(wkb::Encode(point))
                    .bind(radius_meters),
            )
            .await?;

        match maybe_result {
            Some(row) => Ok(Some(row.try_get("payload")?)),
            None => Ok(None),
        }
    }
}
