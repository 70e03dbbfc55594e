mod coordinates;
mod journey_api;
mod response;
mod sampler;
mod weather;

pub use response::{filter_by_pop, summarize};
pub use sampler::{sample_route, sampling_interval};
pub use weather::hour_bucket;

use reqwest::Client;
use std::sync::Arc;

use crate::{
    api::API,
    config::Config,
    db::{DynWeatherCache, PgWeatherCache},
    error::{config_error, Error},
    external::{
        openweather::{OpenWeatherClient, OpenWeatherParams},
        osrm::{OsrmClient, OsrmParams},
        positionstack::{PositionstackClient, PositionstackParams},
        DynForecastProvider, DynGeocoder, DynRouteProvider,
    },
};

/// Request-independent context shared by every journey computation.
pub struct Engine {
    geocoder: DynGeocoder,
    router: DynRouteProvider,
    forecaster: DynForecastProvider,
    /// `None` skips the cache read-through.
    cache: Option<DynWeatherCache>,
    fan_out_limit: usize,
}

impl Engine {
    pub fn new(
        geocoder: DynGeocoder,
        router: DynRouteProvider,
        forecaster: DynForecastProvider,
        cache: Option<DynWeatherCache>,
        fan_out_limit: usize,
    ) -> Self {
        Self {
            geocoder,
            router,
            forecaster,
            cache,
            fan_out_limit: fan_out_limit.max(1),
        }
    }

    #[tracing::instrument(name = "Engine::from_config", skip_all)]
    pub async fn from_config(config: &Config) -> Result<Self, Error> {
        let http = Client::builder().timeout(config.http_timeout).build()?;

        let geocoder = PositionstackClient::new(
            PositionstackParams {
                base_url: config.positionstack_base_url.clone(),
                api_key: config.positionstack_api_key.clone(),
            },
            http.clone(),
        );
        let router = OsrmClient::new(
            OsrmParams {
                base_url: config.osrm_base_url.clone(),
            },
            http.clone(),
        );
        let forecaster = OpenWeatherClient::new(
            OpenWeatherParams {
                base_url: config.openweather_base_url.clone(),
                api_key: config.openweather_api_key.clone(),
            },
            http,
        );

        let cache = if config.skip_cache {
            tracing::info!("weather cache disabled");
            None
        } else {
            let db_uri = config
                .database_url
                .as_deref()
                .ok_or_else(|| config_error("missing environment variable DATABASE_URL"))?;
            let cache = PgWeatherCache::new(db_uri, config.database_max_connections).await?;
            Some(Arc::new(cache) as DynWeatherCache)
        };

        Ok(Self::new(
            Arc::new(geocoder),
            Arc::new(router),
            Arc::new(forecaster),
            cache,
            config.fan_out_limit,
        ))
    }
}

impl API for Engine {}
