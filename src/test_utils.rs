use async_trait::async_trait;
use axum::body::HttpBody;
use axum::response::Response;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::{
    db::{DynWeatherCache, WeatherCache},
    engine::Engine,
    entities::{
        CacheRecord, Conditions, Coordinates, Location, Place, Route, RouteStep, Trip, Weather,
    },
    error::{database_error, upstream_error, Error},
    external::{ForecastProvider, Geocoder, RouteProvider},
};

fn key(latitude: f64) -> String {
    format!("{:.4}", latitude)
}

#[derive(Clone, Default)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Default)]
pub struct FakeGeocoder {
    unknown: HashSet<String>,
    failing: HashSet<String>,
    failing_reverse: HashSet<String>,
    forward_calls: Counter,
    reverse_calls: Counter,
}

impl FakeGeocoder {
    pub fn unknown(mut self, address: &str) -> Self {
        self.unknown.insert(address.into());
        self
    }

    pub fn failing(mut self, address: &str) -> Self {
        self.failing.insert(address.into());
        self
    }

    pub fn failing_reverse_at(mut self, latitude: f64) -> Self {
        self.failing_reverse.insert(key(latitude));
        self
    }

    pub fn forward_calls(&self) -> usize {
        self.forward_calls.get()
    }

    pub fn reverse_calls(&self) -> usize {
        self.reverse_calls.get()
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn forward(&self, address: &str) -> Result<Vec<Place>, Error> {
        self.forward_calls.hit();

        if self.failing.contains(address) {
            return Err(upstream_error("connection reset by peer"));
        }
        if self.unknown.contains(address) {
            return Ok(vec![]);
        }

        Ok(vec![Place {
            coordinates: Coordinates::new(44.0, -76.5),
            label: address.into(),
        }])
    }

    async fn reverse(&self, coordinates: Coordinates) -> Result<Vec<Location>, Error> {
        self.reverse_calls.hit();

        if self.failing_reverse.contains(&key(coordinates.latitude)) {
            return Err(upstream_error("status 503 returned from positionstack"));
        }

        Ok(vec![Location {
            locality: Some(format!("Town {}", key(coordinates.latitude))),
            region: Some("Ontario".into()),
            country: Some("Canada".into()),
            ..Default::default()
        }])
    }
}

#[derive(Clone, Default)]
pub struct FakeRouter {
    failing: bool,
    calls: Counter,
}

impl FakeRouter {
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

/// 50 minutes north in 10 minute legs; samples land on 44.0 through 44.8.
pub fn northbound_route() -> Route {
    let legs = [
        ("Princess Street", 600.0, 44.0),
        ("", 600.0, 44.2),
        ("Highway 401", 600.0, 44.4),
        ("", 600.0, 44.6),
        ("Highway 416", 600.0, 44.8),
        ("Arrive", 0.0, 45.0),
    ];

    let steps: Vec<RouteStep> = legs
        .iter()
        .map(|(name, duration, latitude)| {
            RouteStep::new(*name, *duration, Coordinates::new(*latitude, -76.0))
        })
        .collect();

    Route {
        duration: steps.iter().map(|s| s.duration).sum(),
        steps,
    }
}

#[async_trait]
impl RouteProvider for FakeRouter {
    async fn route(&self, _trip: &Trip) -> Result<Route, Error> {
        self.calls.hit();

        if self.failing {
            return Err(upstream_error("osrm returned code NoRoute"));
        }

        Ok(northbound_route())
    }
}

#[derive(Clone, Default)]
pub struct FakeForecaster {
    pops: HashMap<String, f64>,
    failing: HashSet<String>,
    calls: Counter,
    hours: Arc<Mutex<Vec<i64>>>,
}

impl FakeForecaster {
    pub fn with_pop(mut self, latitude: f64, pop: f64) -> Self {
        self.pops.insert(key(latitude), pop);
        self
    }

    pub fn failing_at(mut self, latitude: f64) -> Self {
        self.failing.insert(key(latitude));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn hours(&self) -> Vec<i64> {
        self.hours.lock().unwrap().clone()
    }
}

#[async_trait]
impl ForecastProvider for FakeForecaster {
    async fn hourly_forecast(&self, coordinates: Coordinates, hour: i64) -> Result<Weather, Error> {
        self.calls.hit();
        self.hours.lock().unwrap().push(hour);

        let key = key(coordinates.latitude);
        if self.failing.contains(&key) {
            return Err(upstream_error("no hourly weather found for time"));
        }

        Ok(Weather {
            // providers may report a different hour; the engine restamps it
            time: 0,
            conditions: Conditions {
                id: 500,
                main: "Rain".into(),
                description: "light rain".into(),
            },
            pop: self.pops.get(&key).copied().unwrap_or(0.0),
        })
    }
}

#[derive(Clone, Default)]
pub struct FakeCache {
    payloads: HashMap<(String, String), String>,
    failing: HashSet<String>,
    calls: Counter,
}

impl FakeCache {
    pub fn with(mut self, bucket: &str, latitude: f64, payload: String) -> Self {
        self.payloads.insert((bucket.into(), key(latitude)), payload);
        self
    }

    pub fn failing_at(mut self, latitude: f64) -> Self {
        self.failing.insert(key(latitude));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait]
impl WeatherCache for FakeCache {
    async fn nearest(
        &self,
        bucket: &str,
        coordinates: Coordinates,
        _radius_meters: f64,
    ) -> Result<Option<String>, Error> {
        self.calls.hit();

        let key = key(coordinates.latitude);
        if self.failing.contains(&key) {
            return Err(database_error("connection refused"));
        }

        Ok(self.payloads.get(&(bucket.to_string(), key)).cloned())
    }
}

#[derive(Clone, Default)]
pub struct Fakes {
    pub geocoder: FakeGeocoder,
    pub router: FakeRouter,
    pub forecaster: FakeForecaster,
    pub cache: FakeCache,
}

pub fn engine(fakes: &Fakes) -> Engine {
    Engine::new(
        Arc::new(fakes.geocoder.clone()),
        Arc::new(fakes.router.clone()),
        Arc::new(fakes.forecaster.clone()),
        Some(Arc::new(fakes.cache.clone()) as DynWeatherCache),
        4,
    )
}

pub fn engine_without_cache(fakes: &Fakes) -> Engine {
    Engine::new(
        Arc::new(fakes.geocoder.clone()),
        Arc::new(fakes.router.clone()),
        Arc::new(fakes.forecaster.clone()),
        None,
        4,
    )
}

/// A record the way the external cache filler writes it, with a random nonce.
pub fn cache_record(weather: Weather) -> CacheRecord {
    CacheRecord {
        nonce: rand::random(),
        weather,
    }
}

pub async fn body_string(response: Response) -> String {
    let mut body = response.into_body();
    let mut bytes = vec![];

    while let Some(chunk) = body.data().await {
        bytes.extend_from_slice(&chunk.unwrap());
    }

    String::from_utf8(bytes).unwrap()
}
