use super::{sample_route, Engine};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    api::JourneyAPI,
    entities::{JourneyRequest, JourneyResponse, Route, Trip},
    error::{upstream_error, Error},
};

impl Engine {
    #[tracing::instrument(skip(self, trip), fields(from = %trip.from.label, to = %trip.to.label))]
    pub async fn find_route(&self, trip: &Trip) -> Result<Route, Error> {
        self.router.route(trip).await.map_err(|err| {
            tracing::error!(
                from = %trip.from.label,
                to = %trip.to.label,
                error = %err,
                "routing failed"
            );
            upstream_error("Internal error retrieving trip route.")
        })
    }

    pub async fn plan_journey_at(
        &self,
        request: JourneyRequest,
        now: DateTime<Utc>,
    ) -> Result<JourneyResponse, Error> {
        let trip = self.resolve_trip(&request.from, &request.to).await?;
        let route = self.find_route(&trip).await?;

        let sampled = sample_route(&route);
        tracing::info!(
            route_steps = route.steps.len(),
            sampled_steps = sampled.len(),
            duration = route.duration,
            "sampled route"
        );

        let steps = self.resolve_weather(sampled, request.delay, now).await;

        Ok(self.build_response(steps, request.min_pop).await)
    }
}

#[async_trait]
impl JourneyAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn plan_journey(&self, request: JourneyRequest) -> Result<JourneyResponse, Error> {
        self.plan_journey_at(request, Utc::now()).await
    }
}
