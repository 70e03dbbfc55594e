use axum::extract::{Extension, Json, Query};
use serde::Deserialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    api::DynAPI,
    entities::{JourneyRequest, JourneyResponse},
    error::{bad_request_error, Error},
};

pub const MAX_DELAY_MINUTES: i64 = 12 * 60;

/// Raw query string. Everything is optional here so that every rejection
/// goes through [`Error`] and gets a JSON body.
#[derive(Debug, Default, Deserialize)]
pub struct JourneyParams {
    from: Option<String>,
    to: Option<String>,
    #[serde(rename = "minPop")]
    min_pop: Option<String>,
    delay: Option<String>,
}

impl JourneyParams {
    pub fn validate(self) -> Result<JourneyRequest, Error> {
        let from = present(self.from)
            .ok_or_else(|| bad_request_error("Missing 'from' query parameter in request"))?;
        let to = present(self.to)
            .ok_or_else(|| bad_request_error("Missing 'to' query parameter in request"))?;

        let min_pop = match present(self.min_pop) {
            Some(value) => match value.parse::<f64>() {
                Ok(pct) if (0.0..=100.0).contains(&pct) => pct / 100.0,
                _ => {
                    return Err(bad_request_error(format!(
                        "Invalid 'minPop' query parameter '{}'. Expected a percentage between 0 and 100.",
                        value
                    )))
                }
            },
            None => 0.0,
        };

        let delay = match present(self.delay) {
            Some(value) => match value.parse::<i64>() {
                Ok(minutes) if (0..=MAX_DELAY_MINUTES).contains(&minutes) => minutes,
                _ => {
                    return Err(bad_request_error(format!(
                        "Invalid 'delay' query parameter '{}'. Expected minutes between 0 and {}.",
                        value, MAX_DELAY_MINUTES
                    )))
                }
            },
            None => 0,
        };

        Ok(JourneyRequest {
            from,
            to,
            min_pop,
            delay,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<JourneyParams>,
) -> Result<Json<JourneyResponse>, Error> {
    let request = params.validate()?;

    let span = tracing::info_span!(
        "journey",
        request_id = %Uuid::new_v4(),
        from = %request.from,
        to = %request.to
    );

    let response = api.plan_journey(request).instrument(span).await?;

    Ok(response.into())
}
