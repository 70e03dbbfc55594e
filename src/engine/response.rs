use super::Engine;

use futures::{stream, StreamExt};

use crate::entities::{Coordinates, JourneyResponse, Location, SampledStep, SummaryStep};

/// Keeps the steps whose precipitation probability is at least `min_pop`.
pub fn filter_by_pop(steps: Vec<SampledStep>, min_pop: f64) -> Vec<SampledStep> {
    steps
        .into_iter()
        .filter(|step| {
            step.hourly_weather
                .as_ref()
                .map_or(false, |weather| weather.pop >= min_pop)
        })
        .collect()
}

/// Collapses runs of steps sharing the same rounded percentage into one entry.
pub fn summarize(steps: &[SampledStep]) -> Vec<SummaryStep> {
    let mut summary: Vec<SummaryStep> = vec![];

    for step in steps {
        let weather = match &step.hourly_weather {
            Some(weather) => weather,
            None => continue,
        };
        let pop = percentage(weather.pop);

        if summary.last().map_or(false, |last| last.pop == pop) {
            continue;
        }

        summary.push(SummaryStep {
            location: step
                .location
                .as_ref()
                .map(Location::description)
                .unwrap_or_default(),
            conditions: capitalize_first(&weather.conditions.description),
            pop,
        });
    }

    summary
}

fn percentage(pop: f64) -> i64 {
    (pop * 100.0).round() as i64
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Engine {
    #[tracing::instrument(skip(self, steps))]
    pub async fn build_response(&self, steps: Vec<SampledStep>, min_pop: f64) -> JourneyResponse {
        let steps = self.locate_steps(filter_by_pop(steps, min_pop)).await;
        let summary = summarize(&steps);

        JourneyResponse {
            summary,
            detailed_steps: steps,
        }
    }

    /// Reverse geocodes every step. A failed lookup leaves the step without a location.
    async fn locate_steps(&self, steps: Vec<SampledStep>) -> Vec<SampledStep> {
        let points: Vec<Coordinates> = steps.iter().map(|step| step.coordinates).collect();

        let slots: Vec<Option<Location>> = stream::iter(points)
            .map(|coordinates| async move {
                match self.geocoder.reverse(coordinates).await {
                    Ok(locations) => locations.into_iter().next(),
                    Err(err) => {
                        tracing::warn!(
                            latitude = coordinates.latitude,
                            longitude = coordinates.longitude,
                            error = %err,
                            "failed to reverse geocode step"
                        );
                        None
                    }
                }
            })
            .buffered(self.fan_out_limit)
            .collect()
            .await;

        steps
            .into_iter()
            .zip(slots)
            .map(|(mut step, location)| {
                step.location = location;
                step
            })
            .collect()
    }
}
