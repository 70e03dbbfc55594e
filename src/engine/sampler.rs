use crate::entities::{Route, SampledStep};

/// Seconds between weather lookups for a trip of `total_duration` seconds.
pub fn sampling_interval(total_duration: f64) -> f64 {
    match total_duration {
        d if d > 18000.0 => d / 20.0,
        d if d > 7200.0 => 15.0 * 60.0,
        d if d > 3600.0 => 10.0 * 60.0,
        d if d > 300.0 => 5.0 * 60.0,
        d => d / 3.0,
    }
}

/// Picks the route steps that get a weather lookup.
///
/// A step is chosen once the time driven to the end of it reaches the next
/// goal. Its maneuver point is where the segment starts, so the recorded
/// position trails the stamped time by one segment.
pub fn sample_route(route: &Route) -> Vec<SampledStep> {
    if !(route.duration > 0.0) {
        return vec![];
    }

    let interval = sampling_interval(route.duration);
    let mut sampled = vec![];
    let mut elapsed = 0.0;
    let mut goal = interval;

    for (i, step) in route.steps.iter().enumerate() {
        elapsed += step.duration;

        if elapsed >= goal {
            let name = if step.name.is_empty() {
                preceding_name(route, i)
            } else {
                step.name.clone()
            };

            sampled.push(SampledStep::new(
                name,
                step.duration,
                elapsed,
                step.coordinates,
            ));
            goal = elapsed + interval;
        }
    }

    sampled
}

/// Name of the closest named step before `index`, or "" if there is none.
fn preceding_name(route: &Route, index: usize) -> String {
    route.steps[..index]
        .iter()
        .rev()
        .find(|step| !step.name.is_empty())
        .map(|step| step.name.clone())
        .unwrap_or_default()
}
