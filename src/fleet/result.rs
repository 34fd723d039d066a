use serde::Deserialize;
use std::collections::HashSet;

/// One vehicle's route and total distance, as produced by the optimizer.
#[derive(Clone, Debug, Deserialize)]
pub struct Assignment {
    pub vehicle: String,
    pub route: Vec<String>,
    pub total_distance: f64,
}

/// The optimizer's response envelope.
#[derive(Clone, Debug, Deserialize)]
pub struct RouteResult {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl RouteResult {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Every stop name appearing in any route, in first-appearance order,
/// duplicates dropped. This ordering feeds the coordinate synthesizer, so
/// it must be stable across identical results.
pub fn distinct_stops(assignments: &[Assignment]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut stops = Vec::new();
    for assignment in assignments {
        for stop in &assignment.route {
            if seen.insert(stop.as_str()) {
                stops.push(stop.clone());
            }
        }
    }
    stops
}
