use crate::fleet::result::{Assignment, RouteResult};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load an optimizer result from a JSON file.
pub fn load_result(path: &Path) -> Result<RouteResult> {
    let mut bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let result: RouteResult = simd_json::serde::from_slice(&mut bytes)
        .with_context(|| format!("parsing {}", path.display()))?;
    log::info!(
        "loaded result from {}: status={}, {} assignments",
        path.display(),
        result.status,
        result.assignments.len()
    );
    Ok(result)
}

/// Built-in two-vehicle fleet shown when no result file is available.
pub fn demo_result() -> RouteResult {
    let assignments = [
        ("DL-01", vec!["Warehouse", "Karol Bagh", "Saket", "Dwarka"], 3.0),
        ("DL-02", vec!["Okhla", "Rohini", "Pitampura"], 2.0),
    ];

    RouteResult {
        status: "success".to_string(),
        message: None,
        assignments: assignments
            .into_iter()
            .map(|(vehicle, route, total_distance)| Assignment {
                vehicle: vehicle.to_string(),
                route: route.into_iter().map(|s| s.to_string()).collect(),
                total_distance,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_result_is_plottable() {
        let result = demo_result();
        assert!(result.is_success());
        assert_eq!(result.assignments.len(), 2);
        assert!(result.assignments.iter().all(|a| !a.route.is_empty()));
    }

    #[test]
    fn test_load_result_missing_file_errors() {
        assert!(load_result(Path::new("data/definitely-missing.json")).is_err());
    }
}
