use glam::DVec2;
use std::collections::HashMap;
use std::f64::consts::TAU;

/// Center of the synthetic layout (latitude, longitude), near Delhi.
pub const LAYOUT_CENTER: DVec2 = DVec2::new(28.6, 77.2);

/// Circle radius in degrees.
pub const LAYOUT_RADIUS: f64 = 0.08;

/// Place stop names evenly on a circle around [`LAYOUT_CENTER`]. Used when
/// no real geocoding exists; positions are synthetic but stable for a given
/// stop ordering. Stop i sits at angle i * 2π/n, with sin on the latitude
/// axis and cos on the longitude axis.
///
/// Input must be duplicate-free; any non-empty sequence is valid, including
/// a single stop (angle 0).
pub fn circle_layout(stops: &[String]) -> HashMap<String, DVec2> {
    let step = TAU / stops.len().max(1) as f64;
    stops
        .iter()
        .enumerate()
        .map(|(i, stop)| {
            let angle = i as f64 * step;
            let offset = DVec2::new(angle.sin(), angle.cos()) * LAYOUT_RADIUS;
            (stop.clone(), LAYOUT_CENTER + offset)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_one_coordinate_per_stop() {
        let names = stops(&["A", "B", "C", "D", "E"]);
        let coords = circle_layout(&names);
        assert_eq!(coords.len(), 5);
        for name in &names {
            assert!(coords.contains_key(name));
        }
    }

    #[test]
    fn test_all_points_on_circle() {
        let coords = circle_layout(&stops(&["A", "B", "C", "D", "E", "F", "G"]));
        for pos in coords.values() {
            let dist = pos.distance(LAYOUT_CENTER);
            assert!(
                (dist - LAYOUT_RADIUS).abs() < 1e-12,
                "distance {} off radius",
                dist
            );
        }
    }

    #[test]
    fn test_single_stop_at_angle_zero() {
        let coords = circle_layout(&stops(&["Depot"]));
        let pos = coords["Depot"];
        // sin(0) = 0 on the latitude axis, cos(0) = 1 on the longitude axis
        assert_eq!(pos.x, LAYOUT_CENTER.x);
        assert_eq!(pos.y, LAYOUT_CENTER.y + LAYOUT_RADIUS);
    }

    #[test]
    fn test_quarter_circle_axis_order() {
        // With 4 stops, stop 1 sits at angle π/2: sin = 1, cos = 0,
        // so the offset is all latitude.
        let coords = circle_layout(&stops(&["A", "B", "C", "D"]));
        let pos = coords["B"];
        assert!((pos.x - (LAYOUT_CENTER.x + LAYOUT_RADIUS)).abs() < 1e-12);
        assert!((pos.y - LAYOUT_CENTER.y).abs() < 1e-12);
    }

    #[test]
    fn test_positions_are_distinct() {
        let coords = circle_layout(&stops(&["A", "B", "C"]));
        assert_ne!(coords["A"], coords["B"]);
        assert_ne!(coords["B"], coords["C"]);
        assert_ne!(coords["A"], coords["C"]);
    }
}
