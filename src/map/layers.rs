use crate::fleet::result::Assignment;
use crate::map::projection::Viewport;
use glam::DVec2;
use ratatui::style::Color;
use std::collections::HashMap;

/// Route colors, one per vehicle, applied by assignment index modulo the
/// palette size. The same lookup feeds static routes and animated vehicles
/// so a vehicle always matches its route.
pub const PALETTE: [Color; 5] = [
    Color::Rgb(230, 126, 34),  // orange
    Color::Rgb(22, 160, 133),  // teal
    Color::Rgb(142, 68, 173),  // violet
    Color::Rgb(41, 128, 185),  // blue
    Color::Rgb(192, 57, 43),   // red
];

pub fn palette_color(idx: usize) -> Color {
    PALETTE[idx % PALETTE.len()]
}

/// A labeled stop marker tracked for the current result.
#[derive(Clone, Debug)]
pub struct Marker {
    pub pos: DVec2,
    pub label: String,
    /// Assignment index; palette applied at draw time.
    pub color: usize,
}

/// One vehicle's route as a drawable polyline.
#[derive(Clone, Debug)]
pub struct RouteLine {
    pub points: Vec<DVec2>,
    pub color: usize,
}

/// The set of currently-displayed map geometry, plus the viewport it is
/// shown through. The viewport is created once and survives resets; markers
/// and polylines are torn down and rebuilt on every new result.
#[derive(Default)]
pub struct RenderState {
    pub viewport: Option<Viewport>,
    pub markers: Vec<Marker>,
    pub polylines: Vec<RouteLine>,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all tracked geometry, creating and configuring the viewport on
    /// the first call. Safe to call with nothing drawn.
    pub fn reset(&mut self, center: DVec2, width: usize, height: usize) {
        if self.viewport.is_none() {
            self.viewport = Some(Viewport::city(center, width, height));
        }
        self.markers.clear();
        self.polylines.clear();
    }

    /// Track markers and polylines for every assignment, then fit the
    /// viewport to the drawn geometry. Stops missing from the coordinate
    /// table are skipped. A one-stop route still tracks its (degenerate)
    /// polyline.
    pub fn plot(&mut self, assignments: &[Assignment], coords: &HashMap<String, DVec2>) {
        for (idx, assignment) in assignments.iter().enumerate() {
            let mut points = Vec::with_capacity(assignment.route.len());
            for stop in &assignment.route {
                let Some(&pos) = coords.get(stop) else {
                    continue;
                };
                self.markers.push(Marker {
                    pos,
                    label: stop.clone(),
                    color: idx,
                });
                points.push(pos);
            }
            self.polylines.push(RouteLine { points, color: idx });
        }

        let positions: Vec<DVec2> = self.markers.iter().map(|m| m.pos).collect();
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.fit_bounds(&positions, 0.2);
        }
    }

    /// Keep the viewport canvas in sync with the terminal size.
    pub fn resize_viewport(&mut self, width: usize, height: usize) {
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.width = width;
            viewport.height = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::layout::circle_layout;

    fn assignment(vehicle: &str, route: &[&str], dist: f64) -> Assignment {
        Assignment {
            vehicle: vehicle.to_string(),
            route: route.iter().map(|s| s.to_string()).collect(),
            total_distance: dist,
        }
    }

    fn stops(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = RenderState::new();
        let center = DVec2::new(28.6, 77.2);
        state.reset(center, 200, 120);
        assert!(state.viewport.is_some());
        assert!(state.markers.is_empty());
        assert!(state.polylines.is_empty());

        state.reset(center, 200, 120);
        assert!(state.markers.is_empty());
        assert!(state.polylines.is_empty());
    }

    #[test]
    fn test_viewport_survives_reset() {
        let mut state = RenderState::new();
        let center = DVec2::new(28.6, 77.2);
        state.reset(center, 200, 120);
        state.viewport.as_mut().unwrap().zoom = 123.0;
        state.reset(center, 200, 120);
        assert_eq!(state.viewport.as_ref().unwrap().zoom, 123.0);
    }

    #[test]
    fn test_plot_counts() {
        let assignments = vec![
            assignment("T1", &["A", "B", "C"], 3.0),
            assignment("T2", &["D", "E"], 2.0),
        ];
        let coords = circle_layout(&stops(&["A", "B", "C", "D", "E"]));

        let mut state = RenderState::new();
        state.reset(DVec2::new(28.6, 77.2), 200, 120);
        state.plot(&assignments, &coords);

        assert_eq!(state.polylines.len(), 2);
        assert_eq!(state.markers.len(), 5);
        assert_eq!(state.polylines[0].points.len(), 3);
        assert_eq!(state.polylines[1].points.len(), 2);
    }

    #[test]
    fn test_plot_fits_viewport_to_markers() {
        let assignments = vec![
            assignment("T1", &["A", "B", "C"], 3.0),
            assignment("T2", &["D", "E"], 2.0),
        ];
        let coords = circle_layout(&stops(&["A", "B", "C", "D", "E"]));

        let mut state = RenderState::new();
        state.reset(DVec2::new(28.6, 77.2), 200, 120);
        state.plot(&assignments, &coords);

        let viewport = state.viewport.as_ref().unwrap();
        for marker in &state.markers {
            let (px, py) = viewport.project(marker.pos);
            assert!(px >= 0 && px < 200);
            assert!(py >= 0 && py < 120);
        }
    }

    #[test]
    fn test_single_stop_route_tracks_degenerate_polyline() {
        let assignments = vec![assignment("T1", &["A"], 0.0)];
        let coords = circle_layout(&stops(&["A"]));

        let mut state = RenderState::new();
        state.reset(DVec2::new(28.6, 77.2), 200, 120);
        state.plot(&assignments, &coords);

        assert_eq!(state.polylines.len(), 1);
        assert_eq!(state.polylines[0].points.len(), 1);
        assert_eq!(state.markers.len(), 1);
    }

    #[test]
    fn test_unknown_stop_is_skipped() {
        let assignments = vec![assignment("T1", &["A", "GHOST"], 1.0)];
        let coords = circle_layout(&stops(&["A"]));

        let mut state = RenderState::new();
        state.reset(DVec2::new(28.6, 77.2), 200, 120);
        state.plot(&assignments, &coords);

        assert_eq!(state.markers.len(), 1);
        assert_eq!(state.polylines[0].points.len(), 1);
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(palette_color(0), palette_color(5));
        assert_eq!(palette_color(2), palette_color(7));
    }
}
