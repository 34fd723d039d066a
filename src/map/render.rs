use crate::braille::BrailleCanvas;
use crate::fleet::animate::AnimationSession;
use crate::map::geometry::{draw_dashed_line, draw_disc};
use crate::map::layers::{RenderState, PALETTE};
use crate::map::projection::Viewport;

/// Dash pattern for route polylines, in braille pixels.
const ROUTE_DASH_ON: u32 = 6;
const ROUTE_DASH_OFF: u32 = 4;

/// Graticule line steps in degrees, finest first.
const GRID_STEPS: [f64; 10] = [0.01, 0.02, 0.05, 0.1, 0.2, 0.5, 1.0, 5.0, 10.0, 30.0];

/// Minimum pixel spacing between graticule lines.
const GRID_SPACING_PX: f64 = 24.0;

/// Per-frame rasterization of the tracked geometry: one braille canvas per
/// palette slot for routes and vehicles, plus positioned text labels in
/// character coordinates.
pub struct Scene {
    pub graticule: BrailleCanvas,
    pub routes: Vec<BrailleCanvas>,
    pub vehicles: Vec<BrailleCanvas>,
    pub stop_labels: Vec<(u16, u16, String)>,
    /// (x, y, text, palette slot)
    pub vehicle_labels: Vec<(u16, u16, String, usize)>,
    /// Static routes draw dimmed while a vehicle run is on screen
    pub dim_routes: bool,
}

/// Rasterize the current geometry through the viewport. The viewport's
/// pixel size decides the canvas dimensions (2x4 pixels per cell).
pub fn build_scene(
    state: &RenderState,
    session: Option<&AnimationSession>,
    viewport: &Viewport,
) -> Scene {
    let char_w = viewport.width / 2;
    let char_h = viewport.height / 4;

    let mut scene = Scene {
        graticule: BrailleCanvas::new(char_w, char_h),
        routes: (0..PALETTE.len())
            .map(|_| BrailleCanvas::new(char_w, char_h))
            .collect(),
        vehicles: (0..PALETTE.len())
            .map(|_| BrailleCanvas::new(char_w, char_h))
            .collect(),
        stop_labels: Vec::new(),
        vehicle_labels: Vec::new(),
        dim_routes: session.is_some(),
    };

    draw_graticule(&mut scene.graticule, viewport);

    for line in &state.polylines {
        let slot = line.color % PALETTE.len();
        draw_polyline(&mut scene.routes[slot], &line.points, viewport);
    }

    for marker in &state.markers {
        let (px, py) = viewport.project(marker.pos);
        if !viewport.is_visible(px, py) {
            continue;
        }
        let slot = marker.color % PALETTE.len();
        draw_disc(&mut scene.routes[slot], px, py, 1);

        if px >= 0 && py >= 0 {
            let char_x = (px / 2) as u16;
            let char_y = (py / 4) as u16;
            if let Some(label_x) = char_x.checked_add(2) {
                scene.stop_labels.push((label_x, char_y, marker.label.clone()));
            }
        }
    }

    if let Some(session) = session {
        for vehicle in &session.vehicles {
            let (px, py) = viewport.project(vehicle.pos);
            if !viewport.is_visible(px, py) {
                continue;
            }
            let slot = vehicle.color % PALETTE.len();
            draw_disc(&mut scene.vehicles[slot], px, py, 3);

            if px >= 0 && py >= 4 {
                let char_x = (px / 2) as u16;
                let char_y = (py / 4 - 1) as u16;
                scene
                    .vehicle_labels
                    .push((char_x, char_y, format!("Truck {}", vehicle.label), slot));
            }
        }
    }

    scene
}

/// Dashed walk over consecutive route points, skipping segments that
/// cannot touch the canvas or that span absurdly wide.
fn draw_polyline(canvas: &mut BrailleCanvas, points: &[glam::DVec2], viewport: &Viewport) {
    if points.len() < 2 {
        return;
    }

    let mut prev: Option<(i32, i32)> = None;
    for &point in points {
        let (px, py) = viewport.project(point);

        if let Some((prev_x, prev_y)) = prev {
            let dist = ((px - prev_x).abs() + (py - prev_y).abs()) as usize;
            if dist < viewport.width * 2 && viewport.segment_might_be_visible((prev_x, prev_y), (px, py))
            {
                draw_dashed_line(canvas, prev_x, prev_y, px, py, ROUTE_DASH_ON, ROUTE_DASH_OFF);
            }
        }

        prev = Some((px, py));
    }
}

/// Faint lat/lon grid standing in for a base tile layer.
fn draw_graticule(canvas: &mut BrailleCanvas, viewport: &Viewport) {
    let dpp = viewport.degrees_per_pixel();
    let Some(&step) = GRID_STEPS.iter().find(|&&s| s / dpp >= GRID_SPACING_PX) else {
        return;
    };

    let half_w = viewport.width as f64 / 2.0;
    let half_h = viewport.height as f64 / 2.0;
    let lon_span = dpp * half_w;
    let lat_span = dpp * half_h; // close enough at city scale

    let min_lon = viewport.center.y - lon_span;
    let max_lon = viewport.center.y + lon_span;
    let mut lon = (min_lon / step).floor() * step;
    while lon <= max_lon {
        let (px, _) = viewport.project(glam::DVec2::new(viewport.center.x, lon));
        draw_dashed_line(canvas, px, 0, px, viewport.height as i32 - 1, 1, 3);
        lon += step;
    }

    let min_lat = viewport.center.x - lat_span;
    let max_lat = viewport.center.x + lat_span;
    let mut lat = (min_lat / step).floor() * step;
    while lat <= max_lat {
        let (_, py) = viewport.project(glam::DVec2::new(lat, viewport.center.y));
        draw_dashed_line(canvas, 0, py, viewport.width as i32 - 1, py, 1, 3);
        lat += step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::animate::AnimationSession;
    use crate::fleet::layout::circle_layout;
    use crate::fleet::result::Assignment;
    use glam::DVec2;

    fn lit_cells(canvas: &BrailleCanvas) -> usize {
        let mut count = 0;
        for cy in 0..canvas.height() {
            for cx in 0..canvas.width() {
                if canvas.glyph(cx, cy).is_some() {
                    count += 1;
                }
            }
        }
        count
    }

    fn plotted_state() -> RenderState {
        let assignments = vec![
            Assignment {
                vehicle: "T1".to_string(),
                route: vec!["A".to_string(), "B".to_string(), "C".to_string()],
                total_distance: 3.0,
            },
            Assignment {
                vehicle: "T2".to_string(),
                route: vec!["D".to_string(), "E".to_string()],
                total_distance: 2.0,
            },
        ];
        let stops: Vec<String> = ["A", "B", "C", "D", "E"].iter().map(|s| s.to_string()).collect();
        let coords = circle_layout(&stops);
        let mut state = RenderState::new();
        state.reset(DVec2::new(28.6, 77.2), 200, 120);
        state.plot(&assignments, &coords);
        state
    }

    #[test]
    fn test_scene_draws_routes_and_labels() {
        let state = plotted_state();
        let viewport = state.viewport.clone().unwrap();
        let scene = build_scene(&state, None, &viewport);

        assert!(!scene.dim_routes);
        assert_eq!(scene.stop_labels.len(), 5);
        assert!(scene.vehicle_labels.is_empty());
        // The two assignments land in palette slots 0 and 1
        assert!(lit_cells(&scene.routes[0]) > 0);
        assert!(lit_cells(&scene.routes[1]) > 0);
        assert_eq!(lit_cells(&scene.routes[2]), 0);
    }

    #[test]
    fn test_scene_with_session_dims_and_draws_vehicles() {
        let state = plotted_state();
        let stops: Vec<String> = ["A", "B", "C", "D", "E"].iter().map(|s| s.to_string()).collect();
        let coords = circle_layout(&stops);
        let assignments = vec![
            Assignment {
                vehicle: "T1".to_string(),
                route: vec!["A".to_string(), "B".to_string()],
                total_distance: 2.0,
            },
        ];
        let session = AnimationSession::start(&assignments, &coords, 1);

        let viewport = state.viewport.clone().unwrap();
        let scene = build_scene(&state, Some(&session), &viewport);

        assert!(scene.dim_routes);
        assert_eq!(scene.vehicle_labels.len(), 1);
        assert!(scene.vehicle_labels[0].2.contains("T1"));
        assert!(lit_cells(&scene.vehicles[0]) > 0);
    }
}
