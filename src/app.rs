use crate::fleet::animate::AnimationSession;
use crate::fleet::layout::{circle_layout, LAYOUT_CENTER};
use crate::fleet::result::{distinct_stops, Assignment, RouteResult};
use crate::fleet::stats::{CostModel, FleetStats};
use crate::map::RenderState;
use glam::DVec2;
use std::collections::HashMap;

/// A user-visible condition surfaced instead of geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The optimizer reported a non-success status; shows its message.
    UpstreamError(String),
    /// Success status but nothing to route.
    NoAssignments,
}

/// Application state: the tracked map geometry, the last successfully
/// submitted result and its synthetic coordinates, derived stats, and the
/// animation session when one is on screen. All core operations go through
/// this context; nothing lives in module-level state.
pub struct App {
    pub state: RenderState,
    pub coords: HashMap<String, DVec2>,
    pub assignments: Vec<Assignment>,
    pub stats: Option<FleetStats>,
    pub notice: Option<Notice>,
    pub animation: Option<AnimationSession>,
    pub cost_model: CostModel,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Current mouse position for the cursor marker
    pub mouse_pos: Option<(u16, u16)>,
    epoch: u64,
    /// Canvas pixel size for the map area
    canvas_width: usize,
    canvas_height: usize,
}

impl App {
    /// `width`/`height` are terminal cells; braille gives 2x4 pixels per
    /// cell, and the bordered map area loses two cells each way plus the
    /// status bar row.
    pub fn new(width: usize, height: usize) -> Self {
        let inner_width = width.saturating_sub(2);
        let inner_height = height.saturating_sub(3);
        Self {
            state: RenderState::new(),
            coords: HashMap::new(),
            assignments: Vec::new(),
            stats: None,
            notice: None,
            animation: None,
            cost_model: CostModel::default(),
            should_quit: false,
            last_mouse: None,
            mouse_pos: None,
            epoch: 0,
            canvas_width: inner_width * 2,
            canvas_height: inner_height * 4,
        }
    }

    /// Render an optimizer result: synthesize coordinates, reset the map
    /// layers, plot routes and markers, derive stats. Non-success or empty
    /// results raise a notice and leave the drawn geometry untouched.
    pub fn submit(&mut self, result: RouteResult) {
        if !result.is_success() {
            let message = result
                .message
                .unwrap_or_else(|| "Unknown error.".to_string());
            log::warn!("optimizer returned failure: {message}");
            self.notice = Some(Notice::UpstreamError(message));
            return;
        }
        if result.assignments.is_empty() {
            log::warn!("optimizer returned success with no assignments");
            self.notice = Some(Notice::NoAssignments);
            return;
        }

        let stops = distinct_stops(&result.assignments);
        log::info!(
            "plotting {} assignments over {} stops",
            result.assignments.len(),
            stops.len()
        );

        self.coords = circle_layout(&stops);
        self.state
            .reset(LAYOUT_CENTER, self.canvas_width, self.canvas_height);
        self.state.plot(&result.assignments, &self.coords);
        self.stats = Some(FleetStats::compute(&result.assignments, &self.cost_model));
        self.assignments = result.assignments;
        self.notice = None;
        // A running session animates the previous result's coordinates
        self.animation = None;
    }

    /// Replay the last plotted result as a vehicle animation. A no-op until
    /// a result has been submitted; a running session is superseded.
    pub fn animate(&mut self) {
        if self.assignments.is_empty() {
            return;
        }
        self.epoch += 1;
        if self.animation.is_some() {
            log::info!("superseding animation session with epoch {}", self.epoch);
        } else {
            log::info!("starting animation session {}", self.epoch);
        }
        self.animation = Some(AnimationSession::start(
            &self.assignments,
            &self.coords,
            self.epoch,
        ));
    }

    /// Advance the animation by one host tick; drops the session once its
    /// settling delay has elapsed.
    pub fn tick(&mut self) {
        if let Some(session) = self.animation.as_mut() {
            if !session.advance() {
                log::info!("animation session {} finished", session.epoch());
                self.animation = None;
            }
        }
    }

    /// Update canvas size when the terminal resizes.
    pub fn resize(&mut self, width: usize, height: usize) {
        let inner_width = width.saturating_sub(2);
        let inner_height = height.saturating_sub(3);
        self.canvas_width = inner_width * 2;
        self.canvas_height = inner_height * 4;
        self.state
            .resize_viewport(self.canvas_width, self.canvas_height);
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        if let Some(viewport) = self.state.viewport.as_mut() {
            viewport.pan(dx, dy);
        }
    }

    pub fn zoom_in(&mut self) {
        if let Some(viewport) = self.state.viewport.as_mut() {
            viewport.zoom_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if let Some(viewport) = self.state.viewport.as_mut() {
            viewport.zoom_out();
        }
    }

    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        let (px, py) = Self::cell_to_pixel(col, row);
        if let Some(viewport) = self.state.viewport.as_mut() {
            viewport.zoom_in_at(px, py);
        }
    }

    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        let (px, py) = Self::cell_to_pixel(col, row);
        if let Some(viewport) = self.state.viewport.as_mut() {
            viewport.zoom_out_at(px, py);
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Drag pan, scaled down when zoomed far out.
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = last_x as i32 - x as i32;
            let dy = last_y as i32 - y as i32;
            self.pan(dx * 2, dy * 2);
        }
        self.last_mouse = Some((x, y));
    }

    pub fn end_drag(&mut self) {
        self.last_mouse = None;
    }

    pub fn set_mouse_pos(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
    }

    /// Mouse position in braille pixel coordinates, for the cursor marker.
    pub fn mouse_pixel_pos(&self) -> Option<(i32, i32)> {
        self.mouse_pos
            .map(|(col, row)| Self::cell_to_pixel(col, row))
    }

    /// Terminal cell to braille pixel, accounting for the one-cell border.
    fn cell_to_pixel(col: u16, row: u16) -> (i32, i32) {
        let px = ((col.saturating_sub(1)) as i32) * 2;
        let py = ((row.saturating_sub(1)) as i32) * 4;
        (px, py)
    }

    pub fn zoom_level(&self) -> String {
        match &self.state.viewport {
            Some(viewport) => format!("{:.0}x", viewport.zoom),
            None => "-".to_string(),
        }
    }

    pub fn center_coords(&self) -> String {
        match &self.state.viewport {
            Some(viewport) => format!(
                "{:.3}°{}, {:.3}°{}",
                viewport.center.x.abs(),
                if viewport.center.x >= 0.0 { "N" } else { "S" },
                viewport.center.y.abs(),
                if viewport.center.y >= 0.0 { "E" } else { "W" }
            ),
            None => "-".to_string(),
        }
    }

    pub fn animation_status(&self) -> &'static str {
        match &self.animation {
            Some(session) if session.is_running() => "moving",
            Some(_) => "arriving",
            None => "idle",
        }
    }
}
