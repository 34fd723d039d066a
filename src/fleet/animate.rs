use crate::fleet::result::Assignment;
use glam::DVec2;
use std::collections::HashMap;

/// Ticks from departure to the final stop.
pub const MAX_STEPS: u32 = 60;

/// Ticks the finished frame is held before the vehicles disappear.
pub const SETTLE_TICKS: u32 = 60;

/// A moving vehicle marker within one animation session.
#[derive(Clone, Debug)]
pub struct VehicleMarker {
    pub label: String,
    /// Assignment index; palette applied at draw time.
    pub color: usize,
    /// Resolved route coordinates, travel order. Never empty.
    route: Vec<DVec2>,
    pub pos: DVec2,
}

/// One animation run over the most recently plotted result.
///
/// The session advances one step per host tick: Running while
/// `step < MAX_STEPS`, then a settling countdown holds the final frame, then
/// the owner drops the session and its markers with it. The position at any
/// tick is a pure function of the tick count and the session's inputs.
pub struct AnimationSession {
    epoch: u64,
    step: u32,
    settle: u32,
    pub vehicles: Vec<VehicleMarker>,
}

impl AnimationSession {
    /// Build a session with every vehicle parked at its route's first
    /// resolved stop. Stops absent from the coordinate table are skipped;
    /// a route with no resolved stop at all contributes no vehicle.
    pub fn start(
        assignments: &[Assignment],
        coords: &HashMap<String, DVec2>,
        epoch: u64,
    ) -> Self {
        let vehicles = assignments
            .iter()
            .enumerate()
            .filter_map(|(idx, assignment)| {
                let route: Vec<DVec2> = assignment
                    .route
                    .iter()
                    .filter_map(|stop| coords.get(stop).copied())
                    .collect();
                let start = *route.first()?;
                Some(VehicleMarker {
                    label: assignment.vehicle.clone(),
                    color: idx,
                    route,
                    pos: start,
                })
            })
            .collect();

        Self {
            epoch,
            step: 0,
            settle: SETTLE_TICKS,
            vehicles,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// True while vehicles are still moving (settling not yet entered).
    pub fn is_running(&self) -> bool {
        self.step < MAX_STEPS
    }

    /// Normalized progress of the run, 0 to 1.
    pub fn progress(&self) -> f64 {
        (self.step as f64 / MAX_STEPS as f64).min(1.0)
    }

    /// Advance one tick. Returns `false` once the settling delay has
    /// elapsed and the session should be dropped.
    pub fn advance(&mut self) -> bool {
        if self.step < MAX_STEPS {
            self.step += 1;
            let progress = self.progress();
            for vehicle in &mut self.vehicles {
                vehicle.pos = position_along(&vehicle.route, progress);
            }
            true
        } else if self.settle > 0 {
            self.settle -= 1;
            true
        } else {
            false
        }
    }
}

/// Map normalized progress to a point on a piecewise-linear route.
///
/// `progress * (len - 1)` splits into a segment index and a fractional
/// remainder; the point is the linear interpolation between that segment's
/// endpoints, with the end stop clamped so progress 1.0 lands exactly on
/// the last coordinate.
pub fn position_along(route: &[DVec2], progress: f64) -> DVec2 {
    debug_assert!(!route.is_empty());
    let scaled = progress.clamp(0.0, 1.0) * (route.len() - 1) as f64;
    let idx = scaled as usize;
    let frac = scaled - idx as f64;

    let start = route[idx];
    let end = route[(idx + 1).min(route.len() - 1)];
    start.lerp(end, frac)
}
