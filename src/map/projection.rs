use glam::DVec2;
use std::f64::consts::PI;

/// Zoom bounds. Fleet routes live at city scale (fractions of a degree),
/// so the upper bound sits far above a whole-world view.
pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 50_000.0;

/// Default zoom for a freshly created city viewport, before the first
/// bounds fit.
pub const CITY_ZOOM: f64 = 4_000.0;

/// Viewport over the visible map area. Points are `DVec2` with latitude on
/// the x axis and longitude on the y axis, matching the coordinate table.
#[derive(Clone)]
pub struct Viewport {
    /// Center of the view (latitude, longitude)
    pub center: DVec2,
    /// Zoom level (1.0 = whole world spans the canvas width)
    pub zoom: f64,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

/// Normalized Web Mercator x for a longitude.
#[inline]
fn mercator_x(lon: f64) -> f64 {
    (lon + 180.0) / 360.0
}

/// Normalized Web Mercator y for a latitude.
#[inline]
fn mercator_y(lat: f64) -> f64 {
    let rad = lat.to_radians();
    (1.0 - (rad.tan() + 1.0 / rad.cos()).ln() / PI) / 2.0
}

impl Viewport {
    pub fn new(center: DVec2, zoom: f64, width: usize, height: usize) -> Self {
        Self {
            center,
            zoom,
            width,
            height,
        }
    }

    /// City-scale view around the given center.
    pub fn city(center: DVec2, width: usize, height: usize) -> Self {
        Self::new(center, CITY_ZOOM, width, height)
    }

    /// Pan the view by a pixel delta.
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let scale = 360.0 / (self.zoom * self.width as f64);
        self.center.y += dx as f64 * scale;
        self.center.x -= dy as f64 * scale * 0.5; // Mercator distortion

        // Wrap longitude
        if self.center.y > 180.0 {
            self.center.y -= 360.0;
        } else if self.center.y < -180.0 {
            self.center.y += 360.0;
        }

        // Clamp latitude
        self.center.x = self.center.x.clamp(-85.0, 85.0);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 1.5).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 1.5).max(MIN_ZOOM);
    }

    pub fn zoom_in_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.5);
    }

    pub fn zoom_out_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.0 / 1.5);
    }

    /// Zoom by a factor while keeping the point under the cursor fixed.
    fn zoom_at(&mut self, px: i32, py: i32, factor: f64) {
        let anchor = self.unproject(px, py);

        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);

        // Pan so the anchor point projects back under the cursor
        let (new_px, new_py) = self.project(anchor);
        self.pan(new_px - px, new_py - py);
    }

    /// Project a (latitude, longitude) point to canvas pixel coordinates.
    pub fn project(&self, point: DVec2) -> (i32, i32) {
        let scale = self.zoom * self.width as f64;

        let x = mercator_x(point.y) - mercator_x(self.center.y);
        let y = mercator_y(point.x) - mercator_y(self.center.x);

        let px = (x * scale + self.width as f64 / 2.0) as i32;
        let py = (y * scale + self.height as f64 / 2.0) as i32;

        (px, py)
    }

    /// Map canvas pixel coordinates back to a (latitude, longitude) point.
    pub fn unproject(&self, px: i32, py: i32) -> DVec2 {
        let scale = self.zoom * self.width as f64;

        let x = (px as f64 - self.width as f64 / 2.0) / scale + mercator_x(self.center.y);
        let y = (py as f64 - self.height as f64 / 2.0) / scale + mercator_y(self.center.x);

        let lon = x * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();

        DVec2::new(lat, lon)
    }

    /// Check if a projected point lies on or near the canvas.
    pub fn is_visible(&self, px: i32, py: i32) -> bool {
        px >= -10 && px < self.width as i32 + 10 && py >= -10 && py < self.height as i32 + 10
    }

    /// Rough bounding-box visibility check for a line segment.
    pub fn segment_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        let min_x = p1.0.min(p2.0);
        let max_x = p1.0.max(p2.0);
        let min_y = p1.1.min(p2.1);
        let max_y = p1.1.max(p2.1);

        max_x >= 0 && min_x < self.width as i32 && max_y >= 0 && min_y < self.height as i32
    }

    /// Recenter and rezoom so every given point fits on the canvas, with the
    /// bounding box padded by `padding` on each side (fraction of its size).
    /// A single point (or an empty box) recenters at maximum zoom.
    pub fn fit_bounds(&mut self, points: &[DVec2], padding: f64) {
        let Some(first) = points.first() else {
            return;
        };

        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min = min.min(*p);
            max = max.max(*p);
        }

        self.center = (min + max) / 2.0;

        let pad = 1.0 + 2.0 * padding;
        let dx = (mercator_x(max.y) - mercator_x(min.y)) * pad;
        let dy = (mercator_y(min.x) - mercator_y(max.x)) * pad;

        // scale = zoom * width, so the box fits when
        // dx * scale <= width and dy * scale <= height
        let zoom_x = if dx > f64::EPSILON { 1.0 / dx } else { MAX_ZOOM };
        let zoom_y = if dy > f64::EPSILON {
            self.height as f64 / (self.width as f64 * dy)
        } else {
            MAX_ZOOM
        };

        self.zoom = zoom_x.min(zoom_y).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Degrees of longitude covered by one canvas pixel.
    pub fn degrees_per_pixel(&self) -> f64 {
        360.0 / (self.zoom * self.width as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_center() {
        let vp = Viewport::new(DVec2::ZERO, 1.0, 100, 100);
        let (x, y) = vp.project(DVec2::ZERO);
        assert_eq!(x, 50);
        assert_eq!(y, 50);
    }

    #[test]
    fn test_pan_moves_center() {
        let mut vp = Viewport::new(DVec2::ZERO, 1.0, 100, 100);
        vp.pan(10, 0);
        assert!(vp.center.y > 0.0);
        vp.pan(0, 10);
        assert!(vp.center.x < 0.0);
    }

    #[test]
    fn test_unproject_roundtrip() {
        let vp = Viewport::new(DVec2::new(28.6, 77.2), 2_000.0, 200, 120);
        let p = DVec2::new(28.65, 77.25);
        let (px, py) = vp.project(p);
        let back = vp.unproject(px, py);
        assert!((back.x - p.x).abs() < 0.01);
        assert!((back.y - p.y).abs() < 0.01);
    }

    #[test]
    fn test_fit_bounds_covers_all_points() {
        let mut vp = Viewport::city(DVec2::new(28.6, 77.2), 200, 120);
        let points = vec![
            DVec2::new(28.6, 77.28),
            DVec2::new(28.68, 77.2),
            DVec2::new(28.52, 77.2),
            DVec2::new(28.6, 77.12),
        ];
        vp.fit_bounds(&points, 0.2);
        for p in &points {
            let (px, py) = vp.project(*p);
            assert!(px >= 0 && px < 200, "px {} out of canvas", px);
            assert!(py >= 0 && py < 120, "py {} out of canvas", py);
        }
    }

    #[test]
    fn test_fit_bounds_single_point() {
        let mut vp = Viewport::city(DVec2::new(0.0, 0.0), 200, 120);
        vp.fit_bounds(&[DVec2::new(28.6, 77.2)], 0.2);
        assert_eq!(vp.center, DVec2::new(28.6, 77.2));
        assert_eq!(vp.zoom, MAX_ZOOM);
        let (px, py) = vp.project(DVec2::new(28.6, 77.2));
        assert_eq!((px, py), (100, 60));
    }

    #[test]
    fn test_fit_bounds_empty_is_noop() {
        let mut vp = Viewport::city(DVec2::new(1.0, 2.0), 200, 120);
        let before = (vp.center, vp.zoom);
        vp.fit_bounds(&[], 0.2);
        assert_eq!((vp.center, vp.zoom), before);
    }
}
