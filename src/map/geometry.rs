use crate::braille::BrailleCanvas;

/// Draw a solid line using Bresenham's algorithm.
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    draw_dashed_line(canvas, x0, y0, x1, y1, u32::MAX, 0);
}

/// Draw a dashed line: `on` lit pixels followed by `off` dark pixels,
/// repeating along the Bresenham walk. `off == 0` yields a solid line.
pub fn draw_dashed_line(
    canvas: &mut BrailleCanvas,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    on: u32,
    off: u32,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;
    let period = on.saturating_add(off).max(1);
    let mut phase: u32 = 0;

    loop {
        if phase % period < on {
            canvas.set_pixel_signed(x, y);
        }
        phase = phase.wrapping_add(1);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a filled disc (stop and vehicle markers).
pub fn draw_disc(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                canvas.set_pixel_signed(cx + dx, cy + dy);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_pixels(canvas: &BrailleCanvas) -> usize {
        canvas
            .to_string()
            .chars()
            .filter(|&c| c != '\u{2800}' && c != '\n')
            .count()
    }

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        assert_eq!(lit_pixels(&canvas), 5); // all five cells touched
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert_eq!(lit_pixels(&canvas), 2);
    }

    #[test]
    fn test_dashed_line_skips_pixels() {
        let mut solid = BrailleCanvas::new(10, 1);
        let mut dashed = BrailleCanvas::new(10, 1);
        draw_line(&mut solid, 0, 0, 19, 0);
        draw_dashed_line(&mut dashed, 0, 0, 19, 0, 2, 2);
        assert!(lit_pixels(&dashed) < lit_pixels(&solid));
        assert!(lit_pixels(&dashed) > 0);
    }

    #[test]
    fn test_degenerate_line_is_a_point() {
        let mut canvas = BrailleCanvas::new(2, 1);
        draw_line(&mut canvas, 1, 1, 1, 1);
        assert_eq!(lit_pixels(&canvas), 1);
    }

    #[test]
    fn test_disc_radius_zero() {
        let mut canvas = BrailleCanvas::new(2, 1);
        draw_disc(&mut canvas, 0, 0, 0);
        assert_eq!(lit_pixels(&canvas), 1);
    }
}
