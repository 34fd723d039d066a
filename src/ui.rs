use crate::app::{App, Notice};
use crate::map::{build_scene, palette_color, Scene};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};

/// Render the UI: map on the left, stats panel on the right, status bar
/// along the bottom.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map + panel
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(36)])
        .split(rows[0]);

    render_map(frame, app, columns[0]);
    render_stats_panel(frame, app, columns[1]);
    render_status_bar(frame, app, rows[1]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Fleet Map ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(viewport) = app.state.viewport.as_ref() else {
        let placeholder = Paragraph::new("No routes yet. Press 'r' to load a result.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(placeholder, inner);
        return;
    };

    // Braille gives 2x4 resolution per cell
    let mut viewport = viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let scene = build_scene(&app.state, app.animation.as_ref(), &viewport);

    let cursor_pos = app.mouse_pixel_pos().and_then(|(px, py)| {
        let cx = (px / 2) as u16;
        let cy = (py / 4) as u16;
        (cx < inner.width && cy < inner.height).then_some((cx, cy))
    });

    frame.render_widget(MapWidget { scene, cursor_pos }, inner);
}

/// Layers the rasterized scene into the terminal buffer: graticule at the
/// back, colored route canvases, stop labels, then vehicles on top.
struct MapWidget {
    scene: Scene,
    cursor_pos: Option<(u16, u16)>,
}

impl MapWidget {
    fn render_canvas(
        canvas: &crate::braille::BrailleCanvas,
        style: Style,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let max_x = canvas.width().min(area.width as usize);
        let max_y = canvas.height().min(area.height as usize);
        for cy in 0..max_y {
            for cx in 0..max_x {
                if let Some(glyph) = canvas.glyph(cx, cy) {
                    let x = area.x + cx as u16;
                    let y = area.y + cy as u16;
                    buf[(x, y)].set_char(glyph).set_style(style);
                }
            }
        }
    }

    fn render_label(area: Rect, buf: &mut Buffer, x: u16, y: u16, text: &str, style: Style) {
        if y >= area.height || x >= area.width {
            return;
        }
        let max_len = (area.width - x) as usize;
        for (i, ch) in text.chars().take(max_len.min(16)).enumerate() {
            let px = area.x + x + i as u16;
            buf[(px, area.y + y)].set_char(ch).set_style(style);
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Self::render_canvas(
            &self.scene.graticule,
            Style::default().fg(Color::DarkGray),
            area,
            buf,
        );

        let route_modifier = if self.scene.dim_routes {
            Modifier::DIM
        } else {
            Modifier::empty()
        };
        for (slot, canvas) in self.scene.routes.iter().enumerate() {
            let style = Style::default()
                .fg(palette_color(slot))
                .add_modifier(route_modifier);
            Self::render_canvas(canvas, style, area, buf);
        }

        let label_style = Style::default().fg(Color::White);
        for (x, y, text) in &self.scene.stop_labels {
            Self::render_label(area, buf, *x, *y, text, label_style);
        }

        for (slot, canvas) in self.scene.vehicles.iter().enumerate() {
            let style = Style::default().fg(palette_color(slot));
            Self::render_canvas(canvas, style, area, buf);
        }
        for (x, y, text, slot) in &self.scene.vehicle_labels {
            let style = Style::default()
                .fg(palette_color(*slot))
                .add_modifier(Modifier::BOLD);
            Self::render_label(area, buf, *x, *y, text, style);
        }

        if let Some((cx, cy)) = self.cursor_pos {
            if cx < area.width && cy < area.height {
                buf[(area.x + cx, area.y + cy)]
                    .set_char('╋')
                    .set_fg(Color::Red);
            }
        }
    }
}

fn render_stats_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Fleet Stats ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Notices
            Constraint::Min(6),    // Distance chart
            Constraint::Length(6), // Summary
        ])
        .split(inner);

    if let Some(notice) = &app.notice {
        let (text, style) = match notice {
            Notice::UpstreamError(message) => (
                format!("Error: {message}"),
                Style::default()
                    .fg(Color::Rgb(192, 57, 43))
                    .add_modifier(Modifier::BOLD),
            ),
            Notice::NoAssignments => (
                "No assignments found.".to_string(),
                Style::default().fg(Color::Rgb(192, 57, 43)),
            ),
        };
        frame.render_widget(
            Paragraph::new(text).style(style).wrap(Wrap { trim: true }),
            sections[0],
        );
    }

    // The chart is rebuilt from scratch every frame, so a new result can
    // never leave stale bars behind.
    let bars: Vec<Bar> = app
        .assignments
        .iter()
        .enumerate()
        .map(|(idx, assignment)| {
            Bar::default()
                .label(assignment.vehicle.clone().into())
                .value(assignment.total_distance.round().max(0.0) as u64)
                .text_value(format!("{:.0}", assignment.total_distance))
                .style(Style::default().fg(palette_color(idx)))
        })
        .collect();
    let chart = BarChart::default()
        .block(Block::default().title("Distance (km)"))
        .bar_width(5)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, sections[1]);

    if let Some(stats) = &app.stats {
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().fg(Color::White);
        let summary = vec![
            Line::from(vec![
                Span::styled("Trucks used     ", label),
                Span::styled(format!("{}", stats.trucks_used), value),
            ]),
            Line::from(vec![
                Span::styled("Total distance  ", label),
                Span::styled(format!("{:.0} km", stats.total_km), value),
            ]),
            Line::from(vec![
                Span::styled("Avg. time       ", label),
                Span::styled(format!("{:.1} min", stats.est_time_min), value),
            ]),
            Line::from(vec![
                Span::styled("Fuel est.       ", label),
                Span::styled(format!("{:.2} L", stats.est_fuel_l), value),
            ]),
            Line::from(vec![
                Span::styled("Cost est.       ", label),
                Span::styled(format!("₹{:.2}", stats.est_cost), value),
            ]),
        ];
        frame.render_widget(Paragraph::new(summary), sections[2]);
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = Line::from(vec![
        Span::styled(" Zoom: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(" | Trucks: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.animation_status(),
            Style::default().fg(match app.animation_status() {
                "idle" => Color::DarkGray,
                _ => Color::Green,
            }),
        ),
        Span::styled(
            " | a:animate r:reload hjkl:pan +/-:zoom q:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(status), area);
}
