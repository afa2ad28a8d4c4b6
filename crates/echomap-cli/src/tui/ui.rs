//! TUI rendering — status bar, sensor panel, map canvas.
//!
//! ┌──────────────────────────────────────────────────┐
//! │  echomap    ● connected    speed 2    #142       │
//! ├──────────────┬───────────────────────────────────┤
//! │  Sensors     │                                   │
//! │  front 50 cm │          · · ·╷· · ·              │
//! │  right  --   │           ····●────               │
//! │  back  30 cm │               ╵                   │
//! │  left 100 cm │          (2D map, 600×600)        │
//! │  Mapping on  │                                   │
//! │  Trail   on  │                                   │
//! ├──────────────┴───────────────────────────────────┤
//! │  s: start  x: stop  r: reset  t: trail  ↑↓ speed │
//! └──────────────────────────────────────────────────┘
//!
//! The map canvas keeps the rover's world coordinates (y down); only the
//! final plot flips y so "forward" points up on screen.

use ratatui::prelude::*;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Paragraph};

use echomap_core::{Bearing, LinkState, SURFACE_SIZE, Shape, build_scene};

use super::app::App;

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(10),   // main
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    draw_title(f, rows[0], app);
    draw_main(f, rows[1], app);
    draw_keys(f, rows[2]);
}

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let state = app.link_state();
    let dot_style = match state {
        LinkState::Open => Style::default().fg(Color::Green),
        LinkState::Connecting => Style::default().fg(Color::Yellow),
        LinkState::Closed => Style::default().fg(Color::Red),
    };

    let control = app.session().control();
    let mapping = if control.mapping_active { "on" } else { "off" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(" echomap ", Style::default().bold().fg(Color::Cyan)),
            Span::styled(" ● ", dot_style),
            Span::raw(state.to_string()),
            Span::styled(
                format!(
                    "  speed {:.0}  mapping {mapping}  #{} ",
                    control.speed,
                    app.frame_count()
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

    f.render_widget(block, area);
}

fn draw_main(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(20)])
        .split(area);

    draw_sensors(f, cols[0], app);
    draw_map(f, cols[1], app);
}

fn draw_sensors(f: &mut Frame, area: Rect, app: &App) {
    let frame = app.latest_frame();
    let control = app.session().control();

    let mut lines: Vec<Line> = Bearing::ALL
        .iter()
        .map(|&bearing| {
            let value = frame.map(|fr| fr.reading(bearing));
            Line::from(vec![
                Span::styled(
                    format!("{:>6}: ", bearing.to_string()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(reading_label(value)),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(status_line("mapping", control.mapping_active));
    lines.push(status_line("trail", control.show_trail));

    let block = Block::default().borders(Borders::ALL).title(" Sensors ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn status_line(name: &str, on: bool) -> Line<'_> {
    let style = if on {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(format!("{name:>7}: "), Style::default().fg(Color::Cyan)),
        Span::styled(if on { "on" } else { "off" }, style),
    ])
}

/// Sensor readout text: centimeters, or `--` before the first frame and for
/// the no-echo sentinel.
fn reading_label(value: Option<f64>) -> String {
    match value {
        Some(v) if v >= 0.0 => format!("{v:.0} cm"),
        _ => "--".to_string(),
    }
}

fn draw_map(f: &mut Frame, area: Rect, app: &App) {
    let shapes = build_scene(
        app.session().tracker(),
        app.session().control().show_trail,
        app.latest_frame(),
    );

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(" 2D Map "))
        .x_bounds([0.0, SURFACE_SIZE])
        .y_bounds([0.0, SURFACE_SIZE])
        .paint(move |ctx| {
            for shape in &shapes {
                paint_shape(ctx, shape);
            }
        });

    f.render_widget(canvas, area);
}

/// World y grows downward; the terminal canvas y grows upward.
fn flip(y: f64) -> f64 {
    SURFACE_SIZE - y
}

fn paint_shape(ctx: &mut ratatui::widgets::canvas::Context, shape: &Shape) {
    match shape {
        Shape::GridLine { vertical, offset } => {
            let line = if *vertical {
                CanvasLine::new(*offset, 0.0, *offset, SURFACE_SIZE, Color::DarkGray)
            } else {
                CanvasLine::new(0.0, flip(*offset), SURFACE_SIZE, flip(*offset), Color::DarkGray)
            };
            ctx.draw(&line);
        }
        Shape::Trail(points) => {
            for pair in points.windows(2) {
                ctx.draw(&CanvasLine::new(
                    pair[0].x,
                    flip(pair[0].y),
                    pair[1].x,
                    flip(pair[1].y),
                    Color::Gray,
                ));
            }
        }
        Shape::Robot(at) => {
            ctx.draw(&Circle {
                x: at.x,
                y: flip(at.y),
                radius: 6.0,
                color: Color::Cyan,
            });
        }
        Shape::Echo { from, to } => {
            ctx.draw(&CanvasLine::new(
                from.x,
                flip(from.y),
                to.x,
                flip(to.y),
                Color::Green,
            ));
        }
        Shape::Obstacle(at) => {
            ctx.draw(&Points {
                coords: &[(at.x, flip(at.y))],
                color: Color::Red,
            });
        }
    }
}

fn draw_keys(f: &mut Frame, area: Rect) {
    let bar = Paragraph::new(" s: start   x: stop   r: reset map   t: trail   ↑↓ speed   q: quit")
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}
