//! Integration tests: render pass ordering.
//!
//! Uses the `Recorder` canvas to capture the display list a surface emits.

use kd_core::{Color, DrawCall, DrawingSurface, Paint, Point, Recorder, TouchAction};
use pretty_assertions::assert_eq;

fn stroke(surface: &mut DrawingSurface, color: &str, from: (f32, f32), to: (f32, f32)) {
    surface.set_color(color).unwrap();
    surface.handle_touch(TouchAction::Down, from.0, from.1);
    surface.handle_touch(TouchAction::Move, to.0, to.1);
    surface.handle_touch(TouchAction::Up, to.0, to.1);
}

#[test]
fn render_before_any_input_only_composites_buffer() {
    let mut s = DrawingSurface::default();
    s.resize(800, 600);
    let mut rec = Recorder::new();
    s.render(&mut rec);
    assert_eq!(
        rec.calls,
        vec![DrawCall::Bitmap {
            width: 800,
            height: 600,
            origin: Point::ORIGIN,
        }]
    );
}

#[test]
fn render_without_buffer_is_tolerated() {
    let s = DrawingSurface::default();
    let mut rec = Recorder::new();
    s.render(&mut rec);
    assert!(rec.calls.is_empty());
}

#[test]
fn buffer_then_committed_in_order_then_in_progress() {
    let mut s = DrawingSurface::default();
    s.resize(100, 100);
    stroke(&mut s, "red", (0.0, 0.0), (50.0, 50.0));
    stroke(&mut s, "green", (50.0, 0.0), (0.0, 50.0));
    stroke(&mut s, "blue", (25.0, 0.0), (25.0, 50.0));
    s.set_color("yellow").unwrap();
    s.handle_touch(TouchAction::Down, 10.0, 10.0);
    s.handle_touch(TouchAction::Move, 20.0, 20.0);

    let mut rec = Recorder::new();
    s.render(&mut rec);

    assert!(matches!(rec.calls[0], DrawCall::Bitmap { .. }));
    let colors: Vec<Color> = rec.stroke_paints().iter().map(|p| p.color).collect();
    assert_eq!(
        colors,
        vec![
            Color::RED,
            Color::GREEN,
            Color::BLUE,
            Color(0xFFFF_FF00)
        ]
    );
    assert_eq!(
        rec.calls.last(),
        Some(&DrawCall::Stroke {
            points: vec![Point::new(10.0, 10.0), Point::new(20.0, 20.0)],
            paint: Paint::round(Color(0xFFFF_FF00), 20.0),
        })
    );
}

#[test]
fn undone_stroke_is_no_longer_rendered() {
    let mut s = DrawingSurface::default();
    stroke(&mut s, "red", (0.0, 0.0), (5.0, 5.0));
    stroke(&mut s, "blue", (0.0, 5.0), (5.0, 0.0));
    s.undo();

    let mut rec = Recorder::new();
    s.render(&mut rec);
    let colors: Vec<Color> = rec.stroke_paints().iter().map(|p| p.color).collect();
    assert_eq!(colors, vec![Color::RED]);
}

#[test]
fn each_stroke_rendered_with_its_own_width() {
    let mut s = DrawingSurface::default();
    s.set_brush_size(2.0);
    stroke(&mut s, "black", (0.0, 0.0), (1.0, 1.0));
    s.set_brush_size(12.0);
    stroke(&mut s, "black", (0.0, 0.0), (1.0, 1.0));

    let mut rec = Recorder::new();
    s.render(&mut rec);
    let widths: Vec<f32> = rec.stroke_paints().iter().map(|p| p.width).collect();
    assert_eq!(widths, vec![2.0, 12.0]);
}
