//! Core data model for KD drawings.
//!
//! A drawing is an ordered list of `Stroke`s. Each stroke is a polyline in
//! device pixels tagged with the color and thickness that were active when
//! the finger went down. Strokes are plain values: they hold no reference
//! back to the surface that produced them.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// Packed 32-bit ARGB color (`0xAARRGGBB`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const TRANSPARENT: Color = Color(0x0000_0000);
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const RED: Color = Color(0xFFFF_0000);
    pub const GREEN: Color = Color(0xFF00_FF00);
    pub const BLUE: Color = Color(0xFF00_00FF);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Emit as `#RRGGBB` when opaque, `#AARRGGBB` otherwise.
    pub fn to_hex(self) -> String {
        if self.alpha() == 0xFF {
            format!("#{:06X}", self.0 & 0x00FF_FFFF)
        } else {
            format!("#{:08X}", self.0)
        }
    }

    /// CSS `rgba(...)` string for Canvas2D style setters.
    pub fn to_css(self) -> String {
        let a = self.alpha() as f32 / 255.0;
        format!(
            "rgba({}, {}, {}, {})",
            self.red(),
            self.green(),
            self.blue(),
            (a * 1000.0).round() / 1000.0
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(#{:08X})", self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// A position on the surface in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Converts device-independent units (dp) to device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Density {
    /// Device pixels per dp.
    pub scale: f32,
}

impl Density {
    /// Dots-per-inch of the baseline density bucket (1 dp == 1 px).
    pub const BASELINE_DPI: f32 = 160.0;

    pub const fn new(scale: f32) -> Self {
        Self { scale }
    }

    pub fn from_dpi(dpi: f32) -> Self {
        Self {
            scale: dpi / Self::BASELINE_DPI,
        }
    }

    pub fn dp_to_px(&self, dp: f32) -> f32 {
        dp * self.scale
    }
}

impl Default for Density {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

// ─── Stroke ──────────────────────────────────────────────────────────────

/// One continuous drag gesture: a polyline plus the brush it was drawn with.
///
/// `color` and `thickness` are fixed when the stroke is created; later brush
/// changes never reach an existing stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    color: Color,
    /// Width in device pixels.
    thickness: f32,
    points: Vec<Point>,
}

impl Stroke {
    pub fn new(color: Color, thickness: f32) -> Self {
        Self {
            color,
            thickness,
            points: Vec::new(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` until the stroke has received its first point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Start the polyline at `p`. Any existing geometry is discarded.
    pub fn move_to(&mut self, p: Point) {
        self.points.clear();
        self.points.push(p);
    }

    /// Append a segment from the current endpoint to `p`.
    ///
    /// A stroke with no starting point begins at the origin, so the first
    /// segment runs from (0, 0) to `p`.
    pub fn line_to(&mut self, p: Point) {
        if self.points.is_empty() {
            self.points.push(Point::ORIGIN);
        }
        self.points.push(p);
    }

    /// Re-tag the brush of a stroke that is still being built.
    pub(crate) fn set_brush(&mut self, color: Color, thickness: f32) {
        self.color = color;
        self.thickness = thickness;
    }
}

// ─── Paint ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeCap {
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeJoin {
    Miter,
    Round,
    Bevel,
}

/// Style used to stroke a path: width, color, join and cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub color: Color,
    pub width: f32,
    pub join: StrokeJoin,
    pub cap: StrokeCap,
}

impl Paint {
    /// Round-joined, round-capped paint; the only style strokes are drawn with.
    pub const fn round(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            join: StrokeJoin::Round,
            cap: StrokeCap::Round,
        }
    }

    /// Same style with width and color taken from `stroke`.
    pub fn for_stroke(&self, stroke: &Stroke) -> Self {
        Self {
            color: stroke.color(),
            width: stroke.thickness(),
            ..*self
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::round(Color::BLACK, 0.0)
    }
}

// ─── Offscreen buffer ────────────────────────────────────────────────────

/// A width × height grid of packed ARGB pixels, initially transparent.
///
/// Contents never change after allocation. Each allocation gets a distinct
/// `generation`, so backends can key uploads on it (see `BufferCache`).
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    generation: u64,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Allocate a transparent buffer.
    ///
    /// `None` when the RGBA8 byte size does not fit in `usize`.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static GENERATION: AtomicU64 = AtomicU64::new(0);

        let len = (width as usize).checked_mul(height as usize)?;
        len.checked_mul(4)?;
        Some(Self {
            width,
            height,
            generation: GENERATION.fetch_add(1, Ordering::Relaxed),
            pixels: vec![Color::TRANSPARENT.argb(); len],
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Straight-alpha RGBA8 bytes, row-major, for image uploads.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for &argb in &self.pixels {
            let c = Color(argb);
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_channels() {
        let c = Color::from_argb(0x80, 0x12, 0x34, 0x56);
        assert_eq!(c.argb(), 0x8012_3456);
        assert_eq!(c.alpha(), 0x80);
        assert_eq!(c.red(), 0x12);
        assert_eq!(c.green(), 0x34);
        assert_eq!(c.blue(), 0x56);
    }

    #[test]
    fn color_hex_output() {
        assert_eq!(Color::RED.to_hex(), "#FF0000");
        assert_eq!(Color(0x80FF_0000).to_hex(), "#80FF0000");
    }

    #[test]
    fn color_css_output() {
        assert_eq!(Color::BLUE.to_css(), "rgba(0, 0, 255, 1)");
        assert_eq!(Color(0x0000_0000).to_css(), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn density_conversion() {
        assert_eq!(Density::default().dp_to_px(12.0), 12.0);
        assert_eq!(Density::from_dpi(480.0).dp_to_px(10.0), 30.0);
    }

    #[test]
    fn line_to_on_empty_stroke_starts_at_origin() {
        let mut s = Stroke::new(Color::BLACK, 1.0);
        s.line_to(Point::new(5.0, 5.0));
        assert_eq!(s.points(), &[Point::ORIGIN, Point::new(5.0, 5.0)]);
    }

    #[test]
    fn move_to_discards_previous_geometry() {
        let mut s = Stroke::new(Color::BLACK, 1.0);
        s.move_to(Point::new(1.0, 1.0));
        s.line_to(Point::new(2.0, 2.0));
        s.move_to(Point::new(9.0, 9.0));
        assert_eq!(s.points(), &[Point::new(9.0, 9.0)]);
    }

    #[test]
    fn paint_for_stroke_keeps_round_style() {
        let s = Stroke::new(Color::RED, 7.5);
        let p = Paint::default().for_stroke(&s);
        assert_eq!(p, Paint::round(Color::RED, 7.5));
    }

    #[test]
    fn pixel_buffer_starts_transparent() {
        let buf = PixelBuffer::new(3, 2).unwrap();
        assert_eq!(buf.pixels().len(), 6);
        assert!(buf.pixels().iter().all(|&p| Color(p) == Color::TRANSPARENT));
        assert_eq!(buf.to_rgba8().len(), 24);
        assert!(buf.to_rgba8().iter().all(|&b| b == 0));
    }

    #[test]
    fn pixel_buffer_refuses_overflowing_size() {
        assert!(PixelBuffer::new(u32::MAX, u32::MAX).is_none());
    }

    #[test]
    fn each_allocation_gets_new_generation() {
        let a = PixelBuffer::new(2, 2).unwrap();
        let b = PixelBuffer::new(2, 2).unwrap();
        assert_ne!(a.generation(), b.generation());
        assert_eq!(a.clone().generation(), a.generation());
    }

    #[test]
    fn stroke_serializes_as_plain_value() {
        let mut s = Stroke::new(Color::RED, 4.0);
        s.move_to(Point::new(1.0, 2.0));
        let json = serde_json::to_string(&s).unwrap();
        let back: Stroke = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
