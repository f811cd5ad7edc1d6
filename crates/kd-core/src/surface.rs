//! The drawing surface: touch input in, strokes out.
//!
//! `DrawingSurface` owns the committed strokes, the stroke being drawn, the
//! undo pile, the offscreen buffer, and the brush. The host drives it with
//! explicit calls (`resize`, `handle_touch`, `render`, the brush setters and
//! `undo`) from a single UI thread.
//!
//! ## Touch state machine
//!
//! | Action | Effect |
//! |--------|--------|
//! | `Down` | In-progress stroke takes the current brush, is cleared, starts at (x, y) |
//! | `Move` | Segment from the current endpoint to (x, y) |
//! | `Up`   | In-progress stroke is committed; a fresh one takes its place |
//! | other  | Not consumed, no repaint |

use crate::canvas::Canvas;
use crate::color::parse_color;
use crate::config::SurfaceConfig;
use crate::error::ColorError;
use crate::model::{Color, Density, Paint, PixelBuffer, Point, Stroke};

/// Pointer action delivered with a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
    /// Any action the surface does not handle (cancel, hover, secondary pointers...).
    Other(i32),
}

impl TouchAction {
    pub const CODE_DOWN: i32 = 0;
    pub const CODE_UP: i32 = 1;
    pub const CODE_MOVE: i32 = 2;

    /// Map a platform motion-event action code.
    pub fn from_code(code: i32) -> Self {
        match code {
            Self::CODE_DOWN => Self::Down,
            Self::CODE_UP => Self::Up,
            Self::CODE_MOVE => Self::Move,
            other => Self::Other(other),
        }
    }

    /// Map a DOM pointer event type (`pointerdown`, `pointermove`, `pointerup`).
    pub fn from_event_type(name: &str) -> Self {
        match name {
            "pointerdown" | "touchstart" | "mousedown" => Self::Down,
            "pointermove" | "touchmove" | "mousemove" => Self::Move,
            "pointerup" | "touchend" | "mouseup" => Self::Up,
            _ => Self::Other(-1),
        }
    }
}

/// A single-view freehand drawing surface.
#[derive(Debug)]
pub struct DrawingSurface {
    buffer: Option<PixelBuffer>,
    /// Committed strokes; index order is paint order.
    strokes: Vec<Stroke>,
    /// Strokes removed by `undo`, most recent last.
    discarded: Vec<Stroke>,
    current: Stroke,
    brush_color: Color,
    /// Brush thickness in device pixels.
    brush_size: f32,
    density: Density,
    paint: Paint,
    redraw_requested: bool,
}

impl Default for DrawingSurface {
    fn default() -> Self {
        let config = SurfaceConfig::default();
        Self::with_brush(
            SurfaceConfig::DEFAULT_COLOR,
            config.brush_size,
            Density::new(config.density),
        )
    }
}

impl DrawingSurface {
    /// Create a surface from host settings.
    ///
    /// Fails only if `config.color` is not a valid color specification.
    pub fn new(config: &SurfaceConfig) -> Result<Self, ColorError> {
        let color = parse_color(&config.color)?;
        Ok(Self::with_brush(
            color,
            config.brush_size,
            Density::new(config.density),
        ))
    }

    fn with_brush(color: Color, brush_size_dp: f32, density: Density) -> Self {
        let brush_size = density.dp_to_px(brush_size_dp);
        Self {
            buffer: None,
            strokes: Vec::new(),
            discarded: Vec::new(),
            current: Stroke::new(color, brush_size),
            brush_color: color,
            brush_size,
            density,
            paint: Paint::round(color, brush_size),
            redraw_requested: false,
        }
    }

    // ─── Host lifecycle ──────────────────────────────────────────────────

    /// Reallocate the offscreen buffer for a new view size.
    ///
    /// A call with the current dimensions keeps the existing buffer, and so
    /// does a size too large to address.
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(buf) = &self.buffer
            && buf.width() == width
            && buf.height() == height
        {
            log::trace!("resize {width}x{height}: unchanged");
            return;
        }
        match PixelBuffer::new(width, height) {
            Some(buf) => {
                log::debug!("resize offscreen buffer to {width}x{height}");
                self.buffer = Some(buf);
            }
            None => log::warn!("resize {width}x{height}: buffer too large, keeping previous"),
        }
    }

    /// Paint the buffer, then every committed stroke in order, then the
    /// in-progress stroke if it has any points.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        if let Some(buf) = &self.buffer {
            canvas.draw_bitmap(buf, Point::ORIGIN);
        }

        for stroke in &self.strokes {
            canvas.draw_stroke(stroke, &self.paint.for_stroke(stroke));
        }

        if !self.current.is_empty() {
            canvas.draw_stroke(&self.current, &self.paint.for_stroke(&self.current));
        }
        log::trace!(
            "render: {} committed, {} in-progress points",
            self.strokes.len(),
            self.current.len()
        );
    }

    /// Feed one touch event. Returns `true` if the event was consumed.
    pub fn handle_touch(&mut self, action: TouchAction, x: f32, y: f32) -> bool {
        let point = Point::new(x, y);
        match action {
            TouchAction::Down => {
                self.current.set_brush(self.brush_color, self.brush_size);
                self.current.move_to(point);
            }
            TouchAction::Move => {
                log::trace!("touch move ({x}, {y})");
                self.current.line_to(point);
            }
            TouchAction::Up => {
                let fresh = Stroke::new(self.brush_color, self.brush_size);
                let done = std::mem::replace(&mut self.current, fresh);
                log::debug!(
                    "commit stroke #{}: {} points, {} {}px",
                    self.strokes.len(),
                    done.len(),
                    done.color(),
                    done.thickness()
                );
                self.strokes.push(done);
            }
            TouchAction::Other(code) => {
                log::trace!("ignored touch action {code}");
                return false;
            }
        }
        self.invalidate();
        true
    }

    // ─── Brush ───────────────────────────────────────────────────────────

    /// Set the brush size for future strokes, in dp.
    pub fn set_brush_size(&mut self, size_dp: f32) {
        self.brush_size = self.density.dp_to_px(size_dp);
        self.paint.width = self.brush_size;
        log::debug!("brush size {size_dp}dp -> {}px", self.brush_size);
    }

    /// Set the brush color for future strokes.
    ///
    /// On error the active color is left unchanged.
    pub fn set_color(&mut self, spec: &str) -> Result<(), ColorError> {
        let color = parse_color(spec).inspect_err(|e| log::warn!("set_color: {e}"))?;
        self.brush_color = color;
        self.paint.color = color;
        log::debug!("brush color {color}");
        Ok(())
    }

    /// Update the dp → px conversion used by later `set_brush_size` calls.
    pub fn set_density(&mut self, density: Density) {
        self.density = density;
    }

    // ─── Undo ────────────────────────────────────────────────────────────

    /// Remove the most recent committed stroke. No-op when there is none.
    pub fn undo(&mut self) {
        if let Some(stroke) = self.strokes.pop() {
            log::debug!("undo stroke #{}", self.strokes.len());
            self.discarded.push(stroke);
            self.invalidate();
        }
    }

    // ─── Repaint scheduling ──────────────────────────────────────────────

    fn invalidate(&mut self) {
        self.redraw_requested = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw_requested
    }

    /// Return and clear the pending repaint request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn discarded(&self) -> &[Stroke] {
        &self.discarded
    }

    pub fn current_stroke(&self) -> &Stroke {
        &self.current
    }

    pub fn brush_color(&self) -> Color {
        self.brush_color
    }

    /// Brush thickness in device pixels.
    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    /// The shared paint as last set by the brush setters.
    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }
}
