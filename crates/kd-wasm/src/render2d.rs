//! Canvas2D renderer.
//!
//! Paints a `DrawingSurface` onto an HTML `<canvas>` via
//! `CanvasRenderingContext2d`.
//!
//! The offscreen buffer is copied into a detached `<canvas>` once per
//! allocation and composited with `drawImage` on every frame.

use kd_core::canvas::{BufferCache, Canvas};
use kd_core::model::{Paint, PixelBuffer, Point, Stroke, StrokeCap, StrokeJoin};
use kd_core::surface::DrawingSurface;
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// Clear the canvas and paint the surface onto it.
pub fn render_surface(
    ctx: &CanvasRenderingContext2d,
    surface: &DrawingSurface,
    buffers: &mut BufferCache<HtmlCanvasElement>,
    canvas_width: f64,
    canvas_height: f64,
) {
    ctx.clear_rect(0.0, 0.0, canvas_width, canvas_height);
    surface.render(&mut Context2dCanvas { ctx, buffers });
}

/// `Canvas` adapter over a borrowed 2D context.
pub struct Context2dCanvas<'a> {
    pub ctx: &'a CanvasRenderingContext2d,
    pub buffers: &'a mut BufferCache<HtmlCanvasElement>,
}

impl Canvas for Context2dCanvas<'_> {
    fn draw_bitmap(&mut self, buffer: &PixelBuffer, origin: Point) {
        if buffer.width() == 0 || buffer.height() == 0 {
            return;
        }
        let source = match self.buffers.try_get_or_insert_with(buffer, buffer_canvas) {
            Ok(source) => source,
            Err(e) => {
                log::warn!("offscreen buffer upload failed: {e:?}");
                return;
            }
        };
        if let Err(e) =
            self.ctx
                .draw_image_with_html_canvas_element(source, origin.x as f64, origin.y as f64)
        {
            log::warn!("drawImage failed: {e:?}");
        }
    }

    fn draw_stroke(&mut self, stroke: &Stroke, paint: &Paint) {
        let Some((first, rest)) = stroke.points().split_first() else {
            return;
        };
        let ctx = self.ctx;
        ctx.save();
        ctx.begin_path();
        ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            ctx.line_to(p.x as f64, p.y as f64);
        }
        ctx.set_line_join(join_name(paint.join));
        ctx.set_line_cap(cap_name(paint.cap));
        ctx.set_line_width(paint.width as f64);
        ctx.set_stroke_style_str(&paint.color.to_css());
        ctx.stroke();
        ctx.restore();
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Copy the buffer's pixels into a detached `<canvas>` of the same size.
fn buffer_canvas(buffer: &PixelBuffer) -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(buffer.width());
    canvas.set_height(buffer.height());

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    let rgba = buffer.to_rgba8();
    let image = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(rgba.as_slice()),
        buffer.width(),
        buffer.height(),
    )?;
    ctx.put_image_data(&image, 0.0, 0.0)?;
    log::debug!("upload offscreen buffer {}x{}", buffer.width(), buffer.height());
    Ok(canvas)
}

fn join_name(join: StrokeJoin) -> &'static str {
    match join {
        StrokeJoin::Miter => "miter",
        StrokeJoin::Round => "round",
        StrokeJoin::Bevel => "bevel",
    }
}

fn cap_name(cap: StrokeCap) -> &'static str {
    match cap {
        StrokeCap::Butt => "butt",
        StrokeCap::Round => "round",
        StrokeCap::Square => "square",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_style_names() {
        let paint = Paint::default();
        assert_eq!(join_name(paint.join), "round");
        assert_eq!(cap_name(paint.cap), "round");
        assert_eq!(join_name(StrokeJoin::Bevel), "bevel");
        assert_eq!(cap_name(StrokeCap::Square), "square");
    }
}
