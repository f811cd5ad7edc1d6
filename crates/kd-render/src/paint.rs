//! Drawing surface → Vello drawing commands.
//!
//! Composites the offscreen buffer as an image, then strokes every polyline
//! with round joins and caps. The buffer image is built once per allocation
//! and kept in a `BufferCache` across frames, so Vello sees the same blob id
//! and its image atlas is not re-uploaded on every repaint.

use kd_core::canvas::{BufferCache, Canvas};
use kd_core::model::{Color, Paint, PixelBuffer, Point, Stroke, StrokeCap, StrokeJoin};
use kd_core::surface::DrawingSurface;
use kurbo::{Affine, BezPath, Cap, Join, Stroke as KurboStroke};
use peniko::{Blob, Image, ImageFormat};
use vello::Scene;

/// Paint `surface` into a Vello scene.
///
/// Call once per frame with a freshly-cleared `Scene`, passing the same
/// `images` cache every time. The caller presents the scene via wgpu.
pub fn paint_surface(
    scene: &mut Scene,
    surface: &DrawingSurface,
    images: &mut BufferCache<Image>,
) {
    let mut canvas = SceneCanvas::new(scene, images);
    surface.render(&mut canvas);
    log::trace!(
        "PAINT {} strokes, {} images",
        canvas.strokes_painted,
        canvas.images_painted
    );
}

/// `Canvas` adapter over a borrowed `vello::Scene`.
pub struct SceneCanvas<'a> {
    scene: &'a mut Scene,
    images: &'a mut BufferCache<Image>,
    strokes_painted: usize,
    images_painted: usize,
}

impl<'a> SceneCanvas<'a> {
    pub fn new(scene: &'a mut Scene, images: &'a mut BufferCache<Image>) -> Self {
        Self {
            scene,
            images,
            strokes_painted: 0,
            images_painted: 0,
        }
    }

    pub fn strokes_painted(&self) -> usize {
        self.strokes_painted
    }

    pub fn images_painted(&self) -> usize {
        self.images_painted
    }
}

impl Canvas for SceneCanvas<'_> {
    fn draw_bitmap(&mut self, buffer: &PixelBuffer, origin: Point) {
        if buffer.width() == 0 || buffer.height() == 0 {
            return;
        }
        let image = self.images.get_or_insert_with(buffer, buffer_image);
        let at = Affine::translate((origin.x as f64, origin.y as f64));
        self.scene.draw_image(image, at);
        self.images_painted += 1;
    }

    fn draw_stroke(&mut self, stroke: &Stroke, paint: &Paint) {
        if stroke.is_empty() {
            return;
        }
        let path = stroke_path(stroke.points());
        self.scene.stroke(
            &stroke_style(paint),
            Affine::IDENTITY,
            to_color(paint.color),
            None,
            &path,
        );
        self.strokes_painted += 1;
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Upload the buffer's pixels as an RGBA8 image.
pub fn buffer_image(buffer: &PixelBuffer) -> Image {
    log::debug!("upload offscreen buffer {}x{}", buffer.width(), buffer.height());
    Image::new(
        Blob::from(buffer.to_rgba8()),
        ImageFormat::Rgba8,
        buffer.width(),
        buffer.height(),
    )
}

/// Polyline through `points` as a Bézier path of line segments.
pub fn stroke_path(points: &[Point]) -> BezPath {
    let mut bez = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        bez.move_to((first.x as f64, first.y as f64));
        for p in iter {
            bez.line_to((p.x as f64, p.y as f64));
        }
    }
    bez
}

pub fn stroke_style(paint: &Paint) -> KurboStroke {
    KurboStroke {
        width: paint.width as f64,
        join: map_join(paint.join),
        start_cap: map_cap(paint.cap),
        end_cap: map_cap(paint.cap),
        ..Default::default()
    }
}

pub fn to_color(color: Color) -> peniko::Color {
    peniko::Color::from_rgba8(color.red(), color.green(), color.blue(), color.alpha())
}

fn map_cap(cap: StrokeCap) -> Cap {
    match cap {
        StrokeCap::Butt => Cap::Butt,
        StrokeCap::Round => Cap::Round,
        StrokeCap::Square => Cap::Square,
    }
}

fn map_join(join: StrokeJoin) -> Join {
    match join {
        StrokeJoin::Miter => Join::Miter,
        StrokeJoin::Round => Join::Round,
        StrokeJoin::Bevel => Join::Bevel,
    }
}
