//! Drawing target abstraction.
//!
//! A `Canvas` is anything a `DrawingSurface` can paint itself onto: a Vello
//! scene, an HTML canvas context, or the in-memory `Recorder` below.

use crate::model::{Paint, PixelBuffer, Point, Stroke};

/// Backend-neutral drawing target.
pub trait Canvas {
    /// Composite `buffer` with its top-left corner at `origin`.
    fn draw_bitmap(&mut self, buffer: &PixelBuffer, origin: Point);

    /// Stroke the polyline of `stroke` using `paint`.
    fn draw_stroke(&mut self, stroke: &Stroke, paint: &Paint);
}

/// A backend's upload of the offscreen buffer (image, texture, element),
/// rebuilt only when a new `PixelBuffer` is allocated.
#[derive(Debug)]
pub struct BufferCache<T> {
    entry: Option<(u64, T)>,
}

impl<T> Default for BufferCache<T> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<T> BufferCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached upload, if any.
    pub fn get(&self) -> Option<&T> {
        self.entry.as_ref().map(|(_, v)| v)
    }

    /// Return the upload for `buffer`, calling `upload` only when `buffer`
    /// is not the one cached last.
    pub fn get_or_insert_with(
        &mut self,
        buffer: &PixelBuffer,
        upload: impl FnOnce(&PixelBuffer) -> T,
    ) -> &T {
        let generation = buffer.generation();
        let hit = matches!(&self.entry, Some((cached, _)) if *cached == generation);
        if !hit {
            self.entry = Some((generation, upload(buffer)));
        }
        &self.entry.as_ref().expect("entry populated above").1
    }

    /// Fallible `get_or_insert_with`; a failed upload leaves the cache empty.
    pub fn try_get_or_insert_with<E>(
        &mut self,
        buffer: &PixelBuffer,
        upload: impl FnOnce(&PixelBuffer) -> Result<T, E>,
    ) -> Result<&T, E> {
        let generation = buffer.generation();
        let hit = matches!(&self.entry, Some((cached, _)) if *cached == generation);
        if !hit {
            self.entry = None;
            let value = upload(buffer)?;
            self.entry = Some((generation, value));
        }
        Ok(&self.entry.as_ref().expect("entry populated above").1)
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Bitmap {
        width: u32,
        height: u32,
        origin: Point,
    },
    Stroke {
        points: Vec<Point>,
        paint: Paint,
    },
}

/// A `Canvas` that keeps an ordered display list instead of drawing.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<DrawCall>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paints of the recorded stroke calls, in draw order.
    pub fn stroke_paints(&self) -> Vec<Paint> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Stroke { paint, .. } => Some(*paint),
                DrawCall::Bitmap { .. } => None,
            })
            .collect()
    }
}

impl Canvas for Recorder {
    fn draw_bitmap(&mut self, buffer: &PixelBuffer, origin: Point) {
        self.calls.push(DrawCall::Bitmap {
            width: buffer.width(),
            height: buffer.height(),
            origin,
        });
    }

    fn draw_stroke(&mut self, stroke: &Stroke, paint: &Paint) {
        self.calls.push(DrawCall::Stroke {
            points: stroke.points().to_vec(),
            paint: *paint,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_uploads_once_per_allocation() {
        let mut cache = BufferCache::new();
        let mut uploads = 0;
        let first = PixelBuffer::new(4, 4).unwrap();

        for _ in 0..3 {
            let size = *cache.get_or_insert_with(&first, |b| {
                uploads += 1;
                b.to_rgba8().len()
            });
            assert_eq!(size, 64);
        }
        assert_eq!(uploads, 1);

        let second = PixelBuffer::new(2, 2).unwrap();
        assert_eq!(*cache.get_or_insert_with(&second, |b| b.to_rgba8().len()), 16);
        assert_eq!(cache.get(), Some(&16));
    }

    #[test]
    fn failed_upload_is_retried() {
        let mut cache: BufferCache<u32> = BufferCache::new();
        let buf = PixelBuffer::new(1, 1).unwrap();
        assert_eq!(cache.try_get_or_insert_with(&buf, |_| Err("busy")), Err("busy"));
        assert!(cache.get().is_none());
        assert_eq!(cache.try_get_or_insert_with(&buf, |_| Ok::<_, &str>(7)), Ok(&7));
    }
}
