//! WASM bridge for KD — exposes the drawing surface to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the `<canvas>`
//! element and forwards size changes, pointer events, and repaint requests;
//! method names follow the drawing view API (`onTouchEvent`,
//! `setSizeForBrush`, `onClickUndo`, ...).

mod render2d;

use kd_core::canvas::BufferCache;
use kd_core::config::SurfaceConfig;
use kd_core::model::Density;
use kd_core::surface::{DrawingSurface, TouchAction};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// The WASM-facing drawing view.
#[wasm_bindgen]
pub struct KdCanvas {
    surface: DrawingSurface,
    /// Offscreen buffer copied to a detached canvas, reused until reallocated.
    buffers: BufferCache<HtmlCanvasElement>,
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl KdCanvas {
    /// Create a view with default brush settings.
    ///
    /// `density` is device pixels per CSS pixel (`window.devicePixelRatio`).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, density: f32) -> Self {
        console_error_panic_hook_setup();
        let config = SurfaceConfig {
            density,
            ..SurfaceConfig::default()
        };
        let surface = DrawingSurface::new(&config).unwrap_or_default();
        Self::with_surface(surface, width, height)
    }

    /// Create a view from a JSON `SurfaceConfig`, e.g. `{"color":"#FF0000"}`.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str, width: u32, height: u32) -> Result<KdCanvas, JsValue> {
        console_error_panic_hook_setup();
        let surface =
            surface_from_json(config_json).map_err(|e| JsValue::from(js_sys::Error::new(&e)))?;
        Ok(Self::with_surface(surface, width, height))
    }

    /// The canvas element changed size.
    #[wasm_bindgen(js_name = onSizeChanged)]
    pub fn on_size_changed(&mut self, width: u32, height: u32, old_width: u32, old_height: u32) {
        log::debug!("canvas {old_width}x{old_height} -> {width}x{height}");
        self.width = width;
        self.height = height;
        self.surface.resize(width, height);
    }

    /// Paint the drawing and clear the pending repaint request.
    #[wasm_bindgen(js_name = onDraw)]
    pub fn on_draw(&mut self, ctx: &CanvasRenderingContext2d) {
        render2d::render_surface(
            ctx,
            &self.surface,
            &mut self.buffers,
            self.width as f64,
            self.height as f64,
        );
        self.surface.take_redraw_request();
    }

    /// Handle a touch event by platform action code (0 down, 1 up, 2 move).
    /// Returns `true` if the event was consumed.
    #[wasm_bindgen(js_name = onTouchEvent)]
    pub fn on_touch_event(&mut self, action: i32, x: f32, y: f32) -> bool {
        self.surface.handle_touch(TouchAction::from_code(action), x, y)
    }

    /// Handle a DOM pointer event by its `type` (`pointerdown`, ...).
    #[wasm_bindgen(js_name = onPointerEvent)]
    pub fn on_pointer_event(&mut self, event_type: &str, x: f32, y: f32) -> bool {
        self.surface
            .handle_touch(TouchAction::from_event_type(event_type), x, y)
    }

    /// Brush size in CSS pixels for future strokes.
    #[wasm_bindgen(js_name = setSizeForBrush)]
    pub fn set_size_for_brush(&mut self, new_size: f32) {
        self.surface.set_brush_size(new_size);
    }

    /// Brush color for future strokes. Throws on an unrecognized color.
    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&mut self, new_color: &str) -> Result<(), JsValue> {
        self.surface
            .set_color(new_color)
            .map_err(|e| js_sys::Error::new(&e.to_string()).into())
    }

    #[wasm_bindgen(js_name = onClickUndo)]
    pub fn on_click_undo(&mut self) {
        self.surface.undo();
    }

    /// Update the dp → px scale (e.g. after moving to another monitor).
    #[wasm_bindgen(js_name = setDensity)]
    pub fn set_density(&mut self, scale: f32) {
        self.surface.set_density(Density::new(scale));
    }

    /// Whether the page should schedule an `onDraw`.
    #[wasm_bindgen(js_name = needsRedraw)]
    pub fn needs_redraw(&self) -> bool {
        self.surface.needs_redraw()
    }

    #[wasm_bindgen(js_name = strokeCount)]
    pub fn stroke_count(&self) -> usize {
        self.surface.strokes().len()
    }
}

impl KdCanvas {
    fn with_surface(mut surface: DrawingSurface, width: u32, height: u32) -> Self {
        surface.resize(width, height);
        Self {
            surface,
            buffers: BufferCache::new(),
            width,
            height,
        }
    }
}

fn surface_from_json(config_json: &str) -> Result<DrawingSurface, String> {
    let config: SurfaceConfig =
        serde_json::from_str(config_json).map_err(|e| format!("Config parse error: {e}"))?;
    DrawingSurface::new(&config).map_err(|e| e.to_string())
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("KD WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
