//! Initial brush and display settings for a drawing surface.

use crate::model::Color;
use serde::{Deserialize, Serialize};

/// Settings a host hands to `DrawingSurface::new`.
///
/// Every field has a default, so a host may supply any subset
/// (e.g. `{"color": "#FF0000"}` from JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Initial brush color; any syntax accepted by `parse_color`.
    pub color: String,
    /// Initial brush size in dp.
    pub brush_size: f32,
    /// Device pixels per dp.
    pub density: f32,
}

impl SurfaceConfig {
    pub const DEFAULT_COLOR: Color = Color::BLACK;
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            color: Self::DEFAULT_COLOR.to_hex(),
            brush_size: 20.0,
            density: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_fills_defaults() {
        let config: SurfaceConfig = serde_json::from_str(r#"{"density": 2.5}"#).unwrap();
        assert_eq!(
            config,
            SurfaceConfig {
                density: 2.5,
                ..SurfaceConfig::default()
            }
        );
    }
}
