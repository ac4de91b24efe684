// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map layer model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const DEFAULT_LAYER_COLOR: &str = "#4A5568";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum LayerKind {
    Point,
    Line,
    Polygon,
    Raster,
}

/// Drawing style of a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LayerStyle {
    /// Hex color used for features and the legend swatch
    pub color: String,
    /// Stroke width in pixels (line layers)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_LAYER_COLOR.to_string(),
            weight: None,
        }
    }
}

/// One visual layer of the map.
///
/// `opacity` is kept within `[0, 1]`; use [`Layer::with_opacity`] or the
/// registry setters rather than writing the field directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Layer {
    pub id: String,
    pub name: String,
    pub kind: LayerKind,
    /// Name of the data source feeding this layer
    pub source: String,
    pub visible: bool,
    pub opacity: f64,
    #[serde(default)]
    pub style: LayerStyle,
}

impl Layer {
    pub fn new(id: &str, name: &str, kind: LayerKind, source: &str, visible: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            source: source.to_string(),
            visible,
            opacity: 1.0,
            style: LayerStyle::default(),
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = clamp_opacity(opacity).unwrap_or(self.opacity);
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.style.color = color.to_string();
        self
    }
}

/// Clamp an opacity into `[0, 1]`. NaN has no meaningful clamp and yields `None`.
pub fn clamp_opacity(opacity: f64) -> Option<f64> {
    if opacity.is_nan() {
        None
    } else {
        Some(opacity.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_opacity() {
        assert_eq!(clamp_opacity(1.7), Some(1.0));
        assert_eq!(clamp_opacity(-0.2), Some(0.0));
        assert_eq!(clamp_opacity(0.4), Some(0.4));
        assert_eq!(clamp_opacity(f64::NAN), None);
        assert_eq!(clamp_opacity(f64::INFINITY), Some(1.0));
    }
}
