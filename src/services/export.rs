// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map export planning.
//!
//! The raster capture runs in the browser; this module decides the pixel
//! size, resolution multiplier, overlays and file name the capture uses.

use crate::time_utils::format_iso_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Screen DPI the capture scale is relative to.
const SCREEN_DPI: u32 = 96;
const ALLOWED_DPI: [u32; 3] = [72, 150, 300];
const MAX_CUSTOM_SIDE_PX: u32 = 10_000;
const DEFAULT_FILE_STEM: &str = "carte";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpg => "image/jpeg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum CaptureSize {
    #[default]
    A4,
    A3,
    #[serde(rename = "custom")]
    Custom,
}

impl CaptureSize {
    /// Pixel size at 300 DPI as (width, height), or `None` for custom.
    pub fn preset(&self, orientation: Orientation) -> Option<(u32, u32)> {
        let portrait = match self {
            CaptureSize::A4 => (2480, 3508),
            CaptureSize::A3 => (3508, 4961),
            CaptureSize::Custom => return None,
        };
        Some(match orientation {
            Orientation::Portrait => portrait,
            Orientation::Landscape => (portrait.1, portrait.0),
        })
    }
}

/// Which overlays the exported image carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExportOverlays {
    pub show_legend: bool,
    pub show_north_arrow: bool,
    pub show_scale: bool,
    pub show_logo: bool,
}

impl Default for ExportOverlays {
    fn default() -> Self {
        Self {
            show_legend: true,
            show_north_arrow: true,
            show_scale: true,
            show_logo: true,
        }
    }
}

/// Export dialog settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExportConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub format: ImageFormat,
    #[serde(default)]
    pub capture_size: CaptureSize,
    #[serde(default)]
    pub orientation: Orientation,
    /// Only read for custom capture sizes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    #[serde(flatten)]
    pub overlays: ExportOverlays,
}

fn default_dpi() -> u32 {
    300
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "Carte".to_string(),
            description: None,
            format: ImageFormat::default(),
            capture_size: CaptureSize::default(),
            orientation: Orientation::default(),
            width: None,
            height: None,
            dpi: default_dpi(),
            overlays: ExportOverlays::default(),
        }
    }
}

/// Everything the capture utility needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExportPlan {
    pub width: u32,
    pub height: u32,
    /// Capture resolution multiplier (dpi / 96)
    pub scale: f64,
    pub mime: String,
    pub file_name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub overlays: ExportOverlays,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    #[error("Unsupported resolution: {0} DPI")]
    UnsupportedDpi(u32),

    #[error("Custom size needs width and height between 1 and 10000 px")]
    InvalidSize,
}

impl ExportConfig {
    /// Resolve the config into a capture plan for an export made on `today`.
    pub fn plan(&self, today: NaiveDate) -> Result<ExportPlan, ExportError> {
        if !ALLOWED_DPI.contains(&self.dpi) {
            return Err(ExportError::UnsupportedDpi(self.dpi));
        }

        let (width, height) = match self.capture_size.preset(self.orientation) {
            Some(size) => size,
            None => match (self.width, self.height) {
                (Some(w), Some(h))
                    if (1..=MAX_CUSTOM_SIDE_PX).contains(&w)
                        && (1..=MAX_CUSTOM_SIDE_PX).contains(&h) =>
                {
                    (w, h)
                }
                _ => return Err(ExportError::InvalidSize),
            },
        };

        Ok(ExportPlan {
            width,
            height,
            scale: self.dpi as f64 / SCREEN_DPI as f64,
            mime: self.format.mime().to_string(),
            file_name: file_name(&self.title, today, self.format),
            title: self.title.trim().to_string(),
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            overlays: self.overlays,
        })
    }
}

/// `{title}_{YYYY-MM-DD}.{ext}`, with "carte" for an empty title.
pub fn file_name(title: &str, date: NaiveDate, format: ImageFormat) -> String {
    let stem: String = match title.trim() {
        "" => DEFAULT_FILE_STEM.to_string(),
        t => t.replace(['/', '\\'], "_"),
    };
    format!("{stem}_{}.{}", format_iso_date(date), format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn test_presets_follow_orientation() {
        assert_eq!(CaptureSize::A4.preset(Orientation::Portrait), Some((2480, 3508)));
        assert_eq!(CaptureSize::A4.preset(Orientation::Landscape), Some((3508, 2480)));
        assert_eq!(CaptureSize::A3.preset(Orientation::Landscape), Some((4961, 3508)));
        assert_eq!(CaptureSize::Custom.preset(Orientation::Portrait), None);
    }

    #[test]
    fn test_default_plan() {
        let plan = ExportConfig::default().plan(day()).unwrap();
        assert_eq!((plan.width, plan.height), (3508, 2480));
        assert_eq!(plan.scale, 300.0 / 96.0);
        assert_eq!(plan.mime, "image/png");
        assert_eq!(plan.file_name, "Carte_2025-03-15.png");
    }

    #[test]
    fn test_custom_size_and_empty_title() {
        let config = ExportConfig {
            title: "  ".to_string(),
            format: ImageFormat::Jpg,
            capture_size: CaptureSize::Custom,
            width: Some(1920),
            height: Some(1080),
            dpi: 72,
            ..Default::default()
        };
        let plan = config.plan(day()).unwrap();
        assert_eq!((plan.width, plan.height), (1920, 1080));
        assert_eq!(plan.scale, 0.75);
        assert_eq!(plan.file_name, "carte_2025-03-15.jpg");
    }

    #[test]
    fn test_rejects_bad_settings() {
        let bad_dpi = ExportConfig {
            dpi: 600,
            ..Default::default()
        };
        assert_eq!(bad_dpi.plan(day()), Err(ExportError::UnsupportedDpi(600)));

        let missing_size = ExportConfig {
            capture_size: CaptureSize::Custom,
            width: Some(800),
            ..Default::default()
        };
        assert_eq!(missing_size.plan(day()), Err(ExportError::InvalidSize));
    }

    #[test]
    fn test_config_accepts_dialog_json() {
        let config: ExportConfig = serde_json::from_str(
            r#"{ "title": "Balayage", "format": "jpg", "capture_size": "A3",
                 "orientation": "portrait", "dpi": 150, "show_legend": false }"#,
        )
        .unwrap();
        assert_eq!(config.capture_size, CaptureSize::A3);
        assert!(!config.overlays.show_legend);
        assert!(config.overlays.show_scale);
    }
}
