// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fill-level classification shared by map markers and list views.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Lower bound (inclusive) of the medium bucket.
pub const MEDIUM_THRESHOLD: f64 = 30.0;
/// Lower bound (inclusive) of the high bucket.
pub const HIGH_THRESHOLD: f64 = 70.0;

/// Three-tier utilization bucket, plus `Unknown` for missing readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum FillLevel {
    Unknown,
    Low,
    Medium,
    High,
}

impl FillLevel {
    /// Classify a utilization percentage.
    ///
    /// Boundaries belong to the upper bucket: 30 is medium, 70 is high.
    /// Missing and NaN readings are `Unknown`.
    pub fn classify(level: Option<f64>) -> Self {
        match level {
            None => FillLevel::Unknown,
            Some(l) if l.is_nan() => FillLevel::Unknown,
            Some(l) if l < MEDIUM_THRESHOLD => FillLevel::Low,
            Some(l) if l < HIGH_THRESHOLD => FillLevel::Medium,
            Some(_) => FillLevel::High,
        }
    }

    /// Hex color for markers, bars and badges.
    pub fn color(&self) -> &'static str {
        match self {
            FillLevel::Unknown => "#E5E7EB",
            FillLevel::Low => "#10B981",
            FillLevel::Medium => "#F59E0B",
            FillLevel::High => "#EF4444",
        }
    }
}

/// Shorthand for `FillLevel::classify(level).color()`.
pub fn fill_color(level: Option<f64>) -> &'static str {
    FillLevel::classify(level).color()
}
