// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Layer registry with synchronous change notification.
//!
//! The registry publishes its full layer list through a `watch` channel.
//! Every mutation replaces the published snapshot before returning, so a
//! subscriber reading after a toggle always sees the toggled state.

use crate::models::layer::{clamp_opacity, Layer, LayerKind};
use serde::Serialize;
use tokio::sync::watch;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Data source names the map composition looks layers up by.
pub mod sources {
    pub const COLLECTION_POINTS: &str = "waste_collection_points";
    pub const COLLECTION_ROUTES: &str = "waste_collection_routes";
    pub const SWEEPING_ROUTES: &str = "sweeping_routes";
    pub const COVERAGE_AREAS: &str = "coverage_areas";
    pub const POPULATION_DENSITY: &str = "population_density";
}

/// Layers a freshly opened map starts with, in display order.
pub fn default_layers() -> Vec<Layer> {
    vec![
        Layer::new(
            "1",
            "Points de collecte",
            LayerKind::Point,
            sources::COLLECTION_POINTS,
            true,
        )
        .with_color("#2563EB"),
        Layer::new(
            "2",
            "Circuits de collecte",
            LayerKind::Line,
            sources::COLLECTION_ROUTES,
            true,
        )
        .with_opacity(0.8)
        .with_color("#EF4444"),
        Layer::new(
            "3",
            "Circuits de balayage",
            LayerKind::Line,
            sources::SWEEPING_ROUTES,
            true,
        )
        .with_opacity(0.8)
        .with_color("#10B981"),
        Layer::new(
            "4",
            "Zones de couverture",
            LayerKind::Polygon,
            sources::COVERAGE_AREAS,
            false,
        )
        .with_opacity(0.6),
        Layer::new(
            "5",
            "Densité de population",
            LayerKind::Raster,
            sources::POPULATION_DENSITY,
            false,
        )
        .with_opacity(0.7),
    ]
}

/// Legend swatch for one visible layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LegendEntry {
    pub layer_id: String,
    pub name: String,
    pub color: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// Build the legend for the visible layers, in display order.
    /// Returns `None` when nothing is visible.
    pub fn from_layers(layers: &[Layer]) -> Option<Self> {
        let entries: Vec<LegendEntry> = layers
            .iter()
            .filter(|l| l.visible)
            .map(|l| LegendEntry {
                layer_id: l.id.clone(),
                name: l.name.clone(),
                color: l.style.color.clone(),
                opacity: l.opacity,
            })
            .collect();

        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }
}

/// Ordered set of map layers owned by a single map view.
#[derive(Debug)]
pub struct LayerRegistry {
    tx: watch::Sender<Vec<Layer>>,
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new(default_layers())
    }
}

impl LayerRegistry {
    pub fn new(layers: Vec<Layer>) -> Self {
        let layers = layers
            .into_iter()
            .map(|mut l| {
                l.opacity = clamp_opacity(l.opacity).unwrap_or(1.0);
                l
            })
            .collect();
        let (tx, _rx) = watch::channel(layers);
        Self { tx }
    }

    /// Current layers in display order.
    pub fn layers(&self) -> Vec<Layer> {
        self.tx.borrow().clone()
    }

    /// Layers that belong to the active render set.
    pub fn visible_layers(&self) -> Vec<Layer> {
        self.tx.borrow().iter().filter(|l| l.visible).cloned().collect()
    }

    pub fn legend(&self) -> Option<Legend> {
        Legend::from_layers(&self.tx.borrow())
    }

    /// Subscribe to layer changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Layer>> {
        self.tx.subscribe()
    }

    pub fn layer_by_source(&self, source: &str) -> Option<Layer> {
        self.tx.borrow().iter().find(|l| l.source == source).cloned()
    }

    /// True only when a layer for `source` exists and is switched off.
    pub fn is_source_hidden(&self, source: &str) -> bool {
        self.layer_by_source(source).is_some_and(|l| !l.visible)
    }

    /// Flip visibility of one layer. Unknown ids change nothing.
    ///
    /// Returns whether a layer was toggled.
    pub fn toggle_visibility(&self, layer_id: &str) -> bool {
        let toggled = self.tx.send_if_modified(|layers| {
            match layers.iter_mut().find(|l| l.id == layer_id) {
                Some(layer) => {
                    layer.visible = !layer.visible;
                    true
                }
                None => false,
            }
        });

        if toggled {
            tracing::debug!(layer_id, "Layer visibility toggled");
        }
        toggled
    }

    /// Set one layer's opacity, clamped into `[0, 1]`.
    ///
    /// Returns the stored opacity, or `None` for an unknown id or NaN input.
    pub fn set_opacity(&self, layer_id: &str, opacity: f64) -> Option<f64> {
        let clamped = clamp_opacity(opacity)?;
        let mut stored = None;

        self.tx.send_if_modified(|layers| {
            match layers.iter_mut().find(|l| l.id == layer_id) {
                Some(layer) => {
                    stored = Some(clamped);
                    let changed = layer.opacity != clamped;
                    layer.opacity = clamped;
                    changed
                }
                None => false,
            }
        });

        stored
    }
}
