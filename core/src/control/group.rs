use serde_json::{json, Value};

use crate::control::normalize::IsolineResult;
use crate::prelude::MapSurface;

/// Accumulating collection of rendered isoline results. Insertion order is
/// creation order; the group is attached to the map surface iff non-empty.
#[derive(Default)]
pub struct IsolineLayerGroup {
    results: Vec<IsolineResult>,
    attached: bool,
}

impl IsolineLayerGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn results(&self) -> &[IsolineResult] {
        &self.results
    }

    pub fn get(&self, id: u64) -> Option<&IsolineResult> {
        self.results.iter().find(|result| result.id == id)
    }

    pub fn add(&mut self, result: IsolineResult, surface: &mut dyn MapSurface) {
        surface.render_result(&result);
        self.results.push(result);
        if !self.attached {
            surface.attach_group();
            self.attached = true;
        }
    }

    /// Removes one result atomically, origin marker included. Detaches from
    /// the surface when this empties the group.
    pub fn remove_one(&mut self, id: u64, surface: &mut dyn MapSurface) -> Option<IsolineResult> {
        let index = self.results.iter().position(|result| result.id == id)?;
        let removed = self.results.remove(index);
        surface.remove_result(id);
        if self.results.is_empty() {
            self.detach_from_surface(surface);
        }
        Some(removed)
    }

    /// Clears every result and detaches from the surface.
    pub fn remove_all(&mut self, surface: &mut dyn MapSurface) {
        for result in self.results.drain(..) {
            surface.remove_result(result.id);
        }
        self.detach_from_surface(surface);
    }

    pub fn detach_from_surface(&mut self, surface: &mut dyn MapSurface) {
        if self.attached {
            surface.detach_group();
            self.attached = false;
        }
    }

    /// Serializes every currently-displayed feature into one portable
    /// GeoJSON feature collection.
    pub fn to_feature_collection(&self) -> Value {
        let features: Vec<Value> = self
            .results
            .iter()
            .flat_map(|result| result.features.iter().map(|f| f.to_geojson()))
            .collect();

        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}
