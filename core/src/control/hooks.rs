use serde::{Deserialize, Serialize};

use crate::control::normalize::{IsolineFeature, OriginMarker};
use crate::prelude::Point;

/// Visual style the host assigns to an isoline polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStyle {
    pub color: String,
    pub weight: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
}

/// Style of the small dot placed at the request origin. The default matches
/// the historical marker: a 3px blue dot with no stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub radius: f64,
    pub weight: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 3.0,
            weight: 0.0,
            fill_color: "#0073d4".to_string(),
            fill_opacity: 1.0,
        }
    }
}

/// Which button surfaces the transient error indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorTarget {
    DrawControl,
    DeleteControl,
    ExportControl,
}

pub type StyleFn = Box<dyn Fn(&IsolineFeature) -> FeatureStyle + Send + Sync>;
pub type FeatureEventFn = Box<dyn Fn(&IsolineFeature) + Send + Sync>;
pub type MarkerFn = Box<dyn Fn(Point, &str, &str) -> MarkerStyle + Send + Sync>;
pub type MarkerEventFn = Box<dyn Fn(&OriginMarker) + Send + Sync>;
pub type IndicatorFn = Box<dyn Fn(IndicatorTarget) + Send + Sync>;

/// Host-supplied styling and interaction callbacks. All optional; the core
/// invokes them with the feature or marker as argument and defines no visual
/// behavior of its own.
#[derive(Default)]
pub struct HostHooks {
    pub style_fn: Option<StyleFn>,
    pub mouse_over_fn: Option<FeatureEventFn>,
    pub mouse_out_fn: Option<FeatureEventFn>,
    pub click_fn: Option<FeatureEventFn>,
    pub marker_fn: Option<MarkerFn>,
    pub marker_over_fn: Option<MarkerEventFn>,
    pub marker_out_fn: Option<MarkerEventFn>,
    pub marker_click_fn: Option<MarkerEventFn>,
    pub error_indicator_fn: Option<IndicatorFn>,
}
