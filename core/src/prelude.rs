use serde::{Deserialize, Serialize};

use crate::control::normalize::IsolineResult;
use crate::control::range::RangeOptions;
use crate::control::travel_mode::TravelModeOptions;

/// Geographic coordinate of a map click.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Common error type for control operations.
#[derive(thiserror::Error, Debug)]
pub enum ControlError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("service failure: status {0}")]
    Service(u16),
    #[error("empty result: service returned no features")]
    EmptyResult,
    #[error("precondition failed: {0}")]
    Precondition(String),
}

pub type ControlResult<T> = Result<T, ControlError>;

/// Seam to the host map surface. The core never renders pixels; it informs
/// the surface when the isoline group gains or loses members and when the
/// group as a whole should appear or disappear.
pub trait MapSurface: Send {
    fn attach_group(&mut self);
    fn detach_group(&mut self);
    fn render_result(&mut self, result: &IsolineResult);
    fn remove_result(&mut self, result_id: u64);
}

/// No-op surface for headless hosts and tests.
#[derive(Debug, Default)]
pub struct NullSurface;

impl MapSurface for NullSurface {
    fn attach_group(&mut self) {}
    fn detach_group(&mut self) {}
    fn render_result(&mut self, _result: &IsolineResult) {}
    fn remove_result(&mut self, _result_id: u64) {}
}

/// Construction options for the reachability control. A missing API key
/// selects the deterministic offline client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlOptions {
    pub collapsed: bool,
    pub show_origin_marker: bool,
    pub export_area_label: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub smoothing: f64,
    pub range: RangeOptions,
    pub travel_modes: TravelModeOptions,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            collapsed: true,
            show_origin_marker: true,
            export_area_label: "Manhattan".to_string(),
            endpoint: "https://api.openrouteservice.org/v2/isochrones".to_string(),
            api_key: None,
            smoothing: 5.0,
            range: RangeOptions::default(),
            travel_modes: TravelModeOptions::default(),
        }
    }
}
