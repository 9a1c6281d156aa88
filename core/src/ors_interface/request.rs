use serde::{Deserialize, Serialize};

use crate::control::range::RangeConfig;
use crate::prelude::Point;

/// Wire-level range budget kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeType {
    Time,
    Distance,
}

/// Attributes requested from the service for every isoline.
pub const REQUEST_ATTRIBUTES: [&str; 3] = ["area", "reachfactor", "total_pop"];

/// Request body for one isoline computation, serialized as the POST payload.
/// The profile selects the endpoint path and is not part of the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolineRequest {
    #[serde(skip)]
    pub profile: String,
    pub locations: Vec<[f64; 2]>,
    pub range_type: RangeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    pub range: Vec<f64>,
    pub attributes: Vec<String>,
    pub smoothing: f64,
}

/// Builds the request descriptor for a clicked point under the active range
/// configuration. Time budgets cross the wire in seconds; distance budgets
/// pass through in the configured units.
pub fn build_request(
    point: Point,
    profile: &str,
    range: &RangeConfig,
    smoothing: f64,
) -> IsolineRequest {
    let values = if range.show_intervals() {
        range.interval_values()
    } else {
        vec![range.selected_value()]
    };

    let (range_type, units, wire_range) = if range.is_distance() {
        (
            RangeType::Distance,
            Some(range.distance_units().to_string()),
            values,
        )
    } else {
        (
            RangeType::Time,
            None,
            values.iter().map(|minutes| minutes * 60.0).collect(),
        )
    };

    IsolineRequest {
        profile: profile.to_string(),
        locations: vec![[point.lon, point.lat]],
        range_type,
        units,
        range: wire_range,
        attributes: REQUEST_ATTRIBUTES.iter().map(|s| s.to_string()).collect(),
        smoothing,
    }
}
