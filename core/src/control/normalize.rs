use serde_json::{json, Value};

use crate::control::hooks::{FeatureStyle, HostHooks, MarkerStyle};
use crate::geom::round::format_num;
use crate::ors_interface::response::{PolygonGeometry, RawIsolineResponse};
use crate::prelude::Point;

/// One isoline polygon with display-facing properties derived from the raw
/// service feature.
#[derive(Debug, Clone)]
pub struct IsolineFeature {
    pub geometry: PolygonGeometry,
    pub travel_mode: String,
    pub range: f64,
    pub range_units: String,
    pub latitude: f64,
    pub longitude: f64,
    pub area: Option<f64>,
    pub area_units: Option<String>,
    pub population: Option<f64>,
    pub reach_factor: Option<f64>,
    pub style: Option<FeatureStyle>,
}

impl IsolineFeature {
    /// Serializes the feature and its display properties as a GeoJSON
    /// feature for export.
    pub fn to_geojson(&self) -> Value {
        let mut properties = serde_json::Map::new();
        properties.insert("Travel mode".to_string(), json!(self.travel_mode));
        properties.insert("Range".to_string(), json!(self.range));
        properties.insert("Range units".to_string(), json!(self.range_units));
        properties.insert("Latitude".to_string(), json!(self.latitude));
        properties.insert("Longitude".to_string(), json!(self.longitude));
        if let Some(area) = self.area {
            properties.insert("Area".to_string(), json!(area));
        }
        if let Some(units) = &self.area_units {
            properties.insert("Area units".to_string(), json!(units));
        }
        if let Some(population) = self.population {
            properties.insert("Population".to_string(), json!(population));
        }
        if let Some(reach) = self.reach_factor {
            properties.insert("Reach factor".to_string(), json!(reach));
        }

        json!({
            "type": "Feature",
            "properties": Value::Object(properties),
            "geometry": self.geometry,
        })
    }
}

/// Marker placed at the clicked origin of a result.
#[derive(Debug, Clone)]
pub struct OriginMarker {
    pub point: Point,
    pub style: MarkerStyle,
}

/// All features produced by one accepted click plus the optional origin
/// marker. Immutable after creation; removed atomically.
#[derive(Debug, Clone)]
pub struct IsolineResult {
    pub id: u64,
    pub features: Vec<IsolineFeature>,
    pub origin: Option<OriginMarker>,
}

/// Inputs the normalizer needs besides the raw response.
pub struct NormalizeContext<'a> {
    pub travel_mode_label: &'a str,
    pub travel_mode_profile: &'a str,
    pub is_distance: bool,
    pub distance_units: &'a str,
    pub origin: Point,
    pub show_origin_marker: bool,
}

/// Converts a raw isoline response into a uniform result with derived
/// display properties and host styling attached. The raw `value` arrives in
/// meters or seconds and is redisplayed in the configured distance units or
/// minutes, rounded to two decimals.
pub fn normalize_response(
    id: u64,
    response: &RawIsolineResponse,
    ctx: &NormalizeContext<'_>,
    hooks: &HostHooks,
) -> IsolineResult {
    let range_units = if ctx.is_distance {
        ctx.distance_units.to_string()
    } else {
        "min".to_string()
    };

    let mut features = Vec::with_capacity(response.features.len());
    for raw in &response.features {
        let props = &raw.properties;
        let range = if ctx.is_distance {
            props.value / 1000.0
        } else {
            props.value / 60.0
        };

        let mut feature = IsolineFeature {
            geometry: raw.geometry.clone(),
            travel_mode: ctx.travel_mode_label.to_string(),
            range: format_num(range, 2),
            range_units: range_units.clone(),
            latitude: props.center[1],
            longitude: props.center[0],
            area: props.area.map(|area| format_num(area, 2)),
            area_units: props.area.map(|_| format!("{}^2", ctx.distance_units)),
            population: props.total_pop,
            reach_factor: props.reachfactor,
            style: None,
        };
        if let Some(style_fn) = hooks.style_fn.as_ref() {
            feature.style = Some(style_fn(&feature));
        }
        features.push(feature);
    }

    let origin = ctx.show_origin_marker.then(|| OriginMarker {
        point: ctx.origin,
        style: match hooks.marker_fn.as_ref() {
            Some(marker_fn) => marker_fn(
                ctx.origin,
                ctx.travel_mode_profile,
                if ctx.is_distance { "distance" } else { "time" },
            ),
            None => MarkerStyle::default(),
        },
    });

    IsolineResult {
        id,
        features,
        origin,
    }
}
