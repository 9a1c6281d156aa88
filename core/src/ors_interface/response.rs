use serde::{Deserialize, Serialize};

/// GeoJSON polygon geometry as returned by the isoline service. The outer
/// ring comes first; any holes follow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl PolygonGeometry {
    pub fn polygon(rings: Vec<Vec<[f64; 2]>>) -> Self {
        Self {
            kind: "Polygon".to_string(),
            coordinates: rings,
        }
    }
}

/// Raw per-isoline properties: `value` is the range budget in seconds or
/// meters; reach attributes are present only when requested and computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProperties {
    pub value: f64,
    pub center: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pop: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reachfactor: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFeature {
    #[serde(rename = "type", default = "feature_kind")]
    pub kind: String,
    pub properties: RawProperties,
    pub geometry: PolygonGeometry,
}

fn feature_kind() -> String {
    "Feature".to_string()
}

/// Top-level service response: a feature collection of isolines, innermost
/// to outermost when intervals were requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawIsolineResponse {
    #[serde(rename = "type", default = "collection_kind")]
    pub kind: String,
    pub features: Vec<RawFeature>,
}

fn collection_kind() -> String {
    "FeatureCollection".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_with_optional_attributes_missing() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "value": 600.0, "center": [-73.9855, 40.758] },
                "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0]]] }
            }]
        }"#;

        let parsed: RawIsolineResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.features.len(), 1);
        let props = &parsed.features[0].properties;
        assert_eq!(props.value, 600.0);
        assert!(props.area.is_none());
        assert!(props.reachfactor.is_none());
    }

    #[test]
    fn response_parses_reach_attributes_when_present() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {
                    "value": 1000.0,
                    "center": [-73.9855, 40.758],
                    "area": 2.51,
                    "total_pop": 48210.0,
                    "reachfactor": 0.73
                },
                "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0]]] }
            }]
        }"#;

        let parsed: RawIsolineResponse = serde_json::from_str(body).unwrap();
        let props = &parsed.features[0].properties;
        assert_eq!(props.area, Some(2.51));
        assert_eq!(props.total_pop, Some(48210.0));
        assert_eq!(props.reachfactor, Some(0.73));
    }
}
