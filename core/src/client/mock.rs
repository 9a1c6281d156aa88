use crate::geom::circle::circle_ring;
use crate::ors_interface::response::{
    PolygonGeometry, RawFeature, RawIsolineResponse, RawProperties,
};
use crate::prelude::{ControlResult, Point};

/// Kilometers reachable per minute for each service profile.
fn km_per_minute(profile: &str) -> f64 {
    match profile {
        "foot-walking" => 0.08,
        "cycling-regular" => 0.25,
        "driving-car" => 0.5,
        _ => 0.15,
    }
}

/// Deterministic offline approximation used when no credential is
/// configured: a circular polygon sized by travel time and mode, shaped like
/// a live response so the normalizer path is identical.
#[derive(Debug, Default)]
pub struct MockClient;

impl MockClient {
    pub fn new() -> Self {
        Self
    }

    pub fn submit(
        &self,
        origin: Point,
        minutes: f64,
        profile: &str,
    ) -> ControlResult<RawIsolineResponse> {
        let radius_km = minutes * km_per_minute(profile);
        let ring = circle_ring(origin, radius_km);

        let feature = RawFeature {
            kind: "Feature".to_string(),
            properties: RawProperties {
                value: minutes * 60.0,
                center: [origin.lon, origin.lat],
                area: None,
                total_pop: None,
                reachfactor: None,
            },
            geometry: PolygonGeometry::polygon(vec![ring]),
        };

        Ok(RawIsolineResponse {
            kind: "FeatureCollection".to_string(),
            features: vec![feature],
        })
    }
}
