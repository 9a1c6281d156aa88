use crate::workflow::runner::{FeatureSummary, WorkflowResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Square-meter areas above this are assumed to be raw service values and
/// redisplayed as square kilometers.
const AREA_KM2_DISPLAY_LIMIT: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionModel {
    pub result_count: usize,
    pub feature_count: usize,
    pub features: Vec<FeatureSummary>,
    pub total_area_km2: f64,
    pub export: Value,
}

impl SessionModel {
    pub fn from_result(result: &WorkflowResult) -> Self {
        let total_area_km2 = result
            .feature_summaries
            .iter()
            .filter_map(|feature| feature.area)
            .map(|area| {
                if area > AREA_KM2_DISPLAY_LIMIT {
                    area / 1_000_000.0
                } else {
                    area
                }
            })
            .sum();

        Self {
            result_count: result.result_count,
            feature_count: result.feature_count,
            features: result.feature_summaries.clone(),
            total_area_km2,
            export: result.export.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(area: Option<f64>) -> FeatureSummary {
        FeatureSummary {
            travel_mode: "Walking".to_string(),
            range: 10.0,
            range_units: "min".to_string(),
            area,
            population: None,
        }
    }

    #[test]
    fn oversized_areas_redisplay_as_square_kilometers() {
        let result = WorkflowResult {
            result_count: 1,
            feature_count: 2,
            feature_summaries: vec![summary(Some(2.5)), summary(Some(1_500_000.0))],
            export: serde_json::json!({}),
            export_filename: "x.geojson".to_string(),
        };
        let model = SessionModel::from_result(&result);
        assert!((model.total_area_km2 - 4.0).abs() < 1e-9);
    }

    #[test]
    fn missing_areas_contribute_nothing() {
        let result = WorkflowResult {
            result_count: 1,
            feature_count: 1,
            feature_summaries: vec![summary(None)],
            export: serde_json::json!({}),
            export_filename: "x.geojson".to_string(),
        };
        assert_eq!(SessionModel::from_result(&result).total_area_km2, 0.0);
    }
}
