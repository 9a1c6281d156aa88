use anyhow::Context;
use reachcore::control::range::{generate_buckets, RangeOptions};
use reachcore::control::travel_mode::TravelModeSlot;
use reachcore::prelude::ControlOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Click positions as `[lat, lon]` pairs.
    pub clicks: Vec<[f64; 2]>,
    pub profile: String,
    pub minutes: f64,
    pub distance_km: Option<f64>,
    pub range_is_distance: bool,
    pub show_intervals: bool,
    pub export_area_label: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            clicks: vec![[40.7580, -73.9855]],
            profile: "foot-walking".to_string(),
            minutes: 10.0,
            distance_km: None,
            range_is_distance: false,
            show_intervals: false,
            export_area_label: "Manhattan".to_string(),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        lat: f64,
        lon: f64,
        minutes: f64,
        profile: &str,
        show_intervals: bool,
    ) -> Self {
        Self {
            clicks: vec![[lat, lon]],
            profile: profile.to_string(),
            minutes,
            show_intervals,
            ..Default::default()
        }
    }

    /// Maps the service profile string onto its travel-mode slot under the
    /// default slot layout.
    pub fn travel_slot(&self) -> anyhow::Result<TravelModeSlot> {
        match self.profile.as_str() {
            "driving-car" => Ok(TravelModeSlot::Profile1),
            "cycling-regular" => Ok(TravelModeSlot::Profile2),
            "foot-walking" => Ok(TravelModeSlot::Profile3),
            "wheelchair" => Ok(TravelModeSlot::Profile4),
            other => anyhow::bail!("unknown travel profile {}", other),
        }
    }

    /// Derives control options from the workflow settings. Requested range
    /// values outside the generated bucket lists become explicit one-entry
    /// lists so the selection always sticks.
    pub fn to_control_options(&self) -> ControlOptions {
        let mut range = RangeOptions {
            time_default: self.minutes,
            default_is_distance: self.range_is_distance,
            show_intervals: self.show_intervals,
            ..Default::default()
        };
        if !in_buckets(range.time_interval, range.time_max, self.minutes) {
            range.time_values = Some(vec![self.minutes]);
        }
        if let Some(km) = self.distance_km {
            range.distance_default = km;
            if !in_buckets(range.distance_interval, range.distance_max, km) {
                range.distance_values = Some(vec![km]);
            }
        }

        ControlOptions {
            export_area_label: self.export_area_label.clone(),
            api_key: None,
            range,
            ..Default::default()
        }
    }
}

fn in_buckets(interval: f64, max: f64, value: f64) -> bool {
    generate_buckets(interval, max)
        .iter()
        .any(|v| (v - value).abs() < 1e-9)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_produces_control_options() {
        let cfg = WorkflowConfig::from_args(40.758, -73.9855, 15.0, "cycling-regular", false);
        let options = cfg.to_control_options();
        assert_eq!(options.range.time_default, 15.0);
        assert!(options.range.time_values.is_none());
        assert!(options.api_key.is_none());
    }

    #[test]
    fn off_grid_minutes_become_an_explicit_value_list() {
        let cfg = WorkflowConfig::from_args(40.758, -73.9855, 7.5, "foot-walking", false);
        let options = cfg.to_control_options();
        assert_eq!(options.range.time_values, Some(vec![7.5]));
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"clicks:\n  - [40.758, -73.9855]\n  - [40.76, -73.98]\nprofile: driving-car\nminutes: 20\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.clicks.len(), 2);
        assert_eq!(cfg.profile, "driving-car");
        assert_eq!(cfg.minutes, 20.0);
    }

    #[test]
    fn unknown_profile_is_rejected() {
        let cfg = WorkflowConfig {
            profile: "hot-air-balloon".to_string(),
            ..Default::default()
        };
        assert!(cfg.travel_slot().is_err());
    }
}
