use serde::{Deserialize, Serialize};

use crate::geom::round::{correct_drift, decimal_places};

const VALUE_EPSILON: f64 = 1e-9;

/// Options controlling the range bucket lists. Explicit value lists override
/// the generated `(interval, max)` sequences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeOptions {
    pub distance_interval: f64,
    pub distance_max: f64,
    pub distance_default: f64,
    pub distance_units: String,
    pub distance_values: Option<Vec<f64>>,
    pub time_interval: f64,
    pub time_max: f64,
    pub time_default: f64,
    pub time_values: Option<Vec<f64>>,
    pub default_is_distance: bool,
    pub show_intervals: bool,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            distance_interval: 0.5,
            distance_max: 3.0,
            distance_default: 1.0,
            distance_units: "km".to_string(),
            distance_values: None,
            time_interval: 5.0,
            time_max: 30.0,
            time_default: 10.0,
            time_values: None,
            default_is_distance: false,
            show_intervals: false,
        }
    }
}

/// Generates a bucket list from `(interval, max)`: starting at `interval`,
/// repeatedly add `interval` while the running value stays within `max`.
/// Each value is drift-corrected to the larger of the two operands' decimal
/// precision so the rendered list carries no spurious trailing digits.
pub fn generate_buckets(interval: f64, max: f64) -> Vec<f64> {
    let mut values = Vec::new();
    if interval <= 0.0 {
        return values;
    }

    let places = decimal_places(interval).max(decimal_places(max));
    let mut value = interval;
    while value <= max {
        value = correct_drift(value, places);
        values.push(value);
        value += interval;
    }
    values
}

/// Range configuration store: the two bucket lists, the active range type,
/// the current selections, and the interval flag.
#[derive(Debug, Clone)]
pub struct RangeConfig {
    is_distance: bool,
    distance_values: Vec<f64>,
    time_values: Vec<f64>,
    selected_distance: f64,
    selected_time: f64,
    show_intervals: bool,
    distance_units: String,
}

impl RangeConfig {
    pub fn from_options(options: &RangeOptions) -> Self {
        let distance_values = options.distance_values.clone().unwrap_or_else(|| {
            generate_buckets(options.distance_interval, options.distance_max)
        });
        let time_values = options
            .time_values
            .clone()
            .unwrap_or_else(|| generate_buckets(options.time_interval, options.time_max));

        let selected_distance = default_selection(&distance_values, options.distance_default);
        let selected_time = default_selection(&time_values, options.time_default);

        Self {
            is_distance: options.default_is_distance,
            distance_values,
            time_values,
            selected_distance,
            selected_time,
            show_intervals: options.show_intervals,
            distance_units: options.distance_units.clone(),
        }
    }

    /// Switches the active bucket list. Idempotent.
    pub fn set_range_type(&mut self, is_distance: bool) {
        self.is_distance = is_distance;
    }

    /// Selects a value from the currently active bucket list. Values outside
    /// the list are rejected as a silent no-op.
    pub fn select_value(&mut self, value: f64) -> bool {
        if !member_of(self.active_values(), value) {
            return false;
        }
        if self.is_distance {
            self.selected_distance = value;
        } else {
            self.selected_time = value;
        }
        true
    }

    pub fn toggle_intervals(&mut self, enabled: bool) {
        self.show_intervals = enabled;
    }

    pub fn is_distance(&self) -> bool {
        self.is_distance
    }

    pub fn show_intervals(&self) -> bool {
        self.show_intervals
    }

    pub fn distance_units(&self) -> &str {
        &self.distance_units
    }

    pub fn active_values(&self) -> &[f64] {
        if self.is_distance {
            &self.distance_values
        } else {
            &self.time_values
        }
    }

    pub fn selected_value(&self) -> f64 {
        if self.is_distance {
            self.selected_distance
        } else {
            self.selected_time
        }
    }

    /// Selected travel time in minutes, regardless of the active range type.
    /// Drives the offline circle approximation.
    pub fn selected_time(&self) -> f64 {
        self.selected_time
    }

    /// Bucket values from the smallest through the selected value, for
    /// interval (concentric isoline) requests.
    pub fn interval_values(&self) -> Vec<f64> {
        let selected = self.selected_value();
        self.active_values()
            .iter()
            .copied()
            .take_while(|v| *v <= selected + VALUE_EPSILON)
            .collect()
    }
}

fn member_of(values: &[f64], value: f64) -> bool {
    values.iter().any(|v| (v - value).abs() < VALUE_EPSILON)
}

fn default_selection(values: &[f64], preferred: f64) -> f64 {
    values
        .iter()
        .copied()
        .find(|v| (v - preferred).abs() < VALUE_EPSILON)
        .or_else(|| values.first().copied())
        .unwrap_or(preferred)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::round::decimal_places;

    #[test]
    fn buckets_from_half_km_steps_have_no_trailing_digits() {
        let buckets = generate_buckets(0.5, 3.0);
        assert_eq!(buckets, vec![0.5, 1.0, 1.5, 2.0, 2.5, 3.0]);

        for value in &buckets {
            assert!(decimal_places(*value) <= 1, "value {} too precise", value);
        }
    }

    #[test]
    fn buckets_are_strictly_ascending_without_duplicates() {
        for (interval, max) in [(0.5, 3.0), (5.0, 30.0), (0.1, 1.0), (0.25, 2.0)] {
            let buckets = generate_buckets(interval, max);
            let places = decimal_places(interval).max(decimal_places(max));

            assert!(!buckets.is_empty());
            for window in buckets.windows(2) {
                assert!(window[0] < window[1]);
            }
            for value in &buckets {
                assert!(decimal_places(*value) <= places);
            }
        }
    }

    #[test]
    fn zero_interval_produces_no_buckets() {
        assert!(generate_buckets(0.0, 3.0).is_empty());
    }

    #[test]
    fn selection_outside_the_active_list_is_rejected() {
        let mut config = RangeConfig::from_options(&RangeOptions::default());
        assert_eq!(config.selected_value(), 10.0);

        assert!(!config.select_value(7.0));
        assert_eq!(config.selected_value(), 10.0);

        assert!(config.select_value(25.0));
        assert_eq!(config.selected_value(), 25.0);
    }

    #[test]
    fn range_type_switch_changes_the_active_list() {
        let mut config = RangeConfig::from_options(&RangeOptions::default());
        config.set_range_type(true);

        assert!(config.is_distance());
        assert_eq!(config.active_values(), &[0.5, 1.0, 1.5, 2.0, 2.5, 3.0]);
        assert_eq!(config.selected_value(), 1.0);

        // Idempotent.
        config.set_range_type(true);
        assert!(config.is_distance());
    }

    #[test]
    fn interval_values_stop_at_the_selection() {
        let mut config = RangeConfig::from_options(&RangeOptions::default());
        assert!(config.select_value(20.0));
        assert_eq!(config.interval_values(), vec![5.0, 10.0, 15.0, 20.0]);
    }

    #[test]
    fn explicit_value_lists_override_generation() {
        let options = RangeOptions {
            time_values: Some(vec![3.0, 6.0, 12.0]),
            time_default: 6.0,
            ..Default::default()
        };
        let config = RangeConfig::from_options(&options);
        assert_eq!(config.active_values(), &[3.0, 6.0, 12.0]);
        assert_eq!(config.selected_value(), 6.0);
    }
}
