use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating a synthetic click scatter around a center
/// point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub center_lat: f64,
    pub center_lon: f64,
    pub spread_deg: f64,
    pub count: usize,
    pub seed: u64,
    pub description: Option<String>,
    pub scenario: Option<String>,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            center_lat: 40.7580,
            center_lon: -73.9855,
            spread_deg: 0.01,
            count: 3,
            seed: 0,
            description: None,
            scenario: None,
        }
    }
}

/// Builds `count` click positions uniformly jittered around the center.
/// Deterministic for a given seed.
pub fn build_click_scatter(config: &ScatterConfig) -> Vec<[f64; 2]> {
    let count = config.count.max(1);
    let spread = config.spread_deg.abs().max(f64::EPSILON);
    let mut rng = StdRng::seed_from_u64(config.seed);

    (0..count)
        .map(|_| {
            [
                config.center_lat + rng.gen_range(-spread..spread),
                config.center_lon + rng.gen_range(-spread..spread),
            ]
        })
        .collect()
}
