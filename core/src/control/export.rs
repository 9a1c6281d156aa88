use chrono::Local;
use serde_json::Value;

/// Portable-geometry document offered to the user as a downloadable file.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub collection: Value,
}

/// Builds the export filename from the fixed area label and a
/// second-precision timestamp.
pub fn export_filename(area_label: &str) -> String {
    let now = Local::now();
    format!(
        "reachability_{}_{}.geojson",
        area_label,
        now.format("%Y-%m-%d_%H%M%S")
    )
}
