use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use log::info;
use reachcore::control::hooks::HostHooks;
use reachcore::control::normalize::IsolineResult;
use reachcore::prelude::{MapSurface, Point};
use reachcore::ReachabilityControl;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Headless surface that logs render activity instead of drawing.
#[derive(Debug, Default)]
struct LogSurface;

impl MapSurface for LogSurface {
    fn attach_group(&mut self) {
        info!("isoline group attached");
    }

    fn detach_group(&mut self) {
        info!("isoline group detached");
    }

    fn render_result(&mut self, result: &IsolineResult) {
        info!(
            "rendered result {} ({} features)",
            result.id,
            result.features.len()
        );
    }

    fn remove_result(&mut self, result_id: u64) {
        info!("removed result {}", result_id);
    }
}

/// Per-feature display summary extracted from a workflow run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub travel_mode: String,
    pub range: f64,
    pub range_units: String,
    pub area: Option<f64>,
    pub population: Option<f64>,
}

pub struct WorkflowResult {
    pub result_count: usize,
    pub feature_count: usize,
    pub feature_summaries: Vec<FeatureSummary>,
    pub export: Value,
    pub export_filename: String,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub async fn execute(&self) -> anyhow::Result<WorkflowResult> {
        let clicks = self.config.clicks.clone();
        self.execute_clicks(&clicks).await
    }

    /// Drives a full session against the offline client: configure travel
    /// mode and range, enter draw mode, issue every click, then export.
    pub async fn execute_clicks(&self, clicks: &[[f64; 2]]) -> anyhow::Result<WorkflowResult> {
        anyhow::ensure!(!clicks.is_empty(), "workflow has no clicks to issue");

        let options = self.config.to_control_options();
        let mut control =
            ReachabilityControl::new(options, HostHooks::default(), Box::new(LogSurface));

        let slot = self.config.travel_slot()?;
        anyhow::ensure!(
            control.set_travel_mode(slot),
            "travel mode slot {:?} is not configured",
            slot
        );
        control.set_range_type(self.config.range_is_distance);
        control.toggle_intervals(self.config.show_intervals);
        control.toggle_draw();

        for click in clicks {
            control
                .handle_click(Point::new(click[0], click[1]))
                .await
                .with_context(|| format!("isoline request at [{}, {}]", click[0], click[1]))?;
        }

        let artifact = control.export().context("exporting workflow results")?;
        let results = control.group().results();
        let feature_summaries: Vec<FeatureSummary> = results
            .iter()
            .flat_map(|result| result.features.iter())
            .map(|feature| FeatureSummary {
                travel_mode: feature.travel_mode.clone(),
                range: feature.range,
                range_units: feature.range_units.clone(),
                area: feature.area,
                population: feature.population,
            })
            .collect();

        Ok(WorkflowResult {
            result_count: results.len(),
            feature_count: feature_summaries.len(),
            feature_summaries,
            export: artifact.collection,
            export_filename: artifact.filename,
        })
    }
}
