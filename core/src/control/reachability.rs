use tokio::sync::broadcast;

use crate::client::IsolineClient;
use crate::control::events::{ControlEvent, EventBus};
use crate::control::export::{export_filename, ExportArtifact};
use crate::control::group::IsolineLayerGroup;
use crate::control::hooks::{HostHooks, IndicatorTarget};
use crate::control::normalize::{normalize_response, NormalizeContext};
use crate::control::range::RangeConfig;
use crate::control::state::InteractionState;
use crate::control::travel_mode::{TravelModeSelector, TravelModeSlot};
use crate::ors_interface::request::build_request;
use crate::prelude::{ControlError, ControlOptions, ControlResult, MapSurface, Point};
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::MetricsRecorder;

/// Outcome of a map click routed through the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Click ignored: not in draw mode, a request already in flight, or the
    /// control has been torn down.
    Ignored,
    /// A result was normalized and added to the layer group.
    Displayed(u64),
}

/// The reachability control: owns the interaction state machine, the range
/// and travel-mode stores, the isoline client, and the layer group. External
/// callers drive it through intent commands; internal state is never exposed
/// mutably.
pub struct ReachabilityControl {
    options: ControlOptions,
    range: RangeConfig,
    modes: TravelModeSelector,
    state: InteractionState,
    client: IsolineClient,
    group: IsolineLayerGroup,
    hooks: HostHooks,
    surface: Box<dyn MapSurface>,
    events: EventBus,
    logger: LogManager,
    metrics: MetricsRecorder,
    next_result_id: u64,
    removed: bool,
}

impl ReachabilityControl {
    pub fn new(options: ControlOptions, hooks: HostHooks, surface: Box<dyn MapSurface>) -> Self {
        let range = RangeConfig::from_options(&options.range);
        let modes = TravelModeSelector::from_options(&options.travel_modes);
        let state = InteractionState::new(!options.collapsed);
        let client = IsolineClient::from_credential(&options.endpoint, options.api_key.as_deref());

        let mut control = Self {
            options,
            range,
            modes,
            state,
            client,
            group: IsolineLayerGroup::new(),
            hooks,
            surface,
            events: EventBus::new(),
            logger: LogManager::new(),
            metrics: MetricsRecorder::new(),
            next_result_id: 1,
            removed: false,
        };

        // Draw defaults to off deterministically, regardless of upstream
        // control defaults.
        control.set_draw_active(false);
        control.events.emit(ControlEvent::ControlAdded);
        control
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ControlEvent> {
        self.events.subscribe()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn range(&self) -> &RangeConfig {
        &self.range
    }

    pub fn travel_modes(&self) -> &TravelModeSelector {
        &self.modes
    }

    pub fn group(&self) -> &IsolineLayerGroup {
        &self.group
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn expand(&mut self) {
        self.state.set_panel_expanded(true);
        self.events.emit(ControlEvent::Expanded);
    }

    pub fn collapse(&mut self) {
        self.state.set_panel_expanded(false);
        self.events.emit(ControlEvent::Collapsed);
    }

    /// True when a mode is engaged while the panel is collapsed, so the host
    /// can mark the collapsed control as active.
    pub fn is_active_while_collapsed(&self) -> bool {
        !self.state.panel_expanded() && !self.state.is_idle()
    }

    /// Flips draw mode, exiting delete mode first if needed.
    pub fn toggle_draw(&mut self) {
        if self.state.is_delete() {
            self.set_delete_active(false);
        }
        let activate = !self.state.is_draw();
        self.set_draw_active(activate);
    }

    fn set_draw_active(&mut self, active: bool) {
        if active == self.state.is_draw() {
            return;
        }
        if active {
            self.state.enter_draw();
            self.events.emit(ControlEvent::DrawActivated);
        } else {
            self.state.exit_draw();
            self.events.emit(ControlEvent::DrawDeactivated);
        }
    }

    fn set_delete_active(&mut self, active: bool) {
        if active == self.state.is_delete() {
            return;
        }
        if active {
            self.state.enter_delete();
            self.events.emit(ControlEvent::DeleteActivated);
        } else {
            self.state.exit_delete();
            self.events.emit(ControlEvent::DeleteDeactivated);
        }
    }

    /// Flips delete mode, exiting draw mode first if needed. Activating on
    /// an empty group is a precondition failure; a group with exactly one
    /// result is cleared immediately without entering delete mode.
    pub fn toggle_delete(&mut self) -> ControlResult<()> {
        if self.state.is_draw() {
            self.set_draw_active(false);
        }
        if self.state.is_delete() {
            self.set_delete_active(false);
            return Ok(());
        }

        match self.group.len() {
            0 => {
                self.flash_error(IndicatorTarget::DeleteControl);
                Err(ControlError::Precondition(
                    "no isoline results to delete".to_string(),
                ))
            }
            1 => {
                self.group.remove_all(self.surface.as_mut());
                self.events.emit(ControlEvent::Cleared);
                Ok(())
            }
            _ => {
                self.set_delete_active(true);
                Ok(())
            }
        }
    }

    /// Routes a map click through the draw flow: single-flight request,
    /// normalization, layer-group insertion. A second click while a request
    /// is outstanding is silently ignored, not queued.
    pub async fn handle_click(&mut self, point: Point) -> ControlResult<ClickOutcome> {
        if self.removed || !self.state.is_draw() {
            return Ok(ClickOutcome::Ignored);
        }
        if !self.state.begin_request() {
            return Ok(ClickOutcome::Ignored);
        }

        self.events.emit(ControlEvent::RequestStart);
        let request = build_request(
            point,
            self.modes.active_profile(),
            &self.range,
            self.options.smoothing,
        );
        let outcome = self
            .client
            .submit(&request, point, self.range.selected_time())
            .await;
        self.state.finish_request();
        self.events.emit(ControlEvent::RequestEnd);

        if self.removed {
            // Late completion after teardown; nothing left to apply it to.
            return Ok(ClickOutcome::Ignored);
        }

        match outcome {
            Ok(response) => {
                let id = self.next_result_id;
                self.next_result_id += 1;

                let label = self.modes.active_label().to_string();
                let profile = self.modes.active_profile().to_string();
                let units = self.range.distance_units().to_string();
                let ctx = NormalizeContext {
                    travel_mode_label: &label,
                    travel_mode_profile: &profile,
                    is_distance: self.range.is_distance(),
                    distance_units: &units,
                    origin: point,
                    show_origin_marker: self.options.show_origin_marker,
                };
                let result = normalize_response(id, &response, &ctx, &self.hooks);
                let feature_count = result.features.len();

                self.group.add(result, self.surface.as_mut());
                self.metrics.record_completed();
                self.logger.record(&format!(
                    "isoline result {} displayed ({} features)",
                    id, feature_count
                ));
                self.events.emit(ControlEvent::Displayed);
                Ok(ClickOutcome::Displayed(id))
            }
            Err(error) => {
                self.metrics.record_failed();
                match &error {
                    ControlError::EmptyResult => {
                        self.events.emit(ControlEvent::NoData);
                    }
                    _ => {
                        self.events.emit(ControlEvent::Error);
                        self.events.emit(ControlEvent::NoData);
                    }
                }
                self.flash_error(IndicatorTarget::DrawControl);
                self.set_draw_active(false);
                Err(error)
            }
        }
    }

    /// Click on a rendered feature. In delete mode this removes the whole
    /// owning result; otherwise the host click callback fires.
    pub fn feature_clicked(&mut self, result_id: u64, feature_index: usize) -> ControlResult<()> {
        if self.state.is_delete() {
            return self.delete_result(result_id);
        }
        if let Some(feature) = self
            .group
            .get(result_id)
            .and_then(|result| result.features.get(feature_index))
        {
            if let Some(click_fn) = self.hooks.click_fn.as_ref() {
                click_fn(feature);
            }
        }
        Ok(())
    }

    /// Click on an origin marker. Delete mode removes the owning result.
    pub fn marker_clicked(&mut self, result_id: u64) -> ControlResult<()> {
        if self.state.is_delete() {
            return self.delete_result(result_id);
        }
        if let Some(marker) = self
            .group
            .get(result_id)
            .and_then(|result| result.origin.as_ref())
        {
            if let Some(click_fn) = self.hooks.marker_click_fn.as_ref() {
                click_fn(marker);
            }
        }
        Ok(())
    }

    pub fn feature_hovered(&self, result_id: u64, feature_index: usize, entered: bool) {
        if let Some(feature) = self
            .group
            .get(result_id)
            .and_then(|result| result.features.get(feature_index))
        {
            let hook = if entered {
                self.hooks.mouse_over_fn.as_ref()
            } else {
                self.hooks.mouse_out_fn.as_ref()
            };
            if let Some(hook) = hook {
                hook(feature);
            }
        }
    }

    pub fn marker_hovered(&self, result_id: u64, entered: bool) {
        if let Some(marker) = self
            .group
            .get(result_id)
            .and_then(|result| result.origin.as_ref())
        {
            let hook = if entered {
                self.hooks.marker_over_fn.as_ref()
            } else {
                self.hooks.marker_out_fn.as_ref()
            };
            if let Some(hook) = hook {
                hook(marker);
            }
        }
    }

    fn delete_result(&mut self, result_id: u64) -> ControlResult<()> {
        if self
            .group
            .remove_one(result_id, self.surface.as_mut())
            .is_none()
        {
            return Err(ControlError::Precondition(format!(
                "no isoline result {}",
                result_id
            )));
        }

        if self.group.is_empty() {
            self.set_delete_active(false);
            self.events.emit(ControlEvent::Cleared);
        } else {
            self.events.emit(ControlEvent::Deleted);
        }
        Ok(())
    }

    /// Clears every result, leaving delete mode if it was engaged.
    pub fn remove_all(&mut self) {
        self.group.remove_all(self.surface.as_mut());
        if self.state.is_delete() {
            self.set_delete_active(false);
        }
        self.events.emit(ControlEvent::Cleared);
    }

    /// Serializes the current layer group for download.
    pub fn export(&self) -> ControlResult<ExportArtifact> {
        if self.group.is_empty() {
            self.flash_error(IndicatorTarget::ExportControl);
            return Err(ControlError::Precondition(
                "no reachability data to export".to_string(),
            ));
        }

        let artifact = ExportArtifact {
            filename: export_filename(&self.options.export_area_label),
            collection: self.group.to_feature_collection(),
        };
        self.events.emit(ControlEvent::Exported {
            filename: artifact.filename.clone(),
        });
        Ok(artifact)
    }

    /// Intent commands validated before applying.
    pub fn select_range(&mut self, value: f64) -> bool {
        self.range.select_value(value)
    }

    pub fn set_range_type(&mut self, is_distance: bool) {
        self.range.set_range_type(is_distance);
    }

    pub fn toggle_intervals(&mut self, enabled: bool) {
        self.range.toggle_intervals(enabled);
    }

    pub fn set_travel_mode(&mut self, slot: TravelModeSlot) -> bool {
        self.modes.set_mode(slot)
    }

    fn flash_error(&self, target: IndicatorTarget) {
        if let Some(indicator) = self.hooks.error_indicator_fn.as_ref() {
            indicator(target);
        }
    }

    /// Tears the control down: draw deactivates, the layer group detaches
    /// from the surface. The results themselves survive unless the caller
    /// clears them first.
    pub fn on_remove(&mut self) {
        if self.removed {
            return;
        }
        if self.state.is_draw() {
            self.set_draw_active(false);
        }
        if self.state.is_delete() {
            self.set_delete_active(false);
        }
        self.group.detach_from_surface(self.surface.as_mut());
        self.state.finish_request();
        self.removed = true;
        self.events.emit(ControlEvent::ControlRemoved);
    }

    #[cfg(test)]
    pub(crate) fn claim_request_slot_for_tests(&mut self) -> bool {
        self.state.begin_request()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::NullSurface;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn offline_options() -> ControlOptions {
        ControlOptions {
            api_key: None,
            ..Default::default()
        }
    }

    fn offline_control() -> ReachabilityControl {
        ReachabilityControl::new(offline_options(), HostHooks::default(), Box::new(NullSurface))
    }

    fn drain(receiver: &mut broadcast::Receiver<ControlEvent>) -> Vec<ControlEvent> {
        let mut events = Vec::new();
        while let Ok(event) = receiver.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn click_in_draw_mode_displays_a_result() {
        let mut control = offline_control();
        let mut receiver = control.subscribe();

        control.toggle_draw();
        let outcome = control
            .handle_click(Point::new(40.758, -73.9855))
            .await
            .unwrap();

        assert_eq!(outcome, ClickOutcome::Displayed(1));
        assert_eq!(control.group().len(), 1);
        assert!(control.group().is_attached());
        assert_eq!(control.metrics().snapshot(), (1, 0));

        let events = drain(&mut receiver);
        assert_eq!(
            events,
            vec![
                ControlEvent::DrawActivated,
                ControlEvent::RequestStart,
                ControlEvent::RequestEnd,
                ControlEvent::Displayed,
            ]
        );
    }

    #[tokio::test]
    async fn clicks_outside_draw_mode_are_ignored() {
        let mut control = offline_control();
        let outcome = control
            .handle_click(Point::new(40.758, -73.9855))
            .await
            .unwrap();

        assert_eq!(outcome, ClickOutcome::Ignored);
        assert!(control.group().is_empty());
    }

    #[tokio::test]
    async fn second_click_while_request_pending_is_a_no_op() {
        let mut control = offline_control();
        let mut receiver = control.subscribe();
        control.toggle_draw();
        drain(&mut receiver);

        assert!(control.claim_request_slot_for_tests());
        let outcome = control
            .handle_click(Point::new(40.758, -73.9855))
            .await
            .unwrap();

        assert_eq!(outcome, ClickOutcome::Ignored);
        assert!(drain(&mut receiver).is_empty());
        assert_eq!(control.metrics().snapshot(), (0, 0));
    }

    #[tokio::test]
    async fn reentering_draw_clears_a_stale_pending_flag() {
        let mut control = offline_control();
        control.toggle_draw();
        assert!(control.claim_request_slot_for_tests());

        control.toggle_draw();
        control.toggle_draw();
        let outcome = control
            .handle_click(Point::new(40.758, -73.9855))
            .await
            .unwrap();
        assert_eq!(outcome, ClickOutcome::Displayed(1));
    }

    #[test]
    fn toggle_delete_on_empty_group_stays_idle_and_flashes() {
        let flashes = Arc::new(AtomicUsize::new(0));
        let flashes_seen = flashes.clone();
        let hooks = HostHooks {
            error_indicator_fn: Some(Box::new(move |target| {
                assert_eq!(target, IndicatorTarget::DeleteControl);
                flashes_seen.fetch_add(1, Ordering::SeqCst);
            })),
            ..Default::default()
        };
        let mut control =
            ReachabilityControl::new(offline_options(), hooks, Box::new(NullSurface));

        let result = control.toggle_delete();
        assert!(matches!(result, Err(ControlError::Precondition(_))));
        assert!(control.state().is_idle());
        assert_eq!(flashes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn toggle_delete_with_one_result_clears_without_entering_delete() {
        let mut control = offline_control();
        control.toggle_draw();
        control
            .handle_click(Point::new(40.758, -73.9855))
            .await
            .unwrap();

        let mut receiver = control.subscribe();
        control.toggle_delete().unwrap();

        assert!(control.group().is_empty());
        assert!(!control.group().is_attached());
        let events = drain(&mut receiver);
        assert!(events.contains(&ControlEvent::Cleared));
        assert!(!events.contains(&ControlEvent::DeleteActivated));
        // Draw was active; it exits before the clear applies.
        assert!(control.state().is_idle());
    }

    #[tokio::test]
    async fn deleting_one_of_many_keeps_delete_mode_engaged() {
        let mut control = offline_control();
        control.toggle_draw();
        let first = control
            .handle_click(Point::new(40.758, -73.9855))
            .await
            .unwrap();
        let second = control
            .handle_click(Point::new(40.76, -73.98))
            .await
            .unwrap();
        let (ClickOutcome::Displayed(first_id), ClickOutcome::Displayed(second_id)) =
            (first, second)
        else {
            panic!("both clicks should display");
        };

        control.toggle_delete().unwrap();
        assert!(control.state().is_delete());

        let mut receiver = control.subscribe();
        control.feature_clicked(first_id, 0).unwrap();
        assert!(control.state().is_delete());
        assert_eq!(drain(&mut receiver), vec![ControlEvent::Deleted]);

        control.marker_clicked(second_id).unwrap();
        assert!(control.state().is_idle());
        let events = drain(&mut receiver);
        assert_eq!(
            events,
            vec![ControlEvent::DeleteDeactivated, ControlEvent::Cleared]
        );
    }

    #[tokio::test]
    async fn remove_all_detaches_and_empties_the_export() {
        let mut control = offline_control();
        control.toggle_draw();
        control
            .handle_click(Point::new(40.758, -73.9855))
            .await
            .unwrap();
        control
            .handle_click(Point::new(40.76, -73.98))
            .await
            .unwrap();

        control.remove_all();
        assert!(control.group().is_empty());
        assert!(!control.group().is_attached());
        assert_eq!(
            control.group().to_feature_collection()["features"],
            serde_json::json!([])
        );
        assert!(matches!(
            control.export(),
            Err(ControlError::Precondition(_))
        ));
    }

    #[tokio::test]
    async fn export_names_the_area_and_carries_every_feature() {
        let mut control = offline_control();
        control.toggle_draw();
        control
            .handle_click(Point::new(40.758, -73.9855))
            .await
            .unwrap();

        let artifact = control.export().unwrap();
        assert!(artifact.filename.starts_with("reachability_Manhattan_"));
        assert_eq!(
            artifact.collection["features"].as_array().unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn transport_failure_deactivates_draw_and_clears_pending() {
        let options = ControlOptions {
            api_key: Some("test-key".to_string()),
            endpoint: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        let mut control =
            ReachabilityControl::new(options, HostHooks::default(), Box::new(NullSurface));
        let mut receiver = control.subscribe();
        control.toggle_draw();

        let result = control.handle_click(Point::new(40.758, -73.9855)).await;
        assert!(matches!(result, Err(ControlError::Transport(_))));
        assert!(control.state().is_idle());
        assert!(!control.state().pending_request());
        assert_eq!(control.metrics().snapshot(), (0, 1));

        let events = drain(&mut receiver);
        assert!(events.contains(&ControlEvent::Error));
        assert!(events.contains(&ControlEvent::NoData));
        assert!(events.contains(&ControlEvent::DrawDeactivated));
    }

    #[tokio::test]
    async fn teardown_ignores_late_clicks_and_detaches_the_group() {
        let mut control = offline_control();
        control.toggle_draw();
        control
            .handle_click(Point::new(40.758, -73.9855))
            .await
            .unwrap();

        control.on_remove();
        assert!(control.is_removed());
        assert!(!control.group().is_attached());
        // Results survive teardown; only the surface attachment is gone.
        assert_eq!(control.group().len(), 1);

        let outcome = control
            .handle_click(Point::new(40.76, -73.98))
            .await
            .unwrap();
        assert_eq!(outcome, ClickOutcome::Ignored);
    }

    #[test]
    fn collapsed_control_reports_an_engaged_mode() {
        let mut control = offline_control();
        control.toggle_draw();
        control.collapse();
        assert!(control.is_active_while_collapsed());

        control.expand();
        assert!(!control.is_active_while_collapsed());
    }

    #[test]
    fn draw_and_delete_are_mutually_exclusive() {
        let mut control = offline_control();
        control.toggle_draw();
        assert!(control.state().is_draw());

        // Delete on an empty group fails but still exits draw first.
        let _ = control.toggle_delete();
        assert!(control.state().is_idle());
    }

    #[test]
    fn intent_commands_validate_before_applying() {
        let mut control = offline_control();
        assert!(!control.select_range(7.0));
        assert!(control.select_range(15.0));
        assert_eq!(control.range().selected_value(), 15.0);

        assert!(control.set_travel_mode(TravelModeSlot::Profile3));
        assert_eq!(control.travel_modes().active_profile(), "foot-walking");
    }
}
