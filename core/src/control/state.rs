/// Interaction mode of the control. Draw and Delete are mutually exclusive;
/// transitions run through the control so one always exits before the other
/// enters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Draw,
    Delete,
}

/// Tracks panel expansion, the active interaction mode, and the in-flight
/// request guard.
#[derive(Debug, Clone)]
pub struct InteractionState {
    mode: Mode,
    panel_expanded: bool,
    pending_request: bool,
}

impl InteractionState {
    pub fn new(panel_expanded: bool) -> Self {
        Self {
            mode: Mode::Idle,
            panel_expanded,
            pending_request: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_idle(&self) -> bool {
        self.mode == Mode::Idle
    }

    pub fn is_draw(&self) -> bool {
        self.mode == Mode::Draw
    }

    pub fn is_delete(&self) -> bool {
        self.mode == Mode::Delete
    }

    pub fn panel_expanded(&self) -> bool {
        self.panel_expanded
    }

    pub fn pending_request(&self) -> bool {
        self.pending_request
    }

    pub(crate) fn set_panel_expanded(&mut self, expanded: bool) {
        self.panel_expanded = expanded;
    }

    /// Entering draw resets the in-flight guard so a stale flag can never
    /// block the first click of a new draw session.
    pub(crate) fn enter_draw(&mut self) {
        self.mode = Mode::Draw;
        self.pending_request = false;
    }

    pub(crate) fn exit_draw(&mut self) {
        if self.mode == Mode::Draw {
            self.mode = Mode::Idle;
        }
    }

    pub(crate) fn enter_delete(&mut self) {
        self.mode = Mode::Delete;
    }

    pub(crate) fn exit_delete(&mut self) {
        if self.mode == Mode::Delete {
            self.mode = Mode::Idle;
        }
    }

    /// Claims the single-flight slot. Returns false when a request is
    /// already outstanding.
    pub(crate) fn begin_request(&mut self) -> bool {
        if self.pending_request {
            return false;
        }
        self.pending_request = true;
        true
    }

    pub(crate) fn finish_request(&mut self) {
        self.pending_request = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_with_no_pending_request() {
        let state = InteractionState::new(false);
        assert!(state.is_idle());
        assert!(!state.pending_request());
        assert!(!state.panel_expanded());
    }

    #[test]
    fn single_flight_slot_claims_once() {
        let mut state = InteractionState::new(true);
        assert!(state.begin_request());
        assert!(!state.begin_request());
        state.finish_request();
        assert!(state.begin_request());
    }

    #[test]
    fn entering_draw_clears_the_pending_flag() {
        let mut state = InteractionState::new(true);
        assert!(state.begin_request());
        state.enter_draw();
        assert!(state.is_draw());
        assert!(!state.pending_request());
    }

    #[test]
    fn exit_transitions_only_apply_to_their_own_mode() {
        let mut state = InteractionState::new(true);
        state.enter_draw();
        state.exit_delete();
        assert!(state.is_draw());
        state.exit_draw();
        assert!(state.is_idle());
    }
}
