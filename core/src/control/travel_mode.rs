use serde::{Deserialize, Serialize};

/// One of the four configurable travel-mode slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelModeSlot {
    Profile1,
    Profile2,
    Profile3,
    Profile4,
}

/// Service profile string plus display label for one travel mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelModeSpec {
    pub profile: String,
    pub label: String,
}

impl TravelModeSpec {
    pub fn new(profile: &str, label: &str) -> Self {
        Self {
            profile: profile.to_string(),
            label: label.to_string(),
        }
    }
}

/// Travel-mode slot configuration. Slot 1 is always present; slots 2-4 may
/// be disabled by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelModeOptions {
    pub profile1: TravelModeSpec,
    pub profile2: Option<TravelModeSpec>,
    pub profile3: Option<TravelModeSpec>,
    pub profile4: Option<TravelModeSpec>,
    pub default_slot: TravelModeSlot,
}

impl Default for TravelModeOptions {
    fn default() -> Self {
        Self {
            profile1: TravelModeSpec::new("driving-car", "Driving"),
            profile2: Some(TravelModeSpec::new("cycling-regular", "Cycling")),
            profile3: Some(TravelModeSpec::new("foot-walking", "Walking")),
            profile4: Some(TravelModeSpec::new("wheelchair", "Wheelchair")),
            default_slot: TravelModeSlot::Profile1,
        }
    }
}

/// Holds the active travel mode and the slot-to-profile mapping. Exactly one
/// slot is active at a time.
#[derive(Debug, Clone)]
pub struct TravelModeSelector {
    options: TravelModeOptions,
    active: TravelModeSlot,
}

impl TravelModeSelector {
    pub fn from_options(options: &TravelModeOptions) -> Self {
        let mut selector = Self {
            options: options.clone(),
            active: TravelModeSlot::Profile1,
        };
        if selector.spec(options.default_slot).is_some() {
            selector.active = options.default_slot;
        }
        selector
    }

    fn spec(&self, slot: TravelModeSlot) -> Option<&TravelModeSpec> {
        match slot {
            TravelModeSlot::Profile1 => Some(&self.options.profile1),
            TravelModeSlot::Profile2 => self.options.profile2.as_ref(),
            TravelModeSlot::Profile3 => self.options.profile3.as_ref(),
            TravelModeSlot::Profile4 => self.options.profile4.as_ref(),
        }
    }

    fn active_spec(&self) -> &TravelModeSpec {
        // The active slot is always configured; slot 1 backs the invariant.
        self.spec(self.active).unwrap_or(&self.options.profile1)
    }

    /// Activates a slot. Unconfigured slots are rejected as a no-op.
    pub fn set_mode(&mut self, slot: TravelModeSlot) -> bool {
        if self.spec(slot).is_none() {
            return false;
        }
        self.active = slot;
        true
    }

    pub fn active_slot(&self) -> TravelModeSlot {
        self.active
    }

    pub fn active_profile(&self) -> &str {
        &self.active_spec().profile
    }

    pub fn active_label(&self) -> &str {
        &self.active_spec().label
    }
}
