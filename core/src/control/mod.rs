pub mod events;
pub mod export;
pub mod group;
pub mod hooks;
pub mod normalize;
pub mod range;
pub mod reachability;
pub mod state;
pub mod travel_mode;

pub use events::{ControlEvent, EventBus};
pub use export::ExportArtifact;
pub use group::IsolineLayerGroup;
pub use hooks::{FeatureStyle, HostHooks, IndicatorTarget, MarkerStyle};
pub use normalize::{IsolineFeature, IsolineResult, OriginMarker};
pub use range::{RangeConfig, RangeOptions};
pub use reachability::{ClickOutcome, ReachabilityControl};
pub use state::{InteractionState, Mode};
pub use travel_mode::{TravelModeOptions, TravelModeSelector, TravelModeSlot, TravelModeSpec};
