//! Reachability core: turns map clicks into isoline requests against the
//! openrouteservice isochrones API (or a deterministic offline stand-in),
//! normalizes the responses into styled GeoJSON features, and manages the
//! accumulated results as a layer group with draw/delete interaction modes.
//!
//! The crate is headless. Rendering happens behind the [`MapSurface`] seam
//! and visual styling behind host-supplied callbacks, so the same control
//! drives a GUI map widget, a scripted workflow, or a test double.

pub mod client;
pub mod control;
pub mod geom;
pub mod ors_interface;
pub mod prelude;
pub mod telemetry;

pub use control::reachability::{ClickOutcome, ReachabilityControl};
pub use prelude::{ControlError, ControlOptions, ControlResult, MapSurface, NullSurface, Point};
