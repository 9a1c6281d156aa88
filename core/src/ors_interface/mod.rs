pub mod request;
pub mod response;

pub use request::{build_request, IsolineRequest, RangeType};
pub use response::{PolygonGeometry, RawFeature, RawIsolineResponse, RawProperties};
