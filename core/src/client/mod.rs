pub mod live;
pub mod mock;

pub use live::LiveClient;
pub use mock::MockClient;

use crate::ors_interface::request::IsolineRequest;
use crate::ors_interface::response::RawIsolineResponse;
use crate::prelude::{ControlResult, Point};

/// Isoline computation strategy: live HTTP service when a credential is
/// configured, deterministic offline approximation otherwise. Selected once
/// at construction so response handling stays branch-free.
pub enum IsolineClient {
    Live(LiveClient),
    Mock(MockClient),
}

impl IsolineClient {
    pub fn from_credential(endpoint: &str, api_key: Option<&str>) -> Self {
        match api_key {
            Some(key) if !key.is_empty() => Self::Live(LiveClient::new(endpoint, key)),
            _ => Self::Mock(MockClient::new()),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    /// Submits one isoline computation. `selected_minutes` sizes the offline
    /// approximation; the live path ignores it.
    pub async fn submit(
        &self,
        request: &IsolineRequest,
        origin: Point,
        selected_minutes: f64,
    ) -> ControlResult<RawIsolineResponse> {
        match self {
            Self::Live(live) => live.submit(request).await,
            Self::Mock(mock) => mock.submit(origin, selected_minutes, &request.profile),
        }
    }
}
