use reqwest::header::{ACCEPT, AUTHORIZATION};

use crate::ors_interface::request::IsolineRequest;
use crate::ors_interface::response::RawIsolineResponse;
use crate::prelude::{ControlError, ControlResult};
use crate::telemetry::log::LogManager;

/// HTTP client for the isoline computation service. One POST per accepted
/// click; failures are classified, never retried here.
pub struct LiveClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    logger: LogManager,
}

impl LiveClient {
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            logger: LogManager::new(),
        }
    }

    pub async fn submit(&self, request: &IsolineRequest) -> ControlResult<RawIsolineResponse> {
        let url = format!("{}/{}", self.endpoint, request.profile);
        self.logger.record(&format!("isoline request -> {}", url));

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, &self.api_key)
            .header(ACCEPT, "application/json, application/geo+json")
            .json(request)
            .send()
            .await
            .map_err(|err| ControlError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ControlError::Service(status.as_u16()));
        }

        let body: RawIsolineResponse = response
            .json()
            .await
            .map_err(|err| ControlError::Transport(err.to_string()))?;

        if body.features.is_empty() {
            return Err(ControlError::EmptyResult);
        }
        Ok(body)
    }
}
