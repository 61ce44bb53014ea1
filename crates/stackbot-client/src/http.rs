use std::time::Duration;

use serde::de::DeserializeOwned;
use stackbot_core::{Command, Snapshot};

use crate::{
    ApiError, Endpoint, GameApi,
    schema::{MatrixReport, StatusReport},
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

const SNIPPET_LEN: usize = 100;

/// [`GameApi`] backed by blocking HTTP GET requests.
#[derive(Debug, Clone)]
pub struct HttpGameApi {
    endpoint: Endpoint,
    agent: ureq::Agent,
}

impl HttpGameApi {
    #[must_use]
    pub fn new(endpoint: Endpoint, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { endpoint, agent }
    }

    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, ApiError> {
        let mut request = self.agent.get(url);
        for (key, value) in query {
            request = request.query(key, value);
        }
        match request.call() {
            Ok(response) => response.into_string().map_err(|source| ApiError::Body {
                url: url.to_owned(),
                source,
            }),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(ApiError::Status {
                    url: url.to_owned(),
                    status,
                    body: snippet(&body),
                })
            }
            Err(ureq::Error::Transport(transport)) => Err(ApiError::Transport {
                url: url.to_owned(),
                source: Box::new(transport),
            }),
        }
    }

    fn get_json<T>(&self, url: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let body = self.get(url, &[])?;
        parse_body(url, &body)
    }
}

impl GameApi for HttpGameApi {
    fn status(&mut self) -> Result<StatusReport, ApiError> {
        let report: StatusReport = self.get_json(&self.endpoint.status_url())?;
        tracing::debug!(?report, "status");
        Ok(report)
    }

    fn matrix(&mut self) -> Result<Snapshot, ApiError> {
        let report: MatrixReport = self.get_json(&self.endpoint.matrix_url())?;
        Ok(report.into_snapshot())
    }

    fn send_command(&mut self, command: Command) -> Result<Option<serde_json::Value>, ApiError> {
        let url = self.endpoint.command_url();
        let body = self.get(&url, &[("command", command.as_str())])?;
        if body.trim().is_empty() {
            tracing::debug!(%command, "command accepted with empty body");
            return Ok(None);
        }
        match serde_json::from_str(&body) {
            Ok(value) => {
                tracing::debug!(%command, response = %value, "command accepted");
                Ok(Some(value))
            }
            Err(_) => {
                tracing::debug!(%command, body = %snippet(&body), "command accepted with non-JSON body");
                Ok(None)
            }
        }
    }

    fn probe(&mut self) {
        tracing::info!(server = %self.endpoint.origin(), "checking API connectivity");
        for url in self.endpoint.probe_urls() {
            match self.agent.get(&url).call() {
                Ok(response) => {
                    let status = response.status();
                    let body = response.into_string().unwrap_or_default();
                    tracing::info!(%url, status, body = %snippet(&body), "probe response");
                }
                Err(ureq::Error::Status(status, response)) => {
                    let body = response.into_string().unwrap_or_default();
                    tracing::warn!(%url, status, body = %snippet(&body), "probe response");
                }
                Err(ureq::Error::Transport(transport)) => {
                    tracing::warn!(%url, error = %transport, "probe failed");
                }
            }
        }
    }
}

fn parse_body<T>(url: &str, body: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    if body.trim().is_empty() {
        return Err(ApiError::EmptyBody {
            url: url.to_owned(),
        });
    }
    serde_json::from_str(body).map_err(|source| ApiError::Json {
        url: url.to_owned(),
        body: snippet(body),
        source,
    })
}

/// Truncates a response body to at most 100 characters for log output.
#[must_use]
pub fn snippet(body: &str) -> String {
    match body.char_indices().nth(SNIPPET_LEN) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_owned(),
    }
}
