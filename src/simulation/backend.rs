use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::simulation::error::SimulationError;
use crate::simulation::model::{SimulationRequest, SimulationResult};

/// Source of precomputed simulations.
#[async_trait]
pub trait SimulationBackend: Send + Sync {
    /// Short name for logs and the status bar.
    fn name(&self) -> &str;

    /// Compute (or load) the full simulation for `request`.
    async fn simulate(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationResult, SimulationError>;
}

/// Backend reached over HTTP: one JSON POST per run.
#[derive(Clone)]
pub struct HttpBackend {
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl HttpBackend {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl SimulationBackend for HttpBackend {
    fn name(&self) -> &str {
        &self.endpoint
    }

    async fn simulate(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationResult, SimulationError> {
        tracing::debug!(endpoint = %self.endpoint, "Posting simulation request");

        // The deadline covers the body as well as the headers
        let exchange = async {
            let response = self.client.post(&self.endpoint).json(request).send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        };
        let (status, text) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| SimulationError::Timeout(self.timeout.as_millis() as u64))??;

        if !status.is_success() {
            return Err(SimulationError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        SimulationResult::from_json(&text)
    }
}

/// Backend that replays a saved response body from disk.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
    label: String,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }
}

#[async_trait]
impl SimulationBackend for FileBackend {
    fn name(&self) -> &str {
        &self.label
    }

    async fn simulate(
        &self,
        _request: &SimulationRequest,
    ) -> Result<SimulationResult, SimulationError> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        SimulationResult::from_json(&contents)
    }
}
