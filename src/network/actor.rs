//! Network actor - runs backend calls in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{display_name, ApiClient};

/// Network actor that executes backend calls, one task per command
pub struct NetworkActor {
    client: ApiClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: ApiClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                        Some(cmd) => self.dispatch(cmd),
                    }
                }

                // Reap completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }

    fn dispatch(&mut self, cmd: NetworkCommand) {
        let response_tx = self.response_tx.clone();
        let client = self.client.clone();

        match cmd {
            NetworkCommand::Generate { id, request } => {
                self.active_requests.spawn(async move {
                    tracing::info!(id, topic = %request.topic, tone = %request.tone, "Starting generation workflow");
                    let result = match client.generate(&request).await {
                        Ok(response) => {
                            tracing::info!(id, revisions = response.revisions, used_context = response.used_context, "Generation complete");
                            NetworkResponse::Generated { id, response }
                        }
                        Err(e) => {
                            tracing::debug!(id, error = ?e, "Generation request error");
                            NetworkResponse::GenerateFailed { id, message: e.summary() }
                        }
                    };
                    let _ = response_tx.send(result);
                });
            }

            NetworkCommand::IngestFile { id, path } => {
                self.active_requests.spawn(async move {
                    let filename = display_name(&path);
                    tracing::info!(id, path = %path.display(), "Uploading file for ingestion");
                    let result = match client.ingest_file(&path).await {
                        Ok(()) => {
                            tracing::info!(id, %filename, "Ingestion accepted");
                            NetworkResponse::Ingested { id, filename }
                        }
                        Err(e) => {
                            tracing::debug!(id, %filename, error = ?e, "Ingestion request error");
                            NetworkResponse::IngestFailed { id, filename, message: e.summary() }
                        }
                    };
                    let _ = response_tx.send(result);
                });
            }

            NetworkCommand::CheckHealth { id } => {
                self.active_requests.spawn(async move {
                    let result = match client.health().await {
                        Ok(status) => {
                            tracing::info!(id, status = %status.status, "Health check ok");
                            NetworkResponse::Health { id, status }
                        }
                        Err(e) => {
                            tracing::debug!(id, error = ?e, "Health request error");
                            NetworkResponse::HealthFailed { id, message: e.summary() }
                        }
                    };
                    let _ = response_tx.send(result);
                });
            }

            NetworkCommand::Shutdown => {}
        }
    }
}
