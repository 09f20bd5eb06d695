//! Network actor - runs API calls in the Tokio async runtime

use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse, RequestKind};
use crate::network::client::MetadictClient;

/// Network actor that processes API commands
pub struct NetworkActor {
    client: MetadictClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: MetadictClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
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
                        Some(command) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            self.active_requests.spawn(async move {
                                if let Some(response) = execute(&client, command).await {
                                    let _ = response_tx.send(response);
                                }
                            });
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}

/// Run one command against the API and turn the outcome into a response
pub async fn execute(client: &MetadictClient, command: NetworkCommand) -> Option<NetworkResponse> {
    let start = Instant::now();
    let (id, kind, result) = match command {
        NetworkCommand::ListDictionaries { id } => {
            tracing::info!(id, "Fetching dictionaries");
            (id, RequestKind::Dictionaries, client.list_dictionaries().await)
        }
        NetworkCommand::Query { id, query, dictionaries } => {
            tracing::info!(id, query = %query, "Executing query");
            (id, RequestKind::Query, client.query(&query, &dictionaries).await)
        }
        NetworkCommand::GetStatus { id } => {
            tracing::info!(id, "Fetching status");
            (id, RequestKind::Status, client.get_status().await)
        }
        NetworkCommand::Shutdown => return None,
    };
    let time_ms = start.elapsed().as_millis() as u64;

    Some(match result {
        Ok(body) => {
            tracing::info!(id, kind = kind.as_str(), time_ms, "Request completed");
            NetworkResponse::Success { id, kind, body, time_ms }
        }
        Err(err) => {
            tracing::warn!(id, kind = kind.as_str(), time_ms, error = %err, "Request failed");
            NetworkResponse::Error {
                id,
                kind,
                http_status: err.http_status(),
                message: err.to_string(),
                time_ms,
            }
        }
    })
}
