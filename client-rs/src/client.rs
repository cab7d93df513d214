//! Bus client capability and its NATS implementation

use crate::config::BusConfig;
use crate::error::{BusError, Result};

use async_nats::{client::RequestErrorKind, ConnectOptions};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

/// Request/reply access to the message bus
///
/// The probe only ever talks to the bus through this trait, so tests can
/// swap in an in-memory implementation.
#[async_trait]
pub trait BusClient: Send + Sync {
    /// Send `payload` on `subject` and wait up to `timeout` for the reply body
    async fn request(&self, subject: &str, payload: Bytes, timeout: Duration) -> Result<Bytes>;

    /// Flush and release the connection. Safe to call more than once.
    async fn close(&self) -> Result<()>;
}

/// Bus client backed by a NATS connection
pub struct NatsBus {
    client: Mutex<Option<async_nats::Client>>,
}

impl NatsBus {
    /// Connect to the NATS server named in `config`
    ///
    /// Fails immediately if the server cannot be reached; there is no retry.
    pub async fn connect(config: BusConfig) -> Result<Self> {
        debug!(url = %config.url, name = %config.connection_name, "Connecting to NATS");

        let client = ConnectOptions::new()
            .name(&config.connection_name)
            .connection_timeout(config.connect_timeout)
            .connect(config.url.as_str())
            .await
            .map_err(|e| BusError::Connection(e.to_string()))?;

        info!(url = %config.url, "Connected to NATS");

        Ok(Self {
            client: Mutex::new(Some(client)),
        })
    }

    fn handle(&self) -> Result<async_nats::Client> {
        self.client.lock().clone().ok_or(BusError::Closed)
    }
}

#[async_trait]
impl BusClient for NatsBus {
    async fn request(&self, subject: &str, payload: Bytes, wait: Duration) -> Result<Bytes> {
        let client = self.handle()?;

        debug!(subject = %subject, bytes = payload.len(), "Sending request");

        let reply = match timeout(wait, client.request(subject.to_string(), payload)).await {
            Ok(Ok(message)) => message,
            Ok(Err(e)) => {
                return Err(match e.kind() {
                    RequestErrorKind::TimedOut => BusError::Timeout,
                    RequestErrorKind::NoResponders => BusError::NoResponders(subject.to_string()),
                    _ => BusError::Request(e.to_string()),
                });
            }
            Err(_) => return Err(BusError::Timeout),
        };

        debug!(subject = %subject, bytes = reply.payload.len(), "Received reply");
        Ok(reply.payload)
    }

    async fn close(&self) -> Result<()> {
        let taken = self.client.lock().take();
        let Some(client) = taken else {
            return Ok(());
        };

        if let Err(e) = client.flush().await {
            warn!(error = %e, "Failed to flush NATS connection on close");
        }

        debug!("NATS connection closed");
        Ok(())
    }
}
