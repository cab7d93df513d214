//! Notification bus client
//!
//! Request/reply access to the notification service over NATS, plus the wire
//! types the service accepts.
//!
//! # Example
//!
//! ```no_run
//! use notiprobe_client::{encode_batch, BusClient, BusConfig, NatsBus, Notification, NotificationKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BusConfig::default();
//!     let bus = NatsBus::connect(config.clone()).await?;
//!
//!     let batch = vec![Notification::broadcast(NotificationKind::Info, "deploy finished")];
//!     let body = encode_batch(&batch)?;
//!
//!     let reply = bus
//!         .request(notiprobe_client::SEND_TO_ALL, body.into(), config.request_timeout)
//!         .await?;
//!     println!("{}", String::from_utf8_lossy(&reply));
//!
//!     bus.close().await?;
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod messages;

pub use client::{BusClient, NatsBus};
pub use config::{BusConfig, DEFAULT_REQUEST_TIMEOUT, DEFAULT_URL};
pub use error::{BusError, Result};
pub use messages::{
    encode_batch, Notification, NotificationKind, LIST, LIST_REQUEST_BODY, SEND_TO_ALL,
    SEND_TO_CLIENTS,
};
