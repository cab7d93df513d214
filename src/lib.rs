//! notiprobe - interactive test client for the NATS notification service
//!
//! Presents a numbered menu, sends small notification batches to the
//! service's request/reply subjects and prints the raw replies. The service
//! itself (priority ordering, storage, WebSocket fan-out) lives elsewhere.

pub mod menu;
pub mod probe;

pub use menu::{parse_choice, parse_choice_bytes, MenuChoice, MenuError};
pub use probe::{run_session, Probe, ProbeSummary};
