//! Inbound telemetry: socket client, frame decoding and ingest.

pub mod clock;
pub mod connection;
pub mod ingest;
pub mod message;

pub use connection::{ConnectionEvent, LinkState, TelemetryConnection};
pub use ingest::TelemetryIngest;
pub use message::{TelemetryMessage, TickMessage, TimedMessage};
