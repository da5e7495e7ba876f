//! Outbound side: control requests, server documents and the HTTP client.

pub mod client;
pub mod documents;
pub mod request;

pub use client::{ControlSink, DocumentPurpose, HttpControlClient, ServerReply};
pub use documents::{Diagnostics, DocumentKind, PidLoopDraft};
pub use request::ControlRequest;
