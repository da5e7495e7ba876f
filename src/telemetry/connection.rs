//! Telemetry socket client.
//!
//! The socket is read on a tokio task; decoded frames are stamped with their
//! receipt time and handed to the UI thread over a channel that is drained at
//! the start of every frame. A dropped connection is never resumed: the caller
//! opens a fresh [`TelemetryConnection`] instead.

use std::sync::mpsc::{self, Receiver, Sender};

use futures::StreamExt;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

use crate::telemetry::clock::monotonic_seconds;
use crate::telemetry::message::{TelemetryMessage, TimedMessage};

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    Connected,
    /// Socket closed or could not be opened, with the reason if known.
    Disconnected(Option<String>),
    Message(TimedMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Connecting,
    Connected,
    Disconnected,
}

pub struct TelemetryConnection {
    url: String,
    events: Receiver<ConnectionEvent>,
    task: JoinHandle<()>,
    state: LinkState,
}

impl TelemetryConnection {
    /// Start connecting to `url` on `runtime`. `ctx` is woken for every event.
    pub fn open(runtime: &Handle, url: impl Into<String>, ctx: egui::Context) -> Self {
        let url = url.into();
        let (tx, rx) = mpsc::channel();
        tracing::info!("connecting to {url}");
        let task = runtime.spawn(read_socket(url.clone(), tx, ctx));
        Self {
            url,
            events: rx,
            task,
            state: LinkState::Connecting,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == LinkState::Connected
    }

    /// Drain everything received since the last call, in arrival order.
    pub fn poll(&mut self) -> Vec<ConnectionEvent> {
        let mut out = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            match &event {
                ConnectionEvent::Connected => self.state = LinkState::Connected,
                ConnectionEvent::Disconnected(_) => self.state = LinkState::Disconnected,
                ConnectionEvent::Message(_) => {}
            }
            out.push(event);
        }
        out
    }
}

impl Drop for TelemetryConnection {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn read_socket(url: String, tx: Sender<ConnectionEvent>, ctx: egui::Context) {
    let emit = |event: ConnectionEvent| {
        let delivered = tx.send(event).is_ok();
        ctx.request_repaint();
        delivered
    };

    let mut stream = match tokio_tungstenite::connect_async(url.as_str()).await {
        Ok((stream, _response)) => {
            tracing::info!("telemetry connected: {url}");
            emit(ConnectionEvent::Connected);
            stream
        }
        Err(e) => {
            tracing::warn!("telemetry connection to {url} failed: {e}");
            emit(ConnectionEvent::Disconnected(Some(e.to_string())));
            return;
        }
    };

    let mut reason = None;
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                let received_at = monotonic_seconds();
                let Some(message) = TelemetryMessage::parse(&text) else {
                    continue;
                };
                if !emit(ConnectionEvent::Message(TimedMessage { received_at, message })) {
                    // UI side went away.
                    return;
                }
            }
            Ok(Message::Close(frame)) => {
                reason = frame.map(|f| f.reason.to_string());
                break;
            }
            Ok(_) => {}
            Err(e) => {
                reason = Some(e.to_string());
                break;
            }
        }
    }
    tracing::info!("telemetry disconnected: {}", reason.as_deref().unwrap_or("closed"));
    emit(ConnectionEvent::Disconnected(reason));
}
