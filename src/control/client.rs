//! HTTP client for the control server.
//!
//! Every call is spawned on the tokio runtime and never awaited by the UI.
//! Outcomes come back as [`ServerReply`] values drained once per frame.

use std::sync::mpsc::{self, Receiver, Sender};

use serde_json::Value;
use tokio::runtime::Handle;

use crate::control::documents::{apply_pid_loop, expect_document, Diagnostics, DocumentKind, PidLoopDraft};
use crate::control::request::ControlRequest;
use crate::error::{DashError, Result};
use crate::layout::model::WidgetId;

/// Destination for fire-and-forget control requests.
pub trait ControlSink {
    /// Issue `request`. `origin` names the widget that triggered it, if any,
    /// so the outcome can be routed back to it.
    fn send(&mut self, request: ControlRequest, origin: Option<WidgetId>);
}

/// Why a document was fetched; decides where the answer goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentPurpose {
    /// Open the matching editor window.
    Edit,
    /// Refresh the channel label cache.
    Labels,
    /// Load the PID editor of a panel widget.
    PidPanel(WidgetId),
    /// Replace the layout with the server copy.
    LayoutLoad,
}

#[derive(Debug)]
pub enum ServerReply {
    Control {
        request: ControlRequest,
        origin: Option<WidgetId>,
        result: Result<()>,
    },
    Document {
        kind: DocumentKind,
        purpose: DocumentPurpose,
        result: Result<Value>,
    },
    /// Editor save of a whole document.
    Saved {
        kind: DocumentKind,
        result: Result<()>,
    },
    /// One loop written back from a PID panel widget.
    PidLoopSaved {
        origin: WidgetId,
        index: usize,
        result: Result<()>,
    },
    Diag(Result<Diagnostics>),
}

pub struct HttpControlClient {
    base: String,
    http: reqwest::Client,
    runtime: Handle,
    tx: Sender<ServerReply>,
    rx: Receiver<ServerReply>,
    ctx: egui::Context,
}

impl HttpControlClient {
    pub fn new(runtime: Handle, base: impl Into<String>, ctx: egui::Context) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            runtime,
            tx,
            rx,
            ctx,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    pub fn set_base_url(&mut self, base: impl Into<String>) {
        self.base = base.into().trim_end_matches('/').to_string();
    }

    /// Replies received since the last call.
    pub fn poll(&mut self) -> Vec<ServerReply> {
        let mut out = Vec::new();
        while let Ok(reply) = self.rx.try_recv() {
            out.push(reply);
        }
        out
    }

    fn spawn<F>(&self, fut: F)
    where
        F: std::future::Future<Output = ServerReply> + Send + 'static,
    {
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        self.runtime.spawn(async move {
            let reply = fut.await;
            let _ = tx.send(reply);
            ctx.request_repaint();
        });
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn fetch_document(&self, kind: DocumentKind, purpose: DocumentPurpose) {
        let http = self.http.clone();
        let url = self.url(kind.path());
        self.spawn(async move {
            let result = get_json(&http, &url).await.and_then(|v| expect_document(kind, v));
            if let Err(e) = &result {
                tracing::warn!("GET {url} failed: {e}");
            }
            ServerReply::Document { kind, purpose, result }
        });
    }

    pub fn put_document(&self, kind: DocumentKind, document: Value) {
        let http = self.http.clone();
        let url = self.url(kind.path());
        self.spawn(async move {
            let result = put_json(&http, &url, &document).await;
            match &result {
                Ok(()) => tracing::info!("saved {}", kind.title()),
                Err(e) => tracing::warn!("PUT {url} failed: {e}"),
            }
            ServerReply::Saved { kind, result }
        });
    }

    /// Read-modify-write of one PID loop: fetch the document, overwrite the
    /// editable fields of `loops[index]` and write it back.
    pub fn save_pid_loop(&self, origin: WidgetId, index: usize, draft: PidLoopDraft) {
        let http = self.http.clone();
        let url = self.url(DocumentKind::Pid.path());
        self.spawn(async move {
            let result = async {
                let mut doc = get_json(&http, &url).await?;
                apply_pid_loop(&mut doc, index, &draft);
                put_json(&http, &url, &doc).await
            }
            .await;
            if let Err(e) = &result {
                tracing::warn!("saving PID loop {index} failed: {e}");
            }
            ServerReply::PidLoopSaved { origin, index, result }
        });
    }

    pub fn fetch_diag(&self) {
        let http = self.http.clone();
        let url = self.url("/api/diag");
        self.spawn(async move {
            let result = get_json(&http, &url).await.map(|v| Diagnostics::from_value(&v));
            if let Err(e) = &result {
                tracing::debug!("diag unavailable: {e}");
            }
            ServerReply::Diag(result)
        });
    }
}

impl ControlSink for HttpControlClient {
    fn send(&mut self, request: ControlRequest, origin: Option<WidgetId>) {
        let http = self.http.clone();
        let url = self.url(request.path());
        self.spawn(async move {
            let result = post_json(&http, &url, &request.body()).await;
            if let Err(e) = &result {
                tracing::warn!("POST {url} failed: {e}");
            }
            ServerReply::Control { request, origin, result }
        });
    }
}

fn check_status(url: &str, response: &reqwest::Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(DashError::Status {
            path: url.to_string(),
            status: status.as_u16(),
        })
    }
}

async fn get_json(http: &reqwest::Client, url: &str) -> Result<Value> {
    let response = http.get(url).send().await?;
    check_status(url, &response)?;
    Ok(response.json::<Value>().await?)
}

async fn put_json(http: &reqwest::Client, url: &str, body: &Value) -> Result<()> {
    let response = http.put(url).json(body).send().await?;
    check_status(url, &response)
}

async fn post_json(http: &reqwest::Client, url: &str, body: &Value) -> Result<()> {
    let response = http.post(url).json(body).send().await?;
    check_status(url, &response)
}
