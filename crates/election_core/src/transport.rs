//! One-way delivery of UI intents to the host controller.

use std::{cell::RefCell, thread};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use reqwest::{header, Client};
use shared::protocol::HostRequest;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::error::TransportError;

pub const FALLBACK_RESOURCE_NAME: &str = "rsg-election";
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
const REQUEST_QUEUE_CAPACITY: usize = 64;

/// Send-and-ignore-result contract. Implementations must not block the caller and
/// never report delivery outcomes back.
pub trait HostTransport {
    fn send(&self, request: HostRequest);
}

impl<T: HostTransport + ?Sized> HostTransport for Box<T> {
    fn send(&self, request: HostRequest) {
        (**self).send(request)
    }
}

/// Transport for sessions with no host attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTransport;

impl HostTransport for NullTransport {
    fn send(&self, request: HostRequest) {
        debug!(endpoint = request.endpoint(), "no host attached; dropping request");
    }
}

/// Keeps every request in memory; used by the replay tool and tests.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: RefCell<Vec<HostRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<HostRequest> {
        self.sent.borrow().clone()
    }

    pub fn take(&self) -> Vec<HostRequest> {
        self.sent.take()
    }
}

impl HostTransport for RecordingTransport {
    fn send(&self, request: HostRequest) {
        self.sent.borrow_mut().push(request);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEndpoint {
    base: Url,
}

impl HostEndpoint {
    /// `https://<resource>/`, with the fallback name when the runtime provides none.
    pub fn for_resource(resource_name: &str) -> Result<Self, TransportError> {
        let resource_name = match resource_name.trim() {
            "" => FALLBACK_RESOURCE_NAME,
            name => name,
        };
        Self::from_base(&format!("https://{resource_name}/"))
    }

    pub fn from_base(base: &str) -> Result<Self, TransportError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn url_for(&self, request: &HostRequest) -> Result<Url, TransportError> {
        Ok(self.base.join(request.endpoint())?)
    }
}

pub async fn post_request(
    client: &Client,
    endpoint: &HostEndpoint,
    request: HostRequest,
) -> Result<(), TransportError> {
    let url = endpoint.url_for(&request)?;
    let body = request.body()?;
    let response = client
        .post(url)
        .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
        .body(body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::Status(status));
    }
    Ok(())
}

/// Hands requests to the HTTP worker thread without waiting for delivery.
#[derive(Debug, Clone)]
pub struct QueuedTransport {
    tx: Sender<HostRequest>,
}

impl QueuedTransport {
    pub fn new(tx: Sender<HostRequest>) -> Self {
        Self { tx }
    }
}

impl HostTransport for QueuedTransport {
    fn send(&self, request: HostRequest) {
        let endpoint = request.endpoint();
        match self.tx.try_send(request) {
            Ok(()) => debug!(endpoint, "queued host request"),
            Err(TrySendError::Full(_)) => {
                warn!(endpoint, "host request queue is full; dropping request")
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(endpoint, "host transport worker is gone; dropping request")
            }
        }
    }
}

pub fn spawn_http_worker(endpoint: HostEndpoint) -> QueuedTransport {
    let (tx, rx) = bounded::<HostRequest>(REQUEST_QUEUE_CAPACITY);
    info!(base = %endpoint.base(), "starting host transport worker");
    if let Err(err) = thread::Builder::new()
        .name("host-transport".to_string())
        .spawn(move || run_http_worker(endpoint, rx))
    {
        error!("failed to spawn host transport worker: {err}");
    }
    QueuedTransport::new(tx)
}

fn run_http_worker(endpoint: HostEndpoint, rx: Receiver<HostRequest>) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!("failed to build host transport runtime: {err}");
            return;
        }
    };
    let client = Client::new();

    while let Ok(request) = rx.recv() {
        match runtime.block_on(post_request(&client, &endpoint, request)) {
            Ok(()) => debug!(endpoint = request.endpoint(), "host request delivered"),
            Err(err) => warn!(endpoint = request.endpoint(), "host request failed: {err}"),
        }
    }
    debug!("host transport worker stopped");
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
