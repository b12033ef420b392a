use std::collections::HashSet;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

use image::DynamicImage;
use tracing::{debug, error, warn};

use crate::api::{ApiError, Config, GalleryClient, Image, MessageResponse, PageResponse};
use crate::gallery::{BatchDelete, DetailRequest, ListRequest, RequestToken};

/// Longest edge of a decoded thumbnail handed to the UI thread.
const THUMBNAIL_MAX_EDGE: u32 = 768;

/// Work for the background thread.
#[derive(Debug, Clone)]
pub enum WorkerRequest {
    LoadConfig,
    SaveConfig(Config),
    Scan,
    List(ListRequest),
    Detail(DetailRequest),
    Delete(BatchDelete),
    Thumbnail { id: i64, filepath: String },
}

/// A finished request, carrying its token where one was issued.
#[derive(Debug)]
pub enum WorkerEvent {
    ConfigLoaded(Result<Config, ApiError>),
    ConfigSaved {
        config: Config,
        result: Result<MessageResponse, ApiError>,
    },
    ScanStarted(Result<MessageResponse, ApiError>),
    Listed {
        token: RequestToken,
        result: Result<PageResponse, ApiError>,
    },
    Detail {
        token: RequestToken,
        id: i64,
        result: Result<Image, ApiError>,
    },
    Deleted {
        token: RequestToken,
        result: Result<MessageResponse, ApiError>,
    },
    Thumbnail {
        id: i64,
        image: Option<DynamicImage>,
    },
}

/// Runs gallery API calls off the UI thread.
///
/// Requests go in over one channel and events come back over another; the UI
/// polls once per frame and never blocks on the network. Each request runs as
/// its own task, so responses may arrive in any order.
pub struct ApiWorker {
    request_tx: Sender<WorkerRequest>,
    event_rx: Receiver<WorkerEvent>,
    /// Thumbnails requested but not yet delivered
    pending_thumbnails: HashSet<i64>,
}

impl ApiWorker {
    pub fn spawn(client: GalleryClient) -> Self {
        let (request_tx, request_rx) = channel::<WorkerRequest>();
        let (event_tx, event_rx) = channel::<WorkerEvent>();

        thread::spawn(move || {
            worker_loop(client, request_rx, event_tx);
        });

        Self {
            request_tx,
            event_rx,
            pending_thumbnails: HashSet::new(),
        }
    }

    /// A worker with no thread behind it. The caller holds the other channel
    /// ends and plays the server.
    pub fn detached() -> (Self, Receiver<WorkerRequest>, Sender<WorkerEvent>) {
        let (request_tx, request_rx) = channel();
        let (event_tx, event_rx) = channel();
        let worker = Self {
            request_tx,
            event_rx,
            pending_thumbnails: HashSet::new(),
        };
        (worker, request_rx, event_tx)
    }

    /// Queue a request. Returns false if the worker has gone away.
    pub fn send(&self, request: WorkerRequest) -> bool {
        debug!(?request, "queueing api request");
        self.request_tx.send(request).is_ok()
    }

    /// Queue a thumbnail download unless one is already pending for `id`.
    pub fn queue_thumbnail(&mut self, id: i64, filepath: &str) -> bool {
        if self.pending_thumbnails.contains(&id) {
            return false;
        }
        let request = WorkerRequest::Thumbnail {
            id,
            filepath: filepath.to_string(),
        };
        if self.request_tx.send(request).is_ok() {
            self.pending_thumbnails.insert(id);
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    pub fn is_thumbnail_pending(&self, id: i64) -> bool {
        self.pending_thumbnails.contains(&id)
    }

    /// Drain every finished request.
    pub fn poll_events(&mut self) -> Vec<WorkerEvent> {
        let mut events = Vec::new();
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => {
                    if let WorkerEvent::Thumbnail { id, .. } = &event {
                        self.pending_thumbnails.remove(id);
                    }
                    events.push(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}

fn worker_loop(
    client: GalleryClient,
    request_rx: Receiver<WorkerRequest>,
    event_tx: Sender<WorkerEvent>,
) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "failed to start api runtime");
            return;
        }
    };

    while let Ok(request) = request_rx.recv() {
        let client = client.clone();
        let event_tx = event_tx.clone();
        runtime.spawn(async move {
            let event = execute(&client, request).await;
            // Receiver is gone once the TUI exits
            let _ = event_tx.send(event);
        });
    }
    debug!("api worker shutting down");
}

async fn execute(client: &GalleryClient, request: WorkerRequest) -> WorkerEvent {
    match request {
        WorkerRequest::LoadConfig => WorkerEvent::ConfigLoaded(client.get_config().await),
        WorkerRequest::SaveConfig(config) => {
            let result = client.save_config(&config).await;
            WorkerEvent::ConfigSaved { config, result }
        }
        WorkerRequest::Scan => WorkerEvent::ScanStarted(client.trigger_scan().await),
        WorkerRequest::List(req) => WorkerEvent::Listed {
            token: req.token,
            result: client.list_images(req.page, &req.query).await,
        },
        WorkerRequest::Detail(req) => WorkerEvent::Detail {
            token: req.token,
            id: req.id,
            result: client.get_image(req.id).await,
        },
        WorkerRequest::Delete(req) => WorkerEvent::Deleted {
            token: req.token,
            result: client.delete_images(&req.ids).await,
        },
        WorkerRequest::Thumbnail { id, filepath } => {
            let image = match client.fetch_thumbnail(&filepath).await {
                Ok(img) => Some(img.thumbnail(THUMBNAIL_MAX_EDGE, THUMBNAIL_MAX_EDGE)),
                Err(e) => {
                    warn!(id, filepath = %filepath, error = %e, "thumbnail load failed");
                    None
                }
            };
            WorkerEvent::Thumbnail { id, image }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_requests_are_deduplicated_until_delivered() {
        let (mut worker, requests, events) = ApiWorker::detached();

        assert!(worker.queue_thumbnail(4, "/images/4.png"));
        assert!(!worker.queue_thumbnail(4, "/images/4.png"));
        assert!(worker.is_thumbnail_pending(4));
        assert_eq!(requests.try_iter().count(), 1);

        events
            .send(WorkerEvent::Thumbnail { id: 4, image: None })
            .unwrap();
        let polled = worker.poll_events();
        assert_eq!(polled.len(), 1);
        assert!(!worker.is_thumbnail_pending(4));
        assert!(worker.queue_thumbnail(4, "/images/4.png"));
    }

    #[test]
    fn send_fails_once_worker_is_gone() {
        let (worker, requests, _events) = ApiWorker::detached();
        drop(requests);
        assert!(!worker.send(WorkerRequest::Scan));
    }
}
