//! In-memory stand-ins for the browser collaborators.

use crate::{
    client::{HttpResponse, HttpTransport},
    error::{GenerateError, Result},
    host::{BlobStore, DisplayRegion, Exporter, ImageView, PrintPage},
    models::{GeneratedImage, ImageHandle},
};
use async_trait::async_trait;
use futures::channel::oneshot;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

enum Pending {
    Ready(Result<HttpResponse>),
    Deferred(oneshot::Receiver<Result<HttpResponse>>),
}

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct MockTransport {
    queue: RefCell<VecDeque<Pending>>,
    requests: RefCell<Vec<(String, serde_json::Value)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, response: HttpResponse) {
        self.queue
            .borrow_mut()
            .push_back(Pending::Ready(Ok(response)));
    }

    pub fn fail(&self, error: GenerateError) {
        self.queue.borrow_mut().push_back(Pending::Ready(Err(error)));
    }

    /// Queues a response that resolves only when the returned sender fires.
    pub fn defer(&self) -> oneshot::Sender<Result<HttpResponse>> {
        let (tx, rx) = oneshot::channel();
        self.queue.borrow_mut().push_back(Pending::Deferred(rx));
        tx
    }

    pub fn requests(&self) -> Vec<(String, serde_json::Value)> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse> {
        self.requests
            .borrow_mut()
            .push((url.to_string(), body.clone()));

        let next = self.queue.borrow_mut().pop_front();
        match next {
            Some(Pending::Ready(result)) => result,
            Some(Pending::Deferred(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(GenerateError::Transport("request aborted".into()))),
            None => Err(GenerateError::Transport("no response queued".into())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionEvent {
    Cleared,
    Status(String),
    Error(String),
    Image {
        src: String,
        alt: String,
        print_label: String,
        save_label: String,
    },
    Revealed,
}

#[derive(Default)]
pub struct RecordingRegion {
    events: RefCell<Vec<RegionEvent>>,
}

impl RecordingRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RegionEvent> {
        self.events.borrow().clone()
    }

    /// What the region currently shows (the last replacing event).
    pub fn content(&self) -> Option<RegionEvent> {
        self.events
            .borrow()
            .iter()
            .rev()
            .find(|event| **event != RegionEvent::Revealed)
            .cloned()
    }
}

impl DisplayRegion for RecordingRegion {
    fn clear(&self) {
        self.events.borrow_mut().push(RegionEvent::Cleared);
    }

    fn show_status(&self, text: &str) {
        self.events
            .borrow_mut()
            .push(RegionEvent::Status(text.to_string()));
    }

    fn show_error(&self, text: &str) {
        self.events
            .borrow_mut()
            .push(RegionEvent::Error(text.to_string()));
    }

    fn show_image(&self, view: &ImageView<'_>) {
        self.events.borrow_mut().push(RegionEvent::Image {
            src: view.src.to_string(),
            alt: view.alt.to_string(),
            print_label: view.print_label.to_string(),
            save_label: view.save_label.to_string(),
        });
    }

    fn reveal(&self) {
        self.events.borrow_mut().push(RegionEvent::Revealed);
    }
}

/// Hands out `blob:mock/<n>` URLs and keeps the bytes behind each one.
#[derive(Default)]
pub struct MockBlobStore {
    next_id: Cell<u32>,
    live: RefCell<Vec<(String, Rc<GeneratedImage>)>>,
    released: RefCell<Vec<String>>,
    scheduled: RefCell<Vec<(String, Duration)>>,
    fail_create: Cell<bool>,
}

impl MockBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_create(&self) {
        self.fail_create.set(true);
    }

    /// Bytes a live URL resolves to.
    pub fn resolve(&self, url: &str) -> Option<Vec<u8>> {
        self.live
            .borrow()
            .iter()
            .find(|(live, _)| live == url)
            .map(|(_, image)| image.bytes.clone())
    }

    pub fn live_urls(&self) -> Vec<String> {
        self.live.borrow().iter().map(|(url, _)| url.clone()).collect()
    }

    pub fn released(&self) -> Vec<String> {
        self.released.borrow().clone()
    }

    pub fn scheduled(&self) -> Vec<(String, Duration)> {
        self.scheduled.borrow().clone()
    }

    /// Fires every pending delayed release.
    pub fn run_timers(&self) {
        let pending: Vec<_> = self.scheduled.borrow_mut().drain(..).collect();
        for (url, _) in pending {
            self.release_url(&url);
        }
    }

    fn release_url(&self, url: &str) {
        self.live.borrow_mut().retain(|(live, _)| live != url);
        self.released.borrow_mut().push(url.to_string());
    }
}

impl BlobStore for MockBlobStore {
    fn create(&self, image: Rc<GeneratedImage>) -> Result<ImageHandle> {
        if self.fail_create.replace(false) {
            return Err(GenerateError::Host("createObjectURL failed".into()));
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let url = format!("blob:mock/{}", id);
        self.live.borrow_mut().push((url.clone(), image.clone()));
        Ok(ImageHandle::new(url, image))
    }

    fn release(&self, handle: &ImageHandle) {
        self.release_url(handle.url());
    }

    fn release_after(&self, handle: ImageHandle, delay: Duration) {
        self.scheduled
            .borrow_mut()
            .push((handle.url().to_string(), delay));
    }
}

#[derive(Default)]
pub struct MockExporter {
    prints: RefCell<Vec<(String, String)>>,
    downloads: RefCell<Vec<(String, String)>>,
    block_print: Cell<bool>,
    fail_download: Cell<bool>,
}

impl MockExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_popups(&self) {
        self.block_print.set(true);
    }

    pub fn fail_downloads(&self) {
        self.fail_download.set(true);
    }

    /// `(url, title)` per print.
    pub fn prints(&self) -> Vec<(String, String)> {
        self.prints.borrow().clone()
    }

    /// `(url, filename)` per download.
    pub fn downloads(&self) -> Vec<(String, String)> {
        self.downloads.borrow().clone()
    }
}

impl Exporter for MockExporter {
    fn print(&self, handle: &ImageHandle, page: &PrintPage<'_>) -> Result<()> {
        if self.block_print.get() {
            return Err(GenerateError::PrintBlocked);
        }
        self.prints
            .borrow_mut()
            .push((handle.url().to_string(), page.title.to_string()));
        Ok(())
    }

    fn download(&self, handle: &ImageHandle, filename: &str) -> Result<()> {
        if self.fail_download.get() {
            return Err(GenerateError::Host("anchor click failed".into()));
        }
        self.downloads
            .borrow_mut()
            .push((handle.url().to_string(), filename.to_string()));
        Ok(())
    }
}
