use crate::{
    client::{GenerationClient, HttpTransport},
    config::ControllerConfig,
    error::{GenerateError, Result},
    export::download_filename,
    host::{BlobStore, DisplayRegion, ExportAction, Exporter, ImageView, PrintPage},
    logger,
    models::{FormInput, ImageHandle, RenderState},
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// How a submission ended, from the caller's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The generated image is on screen.
    Displayed,
    /// An error message is on screen.
    Failed(GenerateError),
    /// A newer submission started first; this result was dropped.
    Superseded,
}

/// Drives one generation form and its display region.
///
/// Single-threaded: state lives in `Cell`/`RefCell` and no borrow is held
/// across an `await`, so overlapping submissions on the same event loop are
/// fine. Only the latest submission may touch the display region.
pub struct Controller {
    config: ControllerConfig,
    client: GenerationClient,
    region: Rc<dyn DisplayRegion>,
    blobs: Rc<dyn BlobStore>,
    exporter: Rc<dyn Exporter>,
    state: RefCell<RenderState>,
    latest_request: Cell<u64>,
}

impl Controller {
    pub fn new(
        config: ControllerConfig,
        transport: Rc<dyn HttpTransport>,
        region: Rc<dyn DisplayRegion>,
        blobs: Rc<dyn BlobStore>,
        exporter: Rc<dyn Exporter>,
    ) -> Self {
        let client = GenerationClient::new(
            transport,
            config.endpoint.clone(),
            config.messages.generic_failure.clone(),
        );

        Self {
            config,
            client,
            region,
            blobs,
            exporter,
            state: RefCell::new(RenderState::Idle),
            latest_request: Cell::new(0),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> RenderState {
        self.state.borrow().clone()
    }

    /// Id of the most recent submission (0 before the first one).
    pub fn latest_request(&self) -> u64 {
        self.latest_request.get()
    }

    /// Validates the submitted fields, posts them and renders the outcome.
    pub async fn submit<I, K, V>(&self, entries: I) -> SubmitOutcome
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let request_id = self.next_request_id();
        let input = FormInput::collect(entries);

        if let Err(err) = input.validate(
            &self.config.required_fields,
            &self.config.max_lengths,
            &self.config.messages,
        ) {
            log::info!(request_id = request_id; "Submission rejected: {}", err);
            self.show_error(&err);
            return SubmitOutcome::Failed(err);
        }

        self.transition(RenderState::Loading);

        let mut timer = logger::timer("generation");
        let result = self.client.generate(&input).await;
        timer.stop();

        if request_id != self.latest_request.get() {
            log::debug!(
                request_id = request_id, latest = self.latest_request.get();
                "Dropping superseded result"
            );
            return SubmitOutcome::Superseded;
        }

        match result.and_then(|image| self.blobs.create(Rc::new(image))) {
            Ok(handle) => {
                log::info!(
                    request_id = request_id;
                    "Generated {} bytes",
                    handle.image().len()
                );
                self.transition(RenderState::Success(handle));
                SubmitOutcome::Displayed
            }
            Err(err) => {
                log::error!(request_id = request_id; "Submission failed: {}", err);
                self.show_error(&err);
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Opens the print view for the current result.
    ///
    /// A blocked popup is reported to the caller and logged; the displayed
    /// result is left as it is.
    pub fn print(&self) -> Result<()> {
        let handle = self.current_handle()?;
        let page = PrintPage {
            title: &self.config.messages.print_title,
            alt: &self.config.messages.image_alt,
        };

        self.exporter.print(&handle, &page).map_err(|err| {
            log::warn!("Print failed: {}", err);
            err
        })
    }

    /// Downloads the current result and returns the file name used.
    ///
    /// The download gets its own handle, released after
    /// `config.release_delay`. Browsers give no completion signal for
    /// downloads, so the delay is a best-effort guess.
    pub fn save(&self) -> Result<String> {
        let handle = self.current_handle()?;
        let filename = download_filename(&self.config.file_prefix, &self.config.file_extension);

        let download = self.blobs.create(handle.image().clone())?;
        if let Err(err) = self.exporter.download(&download, &filename) {
            log::warn!("Download of {} failed: {}", filename, err);
            self.blobs.release(&download);
            return Err(err);
        }

        log::info!("Saving {}", filename);
        self.blobs.release_after(download, self.config.release_delay);
        Ok(filename)
    }

    pub fn handle_action(&self, action: ExportAction) -> Result<()> {
        match action {
            ExportAction::Print => self.print(),
            ExportAction::Save => self.save().map(|_| ()),
        }
    }

    /// Empties the display region and drops any in-flight result.
    pub fn reset(&self) {
        self.next_request_id();
        self.transition(RenderState::Idle);
    }

    fn next_request_id(&self) -> u64 {
        let id = self.latest_request.get() + 1;
        self.latest_request.set(id);
        id
    }

    fn current_handle(&self) -> Result<ImageHandle> {
        self.state
            .borrow()
            .handle()
            .cloned()
            .ok_or(GenerateError::NothingToExport)
    }

    fn show_error(&self, err: &GenerateError) {
        let messages = &self.config.messages;
        let text = if err.is_validation() {
            err.detail()
        } else {
            messages.prefixed(&err.detail())
        };
        self.transition(RenderState::Error(text));
    }

    fn transition(&self, next: RenderState) {
        let previous = self.state.replace(next.clone());
        log::debug!("Render state {} -> {}", previous.name(), next.name());

        if let RenderState::Success(handle) = &previous {
            self.blobs.release(handle);
        }

        self.render(&next);
    }

    fn render(&self, state: &RenderState) {
        let messages = &self.config.messages;
        match state {
            RenderState::Idle => self.region.clear(),
            RenderState::Loading => self.region.show_status(&messages.generating),
            RenderState::Error(message) => self.region.show_error(message),
            RenderState::Success(handle) => {
                self.region.show_image(&ImageView {
                    src: handle.url(),
                    alt: &messages.image_alt,
                    print_label: &messages.print_label,
                    save_label: &messages.save_label,
                });
                self.region.reveal();
            }
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        if let RenderState::Success(handle) = self.state.get_mut() {
            self.blobs.release(handle);
        }
    }
}
