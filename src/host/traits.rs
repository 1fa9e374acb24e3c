use crate::{
    error::Result,
    models::{GeneratedImage, ImageHandle},
};
use std::rc::Rc;
use std::time::Duration;

/// What the region needs to draw a successful result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageView<'a> {
    pub src: &'a str,
    pub alt: &'a str,
    pub print_label: &'a str,
    pub save_label: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintPage<'a> {
    pub title: &'a str,
    pub alt: &'a str,
}

/// The single subtree that shows status, results and errors.
///
/// Every `show_*` call replaces the whole content. Text arguments are plain
/// text and must never be parsed as markup.
pub trait DisplayRegion {
    fn clear(&self);
    fn show_status(&self, text: &str);
    fn show_error(&self, text: &str);
    fn show_image(&self, view: &ImageView<'_>);
    /// Smoothly scrolls the region into view.
    fn reveal(&self);
}

/// Mints and releases ephemeral image handles.
pub trait BlobStore {
    fn create(&self, image: Rc<GeneratedImage>) -> Result<ImageHandle>;
    fn release(&self, handle: &ImageHandle);
    fn release_after(&self, handle: ImageHandle, delay: Duration);
}

pub trait Exporter {
    /// Opens a separate browsing context showing the image and starts printing.
    fn print(&self, handle: &ImageHandle, page: &PrintPage<'_>) -> Result<()>;
    fn download(&self, handle: &ImageHandle, filename: &str) -> Result<()>;
}
