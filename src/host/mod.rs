pub mod traits;

pub use traits::{BlobStore, DisplayRegion, Exporter, ImageView, PrintPage};

/// `data-action` values carried by the export buttons.
pub const ACTION_PRINT: &str = "print";
pub const ACTION_SAVE: &str = "save";

/// Class names the host stylesheet targets.
pub mod classes {
    pub const LOADING: &str = "loading";
    pub const ERROR: &str = "error";
    pub const IMAGE_RESULT: &str = "image-result";
    pub const IMAGE_ACTIONS: &str = "image-actions";
    pub const PRINT_BUTTON: &str = "btn-print";
    pub const SAVE_BUTTON: &str = "btn-save";
}

/// Export action requested from the display region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportAction {
    Print,
    Save,
}

impl ExportAction {
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            ACTION_PRINT => Some(ExportAction::Print),
            ACTION_SAVE => Some(ExportAction::Save),
            _ => None,
        }
    }

    pub fn as_attribute(&self) -> &'static str {
        match self {
            ExportAction::Print => ACTION_PRINT,
            ExportAction::Save => ACTION_SAVE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_attribute_round_trip() {
        for action in [ExportAction::Print, ExportAction::Save] {
            assert_eq!(ExportAction::from_attribute(action.as_attribute()), Some(action));
        }
        assert_eq!(ExportAction::from_attribute("share"), None);
    }
}
