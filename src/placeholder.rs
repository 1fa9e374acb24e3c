//! Placeholder hiding for focused text inputs.
//!
//! On focus the placeholder is stashed and cleared; on blur it comes back from
//! the stash. Purely cosmetic and independent of validation.

/// An input whose placeholder can be stashed (`data-placeholder` in the DOM).
pub trait PlaceholderTarget {
    fn placeholder(&self) -> String;
    fn set_placeholder(&self, text: &str);
    fn stashed_placeholder(&self) -> Option<String>;
    fn stash_placeholder(&self, text: &str);
}

pub fn on_focus(input: &dyn PlaceholderTarget) {
    let current = input.placeholder();
    // A second focus without blur would otherwise stash the cleared value.
    if !current.is_empty() {
        input.stash_placeholder(&current);
    }
    input.set_placeholder("");
}

pub fn on_blur(input: &dyn PlaceholderTarget) {
    if let Some(stashed) = input.stashed_placeholder().filter(|s| !s.is_empty()) {
        input.set_placeholder(&stashed);
    }
}
