use crate::error::{GenerateError, Result};
use crate::logger::LoggerConfig;
use reqwest::Url;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "/generate";
pub const DEFAULT_FORM_ID: &str = "generateForm";
pub const DEFAULT_REGION_ID: &str = "responseContainer";
pub const DEFAULT_TEXT_INPUT_SELECTOR: &str = "input[type=\"text\"]";
pub const DEFAULT_FILE_PREFIX: &str = "generated";
pub const DEFAULT_FILE_EXTENSION: &str = "png";
pub const DEFAULT_RELEASE_DELAY: Duration = Duration::from_millis(1000);

/// User-facing strings for one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct Messages {
    pub missing_name: String,
    pub missing_address: String,
    /// Used for required fields other than `name` and `address`; `{field}` is substituted.
    pub missing_field: String,
    /// `{field}` and `{max}` are substituted.
    pub field_too_long: String,
    pub generating: String,
    pub error_prefix: String,
    pub generic_failure: String,
    pub image_alt: String,
    pub print_label: String,
    pub save_label: String,
    pub print_title: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self::ukrainian()
    }
}

impl Messages {
    pub fn ukrainian() -> Self {
        Messages {
            missing_name: "Будь ласка, введіть ім'я".to_string(),
            missing_address: "Будь ласка, введіть адресу".to_string(),
            missing_field: "Будь ласка, заповніть поле «{field}»".to_string(),
            field_too_long: "Поле «{field}» задовге (максимум {max} символів)".to_string(),
            generating: "Генерація зображення...".to_string(),
            error_prefix: "Помилка: ".to_string(),
            generic_failure: "Не вдалося отримати відповідь сервера".to_string(),
            image_alt: "Згенероване зображення".to_string(),
            print_label: "Роздрукувати".to_string(),
            save_label: "Зберегти".to_string(),
            print_title: "Друк зображення".to_string(),
        }
    }

    pub fn english() -> Self {
        Messages {
            missing_name: "Please enter a name".to_string(),
            missing_address: "Please enter an address".to_string(),
            missing_field: "Please fill in the \"{field}\" field".to_string(),
            field_too_long: "The \"{field}\" field is too long (at most {max} characters)"
                .to_string(),
            generating: "Generating image...".to_string(),
            error_prefix: "Error: ".to_string(),
            generic_failure: "Network response was not ok".to_string(),
            image_alt: "Generated image".to_string(),
            print_label: "Print".to_string(),
            save_label: "Save".to_string(),
            print_title: "Print image".to_string(),
        }
    }

    /// Picks a table from a BCP 47 language tag such as `en-US` or `uk`.
    pub fn for_language(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Self::english(),
            _ => Self::ukrainian(),
        }
    }

    pub fn missing(&self, field: &str) -> String {
        match field {
            "name" => self.missing_name.clone(),
            "address" => self.missing_address.clone(),
            other => self.missing_field.replace("{field}", other),
        }
    }

    pub fn too_long(&self, field: &str, max: usize) -> String {
        self.field_too_long
            .replace("{field}", field)
            .replace("{max}", &max.to_string())
    }

    pub fn prefixed(&self, detail: &str) -> String {
        format!("{}{}", self.error_prefix, detail)
    }
}

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub endpoint: String,
    pub form_id: String,
    pub region_id: String,
    pub text_input_selector: String,
    pub required_fields: Vec<String>,
    pub max_lengths: Vec<(String, usize)>,
    pub file_prefix: String,
    pub file_extension: String,
    pub release_delay: Duration,
    pub suppress_context_menu: bool,
    pub messages: Messages,
    pub logger: LoggerConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            form_id: DEFAULT_FORM_ID.to_string(),
            region_id: DEFAULT_REGION_ID.to_string(),
            text_input_selector: DEFAULT_TEXT_INPUT_SELECTOR.to_string(),
            required_fields: vec!["name".to_string(), "address".to_string()],
            max_lengths: Vec::new(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            release_delay: DEFAULT_RELEASE_DELAY,
            suppress_context_menu: true,
            messages: Messages::default(),
            logger: LoggerConfig::for_build().with_prefix(env!("CARGO_PKG_NAME")),
        }
    }
}

impl ControllerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_element_ids(
        mut self,
        form_id: impl Into<String>,
        region_id: impl Into<String>,
    ) -> Self {
        self.form_id = form_id.into();
        self.region_id = region_id.into();
        self
    }

    pub fn with_text_input_selector(mut self, selector: impl Into<String>) -> Self {
        self.text_input_selector = selector.into();
        self
    }

    pub fn with_required_field(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        if !self.required_fields.contains(&field) {
            self.required_fields.push(field);
        }
        self
    }

    pub fn with_max_length(mut self, field: impl Into<String>, max: usize) -> Self {
        let field = field.into();
        self.max_lengths.retain(|(existing, _)| *existing != field);
        self.max_lengths.push((field, max));
        self
    }

    pub fn with_download_name(
        mut self,
        prefix: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        self.file_prefix = prefix.into();
        self.file_extension = extension.into();
        self
    }

    pub fn with_release_delay(mut self, delay: Duration) -> Self {
        self.release_delay = delay;
        self
    }

    pub fn with_context_menu(mut self, enabled: bool) -> Self {
        self.suppress_context_menu = !enabled;
        self
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_logger(mut self, logger: LoggerConfig) -> Self {
        self.logger = logger;
        self
    }
}

/// Resolves a configured endpoint against the page URL, the way `fetch` does.
pub fn resolve_endpoint(document_url: &str, endpoint: &str) -> Result<String> {
    let base = Url::parse(document_url)
        .map_err(|e| GenerateError::Host(format!("page url {:?}: {}", document_url, e)))?;
    let url = base
        .join(endpoint)
        .map_err(|e| GenerateError::Host(format!("endpoint {:?}: {}", endpoint, e)))?;
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_host_document() {
        let config = ControllerConfig::new();
        assert_eq!(config.endpoint, "/generate");
        assert_eq!(config.form_id, "generateForm");
        assert_eq!(config.region_id, "responseContainer");
        assert_eq!(config.required_fields, vec!["name", "address"]);
        assert_eq!(config.release_delay, Duration::from_secs(1));
        assert!(config.suppress_context_menu);
        assert_eq!(config.logger.custom_prefix.as_deref(), Some("rgenai-form"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ControllerConfig::new()
            .with_endpoint("/api/render")
            .with_required_field("issuer")
            .with_required_field("issuer")
            .with_max_length("name", 100)
            .with_max_length("name", 80)
            .with_download_name("card", "jpg")
            .with_context_menu(true);

        assert_eq!(config.endpoint, "/api/render");
        assert_eq!(config.required_fields, vec!["name", "address", "issuer"]);
        assert_eq!(config.max_lengths, vec![("name".to_string(), 80)]);
        assert_eq!(config.file_prefix, "card");
        assert_eq!(config.file_extension, "jpg");
        assert!(!config.suppress_context_menu);
    }

    #[test]
    fn test_messages_for_language() {
        assert_eq!(Messages::for_language("en-GB"), Messages::english());
        assert_eq!(Messages::for_language("uk"), Messages::ukrainian());
        assert_eq!(Messages::for_language(""), Messages::ukrainian());
    }

    #[test]
    fn test_field_messages() {
        let messages = Messages::english();
        assert_eq!(messages.missing("name"), "Please enter a name");
        assert_eq!(messages.missing("issuer"), "Please fill in the \"issuer\" field");
        assert_eq!(
            messages.too_long("address", 200),
            "The \"address\" field is too long (at most 200 characters)"
        );
        assert_eq!(
            Messages::ukrainian().prefixed("Invalid address"),
            "Помилка: Invalid address"
        );
    }

    #[test]
    fn test_resolve_endpoint_against_page_url() {
        let page = "http://localhost:3000/app/index.html";
        let cases = [
            ("/generate", "http://localhost:3000/generate"),
            ("generate?x=1", "http://localhost:3000/app/generate?x=1"),
            ("//api.example.com/generate", "http://api.example.com/generate"),
            ("HTTPS://api.example.com/generate", "https://api.example.com/generate"),
            ("https://api.example.com/generate", "https://api.example.com/generate"),
        ];
        for (endpoint, expected) in cases {
            assert_eq!(resolve_endpoint(page, endpoint).unwrap(), expected, "{}", endpoint);
        }
    }

    #[test]
    fn test_resolve_endpoint_rejects_bad_page_url() {
        let err = resolve_endpoint("not a url", "/generate").unwrap_err();
        assert!(matches!(err, GenerateError::Host(_)));
    }
}
