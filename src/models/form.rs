use crate::{
    config::Messages,
    error::{GenerateError, Result},
};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Submitted form fields, trimmed, in form order.
///
/// Serializes as a flat JSON object of string values. A field submitted more
/// than once keeps its first position and its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    fields: Vec<(String, String)>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut input = Self::new();
        for (key, value) in entries {
            input.insert(key, value.as_ref());
        }
        input
    }

    pub fn insert(&mut self, key: impl Into<String>, value: &str) {
        let key = key.into();
        let value = value.trim().to_string();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Checks required fields in order, then length limits. Stops at the first violation.
    pub fn validate(
        &self,
        required: &[String],
        max_lengths: &[(String, usize)],
        messages: &Messages,
    ) -> Result<()> {
        for field in required {
            if self.get(field).map_or(true, str::is_empty) {
                return Err(GenerateError::validation(field, messages.missing(field)));
            }
        }

        for (field, max) in max_lengths {
            if let Some(value) = self.get(field) {
                if value.chars().count() > *max {
                    return Err(GenerateError::validation(
                        field,
                        messages.too_long(field, *max),
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Serialize for FormInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
