use crate::error::ApiError;
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde_json::{Map, Value};

/// An uploaded file bound to a draft (voucher, bill, agreement, logo).
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Request body for a create or update.
///
/// Sent as a JSON object unless a file is attached, in which case the whole
/// payload goes out as `multipart/form-data`.
#[derive(Debug, Clone, Default)]
pub struct Payload {
    fields: Map<String, Value>,
    files: Vec<(String, Attachment)>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, key: &str, value: &str) -> Self {
        self.fields
            .insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Blank values are sent as `null` so nullable backend fields are cleared.
    pub fn optional_text(mut self, key: &str, value: &str) -> Self {
        let value = if value.trim().is_empty() {
            Value::Null
        } else {
            Value::String(value.to_string())
        };
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn flag(mut self, key: &str, value: bool) -> Self {
        self.fields.insert(key.to_string(), Value::Bool(value));
        self
    }

    /// Foreign-key value taken from a select box; numeric ids go out as numbers.
    pub fn reference(mut self, key: &str, raw: &str) -> Self {
        let value = match raw.trim().parse::<i64>() {
            Ok(id) => Value::from(id),
            Err(_) => Value::String(raw.to_string()),
        };
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn file(mut self, key: &str, attachment: Option<&Attachment>) -> Self {
        if let Some(attachment) = attachment {
            self.files.push((key.to_string(), attachment.clone()));
        }
        self
    }

    pub fn is_multipart(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub(crate) fn apply(self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        if self.files.is_empty() {
            return Ok(request.json(&Value::Object(self.fields)));
        }

        let mut form = Form::new();
        for (key, value) in self.fields {
            let text = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            form = form.text(key, text);
        }

        for (key, attachment) in self.files {
            let Attachment {
                file_name,
                content_type,
                bytes,
            } = attachment;
            let part = Part::bytes(bytes)
                .file_name(file_name.clone())
                .mime_str(&content_type)
                .map_err(|source| ApiError::Attachment { file_name, source })?;
            form = form.part(key, part);
        }

        Ok(request.multipart(form))
    }
}
