use axum::extract::Multipart;
use std::collections::HashMap;
use wfn_core::Attachment;

use crate::error::ConsoleError;

/// Values of one submitted add/edit form.
#[derive(Debug, Default)]
pub struct FormFields {
    texts: HashMap<String, String>,
    files: HashMap<String, Attachment>,
}

impl FormFields {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ConsoleError> {
        let mut fields = FormFields::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(|n| n.to_string()) else {
                continue;
            };

            match field.file_name().map(|f| f.to_string()) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await?.to_vec();

                    // An untouched file input still submits an empty part
                    if file_name.is_empty() || bytes.is_empty() {
                        continue;
                    }

                    fields.files.insert(
                        name,
                        Attachment {
                            file_name,
                            content_type,
                            bytes,
                        },
                    );
                }
                None => {
                    let value = field.text().await?;
                    fields.texts.insert(name, value);
                }
            }
        }

        Ok(fields)
    }

    pub fn with_text(mut self, name: &str, value: &str) -> Self {
        self.texts.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_file(mut self, name: &str, attachment: Attachment) -> Self {
        self.files.insert(name.to_string(), attachment);
        self
    }

    /// Trimmed text value; missing fields are empty.
    pub fn text(&self, name: &str) -> String {
        self.texts
            .get(name)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Value exactly as submitted.
    pub fn raw(&self, name: &str) -> &str {
        self.texts.get(name).map(String::as_str).unwrap_or("")
    }

    /// Checkbox state; unchecked boxes are not submitted at all.
    pub fn checked(&self, name: &str) -> bool {
        matches!(self.text(name).as_str(), "on" | "true" | "1")
    }

    pub fn file(&mut self, name: &str) -> Option<Attachment> {
        self.files.remove(name)
    }
}
