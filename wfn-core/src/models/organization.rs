use crate::api::{Attachment, Payload};
use crate::editor::{DraftRecord, Resource};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The nonprofit itself. The console only ever uses the first record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub pan_no: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl Resource for Organization {
    const COLLECTION: &'static str = "organizations";
    const NOUN: &'static str = "organization";
    type Draft = OrganizationDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct OrganizationDraft {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    pub address: String,
    pub pan_no: String,
    pub website: String,
    pub logo: Option<Attachment>,
}

impl DraftRecord<Organization> for OrganizationDraft {
    fn from_record(org: &Organization) -> Self {
        Self {
            name: org.name.clone(),
            email: org.email.clone(),
            phone: org.phone.clone(),
            address: org.address.clone().unwrap_or_default(),
            pan_no: org.pan_no.clone().unwrap_or_default(),
            website: org.website.clone().unwrap_or_default(),
            logo: None,
        }
    }

    fn to_payload(&self) -> Payload {
        Payload::new()
            .text("name", self.name.trim())
            .text("email", self.email.trim())
            .text("phone", self.phone.trim())
            .optional_text("address", &self.address)
            .optional_text("pan_no", &self.pan_no)
            .optional_text("website", &self.website)
            .file("logo", self.logo.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_upload_switches_to_multipart() {
        let draft = OrganizationDraft {
            name: "Wfn".into(),
            email: "hello@wfn.org".into(),
            phone: "080".into(),
            logo: Some(Attachment {
                file_name: "logo.png".into(),
                content_type: "image/png".into(),
                bytes: vec![0x89, 0x50],
            }),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());
        assert!(draft.to_payload().is_multipart());
    }
}
