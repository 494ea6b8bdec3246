use crate::api::Payload;
use crate::editor::{DraftRecord, Resource};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DonorType {
    #[default]
    Individual,
    Corporate,
}

impl DonorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonorType::Individual => "Individual",
            DonorType::Corporate => "Corporate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donor {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub pan_no: Option<String>,
    #[serde(default)]
    pub donor_type: DonorType,
    /// Server-computed, read-only.
    #[serde(default)]
    pub donation_count: Option<i64>,
    #[serde(default)]
    pub total_donations: Option<Decimal>,
}

impl Resource for Donor {
    const COLLECTION: &'static str = "donors";
    const NOUN: &'static str = "donor";
    type Draft = DonorDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.phone.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct DonorDraft {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    pub address: String,
    pub pan_no: String,
    pub donor_type: DonorType,
}

impl Default for DonorDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            pan_no: String::new(),
            donor_type: DonorType::Individual,
        }
    }
}

impl DraftRecord<Donor> for DonorDraft {
    fn from_record(donor: &Donor) -> Self {
        Self {
            name: donor.name.clone(),
            email: donor.email.clone(),
            phone: donor.phone.clone(),
            address: donor.address.clone().unwrap_or_default(),
            pan_no: donor.pan_no.clone().unwrap_or_default(),
            donor_type: donor.donor_type,
        }
    }

    fn to_payload(&self) -> Payload {
        Payload::new()
            .text("name", self.name.trim())
            .text("email", self.email.trim())
            .text("phone", self.phone.trim())
            .optional_text("address", &self.address)
            .optional_text("pan_no", &self.pan_no)
            .text("donor_type", self.donor_type.as_str())
    }
}
