use askama::Template;
use wfn_core::models::{Donation, Organization};

use crate::pages::format_money;

/// A4 portrait receipt. The page prints itself on load.
#[derive(Template)]
#[template(path = "receipt.html")]
pub struct ReceiptTemplate {
    pub org_name: String,
    pub org_address: String,
    pub org_email: String,
    pub org_phone: String,
    pub org_pan: String,
    pub org_logo: Option<String>,
    pub org_website: Option<String>,
    pub receipt_number: String,
    pub date: String,
    pub donor_name: String,
    pub donor_address: String,
    pub donor_pan: String,
    pub donor_email: String,
    pub amount: String,
    pub method: String,
    pub description: String,
}

impl ReceiptTemplate {
    /// Placeholders stand in when no organization has been set up yet.
    pub fn new(organization: Option<&Organization>, donation: &Donation) -> Self {
        let donor = donation.donor.donor();
        let org_field = |value: Option<&str>, placeholder: &str| value.unwrap_or(placeholder).to_string();

        Self {
            org_name: org_field(organization.map(|o| o.name.as_str()), "Organization Name"),
            org_address: org_field(
                organization.and_then(|o| o.address.as_deref()),
                "Organization Address",
            ),
            org_email: org_field(organization.map(|o| o.email.as_str()), "Organization Email"),
            org_phone: org_field(organization.map(|o| o.phone.as_str()), "Organization Phone"),
            org_pan: org_field(
                organization.and_then(|o| o.pan_no.as_deref()),
                "Organization Pan Number",
            ),
            org_logo: organization.and_then(|o| o.logo.clone()),
            org_website: organization.and_then(|o| o.website.clone()),
            receipt_number: donation.receipt_number.clone().unwrap_or_default(),
            date: donation.display_date(),
            donor_name: donation.donor_name().to_string(),
            donor_address: donor.and_then(|d| d.address.clone()).unwrap_or_default(),
            donor_pan: donor.and_then(|d| d.pan_no.clone()).unwrap_or_default(),
            donor_email: donor.map(|d| d.email.clone()).unwrap_or_default(),
            amount: format!("Rs. {} /-", format_money(donation.amount)),
            method: donation.method.as_str().to_string(),
            description: donation.description.clone().unwrap_or_default(),
        }
    }
}
