use askama::Template;
use wfn_core::models::{Organization, OrganizationDraft};
use wfn_core::EditMode;

use crate::handlers::forms::FormFields;
use crate::pages::{Cell, EntityPage, FormChrome};

#[derive(Template)]
#[template(path = "forms/organization.html")]
pub struct OrganizationFormTemplate<'a> {
    pub chrome: FormChrome,
    pub draft: &'a OrganizationDraft,
}

/// The Settings page.
impl EntityPage for Organization {
    const TITLE: &'static str = "Settings";
    const SEARCH_PLACEHOLDER: &'static str = "Search by name or email";

    type Lookups = ();

    fn columns() -> &'static [&'static str] {
        &["Name", "Email", "Phone", "Website"]
    }

    fn cells(&self, _lookups: &()) -> Vec<Cell> {
        vec![
            Cell::text(self.name.as_str()),
            Cell::text(self.email.as_str()),
            Cell::text(self.phone.as_str()),
            Cell::optional_text(self.website.as_deref()),
        ]
    }

    fn render_form(draft: &OrganizationDraft, mode: EditMode, _lookups: &()) -> Result<String, askama::Error> {
        OrganizationFormTemplate {
            chrome: FormChrome::new::<Organization>(mode),
            draft,
        }
        .render()
    }

    fn draft_from_form(mut form: FormFields) -> OrganizationDraft {
        OrganizationDraft {
            name: form.text("name"),
            email: form.text("email"),
            phone: form.text("phone"),
            address: form.text("address"),
            pan_no: form.text("pan_no"),
            website: form.text("website"),
            logo: form.file("logo"),
        }
    }
}
