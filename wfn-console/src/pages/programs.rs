use askama::Template;
use wfn_core::models::{Program, ProgramDraft};
use wfn_core::EditMode;

use crate::handlers::forms::FormFields;
use crate::pages::{today, Cell, EntityPage, FormChrome, RowAction};

#[derive(Template)]
#[template(path = "forms/program.html")]
pub struct ProgramFormTemplate<'a> {
    pub chrome: FormChrome,
    pub draft: &'a ProgramDraft,
}

impl EntityPage for Program {
    const TITLE: &'static str = "Programs";
    const SEARCH_PLACEHOLDER: &'static str = "Search by program name";

    type Lookups = ();

    fn columns() -> &'static [&'static str] {
        &["Name", "Budget", "Start Date", "End Date", "Status"]
    }

    fn cells(&self, _lookups: &()) -> Vec<Cell> {
        vec![
            Cell::text(self.name.as_str()),
            Cell::money(self.total_budget),
            Cell::date(self.start_date),
            Cell::optional_date(self.end_date),
            Cell::text(self.status_on(today()).to_string()),
        ]
    }

    fn actions(&self) -> Vec<RowAction> {
        vec![RowAction {
            label: "Report",
            href: format!("/programs/{}/report", self.id),
            new_window: false,
        }]
    }

    fn render_form(draft: &ProgramDraft, mode: EditMode, _lookups: &()) -> Result<String, askama::Error> {
        ProgramFormTemplate {
            chrome: FormChrome::new::<Program>(mode),
            draft,
        }
        .render()
    }

    fn draft_from_form(mut form: FormFields) -> ProgramDraft {
        ProgramDraft {
            name: form.text("name"),
            description: form.text("description"),
            start_date: form.text("start_date"),
            end_date: form.text("end_date"),
            total_budget: form.text("total_budget"),
            agreement: form.file("agreement"),
        }
    }
}
