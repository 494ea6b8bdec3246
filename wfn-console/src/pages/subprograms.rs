use askama::Template;
use async_trait::async_trait;
use wfn_core::models::{Program, SubProgram, SubProgramDraft};
use wfn_core::{Authorized, EditMode};

use crate::handlers::forms::FormFields;
use crate::pages::{Cell, EntityPage, FormChrome, SelectOption};

#[derive(Template)]
#[template(path = "forms/subprogram.html")]
pub struct SubProgramFormTemplate<'a> {
    pub chrome: FormChrome,
    pub draft: &'a SubProgramDraft,
    pub programs: Vec<SelectOption>,
}

pub async fn load_programs(api: &Authorized<'_>) -> Vec<Program> {
    api.list::<Program>().await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to load programs");
        Vec::new()
    })
}

pub fn program_options(programs: &[Program], current: &str) -> Vec<SelectOption> {
    SelectOption::list(
        programs.iter().map(|p| (p.id.to_string(), p.name.as_str())),
        current,
    )
}

#[async_trait]
impl EntityPage for SubProgram {
    const TITLE: &'static str = "Sub Programs";
    const SEARCH_PLACEHOLDER: &'static str = "Search by name";

    type Lookups = Vec<Program>;

    async fn load_lookups(api: &Authorized<'_>) -> Vec<Program> {
        load_programs(api).await
    }

    fn link_lookups(items: &mut [SubProgram], programs: &Vec<Program>) {
        for sub in items {
            sub.program.expand(programs);
        }
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Program", "Budget"]
    }

    fn cells(&self, _programs: &Vec<Program>) -> Vec<Cell> {
        vec![
            Cell::text(self.name.as_str()),
            Cell::optional_text(self.program.name()),
            Cell::optional_money(self.budget),
        ]
    }

    fn render_form(
        draft: &SubProgramDraft,
        mode: EditMode,
        programs: &Vec<Program>,
    ) -> Result<String, askama::Error> {
        SubProgramFormTemplate {
            chrome: FormChrome::new::<SubProgram>(mode),
            draft,
            programs: program_options(programs, &draft.program),
        }
        .render()
    }

    fn draft_from_form(form: FormFields) -> SubProgramDraft {
        SubProgramDraft {
            program: form.text("program"),
            name: form.text("name"),
            description: form.text("description"),
            budget: form.text("budget"),
        }
    }
}
