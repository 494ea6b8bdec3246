use crate::api::Payload;
use crate::editor::{DraftRecord, Resource};
use crate::models::ProgramRef;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubProgram {
    pub id: i64,
    pub program: ProgramRef,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub budget: Option<Decimal>,
}

impl Resource for SubProgram {
    const COLLECTION: &'static str = "subprograms";
    const NOUN: &'static str = "sub program";
    type Draft = SubProgramDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct SubProgramDraft {
    #[validate(length(min = 1, message = "Program is required"))]
    pub program: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: String,
    pub budget: String,
}

impl DraftRecord<SubProgram> for SubProgramDraft {
    fn from_record(sub: &SubProgram) -> Self {
        Self {
            program: sub.program.id().to_string(),
            name: sub.name.clone(),
            description: sub.description.clone().unwrap_or_default(),
            budget: sub.budget.map(|b| b.to_string()).unwrap_or_default(),
        }
    }

    fn to_payload(&self) -> Payload {
        Payload::new()
            .reference("program", &self.program)
            .text("name", self.name.trim())
            .optional_text("description", &self.description)
            .optional_text("budget", self.budget.trim())
    }
}
