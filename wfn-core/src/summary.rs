use crate::models::{Donor, Expense, Organization, Program, ProgramStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramSummary {
    pub id: i64,
    pub name: String,
    pub budget: Decimal,
    pub expenses: Decimal,
    pub status: ProgramStatus,
}

/// Dashboard figures. Each input may be empty when its fetch failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub organization_name: Option<String>,
    pub total_budget: Decimal,
    pub total_expenses: Decimal,
    pub completed: usize,
    pub ongoing: usize,
    pub donor_count: usize,
    pub programs: Vec<ProgramSummary>,
}

impl Overview {
    pub fn compute(
        programs: &[Program],
        donors: &[Donor],
        expenses: &[Expense],
        organization: Option<&Organization>,
        today: NaiveDate,
    ) -> Self {
        let summaries: Vec<ProgramSummary> = programs
            .iter()
            .map(|program| ProgramSummary {
                id: program.id,
                name: program.name.clone(),
                budget: program.total_budget,
                expenses: expenses
                    .iter()
                    .filter(|e| e.program.id() == program.id)
                    .map(|e| e.amount)
                    .sum(),
                status: program.status_on(today),
            })
            .collect();

        let completed = summaries
            .iter()
            .filter(|s| s.status == ProgramStatus::Completed)
            .count();

        Self {
            organization_name: organization.map(|o| o.name.clone()),
            total_budget: programs.iter().map(|p| p.total_budget).sum(),
            total_expenses: expenses.iter().map(|e| e.amount).sum(),
            completed,
            ongoing: summaries.len() - completed,
            donor_count: donors.len(),
            programs: summaries,
        }
    }
}
