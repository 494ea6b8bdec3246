use askama::Template;
use axum::{extract::State, response::IntoResponse};
use wfn_core::models::{Donor, Expense, Program};
use wfn_core::summary::Overview;
use wfn_core::ApiError;

use crate::models::AuthUser;
use crate::pages::{format_money, today};
use crate::AppState;

pub struct ProgramRow {
    pub name: String,
    pub budget: String,
    pub expenses: String,
    pub status: String,
}

#[derive(Template)]
#[template(path = "overview.html")]
pub struct OverviewTemplate {
    pub current_page: &'static str,
    pub poll_secs: u64,
    pub organization_name: String,
    pub total_budget: String,
    pub total_expenses: String,
    pub completed: usize,
    pub ongoing: usize,
    pub donor_count: usize,
    pub programs: Vec<ProgramRow>,
}

impl OverviewTemplate {
    fn new(overview: Overview, poll_secs: u64) -> Self {
        Self {
            current_page: "overview",
            poll_secs,
            organization_name: overview
                .organization_name
                .unwrap_or_else(|| "Organization Name".to_string()),
            total_budget: format_money(overview.total_budget),
            total_expenses: format_money(overview.total_expenses),
            completed: overview.completed,
            ongoing: overview.ongoing,
            donor_count: overview.donor_count,
            programs: overview
                .programs
                .into_iter()
                .map(|p| ProgramRow {
                    name: p.name,
                    budget: format_money(p.budget),
                    expenses: format_money(p.expenses),
                    status: p.status.to_string(),
                })
                .collect(),
        }
    }
}

fn or_empty<T>(what: &str, result: Result<Vec<T>, ApiError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to load {} for overview", what);
        Vec::new()
    })
}

/// Dashboard: every fetch runs concurrently and a failed one only blanks its
/// own figures.
#[tracing::instrument(name = "Overview", skip_all)]
pub async fn overview_handler(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let api = state.api.with_bearer(&user.access_token);

    let (programs, donors, expenses, organization) = tokio::join!(
        api.list::<Program>(),
        api.list::<Donor>(),
        api.list::<Expense>(),
        api.organization(),
    );

    let programs = or_empty("programs", programs);
    let donors = or_empty("donors", donors);
    let expenses = or_empty("expenses", expenses);
    let organization = organization.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to load organization for overview");
        None
    });

    let overview = Overview::compute(&programs, &donors, &expenses, organization.as_ref(), today());
    OverviewTemplate::new(overview, state.status_poll_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn blank_dashboard_renders() {
        let overview = Overview::compute(&[], &[], &[], None, today());
        let html = OverviewTemplate::new(overview, 15).render().unwrap();

        assert!(html.contains("Organization Name"));
        assert!(html.contains("0.00"));
    }

    #[test]
    fn money_is_preformatted() {
        let mut overview = Overview::compute(&[], &[], &[], None, today());
        overview.total_budget = Decimal::new(1250050, 2);

        let template = OverviewTemplate::new(overview, 15);
        assert_eq!(template.total_budget, "12500.50");
    }
}
