//! Generic list-page handlers shared by every entity.
//!
//! Full page on mount, then htmx fragments: `#entity-table` for search and
//! sort, `#entity-form` for edit/cancel, `#workspace` (form and table) after a
//! save or delete.

use askama::Template;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use wfn_core::{Authorized, Deletion, EditorError};

use crate::error::ConsoleError;
use crate::handlers::alert;
use crate::handlers::forms::FormFields;
use crate::models::AuthUser;
use crate::pages::table::blank_as_none;
use crate::pages::{build_table, EntityPage, TableQuery, TableView};
use crate::services::pages::{PageState, SharedPage};
use crate::AppState;

#[derive(Template)]
#[template(path = "pages/list.html")]
pub struct ListPageTemplate {
    pub title: &'static str,
    pub collection: &'static str,
    pub placeholder: &'static str,
    pub current_page: &'static str,
    pub poll_secs: u64,
    pub form_html: String,
    pub table: TableView,
}

#[derive(Template)]
#[template(path = "fragments/workspace.html")]
pub struct WorkspaceTemplate {
    pub form_html: String,
    pub table: TableView,
}

#[derive(Template)]
#[template(path = "fragments/table.html")]
pub struct TableTemplate {
    pub table: TableView,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    /// Set by the browser only after the user accepted the confirm dialog.
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub sort: Option<usize>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub desc: Option<bool>,
}

impl DeleteQuery {
    fn table_query(&self) -> TableQuery {
        TableQuery {
            q: self.q.clone(),
            sort: self.sort,
            desc: self.desc,
        }
    }
}

/// Fetch the list and its lookups concurrently and reset the form.
pub async fn mount<R: EntityPage>(page: &mut PageState<R>, api: &Authorized<'_>) {
    let (_, lookups) = tokio::join!(page.editor.load(api), R::load_lookups(api));
    page.lookups = lookups;
    R::link_lookups(page.editor.items_mut(), &page.lookups);
    page.editor.cancel();
    page.mounted = true;
}

/// The session's page for `R`, mounted on first use.
pub async fn mounted_page<R: EntityPage>(state: &AppState, user: &AuthUser) -> SharedPage<R> {
    let shared = state.pages.page::<R>(user.session_key);
    {
        let mut page = shared.lock().await;
        if !page.mounted {
            let api = state.api.with_bearer(&user.access_token);
            mount(&mut page, &api).await;
        }
    }
    shared
}

fn render_form<R: EntityPage>(page: &PageState<R>) -> Result<String, askama::Error> {
    R::render_form(page.editor.draft(), page.editor.mode(), &page.lookups)
}

fn render_workspace<R: EntityPage>(page: &PageState<R>, query: &TableQuery) -> Result<Response, ConsoleError> {
    let template = WorkspaceTemplate {
        form_html: render_form(page)?,
        table: build_table(&page.editor, &page.lookups, query),
    };
    Ok(Html(template.render()?).into_response())
}

#[tracing::instrument(name = "List page", skip_all, fields(collection = R::COLLECTION))]
pub async fn list_page<R: EntityPage>(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response, ConsoleError> {
    let api = state.api.with_bearer(&user.access_token);
    let shared = state.pages.page::<R>(user.session_key);
    let mut page = shared.lock().await;

    // A visit always re-fetches.
    mount(&mut page, &api).await;

    let template = ListPageTemplate {
        title: R::TITLE,
        collection: R::COLLECTION,
        placeholder: R::SEARCH_PLACEHOLDER,
        current_page: R::COLLECTION,
        poll_secs: state.status_poll_secs,
        form_html: render_form(&page)?,
        table: build_table(&page.editor, &page.lookups, &TableQuery::default()),
    };
    Ok(Html(template.render()?).into_response())
}

pub async fn rows<R: EntityPage>(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<TableQuery>,
) -> Result<Response, ConsoleError> {
    let shared = mounted_page::<R>(&state, &user).await;
    let page = shared.lock().await;

    let template = TableTemplate {
        table: build_table(&page.editor, &page.lookups, &query),
    };
    Ok(Html(template.render()?).into_response())
}

#[tracing::instrument(name = "Save record", skip_all, fields(collection = R::COLLECTION))]
pub async fn save<R: EntityPage>(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<Response, ConsoleError> {
    let form = FormFields::from_multipart(multipart).await?;
    let query = TableQuery::from_form(&form);
    let draft = R::draft_from_form(form);

    let api = state.api.with_bearer(&user.access_token);
    let shared = mounted_page::<R>(&state, &user).await;
    let mut page = shared.lock().await;

    page.editor.set_draft(draft);
    match page.editor.submit(&api).await {
        Ok(_) => {
            let PageState { editor, lookups, .. } = &mut *page;
            R::link_lookups(editor.items_mut(), lookups);
            render_workspace(&page, &query)
        }
        Err(error @ EditorError::Validation(_)) => Ok(alert(&error.to_string())),
        Err(_) => Ok(alert(&format!("Failed to save {}. Please try again.", R::NOUN))),
    }
}

pub async fn edit<R: EntityPage>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Response, ConsoleError> {
    let shared = mounted_page::<R>(&state, &user).await;
    let mut page = shared.lock().await;

    if page.editor.begin_edit(id).is_none() {
        return Ok(alert(&format!("That {} is no longer in the list.", R::NOUN)));
    }
    Ok(Html(render_form(&page)?).into_response())
}

pub async fn cancel<R: EntityPage>(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response, ConsoleError> {
    let shared = mounted_page::<R>(&state, &user).await;
    let mut page = shared.lock().await;

    page.editor.cancel();
    Ok(Html(render_form(&page)?).into_response())
}

#[tracing::instrument(name = "Delete row", skip_all, fields(collection = R::COLLECTION))]
pub async fn delete<R: EntityPage>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Query(query): Query<DeleteQuery>,
) -> Result<Response, ConsoleError> {
    let api = state.api.with_bearer(&user.access_token);
    let shared = mounted_page::<R>(&state, &user).await;
    let mut page = shared.lock().await;

    match page.editor.delete(&api, id, query.confirmed.into()).await {
        Ok(Deletion::Deleted) => render_workspace(&page, &query.table_query()),
        Ok(Deletion::Declined) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(_) => Ok(alert(&format!("Failed to delete {}. Please try again.", R::NOUN))),
    }
}
