use serde::{de, Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use wfn_core::ListEditor;

use crate::handlers::forms::FormFields;
use crate::pages::{EntityPage, RowAction};

/// Search text and sort column of a list table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub sort: Option<usize>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub desc: Option<bool>,
}

/// Hidden inputs submit `sort=` before any column has been clicked.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

impl TableQuery {
    /// Table state submitted alongside a multipart form.
    pub fn from_form(form: &FormFields) -> Self {
        Self {
            q: Some(form.raw("q").to_string()).filter(|q| !q.is_empty()),
            sort: form.text("sort").parse().ok(),
            desc: form.text("desc").parse().ok(),
        }
    }

    pub fn search(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone)]
pub struct ColumnView {
    pub index: usize,
    pub label: &'static str,
    /// Direction a click on the header asks for.
    pub next_desc: bool,
    pub indicator: &'static str,
}

#[derive(Debug, Clone)]
pub struct RowView {
    pub id: i64,
    pub cells: Vec<String>,
    pub actions: Vec<RowAction>,
}

#[derive(Debug, Clone)]
pub struct TableView {
    pub collection: &'static str,
    pub noun: &'static str,
    pub columns: Vec<ColumnView>,
    pub rows: Vec<RowView>,
    pub search: String,
    pub sort: Option<usize>,
    pub desc: bool,
}

/// Filter and sort a view of the cached list. The list itself is untouched.
pub fn build_table<R: EntityPage>(
    editor: &ListEditor<R>,
    lookups: &R::Lookups,
    query: &TableQuery,
) -> TableView {
    let labels = R::columns();
    let sort = query.sort.filter(|column| *column < labels.len());
    let desc = sort.is_some() && query.desc.unwrap_or(false);

    let mut rows: Vec<_> = editor
        .filter(query.search())
        .into_iter()
        .map(|record| (record.id(), record.cells(lookups), record.actions()))
        .collect();

    if let Some(column) = sort {
        rows.sort_by(|(_, a, _), (_, b, _)| {
            let ordering = match (a.get(column), b.get(column)) {
                (Some(a), Some(b)) => a.key.compare(&b.key),
                _ => std::cmp::Ordering::Equal,
            };
            if desc {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }

    let columns = labels
        .iter()
        .copied()
        .enumerate()
        .map(|(index, label)| {
            let active = sort == Some(index);
            ColumnView {
                index,
                label,
                next_desc: active && !desc,
                indicator: match (active, desc) {
                    (true, false) => "▲",
                    (true, true) => "▼",
                    _ => "",
                },
            }
        })
        .collect();

    TableView {
        collection: R::COLLECTION,
        noun: R::NOUN,
        columns,
        rows: rows
            .into_iter()
            .map(|(id, cells, actions)| RowView {
                id,
                cells: cells.into_iter().map(|cell| cell.display).collect(),
                actions,
            })
            .collect(),
        search: query.search().to_string(),
        sort,
        desc,
    }
}
