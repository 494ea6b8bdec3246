//! How each entity is shown: table columns, row actions, and the add/edit
//! form. The list editing itself is generic.

pub mod donations;
pub mod donors;
pub mod expenses;
pub mod organizations;
pub mod programs;
pub mod subprograms;
pub mod table;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use wfn_core::{Authorized, EditMode, Resource};

use crate::handlers::forms::FormFields;

pub use table::{build_table, TableQuery, TableView};

#[async_trait]
pub trait EntityPage: Resource {
    /// Page heading and sidebar label.
    const TITLE: &'static str;
    const SEARCH_PLACEHOLDER: &'static str;

    /// Other collections the page needs (select options, documents).
    type Lookups: Default + Send + Sync + 'static;

    async fn load_lookups(_api: &Authorized<'_>) -> Self::Lookups {
        Self::Lookups::default()
    }

    /// Expand bare references in freshly loaded or saved rows.
    fn link_lookups(_items: &mut [Self], _lookups: &Self::Lookups) {}

    fn columns() -> &'static [&'static str];

    /// One cell per column.
    fn cells(&self, lookups: &Self::Lookups) -> Vec<Cell>;

    fn actions(&self) -> Vec<RowAction> {
        Vec::new()
    }

    fn render_form(
        draft: &Self::Draft,
        mode: EditMode,
        lookups: &Self::Lookups,
    ) -> Result<String, askama::Error>;

    fn draft_from_form(form: FormFields) -> Self::Draft;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Empty,
    Text(String),
    Number(Decimal),
    Date(NaiveDate),
}

impl SortKey {
    /// Text ignores case; blanks sort first.
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Empty, SortKey::Empty) => Ordering::Equal,
            (SortKey::Empty, _) => Ordering::Less,
            (_, SortKey::Empty) => Ordering::Greater,
            (SortKey::Number(a), SortKey::Number(b)) => a.cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub display: String,
    pub key: SortKey,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        let display = value.into();
        let key = if display.is_empty() {
            SortKey::Empty
        } else {
            SortKey::Text(display.to_lowercase())
        };
        Self { display, key }
    }

    pub fn optional_text(value: Option<&str>) -> Self {
        Self::text(value.unwrap_or_default())
    }

    pub fn money(value: Decimal) -> Self {
        Self {
            display: format_money(value),
            key: SortKey::Number(value),
        }
    }

    pub fn optional_money(value: Option<Decimal>) -> Self {
        match value {
            Some(value) => Self::money(value),
            None => Self {
                display: "-".to_string(),
                key: SortKey::Empty,
            },
        }
    }

    pub fn count(value: Option<i64>) -> Self {
        match value {
            Some(n) => Self {
                display: n.to_string(),
                key: SortKey::Number(Decimal::from(n)),
            },
            None => Self::text(""),
        }
    }

    pub fn date(value: NaiveDate) -> Self {
        Self {
            display: format_date(value),
            key: SortKey::Date(value),
        }
    }

    pub fn optional_date(value: Option<NaiveDate>) -> Self {
        match value {
            Some(value) => Self::date(value),
            None => Self::text(""),
        }
    }
}

/// Extra per-row link (receipt, report).
#[derive(Debug, Clone, PartialEq)]
pub struct RowAction {
    pub label: &'static str,
    pub href: String,
    /// Open in a new window instead of downloading.
    pub new_window: bool,
}

/// An `<option>` of a lookup select box.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn list<'a, I>(choices: I, current: &str) -> Vec<SelectOption>
    where
        I: IntoIterator<Item = (String, &'a str)>,
    {
        choices
            .into_iter()
            .map(|(value, label)| SelectOption {
                selected: value == current,
                value,
                label: label.to_string(),
            })
            .collect()
    }
}

/// Heading and endpoints shared by every add/edit form.
#[derive(Debug, Clone)]
pub struct FormChrome {
    pub collection: &'static str,
    pub heading: String,
    pub editing: bool,
}

impl FormChrome {
    pub fn new<R: Resource>(mode: EditMode) -> Self {
        let editing = matches!(mode, EditMode::Update(_));
        let verb = if editing { "Edit" } else { "Add" };
        Self {
            collection: R::COLLECTION,
            heading: format!("{} {}", verb, capitalize(R::NOUN)),
            editing,
        }
    }
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", value)
}

pub fn format_date(value: NaiveDate) -> String {
    value.format("%d/%m/%Y").to_string()
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
