//! Generic list-editor behind every entity page: one cached collection, a
//! filter over it, and a single add/edit draft.

use crate::api::{Authorized, Payload};
use crate::error::EditorError;
use serde::de::DeserializeOwned;
use validator::Validate;

/// A record type served from one backend collection.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path segment, e.g. `donors`.
    const COLLECTION: &'static str;
    /// Human name used in log lines and messages.
    const NOUN: &'static str;

    type Draft: DraftRecord<Self>;

    fn id(&self) -> i64;

    /// Values the page's search box matches against.
    fn search_fields(&self) -> Vec<&str>;
}

/// Raw form values for a resource.
pub trait DraftRecord<R>: Default + Clone + Validate + Send + Sync + 'static {
    /// Pre-fill the form from a row. File fields always start empty.
    fn from_record(record: &R) -> Self;

    fn to_payload(&self) -> Payload;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Create,
    Update(i64),
}

/// Answer to the browser's delete confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    Declined,
}

pub struct ListEditor<R: Resource> {
    items: Vec<R>,
    draft: R::Draft,
    mode: EditMode,
}

impl<R: Resource> Default for ListEditor<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            draft: R::Draft::default(),
            mode: EditMode::Create,
        }
    }
}

impl<R: Resource> ListEditor<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<R>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    /// Mutable access for post-processing a fetched list (expanding references).
    pub fn items_mut(&mut self) -> &mut [R] {
        &mut self.items
    }

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn find(&self, id: i64) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Fetch the collection. A failure is logged and the current list kept.
    #[tracing::instrument(name = "Load list", skip_all, fields(collection = R::COLLECTION))]
    pub async fn load(&mut self, api: &Authorized<'_>) {
        match api.list::<R>().await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "Loaded {}s", R::NOUN);
                self.items = items;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load {}s", R::NOUN);
            }
        }
    }

    /// Rows whose search fields contain `text`, ignoring case.
    pub fn filter(&self, text: &str) -> Vec<&R> {
        let needle = text.to_lowercase();
        if needle.is_empty() {
            return self.items.iter().collect();
        }

        self.items
            .iter()
            .filter(|item| {
                item.search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Switch the form to editing row `id`.
    pub fn begin_edit(&mut self, id: i64) -> Option<&R::Draft> {
        let record = self.find(id)?;
        self.draft = R::Draft::from_record(record);
        self.mode = EditMode::Update(id);
        Some(&self.draft)
    }

    pub fn cancel(&mut self) {
        self.draft = R::Draft::default();
        self.mode = EditMode::Create;
    }

    pub fn set_draft(&mut self, draft: R::Draft) {
        self.draft = draft;
    }

    /// Create or update from the current draft.
    ///
    /// Validation runs first; an incomplete draft never reaches the backend.
    /// On failure neither the list nor the draft change.
    #[tracing::instrument(name = "Submit draft", skip_all, fields(collection = R::COLLECTION, mode = ?self.mode))]
    pub async fn submit(&mut self, api: &Authorized<'_>) -> Result<R, EditorError> {
        self.draft.validate()?;

        let payload = self.draft.to_payload();
        let saved = match self.mode {
            EditMode::Create => api.create::<R>(payload).await,
            EditMode::Update(id) => api.update::<R>(id, payload).await,
        }
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to save {}", R::NOUN);
            e
        })?;

        match self.items.iter_mut().find(|item| item.id() == saved.id()) {
            Some(existing) => *existing = saved.clone(),
            None => self.items.push(saved.clone()),
        }
        self.cancel();

        tracing::info!(id = saved.id(), "Saved {}", R::NOUN);
        Ok(saved)
    }

    /// Delete row `id` once the user has confirmed.
    #[tracing::instrument(name = "Delete record", skip(self, api), fields(collection = R::COLLECTION))]
    pub async fn delete(
        &mut self,
        api: &Authorized<'_>,
        id: i64,
        confirmation: Confirmation,
    ) -> Result<Deletion, EditorError> {
        if confirmation == Confirmation::Declined {
            return Ok(Deletion::Declined);
        }

        api.remove::<R>(id).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to delete {}", R::NOUN);
            e
        })?;

        self.items.retain(|item| item.id() != id);
        if self.mode == EditMode::Update(id) {
            self.cancel();
        }

        tracing::info!(id, "Deleted {}", R::NOUN);
        Ok(Deletion::Deleted)
    }
}
