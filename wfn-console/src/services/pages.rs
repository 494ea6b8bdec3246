//! Per-session cache of each entity page's state.
//!
//! Volatile: a page reload re-fetches, logout or expiry drops it, a restart
//! loses it.

use crate::pages::EntityPage;
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;
use wfn_core::ListEditor;

pub struct PageState<R: EntityPage> {
    pub editor: ListEditor<R>,
    pub lookups: R::Lookups,
    /// Whether the page has been mounted (list and lookups fetched) yet.
    pub mounted: bool,
}

impl<R: EntityPage> Default for PageState<R> {
    fn default() -> Self {
        Self {
            editor: ListEditor::new(),
            lookups: R::Lookups::default(),
            mounted: false,
        }
    }
}

pub type SharedPage<R> = Arc<Mutex<PageState<R>>>;

#[derive(Default)]
pub struct PageStore {
    pages: DashMap<(Uuid, TypeId), Arc<dyn Any + Send + Sync>>,
}

impl PageStore {
    /// The page state of entity `R` for one browser session, created empty on
    /// first use.
    pub fn page<R: EntityPage>(&self, session_key: Uuid) -> SharedPage<R> {
        let key = (session_key, TypeId::of::<R>());

        let existing = self.pages.get(&key).map(|entry| entry.value().clone());
        if let Some(Ok(page)) = existing.map(|any| any.downcast::<Mutex<PageState<R>>>()) {
            return page;
        }

        let page: SharedPage<R> = Arc::new(Mutex::new(PageState::default()));
        let erased: Arc<dyn Any + Send + Sync> = page.clone();
        match self.pages.entry(key).or_insert(erased).value().clone().downcast() {
            Ok(winner) => winner,
            Err(_) => page,
        }
    }

    pub fn drop_session(&self, session_key: Uuid) {
        self.pages.retain(|(key, _), _| *key != session_key);
    }

    pub fn session_page_count(&self, session_key: Uuid) -> usize {
        self.pages.iter().filter(|entry| entry.key().0 == session_key).count()
    }
}
