use std::sync::Arc;

use crate::{AdId, CategoryId, Snapshot};

/// Which of the two browsing surfaces the state drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Category list first; ads are reached through a category or a search.
    #[default]
    Categories,
    /// A single feed of every ad, most recent first.
    Feed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    layout: Layout,
    snapshot: Arc<Snapshot>,
    search_text: String,
    selected_category: Option<CategoryId>,
    selected_ad: Option<AdId>,
    loading: bool,
    error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.snapshot
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn selected_category(&self) -> Option<CategoryId> {
        self.selected_category
    }

    pub fn selected_ad(&self) -> Option<AdId> {
        self.selected_ad
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Marks a refresh as in flight. Returns `false` if one already is.
    pub(crate) fn begin_refresh(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.mark_dirty();
        true
    }

    /// Adopts a committed snapshot unless a newer one is already held.
    ///
    /// A stale snapshot leaves the loading flag and error banner untouched.
    pub(crate) fn apply_snapshot(&mut self, snapshot: Arc<Snapshot>) {
        if snapshot.generation() < self.snapshot.generation() {
            return;
        }
        self.loading = false;
        self.error = None;
        self.snapshot = snapshot;
        if let Some(category_id) = self.selected_category {
            if self.snapshot.category(category_id).is_none() {
                self.selected_category = None;
            }
        }
        if let Some(ad_id) = self.selected_ad {
            if self.snapshot.ad(ad_id).is_none() {
                self.selected_ad = None;
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn apply_failure(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn set_search_text(&mut self, text: String) {
        if self.search_text != text {
            self.search_text = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn select_category(&mut self, category_id: Option<CategoryId>) {
        if self.selected_category != category_id {
            self.selected_category = category_id;
            self.mark_dirty();
        }
    }

    pub(crate) fn select_ad(&mut self, ad_id: Option<AdId>) {
        if self.selected_ad != ad_id {
            self.selected_ad = ad_id;
            self.mark_dirty();
        }
    }
}
