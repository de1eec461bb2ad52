use crate::query::{ads_by_category, format_price, search, sort_for_display, sort_recent_first};
use crate::{Ad, AdId, AppState, CategoryId, Layout, Snapshot};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub layout: Layout,
    pub loading: bool,
    /// Set after a failed refresh; the rows below still show the last good snapshot.
    pub error: Option<String>,
    pub search_text: String,
    pub categories: Vec<CategoryRowView>,
    pub ads: Vec<AdRowView>,
    /// Name of the opened category, if any.
    pub title: Option<String>,
    pub detail: Option<AdDetailView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRowView {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdRowView {
    pub id: AdId,
    pub title: String,
    pub category_name: String,
    pub price_label: String,
    pub is_urgent: bool,
    pub thumb_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdDetailView {
    pub id: AdId,
    pub title: String,
    pub category_name: String,
    pub price_label: String,
    pub description: String,
    pub is_urgent: bool,
    pub image_url: Option<String>,
    pub creation_date: String,
    pub tax_id: Option<String>,
}

impl AdRowView {
    fn new(snapshot: &Snapshot, ad: &Ad) -> Self {
        Self {
            id: ad.id,
            title: ad.title.clone(),
            category_name: snapshot.category_name(ad.category_id).to_string(),
            price_label: format_price(ad.price),
            is_urgent: ad.is_urgent,
            thumb_url: ad.thumb_url().map(ToOwned::to_owned),
        }
    }
}

impl AdDetailView {
    fn new(snapshot: &Snapshot, ad: &Ad) -> Self {
        Self {
            id: ad.id,
            title: ad.title.clone(),
            category_name: snapshot.category_name(ad.category_id).to_string(),
            price_label: format_price(ad.price),
            description: ad.description.clone(),
            is_urgent: ad.is_urgent,
            image_url: ad.small_url().map(ToOwned::to_owned),
            creation_date: ad.creation_date.clone(),
            tax_id: ad.tax_id.clone(),
        }
    }
}

impl AppState {
    /// Derives the read-only view from the held snapshot and the current search text.
    pub fn view(&self) -> AppViewModel {
        let snapshot = self.snapshot().as_ref();
        let query = self.search_text();

        let visible = match (self.layout(), self.selected_category()) {
            (Layout::Categories, Some(category_id)) => {
                sort_for_display(search(ads_by_category(snapshot.ads(), category_id), query))
            }
            (Layout::Categories, None) if query.is_empty() => Vec::new(),
            (Layout::Categories, None) => search(snapshot.ads(), query),
            (Layout::Feed, _) => sort_recent_first(search(snapshot.ads(), query)),
        };

        AppViewModel {
            layout: self.layout(),
            loading: self.is_loading(),
            error: self.error().map(ToOwned::to_owned),
            search_text: query.to_string(),
            categories: snapshot
                .categories()
                .iter()
                .map(|category| CategoryRowView {
                    id: category.id,
                    name: category.name.clone(),
                })
                .collect(),
            ads: visible
                .into_iter()
                .map(|ad| AdRowView::new(snapshot, ad))
                .collect(),
            title: self
                .selected_category()
                .map(|category_id| snapshot.category_name(category_id).to_string()),
            detail: self
                .selected_ad()
                .and_then(|ad_id| snapshot.ad(ad_id))
                .map(|ad| AdDetailView::new(snapshot, ad)),
            dirty: self.is_dirty(),
        }
    }
}
