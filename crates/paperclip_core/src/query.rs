//! Filtering and ordering of ads for display.
//!
//! Every function borrows its input and preserves relative order wherever it
//! does not explicitly reorder, so results are deterministic.

use crate::{Ad, CategoryId};

/// Ads belonging to exactly `category_id`, in input order.
pub fn ads_by_category<'a, I>(ads: I, category_id: CategoryId) -> Vec<&'a Ad>
where
    I: IntoIterator<Item = &'a Ad>,
{
    ads.into_iter()
        .filter(|ad| ad.category_id == category_id)
        .collect()
}

/// Case-insensitive substring match against title or description.
///
/// An empty query keeps every ad.
pub fn search<'a, I>(ads: I, query: &str) -> Vec<&'a Ad>
where
    I: IntoIterator<Item = &'a Ad>,
{
    if query.is_empty() {
        return ads.into_iter().collect();
    }
    let needle = query.to_lowercase();
    ads.into_iter()
        .filter(|ad| matches_query(ad, &needle))
        .collect()
}

fn matches_query(ad: &Ad, lowered_query: &str) -> bool {
    ad.title.to_lowercase().contains(lowered_query)
        || ad.description.to_lowercase().contains(lowered_query)
}

/// Urgent ads first; otherwise input order.
pub fn sort_for_display(mut ads: Vec<&Ad>) -> Vec<&Ad> {
    // `sort_by_key` is stable, which keeps each urgency group in input order.
    ads.sort_by_key(|ad| !ad.is_urgent);
    ads
}

/// Most recent first, with urgent ads pinned above the rest.
pub fn sort_recent_first(mut ads: Vec<&Ad>) -> Vec<&Ad> {
    ads.sort_by(|a, b| b.creation_date.cmp(&a.creation_date));
    sort_for_display(ads)
}

/// Formats a price the way both apps label it, e.g. `"140.00 €"`.
pub fn format_price(price: f64) -> String {
    format!("{price:.2} €")
}
