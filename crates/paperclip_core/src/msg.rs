use std::sync::Arc;

use crate::{AdId, CategoryId, Snapshot};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The browsing screen became visible.
    ScreenAppeared,
    /// User pulled to refresh or pressed Retry.
    RefreshRequested,
    /// User edited the search box.
    SearchChanged(String),
    /// User opened a category from the category list.
    CategorySelected(CategoryId),
    /// User navigated back from a category.
    CategoryCleared,
    /// User opened an ad's detail screen.
    AdSelected(AdId),
    /// User closed the detail screen.
    AdClosed,
    /// Engine committed a snapshot.
    RefreshSucceeded(Arc<Snapshot>),
    /// Engine refresh failed; the message is suitable for display.
    RefreshFailed(String),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
