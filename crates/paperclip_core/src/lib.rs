//! Paperclip core: schema, snapshot queries, and the pure browsing state machine.
mod effect;
mod model;
mod msg;
pub mod query;
mod snapshot;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use model::{Ad, AdId, Category, CategoryId, ImageUrls};
pub use msg::Msg;
pub use query::{ads_by_category, format_price, search, sort_for_display, sort_recent_first};
pub use snapshot::{Snapshot, UNKNOWN_CATEGORY};
pub use state::{AppState, Layout};
pub use update::update;
pub use view_model::{AdDetailView, AdRowView, AppViewModel, CategoryRowView};
