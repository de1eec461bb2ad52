use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        // A trigger while loading joins the in-flight refresh instead of starting another.
        Msg::ScreenAppeared | Msg::RefreshRequested => {
            if state.begin_refresh() {
                vec![Effect::Refresh]
            } else {
                Vec::new()
            }
        }
        Msg::SearchChanged(text) => {
            state.set_search_text(text);
            Vec::new()
        }
        Msg::CategorySelected(category_id) => {
            if state.snapshot().category(category_id).is_some() {
                state.select_category(Some(category_id));
            }
            Vec::new()
        }
        Msg::CategoryCleared => {
            state.select_category(None);
            Vec::new()
        }
        Msg::AdSelected(ad_id) => {
            if state.snapshot().ad(ad_id).is_some() {
                state.select_ad(Some(ad_id));
            }
            Vec::new()
        }
        Msg::AdClosed => {
            state.select_ad(None);
            Vec::new()
        }
        Msg::RefreshSucceeded(snapshot) => {
            state.apply_snapshot(snapshot);
            Vec::new()
        }
        Msg::RefreshFailed(message) => {
            state.apply_failure(message);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
