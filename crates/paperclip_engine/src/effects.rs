use engine_logging::{engine_info, engine_warn};
use paperclip_core::{Effect, Msg};

use crate::{EngineEvent, EngineHandle};

/// Carries out the effects returned by [`paperclip_core::update`].
pub fn run_effects(engine: &EngineHandle, effects: impl IntoIterator<Item = Effect>) {
    for effect in effects {
        match effect {
            Effect::Refresh => {
                engine_info!("Refresh requested");
                engine.request_refresh();
            }
        }
    }
}

/// Translates an engine event into the message the state machine expects.
pub fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::RefreshCompleted(Ok(snapshot)) => Msg::RefreshSucceeded(snapshot),
        EngineEvent::RefreshCompleted(Err(err)) => {
            engine_warn!("Refresh failed: {}", err);
            Msg::RefreshFailed(err.user_message())
        }
    }
}
