//! Paperclip engine: fetching, decoding, and the snapshot repository.
mod decode;
mod effects;
mod engine;
mod fetch;
mod repository;
mod types;

pub use decode::{decode_ads, decode_categories, DecodeError};
pub use effects::{event_to_msg, run_effects};
pub use engine::EngineHandle;
pub use fetch::{Endpoints, FetchSettings, Fetcher, ReqwestFetcher};
pub use repository::{RefreshError, Repository, RepositoryStatus};
pub use types::{EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, Resource};
