use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use engine_logging::{engine_info, engine_warn};
use paperclip_core::{Ad, Category, Snapshot};

use crate::decode::{decode_ads, decode_categories};
use crate::{DecodeError, FailureKind, FetchError, Fetcher, Resource};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl RefreshError {
    pub fn resource(&self) -> Resource {
        match self {
            RefreshError::Fetch(err) => err.resource,
            RefreshError::Decode(err) => err.resource(),
        }
    }

    /// Short message for the error banner shown next to stale results.
    pub fn user_message(&self) -> String {
        match self {
            RefreshError::Fetch(err) => match &err.kind {
                FailureKind::Timeout => {
                    "The server took too long to answer. Pull to retry.".to_string()
                }
                FailureKind::Network => {
                    "Could not reach the server. Check your connection and retry.".to_string()
                }
                FailureKind::NotFound | FailureKind::InvalidUrl => {
                    format!("The {} list is unavailable.", err.resource)
                }
                kind => format!("Failed to fetch {}: {kind}.", err.resource),
            },
            RefreshError::Decode(err) => {
                format!("The {} list could not be read.", err.resource())
            }
        }
    }
}

/// The last committed snapshot, seen together with the outcome of the latest refresh.
#[derive(Debug, Clone)]
pub struct RepositoryStatus {
    pub snapshot: Arc<Snapshot>,
    pub last_error: Option<RefreshError>,
}

/// Owns the single in-memory snapshot and mediates every refresh.
///
/// Refreshes are serialized: a refresh requested while another is running waits
/// for it, then runs its own fetch. A snapshot is published only when both
/// resources fetched and decoded, so readers see either the old pair or the new
/// pair, never a mix.
pub struct Repository {
    fetcher: Arc<dyn Fetcher>,
    published: RwLock<RepositoryStatus>,
    refresh_lock: tokio::sync::Mutex<()>,
}

impl Repository {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            published: RwLock::new(RepositoryStatus {
                snapshot: Arc::new(Snapshot::empty()),
                last_error: None,
            }),
            refresh_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// The last committed snapshot; empty until the first successful refresh.
    pub fn current(&self) -> Arc<Snapshot> {
        self.read().snapshot.clone()
    }

    pub fn status(&self) -> RepositoryStatus {
        self.read().clone()
    }

    pub async fn refresh(&self) -> Result<Arc<Snapshot>, RefreshError> {
        let _serialized = self.refresh_lock.lock().await;
        engine_info!("refresh started");

        match self.fetch_both().await {
            Ok((categories, ads)) => {
                let mut published = self.write();
                let generation = published.snapshot.generation() + 1;
                let snapshot = Arc::new(Snapshot::new(generation, categories, ads));
                published.snapshot = snapshot.clone();
                published.last_error = None;
                engine_info!(
                    "refresh committed generation={} categories={} ads={}",
                    generation,
                    snapshot.categories().len(),
                    snapshot.ads().len()
                );
                Ok(snapshot)
            }
            Err(err) => {
                engine_warn!("refresh failed, keeping previous snapshot: {}", err);
                self.write().last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    async fn fetch_both(&self) -> Result<(Vec<Category>, Vec<Ad>), RefreshError> {
        let (categories, ads) = tokio::join!(
            self.fetcher.fetch(Resource::Categories),
            self.fetcher.fetch(Resource::Ads)
        );
        let (categories, ads) = (categories?, ads?);

        let categories = decode_categories(
            &categories.bytes,
            categories.metadata.content_type.as_deref(),
        )?;
        let ads = decode_ads(&ads.bytes, ads.metadata.content_type.as_deref())?;
        Ok((categories, ads))
    }

    fn read(&self) -> RwLockReadGuard<'_, RepositoryStatus> {
        self.published.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RepositoryStatus> {
        self.published.write().unwrap_or_else(PoisonError::into_inner)
    }
}
