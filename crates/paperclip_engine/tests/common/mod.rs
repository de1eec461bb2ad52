#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use std::time::Duration;

use paperclip_engine::{FailureKind, FetchError, FetchMetadata, FetchOutput, Fetcher, Resource};

pub const CATEGORIES_JSON: &str = r#"[
    {"id": 1, "name": "Véhicule"},
    {"id": 2, "name": "Mode"},
    {"id": 5, "name": "Maison"}
]"#;

pub const ADS_JSON: &str = r#"[
    {
        "id": 1461267313,
        "category_id": 5,
        "title": "Statue homme noir assis en plâtre polychrome",
        "description": "Magnifique Statuette homme noir assis fumant le cigare",
        "price": 140.00,
        "images_url": {
            "small": "https://raw.githubusercontent.com/leboncoin/paperclip/master/ad-small/2c9563bbe85f12a5dcaeb2c40989182463270404.jpg",
            "thumb": "https://raw.githubusercontent.com/leboncoin/paperclip/master/ad-thumb/2c9563bbe85f12a5dcaeb2c40989182463270404.jpg"
        },
        "creation_date": "2019-11-05T15:56:59+0000",
        "is_urgent": false
    },
    {
        "id": 1691247255,
        "category_id": 1,
        "title": "Pc portable hp elitebook 820 g1 core i5 4 go ram 250 go hdd",
        "description": "Ordinateur très propre",
        "price": 199.00,
        "images_url": {},
        "creation_date": "2019-10-16T17:10:20+0000",
        "is_urgent": true,
        "siret": "123 323 002"
    }
]"#;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

pub fn ok_output(resource: Resource, body: &str) -> Result<FetchOutput, FetchError> {
    Ok(FetchOutput {
        bytes: body.as_bytes().to_vec(),
        metadata: FetchMetadata {
            resource,
            original_url: format!("memory://{resource}"),
            final_url: format!("memory://{resource}"),
            content_type: Some("application/json".to_string()),
            byte_len: body.len() as u64,
        },
    })
}

pub fn network_failure(resource: Resource) -> Result<FetchOutput, FetchError> {
    Err(FetchError::new(
        resource,
        FailureKind::Network,
        "connection refused",
    ))
}

/// In-memory fetcher whose answers can be swapped between refreshes.
#[derive(Default)]
pub struct ScriptedFetcher {
    responses: Mutex<HashMap<Resource, Result<FetchOutput, FetchError>>>,
    delays: Mutex<HashMap<Resource, Duration>>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new(categories: &str, ads: &str) -> Self {
        let fetcher = Self::default();
        fetcher.respond(Resource::Categories, ok_output(Resource::Categories, categories));
        fetcher.respond(Resource::Ads, ok_output(Resource::Ads, ads));
        fetcher
    }

    pub fn respond(&self, resource: Resource, response: Result<FetchOutput, FetchError>) {
        self.responses.lock().unwrap().insert(resource, response);
    }

    pub fn delay(&self, resource: Resource, delay: Duration) {
        self.delays.lock().unwrap().insert(resource, delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, resource: Resource) -> Result<FetchOutput, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.delays.lock().unwrap().get(&resource).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .get(&resource)
            .cloned()
            .unwrap_or_else(|| network_failure(resource))
    }
}

/// Fetcher that stamps every payload with a per-resource call counter, so a
/// snapshot whose ads point at missing categories reveals a torn commit.
#[derive(Default)]
pub struct VersionedFetcher {
    categories_calls: AtomicUsize,
    ads_calls: AtomicUsize,
}

#[async_trait::async_trait]
impl Fetcher for VersionedFetcher {
    async fn fetch(&self, resource: Resource) -> Result<FetchOutput, FetchError> {
        match resource {
            Resource::Categories => {
                let version = self.categories_calls.fetch_add(1, Ordering::SeqCst) + 1;
                tokio::time::sleep(Duration::from_millis(5)).await;
                ok_output(
                    resource,
                    &format!(r#"[{{"id": {version}, "name": "v{version}"}}]"#),
                )
            }
            Resource::Ads => {
                let version = self.ads_calls.fetch_add(1, Ordering::SeqCst) + 1;
                tokio::time::sleep(Duration::from_millis(15)).await;
                ok_output(
                    resource,
                    &format!(
                        r#"[{{"id": {version}, "category_id": {version}, "title": "t", "description": "d", "price": 1.0, "images_url": null, "creation_date": "2019-11-05T15:56:59+0000", "is_urgent": false}}]"#
                    ),
                )
            }
        }
    }
}
