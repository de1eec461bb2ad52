use serde::{Deserialize, Serialize};

pub type CategoryId = i64;
pub type AdId = i64;

/// A browsable ad category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Image URLs attached to an ad: `thumb` for list rows, `small` for the detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
}

/// A classified ad as published by the listing endpoint.
///
/// `category_id` may point at a category that is not loaded; lookups fall back
/// to a placeholder name rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    pub id: AdId,
    pub category_id: CategoryId,
    pub title: String,
    pub description: String,
    pub price: f64,
    #[serde(rename = "images_url", default)]
    pub images: Option<ImageUrls>,
    /// ISO-8601-like token, only ever compared lexicographically.
    pub creation_date: String,
    pub is_urgent: bool,
    #[serde(rename = "siret", default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
}

impl Ad {
    pub fn thumb_url(&self) -> Option<&str> {
        self.images.as_ref().and_then(|images| images.thumb.as_deref())
    }

    pub fn small_url(&self) -> Option<&str> {
        self.images.as_ref().and_then(|images| images.small.as_deref())
    }
}
