use std::collections::HashSet;

use encoding_rs::{Encoding, UTF_8};
use paperclip_core::{Ad, Category};
use serde::de::DeserializeOwned;

use crate::Resource;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{resource} payload is not valid {encoding}")]
    Encoding { resource: Resource, encoding: String },
    #[error("{resource} payload is malformed at line {line}, column {column}: {message}")]
    Malformed {
        resource: Resource,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("{resource} record {id} has an invalid {field}: {message}")]
    InvalidField {
        resource: Resource,
        id: i64,
        field: &'static str,
        message: String,
    },
    #[error("{resource} payload contains id {id} more than once")]
    DuplicateId { resource: Resource, id: i64 },
}

impl DecodeError {
    pub fn resource(&self) -> Resource {
        match self {
            DecodeError::Encoding { resource, .. }
            | DecodeError::Malformed { resource, .. }
            | DecodeError::InvalidField { resource, .. }
            | DecodeError::DuplicateId { resource, .. } => *resource,
        }
    }
}

/// Decode the categories payload. Any malformed record fails the whole payload.
pub fn decode_categories(
    bytes: &[u8],
    content_type: Option<&str>,
) -> Result<Vec<Category>, DecodeError> {
    let categories: Vec<Category> = parse_records(Resource::Categories, bytes, content_type)?;
    ensure_unique_ids(
        Resource::Categories,
        categories.iter().map(|category| category.id),
    )?;
    Ok(categories)
}

/// Decode the ads payload. Missing image URLs or tax id decode to `None`;
/// anything wrong with a required field fails the whole payload.
pub fn decode_ads(bytes: &[u8], content_type: Option<&str>) -> Result<Vec<Ad>, DecodeError> {
    let ads: Vec<Ad> = parse_records(Resource::Ads, bytes, content_type)?;
    for ad in &ads {
        if !ad.price.is_finite() || ad.price < 0.0 {
            return Err(DecodeError::InvalidField {
                resource: Resource::Ads,
                id: ad.id,
                field: "price",
                message: format!("expected a non-negative amount, got {}", ad.price),
            });
        }
    }
    ensure_unique_ids(Resource::Ads, ads.iter().map(|ad| ad.id))?;
    Ok(ads)
}

fn parse_records<T: DeserializeOwned>(
    resource: Resource,
    bytes: &[u8],
    content_type: Option<&str>,
) -> Result<Vec<T>, DecodeError> {
    let text = decode_text(resource, bytes, content_type)?;
    serde_json::from_str(&text).map_err(|err| DecodeError::Malformed {
        resource,
        line: err.line(),
        column: err.column(),
        message: err.to_string(),
    })
}

fn ensure_unique_ids(
    resource: Resource,
    ids: impl Iterator<Item = i64>,
) -> Result<(), DecodeError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DecodeError::DuplicateId { resource, id });
        }
    }
    Ok(())
}

/// Decode raw bytes to text using: BOM -> Content-Type charset -> UTF-8.
fn decode_text(
    resource: Resource,
    bytes: &[u8],
    content_type: Option<&str>,
) -> Result<String, DecodeError> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(resource, &bytes[bom_len..], encoding);
    }

    let encoding = content_type
        .and_then(extract_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    decode_with(resource, bytes, encoding)
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.trim().split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim_matches([' ', '"', '\''].as_ref()).to_string())
        })
        .next()
}

fn decode_with(
    resource: Resource,
    bytes: &[u8],
    encoding: &'static Encoding,
) -> Result<String, DecodeError> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(DecodeError::Encoding {
            resource,
            encoding: encoding.name().to_string(),
        });
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_parameter_is_found_case_insensitively() {
        assert_eq!(
            extract_charset("text/plain; Charset=\"ISO-8859-1\""),
            Some("ISO-8859-1".to_string())
        );
        assert_eq!(extract_charset("application/json"), None);
    }

    #[test]
    fn latin1_payload_decodes_with_declared_charset() {
        let bytes = b"[{\"id\":1,\"name\":\"V\xe9hicule\"}]";
        let categories =
            decode_categories(bytes, Some("text/plain; charset=ISO-8859-1")).unwrap();
        assert_eq!(categories[0].name, "Véhicule");
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let err = decode_categories(b"[{\"id\":1,\"name\":\"\xff\"}]", None).unwrap_err();
        assert!(matches!(err, DecodeError::Encoding { .. }));
        assert_eq!(err.resource(), Resource::Categories);
    }
}
