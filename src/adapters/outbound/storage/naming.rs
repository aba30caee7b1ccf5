//! Storage key generation shared by the storage adapters
//!
//! Keys have the form `{prefix}/{token}.{ext}`: the caller's prefix without
//! surrounding slashes or a leading `images/` segment, a random 16 character
//! hex token, and the original file extension (`png` when there is none).

use std::path::{Component, Path};
use uuid::Uuid;

use super::error::StoreError;
use crate::domain::{models::UploadFile, services::ImageDeletionService};

pub const DEFAULT_EXTENSION: &str = "png";
const TOKEN_LEN: usize = 16;

/// Strip surrounding slashes and a leading `images/` segment
pub fn normalize_prefix(prefix: &str) -> &str {
    let trimmed = prefix.trim_matches('/');
    if trimmed == "images" {
        return "";
    }
    trimmed
        .strip_prefix("images/")
        .map(|rest| rest.trim_start_matches('/'))
        .unwrap_or(trimmed)
}

/// Random 16 character lowercase hex token
pub fn random_token() -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(TOKEN_LEN);
    token
}

/// Fresh storage key for `file` under `prefix`.
///
/// Prefixes with anything other than plain directory names are rejected.
pub fn storage_key(file: &UploadFile, prefix: &str) -> Result<String, StoreError> {
    let ext = file
        .extension()
        .filter(|ext| !ext.is_empty())
        .unwrap_or(DEFAULT_EXTENSION);
    let normalized = normalize_prefix(prefix);

    if normalized.is_empty() {
        return Ok(format!("{}.{}", random_token(), ext));
    }
    if !is_relative_key(normalized) {
        return Err(StoreError::InvalidPath(prefix.to_string()));
    }
    Ok(format!("{}/{}.{}", normalized, random_token(), ext))
}

/// Storage key referenced by a stored URL or path.
///
/// The URL is reduced to the part after `/images/`; keys that would escape
/// the storage root are rejected.
pub fn key_from_path(path: &str) -> Result<String, StoreError> {
    let key = ImageDeletionService::new().extract_image_path_from_url(path.trim());
    checked_key(key, path)
}

/// Like [`key_from_path`], but URLs starting with `public_base_url` are
/// reduced relative to that base so a base containing `/images/` is not
/// mistaken for the key.
pub fn key_from_url(path: &str, public_base_url: &str) -> Result<String, StoreError> {
    let base = public_base_url.trim_end_matches('/');
    let own = Some(base)
        .filter(|base| !base.is_empty())
        .and_then(|base| path.trim().strip_prefix(base))
        .and_then(|rest| rest.strip_prefix("/images/"));

    match own {
        Some(key) => checked_key(key, path),
        None => key_from_path(path),
    }
}

fn checked_key(key: &str, path: &str) -> Result<String, StoreError> {
    let key = key.trim_start_matches('/');
    if key.is_empty() || !is_relative_key(key) {
        return Err(StoreError::InvalidPath(path.to_string()));
    }
    Ok(key.to_string())
}

fn is_relative_key(key: &str) -> bool {
    !key.contains('\\')
        && Path::new(key)
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: Option<&str>) -> UploadFile {
        UploadFile::builder()
            .maybe_file_name(name)
            .content_type("image/png")
            .data(b"bytes".to_vec())
            .build()
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("/images/posts"), "posts");
        assert_eq!(normalize_prefix("images/profiles/"), "profiles");
        assert_eq!(normalize_prefix("posts"), "posts");
        assert_eq!(normalize_prefix("/images/"), "");
        assert_eq!(normalize_prefix(""), "");
        assert_eq!(normalize_prefix("/imagesets/a"), "imagesets/a");
    }

    #[test]
    fn test_random_token() {
        let token = random_token();
        assert_eq!(token.len(), 16);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, random_token());
    }

    #[test]
    fn test_storage_key() {
        let key = storage_key(&file(Some("photo.jpeg")), "/images/posts").unwrap();
        assert!(key.starts_with("posts/"));
        assert!(key.ends_with(".jpeg"));
        assert_eq!(key.len(), "posts/".len() + 16 + ".jpeg".len());

        let key = |name: Option<&str>, prefix: &str| storage_key(&file(name), prefix).unwrap();
        assert!(key(Some("noext"), "posts").ends_with(".png"));
        assert!(key(None, "posts").ends_with(".png"));
        assert!(!key(Some("a.gif"), "").contains('/'));
    }

    #[test]
    fn test_storage_key_rejects_escaping_prefix() {
        for prefix in ["../escaped", "images/../../x", "./posts", "posts\\..\\x"] {
            assert!(
                matches!(
                    storage_key(&file(Some("a.jpg")), prefix),
                    Err(StoreError::InvalidPath(p)) if p == prefix
                ),
                "{} should be rejected",
                prefix
            );
        }
    }

    #[test]
    fn test_key_from_path() {
        assert_eq!(
            key_from_path("http://localhost:8080/images/posts/abc.jpg").unwrap(),
            "posts/abc.jpg"
        );
        assert_eq!(key_from_path("/images/a.png").unwrap(), "a.png");
        assert_eq!(key_from_path("posts/abc.jpg").unwrap(), "posts/abc.jpg");

        assert!(key_from_path("/images/../etc/passwd").is_err());
        assert!(key_from_path("/images/").is_err());
    }

    #[test]
    fn test_key_from_url_with_images_in_base() {
        let base = "http://localhost:9000/images";
        let url = "http://localhost:9000/images/images/posts/abc.jpg";

        assert_eq!(key_from_url(url, base).unwrap(), "posts/abc.jpg");
        assert_eq!(key_from_url(url, "http://localhost:9000/images/").unwrap(), "posts/abc.jpg");

        // Foreign URLs and bare paths fall back to the first `/images/`
        assert_eq!(
            key_from_url("https://cdn.example.com/images/a.png", base).unwrap(),
            "a.png"
        );
        assert_eq!(key_from_url("/images/posts/b.png", "").unwrap(), "posts/b.png");

        assert!(key_from_url("http://localhost:9000/images/images/../x.png", base).is_err());
    }
}
