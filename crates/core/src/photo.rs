//! Photo references and the naming rules for partner uploads.
//!
//! Catalog photos and uploaded photos share the same [`PhotoOption`] shape.
//! Uploaded files live under `<uploads>/<ticket id>/` with thumbnails in a
//! nested `thumbnails/` directory; URLs mirror that layout under
//! [`UPLOADS_URL_PREFIX`].

use std::path::Path;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Accepted upload extensions (compared case-insensitively).
pub const ALLOWED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];

/// Directory (and URL segment) holding thumbnails inside a ticket's folder.
pub const THUMBNAILS_DIR: &str = "thumbnails";

pub const UPLOADS_URL_PREFIX: &str = "/api/assets/uploads";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PhotoOption {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub label: String,
    #[validate(length(min = 1))]
    pub file_name: String,
    #[validate(length(min = 1))]
    pub thumbnail_url: String,
    #[validate(length(min = 1))]
    pub image_url: String,
}

impl PhotoOption {
    /// Human-readable name for history entries: label, then file name, then
    /// `unknown`.
    pub fn display_label(&self) -> &str {
        if !self.label.is_empty() {
            &self.label
        } else if !self.file_name.is_empty() {
            &self.file_name
        } else {
            "unknown"
        }
    }

    /// Metadata for a freshly stored upload.
    pub fn uploaded(ticket_id: &str, photo_id: String, label: String, file_name: String) -> Self {
        let ticket = encode_uri_component(ticket_id);
        let file = encode_uri_component(&file_name);
        Self {
            id: photo_id,
            label,
            image_url: format!("{UPLOADS_URL_PREFIX}/{ticket}/{file}"),
            thumbnail_url: format!("{UPLOADS_URL_PREFIX}/{ticket}/{THUMBNAILS_DIR}/{file}"),
            file_name,
        }
    }
}

/// The extension of `file_name` including the leading dot, as written.
/// Empty when there is none (dot-files count as having no extension).
pub fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

/// Whether an extension (with its leading dot) is on the upload allow-list.
pub fn is_allowed_extension(ext: &str) -> bool {
    ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

/// The allow-list as shown in rejection messages.
pub fn allowed_extensions_label() -> String {
    ALLOWED_EXTENSIONS.join(", ")
}

/// Characters escaped in an upload URL path segment: everything except the
/// unreserved URI characters browsers leave alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(label: &str, file_name: &str) -> PhotoOption {
        PhotoOption {
            id: "p".into(),
            label: label.into(),
            file_name: file_name.into(),
            thumbnail_url: "/t".into(),
            image_url: "/i".into(),
        }
    }

    #[test]
    fn accepts_allowed_extensions_case_insensitively() {
        assert_eq!(extension_of("shot.JPEG"), ".JPEG");
        assert!(is_allowed_extension(".jpg"));
        assert!(is_allowed_extension(".JPEG"));
        assert!(is_allowed_extension(&extension_of("shot.Png")));
        assert!(is_allowed_extension(".webp"));
    }

    #[test]
    fn rejects_other_extensions() {
        assert!(!is_allowed_extension(".gif"));
        assert!(!is_allowed_extension(&extension_of("noextension")));
        assert!(!is_allowed_extension(&extension_of(".jpg")));
        assert_eq!(allowed_extensions_label(), ".jpg, .jpeg, .png, .webp");
    }

    #[test]
    fn uploaded_urls_escape_ticket_and_file() {
        let photo = PhotoOption::uploaded(
            "12",
            "upload-12-1".into(),
            "My Shot.jpg".into(),
            "upload-12-1.jpg".into(),
        );
        assert_eq!(photo.image_url, "/api/assets/uploads/12/upload-12-1.jpg");
        assert_eq!(
            photo.thumbnail_url,
            "/api/assets/uploads/12/thumbnails/upload-12-1.jpg"
        );
        assert_eq!(photo.label, "My Shot.jpg");
    }

    #[test]
    fn encodes_spaces_and_slashes() {
        assert_eq!(encode_uri_component("Block Libre.jpg"), "Block%20Libre.jpg");
        assert_eq!(encode_uri_component("a/b"), "a%2Fb");
        assert_eq!(encode_uri_component("it's-(v1)_~*!.png"), "it's-(v1)_~*!.png");
        assert_eq!(encode_uri_component("café#1"), "caf%C3%A9%231");
    }

    #[test]
    fn display_label_falls_back() {
        assert_eq!(photo("Photo 1", "a.jpg").display_label(), "Photo 1");
        assert_eq!(photo("", "a.jpg").display_label(), "a.jpg");
        assert_eq!(photo("", "").display_label(), "unknown");
    }
}
