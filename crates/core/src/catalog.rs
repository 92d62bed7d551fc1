//! Fixed reference catalog: garment styles and reference photos.
//!
//! Reference photos are served from the static assets directory; the
//! catalog entries are immutable and copied onto tickets at creation.

use crate::photo::{encode_uri_component, PhotoOption};

pub const STYLE_OPTIONS: &[&str] = &[
    "Night Sky - AOP White Dots",
    "Hedge Green - solid",
    "Navy Blazer - solid",
    "Granita - solid",
    "Fuchsia Fedora - AOP Block Libre",
];

pub const CATALOG_IMAGES_URL_PREFIX: &str = "/api/assets/images";
pub const CATALOG_THUMBNAILS_URL_PREFIX: &str = "/api/assets/thumbnails";

/// `(id, label, file name)` for every catalog photo, in display order.
const CATALOG_ENTRIES: &[(&str, &str, &str)] = &[
    ("15377489_5081878_001", "Photo 1", "15377489_5081878_001.jpg"),
    ("15377489_5081878_002", "Photo 2", "15377489_5081878_002.jpg"),
    ("15377489_5081878_007", "Photo 3", "15377489_5081878_007.jpg"),
    ("15377486_5078866_001", "Photo 4", "15377486_5078866_001.jpg"),
    ("15377486_5078866_002", "Photo 5", "15377486_5078866_002.jpg"),
    ("15377486_5078866_007", "Photo 6", "15377486_5078866_007.jpg"),
    ("15377488_5078869_001", "Photo 7", "15377488_5078869_001.jpg"),
    ("15377488_5078869_002", "Photo 8", "15377488_5078869_002.jpg"),
    ("15377488_5078869_007", "Photo 9", "15377488_5078869_007.jpg"),
    ("15377522_5081887_001", "Photo 10", "15377522_5081887_001.jpg"),
    ("15377522_5081887_002", "Photo 11", "15377522_5081887_002.jpg"),
    ("15377522_5081887_007", "Photo 12", "15377522_5081887_007.jpg"),
    ("dots-cloud-dancer", "DOTS CLOUD DANCER", "DOTS CLOUD DANCER.jpg"),
    ("block-libre", "BLOCK LIBRE", "Block Libre.jpg"),
];

/// A fresh copy of the reference photo catalog.
pub fn photo_catalog() -> Vec<PhotoOption> {
    CATALOG_ENTRIES
        .iter()
        .map(|(id, label, file_name)| {
            let encoded = encode_uri_component(file_name);
            PhotoOption {
                id: (*id).to_string(),
                label: (*label).to_string(),
                file_name: (*file_name).to_string(),
                thumbnail_url: format!("{CATALOG_THUMBNAILS_URL_PREFIX}/{encoded}"),
                image_url: format!("{CATALOG_IMAGES_URL_PREFIX}/{encoded}"),
            }
        })
        .collect()
}

/// Pick catalog photos by index. Out-of-range indexes are skipped.
pub fn catalog_photos(indexes: &[usize]) -> Vec<PhotoOption> {
    let catalog = photo_catalog();
    indexes
        .iter()
        .filter_map(|i| catalog.get(*i).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_fourteen_photos_with_asset_urls() {
        let catalog = photo_catalog();
        assert_eq!(catalog.len(), 14);
        for photo in &catalog {
            assert!(photo.thumbnail_url.starts_with("/api/assets/thumbnails/"));
            assert!(photo.image_url.starts_with("/api/assets/images/"));
            assert!(photo.image_url.ends_with(".jpg"));
        }
    }

    #[test]
    fn file_names_with_spaces_are_escaped() {
        let catalog = photo_catalog();
        let dots = catalog.iter().find(|p| p.id == "dots-cloud-dancer").unwrap();
        assert_eq!(dots.image_url, "/api/assets/images/DOTS%20CLOUD%20DANCER.jpg");
        assert_eq!(dots.file_name, "DOTS CLOUD DANCER.jpg");
    }

    #[test]
    fn picks_by_index() {
        let picked = catalog_photos(&[0, 13, 99]);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0].label, "Photo 1");
        assert_eq!(picked[1].label, "BLOCK LIBRE");
    }
}
