//! Partner photo storage on the local filesystem.
//!
//! Layout under the uploads root:
//!
//! ```text
//! <uploads>/<ticket id>/<photo id><ext>
//! <uploads>/<ticket id>/thumbnails/<photo id><ext>
//! ```
//!
//! The service only writes and removes files. Attaching the returned
//! [`PhotoOption`] to a ticket is the caller's job (through
//! `TicketService::update`), and so is checking that the ticket is
//! In Progress and owned by the calling partner.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use recolour_core::error::CoreError;
use recolour_core::photo::{
    allowed_extensions_label, extension_of, is_allowed_extension, PhotoOption, THUMBNAILS_DIR,
};

#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    /// The original file name's extension is not allow-listed.
    #[error("Unsupported file type: {extension}. Allowed: {allowed}")]
    UnsupportedFileType { extension: String, allowed: String },

    #[error("Failed to store photo at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<PhotoError> for CoreError {
    fn from(err: PhotoError) -> Self {
        match err {
            PhotoError::UnsupportedFileType { extension, allowed } => {
                CoreError::UnsupportedFileType { extension, allowed }
            }
            io @ PhotoError::Io { .. } => CoreError::Internal(io.to_string()),
        }
    }
}

#[derive(Debug)]
pub struct PhotoService {
    uploads_root: PathBuf,
    next_id: AtomicU64,
}

impl PhotoService {
    pub fn new(uploads_root: impl Into<PathBuf>) -> Self {
        Self {
            uploads_root: uploads_root.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn uploads_root(&self) -> &Path {
        &self.uploads_root
    }

    /// Validate the extension, then write the image and its thumbnail.
    ///
    /// The returned metadata uses `upload-<ticket>-<n>` as its id, the
    /// original file name as its label, and `<id><ext>` as the stored name.
    pub async fn upload(
        &self,
        ticket_id: &str,
        image: &[u8],
        thumbnail: &[u8],
        original_name: &str,
    ) -> Result<PhotoOption, PhotoError> {
        let ext = extension_of(original_name);
        if !is_allowed_extension(&ext) {
            return Err(PhotoError::UnsupportedFileType {
                extension: ext,
                allowed: allowed_extensions_label(),
            });
        }

        let photo_id = self.generate_id(ticket_id);
        let safe_name = format!("{photo_id}{ext}");

        let ticket_dir = self.ticket_dir(ticket_id);
        let thumb_dir = ticket_dir.join(THUMBNAILS_DIR);
        tokio::fs::create_dir_all(&thumb_dir)
            .await
            .map_err(|source| PhotoError::Io {
                path: thumb_dir.clone(),
                source,
            })?;

        write_file(&ticket_dir.join(&safe_name), image).await?;
        write_file(&thumb_dir.join(&safe_name), thumbnail).await?;

        tracing::info!(
            ticket_id = %ticket_id,
            photo_id = %photo_id,
            file_name = %safe_name,
            bytes = image.len(),
            "Stored partner photo"
        );

        Ok(PhotoOption::uploaded(
            ticket_id,
            photo_id,
            original_name.to_string(),
            safe_name,
        ))
    }

    /// Remove an upload and its thumbnail. Missing files are ignored.
    pub async fn delete_files(&self, ticket_id: &str, file_name: &str) {
        let ticket_dir = self.ticket_dir(ticket_id);
        remove_if_present(&ticket_dir.join(file_name)).await;
        remove_if_present(&ticket_dir.join(THUMBNAILS_DIR).join(file_name)).await;
        tracing::info!(
            ticket_id = %ticket_id,
            file_name = %file_name,
            "Removed partner photo files"
        );
    }

    fn ticket_dir(&self, ticket_id: &str) -> PathBuf {
        self.uploads_root.join(ticket_id)
    }

    fn generate_id(&self, ticket_id: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("upload-{ticket_id}-{n}")
    }
}

async fn write_file(path: &Path, data: &[u8]) -> Result<(), PhotoError> {
    tokio::fs::write(path, data)
        .await
        .map_err(|source| PhotoError::Io {
            path: path.to_path_buf(),
            source,
        })
}

async fn remove_if_present(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove photo file");
        }
    }
}
