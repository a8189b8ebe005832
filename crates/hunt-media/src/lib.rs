//! # hunt-media
//!
//! On-disk storage for photo proofs.
//!
//! A photo payload is validated (size cap, image-extension allowlist),
//! written under a generated unique name `team{t}_poi{p}_{unixTs}{ext}`,
//! and referenced from the submission log by that name alone. The store
//! never interprets image bytes; any syntactically valid photo is
//! accepted. Read authorization (owning team or admin) is enforced by the
//! daemon, not here.

use std::path::{Path, PathBuf};

use hunt_types::{PoiId, TeamId, Timestamp, ALLOWED_PHOTO_EXTS, MAX_PHOTO_BYTES};

/// Error types for photo storage operations.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// Payload is empty.
    #[error("no photo data uploaded")]
    EmptyPayload,

    /// Payload exceeds the size cap.
    #[error("photo too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },

    /// Extension is not an accepted image type.
    #[error("unsupported file type '{0}'; use jpg/jpeg/png/webp")]
    UnsupportedType(String),

    /// Filename is empty or reduces to nothing after sanitization.
    #[error("invalid filename")]
    InvalidFilename,

    /// Stored reference does not resolve to a photo on disk.
    #[error("photo not found: {0}")]
    NotFound(String),

    /// I/O error during storage operations.
    #[error("I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, MediaError>;

/// Photo store rooted at the event's upload directory.
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    /// Open the store, creating the upload directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| MediaError::Io(e.to_string()))?;
        Ok(Self { root })
    }

    /// Validate a photo payload and return its normalized extension
    /// (lowercase, with leading dot).
    pub fn validate(filename: &str, bytes: &[u8]) -> Result<String> {
        if bytes.is_empty() {
            return Err(MediaError::EmptyPayload);
        }
        if bytes.len() > MAX_PHOTO_BYTES {
            return Err(MediaError::TooLarge {
                size: bytes.len(),
                limit: MAX_PHOTO_BYTES,
            });
        }

        let name = sanitize_filename(filename)?;
        let ext = Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| MediaError::UnsupportedType(name.clone()))?;

        if !ALLOWED_PHOTO_EXTS.contains(&ext.as_str()) {
            return Err(MediaError::UnsupportedType(ext));
        }
        Ok(format!(".{ext}"))
    }

    /// Validate and persist a photo proof, returning the generated
    /// storage reference for verbatim use in the submission log.
    pub fn save(
        &self,
        team_id: TeamId,
        poi_id: PoiId,
        filename: &str,
        bytes: &[u8],
        now: Timestamp,
    ) -> Result<String> {
        let ext = Self::validate(filename, bytes)?;
        let reference = format!("team{team_id}_poi{poi_id}_{now}{ext}");

        std::fs::write(self.root.join(&reference), bytes)
            .map_err(|e| MediaError::Io(e.to_string()))?;
        tracing::info!(team_id, poi_id, %reference, "photo proof stored");
        Ok(reference)
    }

    /// Load a previously stored photo by its reference.
    pub fn load(&self, reference: &str) -> Result<Vec<u8>> {
        let path = self.resolve(reference)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(MediaError::NotFound(reference.to_string()))
            }
            Err(e) => Err(MediaError::Io(e.to_string())),
        }
    }

    /// Delete a stored photo. Used when a saved payload ends up with no
    /// submission row referencing it. A missing file is not an error.
    pub fn remove(&self, reference: &str) -> Result<()> {
        let path = self.resolve(reference)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(%reference, "photo proof removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MediaError::Io(e.to_string())),
        }
    }

    /// Resolve a reference to its path under the upload directory.
    ///
    /// References are single path components; anything else is an attempt
    /// to walk out of the upload directory.
    fn resolve(&self, reference: &str) -> Result<PathBuf> {
        if reference.is_empty()
            || reference.contains('/')
            || reference.contains('\\')
            || reference.contains("..")
        {
            return Err(MediaError::NotFound(reference.to_string()));
        }
        Ok(self.root.join(reference))
    }
}

/// Strip any path components from an uploaded filename.
fn sanitize_filename(filename: &str) -> Result<String> {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(MediaError::InvalidFilename);
    }
    Ok(name.to_string())
}
