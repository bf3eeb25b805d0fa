//! One-file import pipeline: ImageMagick → record → store.

use std::path::Path;
use tracing::{debug, info};

use crate::config::ThumbnailConfig;
use crate::db::Database;
use crate::error::Result;
use crate::hashing::file_signature;
use crate::magick::Magick;
use crate::photograph::{normalize, PhotoRecord};

pub struct Catalog {
    magick: Magick,
    db: Database,
    thumbnails: ThumbnailConfig,
}

impl Catalog {
    pub fn new(magick: Magick, db: Database, thumbnails: ThumbnailConfig) -> Self {
        Self {
            magick,
            db,
            thumbnails,
        }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Give back the store handle so the caller can close it.
    pub fn into_db(self) -> Database {
        self.db
    }

    /// Read a file's metadata without storing anything.
    pub fn inspect(&self, path: &Path) -> Result<PhotoRecord> {
        inspect(&self.magick, path)
    }

    /// Import one file, replacing any record with the same signature.
    pub fn import(&self, path: &Path) -> Result<PhotoRecord> {
        let mut record = self.inspect(path)?;

        if self.thumbnails.enabled {
            let thumbnail =
                self.magick
                    .generate_thumbnail(path, self.thumbnails.size, self.thumbnails.quality)?;
            record.attach_thumbnail(thumbnail);
        }

        self.db.save(&record)?;
        info!(signature = %record.signature, file = ?path, "Imported photograph");

        Ok(record)
    }
}

/// Acquire and normalize one file, hashing it when the tool reports no signature.
///
/// Needs no store, so callers that only print metadata never touch the database.
pub fn inspect(magick: &Magick, path: &Path) -> Result<PhotoRecord> {
    let doc = magick.acquire(path)?;
    let mut record = normalize(&doc);

    if record.signature.is_empty() {
        debug!(file = ?path, "No signature reported, hashing file contents");
        record.signature = file_signature(path)?;
    }

    Ok(record)
}
