//! Photograph persistence: replace-on-save keyed by signature.

use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Row};
use tracing::debug;

use super::Database;
use crate::error::{Error, Result};
use crate::photograph::{PhotoRecord, DATETIME_FORMAT};

const COLUMNS: &str = "signature, basename, mimetype, fullpath, format, filesize, \
     width, height, depth, datetime, \
     focal_length, f_stop, gamma, exp_bias, exp_mode, exp_program, exp_time, shutter, \
     white_balance, flash_fired, flash_mode, iso, metering_mode, \
     camera_make, camera_model, camera_serial, lens, metadata_json, thumbnail";

impl Database {
    /// Store a record, replacing any existing row with the same signature.
    ///
    /// The delete and insert run in one transaction, so fields absent from
    /// `record` are never carried over from the old row.
    pub fn save(&self, record: &PhotoRecord) -> Result<()> {
        let metadata_json = serde_json::to_string(&record.metadata_json)?;
        let datetime = record
            .datetime
            .map(|dt| dt.format(DATETIME_FORMAT).to_string());

        let tx = self.conn.unchecked_transaction()?;

        let replaced = tx.execute(
            "DELETE FROM photographs WHERE signature = ?",
            [&record.signature],
        )?;

        tx.execute(
            &format!(
                "INSERT INTO photographs ({}) VALUES \
                 (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, \
                  ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, \
                  ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29)",
                COLUMNS
            ),
            params![
                record.signature,
                record.basename,
                record.mimetype,
                record.fullpath,
                record.format,
                record.filesize,
                record.width,
                record.height,
                record.depth,
                datetime,
                record.focal_length,
                record.f_stop,
                record.gamma,
                record.exp_bias,
                record.exp_mode,
                record.exp_program,
                record.exp_time,
                record.shutter,
                record.white_balance,
                record.flash_fired,
                record.flash_mode,
                record.iso,
                record.metering_mode,
                record.camera_make,
                record.camera_model,
                record.camera_serial,
                record.lens,
                metadata_json,
                record.thumbnail.as_deref(),
            ],
        )?;

        tx.commit()?;

        debug!(signature = %record.signature, replaced = replaced > 0, "Saved photograph");
        Ok(())
    }

    /// Fetch a record, failing with [`Error::NotFound`] if absent.
    pub fn load(&self, signature: &str) -> Result<PhotoRecord> {
        self.find(signature)?
            .ok_or_else(|| Error::NotFound(signature.to_string()))
    }

    pub fn find(&self, signature: &str) -> Result<Option<PhotoRecord>> {
        let result = self.conn.query_row(
            &format!("SELECT {} FROM photographs WHERE signature = ?", COLUMNS),
            [signature],
            row_to_record,
        );
        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a record. Returns whether a row existed.
    pub fn delete(&self, signature: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM photographs WHERE signature = ?", [signature])?;
        Ok(removed > 0)
    }

    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM photographs", [], |row| row.get(0))?;
        Ok(count)
    }

    /// All stored signatures, sorted.
    pub fn signatures(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT signature FROM photographs ORDER BY signature")?;
        let signatures = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(signatures)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<PhotoRecord> {
    let datetime = row
        .get::<_, Option<String>>("datetime")?
        .map(|text| {
            NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e))
            })
        })
        .transpose()?;

    let metadata_json = row.get::<_, String>("metadata_json")?;
    let metadata_json = serde_json::from_str(&metadata_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(27, Type::Text, Box::new(e)))?;

    let mut record = PhotoRecord::default();
    record.signature = row.get("signature")?;
    record.basename = row.get("basename")?;
    record.mimetype = row.get("mimetype")?;
    record.fullpath = row.get("fullpath")?;
    record.format = row.get("format")?;
    record.filesize = row.get("filesize")?;
    record.width = row.get("width")?;
    record.height = row.get("height")?;
    record.depth = row.get("depth")?;
    record.datetime = datetime;
    record.focal_length = row.get("focal_length")?;
    record.f_stop = row.get("f_stop")?;
    record.gamma = row.get("gamma")?;
    record.exp_bias = row.get("exp_bias")?;
    record.exp_mode = row.get("exp_mode")?;
    record.exp_program = row.get("exp_program")?;
    record.exp_time = row.get("exp_time")?;
    record.shutter = row.get("shutter")?;
    record.white_balance = row.get("white_balance")?;
    record.flash_fired = row.get("flash_fired")?;
    record.flash_mode = row.get("flash_mode")?;
    record.iso = row.get("iso")?;
    record.metering_mode = row.get("metering_mode")?;
    record.camera_make = row.get("camera_make")?;
    record.camera_model = row.get("camera_model")?;
    record.camera_serial = row.get("camera_serial")?;
    record.lens = row.get("lens")?;
    record.metadata_json = metadata_json;
    record.set_thumbnail_bytes(row.get("thumbnail")?);

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photograph::normalize;
    use serde_json::json;
    use tempfile::tempdir;

    fn test_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        db
    }

    fn sample_record(signature: &str) -> PhotoRecord {
        normalize(&json!({
            "image": {
                "name": "/photos/2019/IMG_0042.JPG",
                "format": "JPEG",
                "filesize": "3.2MB",
                "depth": 8,
                "geometry": { "width": 6000, "height": 4000 },
                "properties": {
                    "signature": signature,
                    "exif:FNumber": "56/10",
                    "exif:ExposureTime": "1/125",
                    "exif:PhotographicSensitivity": "200",
                    "exif:Make": "Canon",
                    "exif:Model": "Canon EOS R6",
                    "exif:LensModel": "RF24-105mm F4 L IS USM",
                    "exif:Flash": "9",
                    "exif:MeteringMode": "3",
                    "exif:DateTimeOriginal": "2019:07:14 18:22:05",
                }
            }
        }))
    }

    #[test]
    fn test_save_and_load() {
        let db = test_db();
        let record = sample_record("sig-1");
        db.save(&record).unwrap();

        let loaded = db.load("sig-1").unwrap();
        assert_eq!(loaded.basename, "IMG_0042.JPG");
        assert_eq!(loaded.mimetype, "image/jpeg");
        assert_eq!(loaded.filesize, "3.2MB");
        assert_eq!(loaded.width, 6000);
        assert_eq!(loaded.height, 4000);
        assert_eq!(loaded.depth, 8);
        assert_eq!(loaded.datetime, record.datetime);
        assert!(loaded.datetime.is_some());
        assert_eq!(loaded.f_stop, Some(5.6));
        assert_eq!(loaded.exp_time, Some(0.008));
        assert_eq!(loaded.shutter, "1/125");
        assert_eq!(loaded.iso, 200);
        assert_eq!(loaded.flash_fired, Some(true));
        assert_eq!(loaded.flash_mode, "COMPULSORY_FLASH_FIRING");
        assert_eq!(loaded.metering_mode, "SPOT");
        assert_eq!(loaded.lens, "RF24-105mm F4 L IS USM");
        assert_eq!(loaded.focal_length, None);
        assert_eq!(loaded.metadata_json, record.metadata_json);
        assert!(loaded.thumbnail.is_none());
    }

    #[test]
    fn test_save_replaces_existing() {
        let db = test_db();
        db.save(&sample_record("sig-1")).unwrap();

        let mut replacement = normalize(&json!({
            "image": {
                "format": "PNG",
                "geometry": { "width": 10, "height": 20 },
                "properties": { "signature": "sig-1" }
            }
        }));
        replacement.set_thumbnail_bytes(Some(vec![0xff, 0xd8, 0xff]));
        db.save(&replacement).unwrap();

        assert_eq!(db.count().unwrap(), 1);
        let loaded = db.load("sig-1").unwrap();
        assert_eq!(loaded.format, "PNG");
        assert_eq!(loaded.width, 10);
        assert_eq!(loaded.height, 20);
        // Nothing from the first row survives
        assert_eq!(loaded.camera_make, "");
        assert_eq!(loaded.lens, "");
        assert_eq!(loaded.datetime, None);
        assert_eq!(loaded.flash_fired, None);
        assert_eq!(loaded.thumbnail, Some(vec![0xff, 0xd8, 0xff]));
    }

    #[test]
    fn test_load_missing() {
        let db = test_db();
        assert!(matches!(db.load("nope"), Err(Error::NotFound(sig)) if sig == "nope"));
        assert!(db.find("nope").unwrap().is_none());
    }

    #[test]
    fn test_delete_and_list() {
        let db = test_db();
        db.save(&sample_record("b")).unwrap();
        db.save(&sample_record("a")).unwrap();

        assert_eq!(db.signatures().unwrap(), vec!["a".to_string(), "b".to_string()]);
        assert!(db.delete("a").unwrap());
        assert!(!db.delete("a").unwrap());
        assert_eq!(db.count().unwrap(), 1);
    }

    #[test]
    fn test_schema_matches_persisted_columns() {
        let db = test_db();
        db.initialize().unwrap();

        let mut stmt = db.conn.prepare("PRAGMA table_info(photographs)").unwrap();
        let table: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>("name"))
            .unwrap()
            .collect::<rusqlite::Result<_>>()
            .unwrap();
        let persisted: Vec<String> = COLUMNS.split(',').map(|c| c.trim().to_string()).collect();

        assert_eq!(table, persisted);
    }

    #[test]
    fn test_file_database_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog").join("photos.db");

        let db = Database::open(&path).unwrap();
        db.initialize().unwrap();
        db.save(&sample_record("persisted")).unwrap();
        db.close().unwrap();

        let db = Database::open(&path).unwrap();
        db.initialize().unwrap();
        assert_eq!(db.load("persisted").unwrap().camera_model, "Canon EOS R6");
    }
}
