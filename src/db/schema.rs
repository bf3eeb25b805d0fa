pub const SCHEMA: &str = r#"
-- One row per image content signature; saves replace the whole row
CREATE TABLE IF NOT EXISTS photographs (
    signature TEXT PRIMARY KEY,
    basename TEXT NOT NULL DEFAULT '',
    mimetype TEXT NOT NULL DEFAULT '',
    fullpath TEXT NOT NULL DEFAULT '',
    format TEXT NOT NULL DEFAULT '',
    filesize TEXT NOT NULL DEFAULT '',   -- as reported by ImageMagick, e.g. '2.1MB'

    -- Image data
    width INTEGER NOT NULL DEFAULT 0,
    height INTEGER NOT NULL DEFAULT 0,
    depth INTEGER NOT NULL DEFAULT 0,
    datetime TEXT,                       -- 'YYYY-MM-DD HH:MM:SS', naive local time

    -- Exposure
    focal_length REAL,
    f_stop REAL,
    gamma REAL NOT NULL DEFAULT 0,
    exp_bias REAL,
    exp_mode TEXT NOT NULL DEFAULT '',
    exp_program TEXT NOT NULL DEFAULT '',
    exp_time REAL,
    shutter TEXT NOT NULL DEFAULT '',
    white_balance TEXT NOT NULL DEFAULT '',
    flash_fired INTEGER,                 -- NULL when the flash tag is absent
    flash_mode TEXT NOT NULL DEFAULT '',
    iso INTEGER NOT NULL DEFAULT 0,
    metering_mode TEXT NOT NULL DEFAULT '',

    -- Camera
    camera_make TEXT NOT NULL DEFAULT '',
    camera_model TEXT NOT NULL DEFAULT '',
    camera_serial TEXT NOT NULL DEFAULT '',
    lens TEXT NOT NULL DEFAULT '',

    -- Complete ImageMagick document as JSON
    metadata_json TEXT NOT NULL DEFAULT 'null',

    thumbnail BLOB                       -- JPEG bytes
);

CREATE INDEX IF NOT EXISTS idx_photographs_datetime ON photographs(datetime);
CREATE INDEX IF NOT EXISTS idx_photographs_fullpath ON photographs(fullpath);
"#;
