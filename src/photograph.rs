//! The photograph record and its construction from ImageMagick JSON.
//!
//! `magick convert <file> json:` emits a document shaped like
//!
//! ```json
//! {"image": {"name": "...", "format": "JPEG", "filesize": "2.1MB",
//!            "geometry": {"width": 4000, "height": 3000}, "depth": 8,
//!            "properties": {"exif:FNumber": "8/1", "signature": "..."}}}
//! ```
//!
//! [`normalize`] flattens that into a [`PhotoRecord`]. Missing fields fall
//! back to defaults; only unparseable JSON is an error.

use chrono::NaiveDateTime;
use image::DynamicImage;
use serde::Serialize;
use serde_json::{Map, Value};
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::error::{Error, Result};
use crate::exif::{self, ExposureMode, ExposureProgram, Flash, MeteringMode, WhiteBalance};
use crate::magick::Thumbnail;

/// Tags that may carry the capture date, in priority order.
pub const DATE_TAGS: &[&str] = &[
    "exif:DateTimeOriginal",
    "exif:DateTimeDigitized",
    "exif:DateTime",
    "dng:create.date",
    "date:modify",
    "date:create",
];

const DATE_FORMATS: &[&str] = &["%Y:%m:%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Storage format for `datetime` in the database.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Property-map view of the `image.properties` object, values as text.
type Properties = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, Serialize)]
pub struct PhotoRecord {
    pub signature: String,
    pub basename: String,
    pub mimetype: String,
    pub fullpath: String,
    pub format: String,
    /// Kept as ImageMagick reports it, e.g. "2.1MB".
    pub filesize: String,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub datetime: Option<NaiveDateTime>,

    // Exposure
    pub focal_length: Option<f64>,
    pub f_stop: Option<f64>,
    pub gamma: f64,
    pub exp_bias: Option<f64>,
    pub exp_mode: String,
    pub exp_program: String,
    pub exp_time: Option<f64>,
    pub shutter: String,
    pub white_balance: String,
    pub flash_fired: Option<bool>,
    pub flash_mode: String,
    pub iso: i64,
    pub metering_mode: String,

    // Camera
    pub camera_make: String,
    pub camera_model: String,
    pub camera_serial: String,
    pub lens: String,

    /// The full document the record was built from.
    pub metadata_json: Value,

    #[serde(skip)]
    pub thumbnail: Option<Vec<u8>>,
    #[serde(skip)]
    thumbnail_image: OnceCell<DynamicImage>,
}

impl PhotoRecord {
    /// Attach a freshly generated thumbnail, keeping its decoded image.
    pub fn attach_thumbnail(&mut self, thumbnail: Thumbnail) {
        let cell = OnceCell::new();
        let _ = cell.set(thumbnail.image);
        self.thumbnail = Some(thumbnail.bytes);
        self.thumbnail_image = cell;
    }

    /// Replace the thumbnail bytes; the decoded image is rebuilt on demand.
    pub fn set_thumbnail_bytes(&mut self, bytes: Option<Vec<u8>>) {
        self.thumbnail = bytes;
        self.thumbnail_image = OnceCell::new();
    }

    /// Decoded thumbnail, decoding the stored bytes on first access.
    pub fn thumbnail_image(&self) -> Result<Option<&DynamicImage>> {
        let Some(bytes) = self.thumbnail.as_deref() else {
            return Ok(None);
        };

        if self.thumbnail_image.get().is_none() {
            let image = image::load_from_memory_with_format(bytes, image::ImageFormat::Jpeg)
                .map_err(Error::Thumbnail)?;
            let _ = self.thumbnail_image.set(image);
        }

        Ok(self.thumbnail_image.get())
    }

    /// Multi-line summary: identity, then camera settings and file location when known.
    pub fn describe(&self) -> String {
        let mut lines = vec![self.to_string()];

        if !self.camera_model.is_empty() {
            lines.push(format!(
                "{} {} {} {} f{:.1} ISO{} Exp:{:.2} {}",
                self.camera_make,
                self.camera_model.replace(&self.camera_make, "").trim(),
                self.lens,
                self.shutter,
                self.f_stop.unwrap_or(0.0),
                self.iso,
                self.exp_bias.unwrap_or(0.0),
                if self.flash_fired == Some(true) { "[FLASH]" } else { "" },
            ));
        }

        if !self.fullpath.is_empty() {
            let size = if self.filesize.is_empty() { "???" } else { &self.filesize };
            lines.push(format!("  file:///{} [{}]", self.fullpath.replace('\\', "/"), size));
        }

        lines.join("\n")
    }
}

impl fmt::Display for PhotoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id: String = self.signature.chars().take(12).collect();
        let taken = self
            .datetime
            .map(|dt| dt.format(DATETIME_FORMAT).to_string())
            .unwrap_or_else(|| "-".to_string());

        write!(
            f,
            "<Photograph> id:{} {} {}x{}x{} {}",
            id, self.format, self.width, self.height, self.depth, taken
        )
    }
}

/// Parse a JSON document given as text or bytes and normalize it.
pub fn normalize_json(data: impl AsRef<[u8]>) -> Result<PhotoRecord> {
    let doc: Value = serde_json::from_slice(data.as_ref())?;
    Ok(normalize(&doc))
}

/// Build a record from an already parsed ImageMagick document.
pub fn normalize(doc: &Value) -> PhotoRecord {
    let empty = Map::new();
    let img = doc.get("image").and_then(Value::as_object).unwrap_or(&empty);
    let geometry = img.get("geometry").and_then(Value::as_object).unwrap_or(&empty);
    let props = properties(img);

    let exif_key_count = props
        .keys()
        .filter(|key| key.to_ascii_lowercase().starts_with("exif:"))
        .count();

    let fullpath = text(img.get("name"));
    let format = text(img.get("format")).trim().to_uppercase();

    let mut record = PhotoRecord {
        signature: props.get("signature").cloned().unwrap_or_default(),
        basename: basename(&fullpath).to_string(),
        mimetype: mimetype_for(&format),
        filesize: text(img.get("filesize")),
        fullpath,
        format,
        width: dimension(geometry.get("width")),
        height: dimension(geometry.get("height")),
        depth: dimension(img.get("depth")),
        gamma: img.get("gamma").and_then(Value::as_f64).unwrap_or(0.0),
        focal_length: fraction_prop(&props, "exif:FocalLength"),
        f_stop: fraction_prop(&props, "exif:FNumber"),
        exp_time: fraction_prop(&props, "exif:ExposureTime"),
        shutter: prop(&props, "exif:ExposureTime", "").to_string(),
        exp_bias: fraction_prop(&props, "exif:ExposureBiasValue"),
        iso: props
            .get("exif:PhotographicSensitivity")
            .or_else(|| props.get("exif:ISOSpeedRatings"))
            .and_then(|v| parse_int(v))
            .unwrap_or(0),
        camera_make: prop(&props, "exif:Make", "").to_string(),
        camera_model: prop(&props, "exif:Model", "").to_string(),
        lens: prop(&props, "exif:LensModel", "").to_string(),
        ..Default::default()
    };

    if let Some(gamma) = fraction_prop(&props, "exif:Gamma") {
        record.gamma = gamma;
    }

    record.exp_mode = enum_name(&props, "exif:ExposureMode", |c| {
        ExposureMode::from_code(c).map(|m| m.name())
    });
    record.exp_program = enum_name(&props, "exif:ExposureProgram", |c| {
        ExposureProgram::from_code(c).map(|p| p.name())
    });
    record.white_balance = enum_name(&props, "exif:WhiteBalance", |c| {
        WhiteBalance::from_code(c).map(|w| w.name())
    });
    record.metering_mode = enum_name(&props, "exif:MeteringMode", |c| {
        MeteringMode::from_code(c).map(|m| m.name())
    });

    if let Some(value) = props.get("exif:Flash") {
        match exif::parse_code(value) {
            Some(code) => {
                let flash = Flash::from_code(code);
                record.flash_fired = Some(flash.fired);
                record.flash_mode = flash.mode.name().to_string();
            }
            None => debug!(value = %value, "Ignoring non-numeric exif:Flash"),
        }
    }

    if exif_key_count == 0 {
        apply_raw_fallback(&mut record, &props);
    }

    record.datetime = resolve_datetime(&props);
    record.metadata_json = doc.clone();

    record
}

/// Camera raw files (CR2 and friends) carry no `exif:` keys, only `dng:` ones.
fn apply_raw_fallback(record: &mut PhotoRecord, props: &Properties) {
    record.focal_length = parse_float(prop(props, "dng:focal.length", "0.0"));
    record.f_stop = parse_float(prop(props, "dng:f.number", "0.0"));
    record.lens = prop(props, "dng:lens", "").to_string();
    record.camera_make = prop(props, "dng:make", "").to_string();
    record.camera_model = prop(props, "dng:camera.model.name", "").to_string();
    record.camera_serial = prop(props, "dng:serial.number", "").to_string();
    record.iso = parse_float(prop(props, "dng:iso.setting", "0"))
        .map(|iso| iso as i64)
        .unwrap_or(0);
    record.exp_time = parse_fraction(prop(props, "dng:exposure.time", ""));
    record.shutter = prop(props, "dng:exposure.time", "0").to_string();
}

/// MIME type for an uppercase ImageMagick format name.
pub fn mimetype_for(format: &str) -> String {
    match format {
        "JPEG" | "GIF" | "PNG" | "TIFF" | "BMP" => format!("image/{}", format.to_lowercase()),
        "JPG" => "image/JPG".to_string(),
        "TIF" => "image/tiff".to_string(),
        "CRAW" | "CR2" | "CR3" => format!("image/x-canon-{}", format.to_lowercase()),
        _ => "unknown".to_string(),
    }
}

/// Parse an EXIF rational such as `"1/250"`, or a bare decimal.
///
/// Empty input, unparseable parts and zero denominators give `None`.
pub fn parse_fraction(value: &str) -> Option<f64> {
    let parts: Vec<&str> = value
        .split('/')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [] => None,
        [whole] => parse_float(whole),
        [numerator, denominator, ..] => {
            let denominator = parse_float(denominator)?;
            if denominator == 0.0 {
                return None;
            }
            Some(parse_float(numerator)? / denominator)
        }
    }
}

/// Earliest parseable capture date across [`DATE_TAGS`].
fn resolve_datetime(props: &Properties) -> Option<NaiveDateTime> {
    DATE_TAGS
        .iter()
        .filter_map(|tag| props.get(*tag))
        .filter_map(|value| parse_date(value))
        .min()
}

fn parse_date(value: &str) -> Option<NaiveDateTime> {
    // Drop a "+hh:mm" zone suffix, the stored value is naive local time
    let value = value.split('+').next().unwrap_or_default().trim();

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

fn properties(img: &Map<String, Value>) -> Properties {
    img.get("properties")
        .and_then(Value::as_object)
        .map(|props| {
            props
                .iter()
                .map(|(key, value)| (key.clone(), text(Some(value))))
                .collect()
        })
        .unwrap_or_default()
}

fn prop<'a>(props: &'a Properties, key: &str, default: &'a str) -> &'a str {
    props.get(key).map(String::as_str).unwrap_or(default)
}

fn fraction_prop(props: &Properties, key: &str) -> Option<f64> {
    props.get(key).and_then(|value| parse_fraction(value))
}

fn enum_name(props: &Properties, key: &str, decode: impl Fn(u16) -> Option<&'static str>) -> String {
    let Some(value) = props.get(key) else {
        return String::new();
    };

    match exif::parse_code(value).and_then(decode) {
        Some(name) => name.to_string(),
        None => {
            debug!(key, value = %value, "Unrecognised EXIF enumeration value");
            String::new()
        }
    }
}

/// JSON scalar as text; strings are taken verbatim, null and absent become "".
fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn dimension(value: Option<&Value>) -> u32 {
    value
        .and_then(|v| {
            v.as_u64()
                .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        })
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

fn parse_float(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_int(value: &str) -> Option<i64> {
    let value = value.trim();
    value
        .parse::<i64>()
        .ok()
        .or_else(|| parse_float(value).map(|v| v as i64))
}

/// Final path component, accepting both `/` and `\` separators.
fn basename(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn with_properties(props: Value) -> Value {
        json!({ "image": { "format": "JPEG", "properties": props } })
    }

    #[test]
    fn test_parse_fraction() {
        assert_eq!(parse_fraction("8/1"), Some(8.0));
        assert_eq!(parse_fraction("1/250"), Some(0.004));
        assert_eq!(parse_fraction(" 10 / 4 "), Some(2.5));
        assert_eq!(parse_fraction("5.6"), Some(5.6));
        assert_eq!(parse_fraction("-2/3"), Some(-2.0 / 3.0));
        assert_eq!(parse_fraction(""), None);
        assert_eq!(parse_fraction("/"), None);
        assert_eq!(parse_fraction("abc"), None);
        assert_eq!(parse_fraction("1/0"), None);
        assert_eq!(parse_fraction("10/4/2"), Some(2.5));
        assert_eq!(parse_fraction("/5"), Some(5.0));
        assert_eq!(parse_fraction("1/"), Some(1.0));
    }

    #[test]
    fn test_mimetype_for() {
        for format in ["JPEG", "GIF", "PNG", "TIFF", "BMP"] {
            assert_eq!(mimetype_for(format), format!("image/{}", format.to_lowercase()));
        }
        assert_eq!(mimetype_for("JPG"), "image/JPG");
        assert_eq!(mimetype_for("TIF"), "image/tiff");
        assert_eq!(mimetype_for("CR2"), "image/x-canon-cr2");
        assert_eq!(mimetype_for("CRAW"), "image/x-canon-craw");
        assert_eq!(mimetype_for("WEBP"), "unknown");
        assert_eq!(mimetype_for(""), "unknown");
    }

    #[test]
    fn test_basic_jpeg_document() {
        let record = normalize_json(
            r#"{"image":{"format":"jpeg","geometry":{"width":100,"height":50},
                "properties":{"exif:FNumber":"8/1","exif:PhotographicSensitivity":"400"}}}"#,
        )
        .unwrap();

        assert_eq!(record.format, "JPEG");
        assert_eq!(record.mimetype, "image/jpeg");
        assert_eq!(record.width, 100);
        assert_eq!(record.height, 50);
        assert_eq!(record.f_stop, Some(8.0));
        assert_eq!(record.iso, 400);
    }

    #[test]
    fn test_accepts_bytes() {
        let bytes = br#"{"image":{"format":" png ","name":"/photos/2019/beach.png"}}"#.to_vec();
        let record = normalize_json(bytes).unwrap();

        assert_eq!(record.format, "PNG");
        assert_eq!(record.mimetype, "image/png");
        assert_eq!(record.basename, "beach.png");
        assert_eq!(record.fullpath, "/photos/2019/beach.png");
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = normalize_json("{\"image\": ").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let record = normalize(&json!({}));

        assert_eq!(record.signature, "");
        assert_eq!(record.format, "");
        assert_eq!(record.mimetype, "unknown");
        assert_eq!(record.width, 0);
        assert_eq!(record.height, 0);
        assert_eq!(record.depth, 0);
        assert_eq!(record.iso, 0);
        assert_eq!(record.exp_mode, "");
        assert_eq!(record.flash_fired, None);
        assert_eq!(record.datetime, None);

        // No exif: keys at all, so the raw branch supplies its defaults
        assert_eq!(record.focal_length, Some(0.0));
        assert_eq!(record.f_stop, Some(0.0));
        assert_eq!(record.shutter, "0");
    }

    #[test]
    fn test_file_fields() {
        let doc = json!({
            "image": {
                "name": "C:\\Users\\rob\\Pictures\\IMG_0001.JPG",
                "format": "JPEG",
                "filesize": "2.41MB",
                "depth": 8,
                "geometry": { "width": 4000, "height": 3000, "x": 0, "y": 0 },
                "properties": { "signature": "ab12cd34ef56ab12cd34ef56", "exif:Make": "Canon" }
            }
        });
        let record = normalize(&doc);

        assert_eq!(record.signature, "ab12cd34ef56ab12cd34ef56");
        assert_eq!(record.basename, "IMG_0001.JPG");
        assert_eq!(record.filesize, "2.41MB");
        assert_eq!(record.depth, 8);
        assert_eq!(record.metadata_json, doc);
        assert_eq!(record.to_string(), "<Photograph> id:ab12cd34ef56 JPEG 4000x3000x8 -");
    }

    #[test]
    fn test_exif_fields() {
        let record = normalize(&with_properties(json!({
            "exif:FocalLength": "50/1",
            "exif:FNumber": "28/10",
            "exif:ExposureTime": "1/200",
            "exif:ExposureBiasValue": "-1/3",
            "exif:PhotographicSensitivity": "1600",
            "exif:Make": "NIKON CORPORATION",
            "exif:Model": "NIKON D750",
            "exif:LensModel": "50mm f/1.8",
        })));

        assert_eq!(record.focal_length, Some(50.0));
        assert_eq!(record.f_stop, Some(2.8));
        assert_eq!(record.exp_time, Some(0.005));
        assert_eq!(record.shutter, "1/200");
        assert_eq!(record.exp_bias, Some(-1.0 / 3.0));
        assert_eq!(record.iso, 1600);
        assert_eq!(record.camera_make, "NIKON CORPORATION");
        assert_eq!(record.camera_model, "NIKON D750");
        assert_eq!(record.lens, "50mm f/1.8");
    }

    #[test]
    fn test_enumerations() {
        let record = normalize(&with_properties(json!({
            "exif:ExposureMode": "1",
            "exif:ExposureProgram": "3",
            "exif:WhiteBalance": "0",
            "exif:MeteringMode": "5",
            "exif:Flash": "16",
        })));

        assert_eq!(record.exp_mode, "MANUAL_EXPOSURE");
        assert_eq!(record.exp_program, "APERTURE_PRIORITY");
        assert_eq!(record.white_balance, "AUTO");
        assert_eq!(record.metering_mode, "PATTERN");
        assert_eq!(record.flash_fired, Some(false));
        assert_eq!(record.flash_mode, "COMPULSORY_FLASH_SUPPRESSION");
    }

    #[test]
    fn test_unknown_enumeration_left_empty() {
        let record = normalize(&with_properties(json!({
            "exif:ExposureMode": "42",
            "exif:MeteringMode": "spot",
            "exif:Flash": "",
        })));

        assert_eq!(record.exp_mode, "");
        assert_eq!(record.metering_mode, "");
        assert_eq!(record.flash_fired, None);
        assert_eq!(record.flash_mode, "");
    }

    #[test]
    fn test_raw_fallback_without_exif_keys() {
        let doc = json!({
            "image": {
                "format": "CR2",
                "properties": {
                    "dng:focal.length": "35.0",
                    "dng:f.number": "4.0",
                    "dng:lens": "EF35mm f/2 IS USM",
                    "dng:make": "Canon",
                    "dng:camera.model.name": "Canon EOS 5D Mark III",
                    "dng:serial.number": "123456789",
                    "dng:iso.setting": "800.0",
                    "dng:exposure.time": "1/60",
                    "signature": "deadbeef",
                }
            }
        });
        let record = normalize(&doc);

        assert_eq!(record.mimetype, "image/x-canon-cr2");
        assert_eq!(record.focal_length, Some(35.0));
        assert_eq!(record.f_stop, Some(4.0));
        assert_eq!(record.lens, "EF35mm f/2 IS USM");
        assert_eq!(record.camera_make, "Canon");
        assert_eq!(record.camera_model, "Canon EOS 5D Mark III");
        assert_eq!(record.camera_serial, "123456789");
        assert_eq!(record.iso, 800);
        assert_eq!(record.exp_time, Some(1.0 / 60.0));
        assert_eq!(record.shutter, "1/60");
    }

    #[test]
    fn test_raw_fallback_defaults() {
        let record = normalize(&with_properties(json!({ "dng:make": "Canon" })));

        assert_eq!(record.focal_length, Some(0.0));
        assert_eq!(record.f_stop, Some(0.0));
        assert_eq!(record.iso, 0);
        assert_eq!(record.exp_time, None);
        assert_eq!(record.shutter, "0");
        assert_eq!(record.camera_make, "Canon");
    }

    #[test]
    fn test_raw_keys_ignored_when_exif_present() {
        let record = normalize(&with_properties(json!({
            "exif:Make": "Canon",
            "dng:make": "Other",
            "dng:f.number": "11.0",
        })));

        assert_eq!(record.camera_make, "Canon");
        assert_eq!(record.f_stop, None);
    }

    #[test]
    fn test_exif_prefix_is_case_insensitive() {
        let record = normalize(&with_properties(json!({
            "EXIF:Make": "X",
            "dng:make": "Canon",
            "dng:f.number": "4.0",
        })));

        assert_eq!(record.camera_make, "");
        assert_eq!(record.f_stop, None);
    }

    #[test]
    fn test_earliest_date_wins() {
        let record = normalize(&with_properties(json!({
            "exif:DateTimeOriginal": "2019:06:01 12:00:00",
            "exif:DateTime": "2019:05:31 08:15:00",
            "date:create": "2021-01-01T00:00:00+00:00",
        })));

        assert_eq!(record.datetime, Some(at(2019, 5, 31, 8, 15, 0)));
    }

    #[test]
    fn test_date_timezone_suffix_stripped() {
        let record = normalize(&with_properties(json!({
            "date:modify": "2020-02-29T23:59:01+01:00",
        })));

        assert_eq!(record.datetime, Some(at(2020, 2, 29, 23, 59, 1)));
    }

    #[test]
    fn test_unparseable_dates_skipped() {
        let record = normalize(&with_properties(json!({
            "exif:DateTimeOriginal": "0000:00:00 00:00:00",
            "exif:DateTimeDigitized": "yesterday",
            "dng:create.date": "2018:03:04 05:06:07",
        })));
        assert_eq!(record.datetime, Some(at(2018, 3, 4, 5, 6, 7)));

        let record = normalize(&with_properties(json!({ "exif:DateTime": "garbage" })));
        assert_eq!(record.datetime, None);
    }

    #[test]
    fn test_gamma_precedence() {
        let doc = json!({ "image": { "gamma": 0.454545, "properties": {} } });
        assert_eq!(normalize(&doc).gamma, 0.454545);

        let doc = json!({
            "image": { "gamma": 0.454545, "properties": { "exif:Gamma": "22/10" } }
        });
        assert_eq!(normalize(&doc).gamma, 2.2);
    }

    #[test]
    fn test_describe() {
        let mut record = normalize(&with_properties(json!({
            "exif:Make": "Canon",
            "exif:Model": "Canon EOS R6",
            "exif:FNumber": "4/1",
            "exif:PhotographicSensitivity": "200",
            "exif:Flash": "1",
        })));
        record.fullpath = "D:\\photos\\a.jpg".to_string();

        let text = record.describe();
        assert!(text.contains("Canon EOS R6"));
        assert!(text.contains("f4.0 ISO200"));
        assert!(text.contains("[FLASH]"));
        assert!(text.contains("file:///D:/photos/a.jpg [???]"));
    }

    #[test]
    fn test_thumbnail_image_without_bytes() {
        let record = PhotoRecord::default();
        assert!(record.thumbnail_image().unwrap().is_none());
    }

    #[test]
    fn test_thumbnail_image_rejects_garbage() {
        let mut record = PhotoRecord::default();
        record.set_thumbnail_bytes(Some(b"not a jpeg".to_vec()));
        assert!(matches!(record.thumbnail_image(), Err(Error::Thumbnail(_))));
    }
}
