//! ImageMagick invocation: metadata as JSON and JPEG thumbnails.

use image::DynamicImage;
use serde_json::Value;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

use crate::config::MagickConfig;
use crate::error::{Error, Result};

/// A generated thumbnail: the JPEG stream and its decoded image.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub bytes: Vec<u8>,
    pub image: DynamicImage,
}

/// Handle to the external `magick` binary.
#[derive(Debug, Clone)]
pub struct Magick {
    binary: PathBuf,
}

impl Magick {
    pub fn new(config: &MagickConfig) -> Self {
        Self::with_binary(&config.binary)
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Run `magick convert <path> json:` and return the first image document.
    ///
    /// Multi-frame files produce one document per frame; only the first is used.
    pub fn acquire(&self, path: &Path) -> Result<Value> {
        debug!(file = ?path, "Reading metadata");
        let stdout = self.run([path.as_os_str(), OsStr::new("json:")])?;
        first_document(serde_json::from_slice(&stdout)?)
    }

    /// Run `magick convert <path> -thumbnail NxN -quality Q jpeg:-` and decode the result.
    pub fn generate_thumbnail(&self, path: &Path, max_edge: u32, quality: u8) -> Result<Thumbnail> {
        debug!(file = ?path, max_edge, quality, "Generating thumbnail");
        let geometry = format!("{}x{}", max_edge, max_edge);
        let quality = quality.to_string();

        let bytes = self.run([
            path.as_os_str(),
            OsStr::new("-thumbnail"),
            OsStr::new(&geometry),
            OsStr::new("-quality"),
            OsStr::new(&quality),
            OsStr::new("jpeg:-"),
        ])?;

        let image = image::load_from_memory_with_format(&bytes, image::ImageFormat::Jpeg)
            .map_err(Error::Thumbnail)?;

        Ok(Thumbnail { bytes, image })
    }

    /// Run `magick convert <args>`, returning stdout on success.
    fn run<I, S>(&self, args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Command::new(&self.binary)
            .arg("convert")
            .args(args)
            .output()
            .map_err(|source| Error::ToolLaunch {
                tool: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(code, stderr = %stderr, "Image tool failed");
            return Err(Error::ToolExecution { code, stderr });
        }

        Ok(output.stdout)
    }
}

fn first_document(value: Value) -> Result<Value> {
    match value {
        Value::Array(documents) => documents
            .into_iter()
            .next()
            .ok_or_else(|| Error::Parse("image tool returned no documents".to_string())),
        Value::Object(_) => Ok(value),
        other => Err(Error::Parse(format!("expected a JSON object, got {}", other))),
    }
}
