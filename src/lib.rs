//! Photocat: a personal photo catalog.
//!
//! ImageMagick describes each file as JSON, [`photograph::normalize`] turns
//! that into a flat [`PhotoRecord`], and [`db::Database`] keeps one row per
//! content signature.

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod exif;
pub mod hashing;
pub mod logging;
pub mod magick;
pub mod photograph;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use photograph::PhotoRecord;
