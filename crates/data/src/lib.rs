//! Loading of strategy return series from delimited text files.
//!
//! This crate provides:
//! - [`ReturnsCsvSource`], a validated named-column reader for returns files
//! - [`ReturnRecord`], one parsed row with its optional trading date
//! - [`SourceReadError`], the failures a returns file can produce

pub mod csv_source;
pub mod error;
pub mod record;

pub use csv_source::{ReturnsCsvSource, DEFAULT_COLUMN};
pub use error::SourceReadError;
pub use record::{is_chronological, ReturnRecord};
