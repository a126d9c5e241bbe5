//! CSV loader and locale normalizer
//!
//! Reads the station's CSV export into a [`meteoboard_core::Dataset`]:
//! day-first dates, comma decimal separators, and per-cell missing values.
//! Loading happens once per process; everything downstream works against
//! the immutable result.

pub mod loader;

pub use loader::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open '{path}': {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{0}'")]
    MissingDateColumn(&'static str),

    #[error("Line {line}: unparseable date '{value}'")]
    InvalidDate { line: usize, value: String },
}

pub type LoadResult<T> = Result<T, LoadError>;
