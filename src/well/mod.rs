//! Well trajectory input
//!
//! Wells are read from RMS ASCII well files. The reader derives the
//! along-hole depth and the relative horizontal length of every record from
//! the raw (x, y, tvd) path, so downstream code never recomputes them.

mod rms;

pub use rms::{parse_rms_well, read_rms_well, RMS_UNDEFINED};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a well file
#[derive(Error, Debug)]
pub enum WellError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Well {0} has no trajectory records")]
    Empty(String),
}
