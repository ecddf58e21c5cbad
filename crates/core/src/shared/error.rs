use std::path::PathBuf;

use thiserror::Error;

/// Hard failures surfaced to the caller.
///
/// Degenerate numeric cases inside a processing window are never reported
/// here; they degrade to passthrough signals or an undefined rate instead.
#[derive(Error, Debug)]
pub enum VitalsError {
    #[error("sample rate must be a positive finite number, got {0}")]
    InvalidSampleRate(f64),
    #[error("window length must be in (0, {max}] seconds, got {seconds}")]
    InvalidWindow { seconds: f64, max: f64 },
    #[error("invalid ROI dimensions: [{left}:{right}, {top}:{bottom}]")]
    InvalidRoi {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    },
    #[error("pose has {found} landmarks, shoulders need at least {required}")]
    MissingLandmarks { found: usize, required: usize },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed measurement at {path}:{line}: {source}")]
    Measurement {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
