//! Recorded measurement traces: one `FrameMeasurements` JSON object per line.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::{Path, PathBuf};

use crate::measurement::domain::frame_measurements::FrameMeasurements;
use crate::shared::error::VitalsError;

/// Streams measurements from a trace file. Blank lines are skipped.
pub struct JsonlTraceReader<R> {
    path: PathBuf,
    lines: Lines<R>,
    line: usize,
}

impl JsonlTraceReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, VitalsError> {
        let file = File::open(path).map_err(|source| VitalsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path, BufReader::new(file)))
    }
}

impl<R: BufRead> JsonlTraceReader<R> {
    /// `path` is only used in error messages.
    pub fn new(path: &Path, reader: R) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl<R: BufRead> Iterator for JsonlTraceReader<R> {
    type Item = Result<FrameMeasurements, VitalsError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = self.lines.next()?;
            self.line += 1;
            let text = match text {
                Ok(text) => text,
                Err(source) => {
                    return Some(Err(VitalsError::Read {
                        path: self.path.clone(),
                        source,
                    }))
                }
            };
            if text.trim().is_empty() {
                continue;
            }
            return Some(serde_json::from_str(&text).map_err(|source| {
                VitalsError::Measurement {
                    path: self.path.clone(),
                    line: self.line,
                    source,
                }
            }));
        }
    }
}

/// Writes a whole trace, creating parent directories as needed.
pub fn write_trace(path: &Path, measurements: &[FrameMeasurements]) -> Result<(), VitalsError> {
    let write_err = |source| VitalsError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let mut out = BufWriter::new(File::create(path).map_err(write_err)?);
    for m in measurements {
        let line = serde_json::to_string(m).map_err(|source| VitalsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        writeln!(out, "{line}").map_err(write_err)?;
    }
    out.flush().map_err(write_err)
}
