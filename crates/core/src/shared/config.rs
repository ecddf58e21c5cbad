use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    DEFAULT_FILTER_ORDER, DEFAULT_FPS, HEART_BAND_HZ, HEART_PEAK_DIVISOR, MAX_WINDOW_SECONDS,
    RESPIRATION_BAND_HZ, RESPIRATION_PEAK_DIVISOR, WINDOW_SECONDS,
};
use crate::shared::error::VitalsError;

/// Band and peak-spacing settings for one windowed pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    pub low_hz: f64,
    pub high_hz: f64,
    pub filter_order: usize,
    /// Minimum spacing between peaks is `fps / peak_divisor` samples.
    pub peak_divisor: f64,
}

impl SignalConfig {
    pub fn heart() -> Self {
        Self {
            low_hz: HEART_BAND_HZ.0,
            high_hz: HEART_BAND_HZ.1,
            filter_order: DEFAULT_FILTER_ORDER,
            peak_divisor: HEART_PEAK_DIVISOR,
        }
    }

    pub fn respiration() -> Self {
        Self {
            low_hz: RESPIRATION_BAND_HZ.0,
            high_hz: RESPIRATION_BAND_HZ.1,
            filter_order: DEFAULT_FILTER_ORDER,
            peak_divisor: RESPIRATION_PEAK_DIVISOR,
        }
    }
}

fn default_heart() -> SignalConfig {
    SignalConfig::heart()
}

fn default_respiration() -> SignalConfig {
    SignalConfig::respiration()
}

fn default_fps() -> f64 {
    DEFAULT_FPS
}

fn default_window_seconds() -> f64 {
    WINDOW_SECONDS
}

/// Settings for a monitor session. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_fps")]
    pub fps: f64,
    #[serde(default = "default_window_seconds")]
    pub window_seconds: f64,
    #[serde(default = "default_heart")]
    pub heart: SignalConfig,
    #[serde(default = "default_respiration")]
    pub respiration: SignalConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            window_seconds: WINDOW_SECONDS,
            heart: SignalConfig::heart(),
            respiration: SignalConfig::respiration(),
        }
    }
}

/// Rejects non-finite, non-positive and oversized window lengths.
pub fn validate_window_seconds(seconds: f64) -> Result<f64, VitalsError> {
    if seconds.is_finite() && seconds > 0.0 && seconds <= MAX_WINDOW_SECONDS {
        Ok(seconds)
    } else {
        Err(VitalsError::InvalidWindow {
            seconds,
            max: MAX_WINDOW_SECONDS,
        })
    }
}

impl MonitorConfig {
    /// Parses and validates a settings file. The frame rate is not checked
    /// here; the monitor falls back to the default for bad values.
    pub fn load(path: &Path) -> Result<Self, VitalsError> {
        let json = fs::read_to_string(path).map_err(|source| VitalsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| VitalsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), VitalsError> {
        validate_window_seconds(self.window_seconds).map(|_| ())
    }

    pub fn save(&self, path: &Path) -> Result<(), VitalsError> {
        let write_err = |source| VitalsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| VitalsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_defaults_match_constants() {
        let config = MonitorConfig::default();
        assert_relative_eq!(config.fps, 30.0);
        assert_relative_eq!(config.window_seconds, 10.0);
        assert_relative_eq!(config.heart.low_hz, 0.75);
        assert_relative_eq!(config.heart.high_hz, 3.0);
        assert_relative_eq!(config.heart.peak_divisor, 3.0);
        assert_relative_eq!(config.respiration.low_hz, 0.1);
        assert_relative_eq!(config.respiration.high_hz, 0.5);
        assert_relative_eq!(config.respiration.peak_divisor, 0.5);
        assert_eq!(config.heart.filter_order, 5);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("monitor.json");
        let mut config = MonitorConfig::default();
        config.fps = 60.0;
        config.respiration.high_hz = 0.7;

        config.save(&path).unwrap();
        let loaded = MonitorConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "fps": 25.0 }"#).unwrap();

        let loaded = MonitorConfig::load(&path).unwrap();
        assert_relative_eq!(loaded.fps, 25.0);
        assert_eq!(loaded.heart, SignalConfig::heart());
        assert_eq!(loaded.respiration, SignalConfig::respiration());
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = MonitorConfig::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(VitalsError::Read { .. })));
    }

    #[rstest]
    #[case::huge("1e18")]
    #[case::above_cap("600.5")]
    #[case::zero("0.0")]
    #[case::negative("-5.0")]
    fn test_load_rejects_bad_window(#[case] seconds: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("window.json");
        fs::write(&path, format!(r#"{{ "window_seconds": {seconds} }}"#)).unwrap();
        assert!(matches!(
            MonitorConfig::load(&path),
            Err(VitalsError::InvalidWindow { .. })
        ));
    }

    #[rstest]
    #[case(0.5)]
    #[case(10.0)]
    #[case(MAX_WINDOW_SECONDS)]
    fn test_window_seconds_in_range(#[case] seconds: f64) {
        assert_relative_eq!(validate_window_seconds(seconds).unwrap(), seconds);
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(-1.0)]
    fn test_window_seconds_out_of_range(#[case] seconds: f64) {
        assert!(validate_window_seconds(seconds).is_err());
    }

    #[test]
    fn test_load_garbage_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            MonitorConfig::load(&path),
            Err(VitalsError::Parse { .. })
        ));
    }
}
