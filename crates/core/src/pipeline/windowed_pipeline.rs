//! One parametrized windowed-signal pipeline, instantiated once per vital.
//!
//! Samples accumulate until the window is full; the whole window then goes
//! through filter, normalize, smooth and peak-interval rate extraction, and the
//! buffer starts over empty. Windows never overlap.

use crate::pipeline::sample_buffer::SampleBuffer;
use crate::shared::config::SignalConfig;
use crate::shared::sample_rate::SampleRate;
use crate::signal::domain::bandpass_filter::{bandpass_filter, FilterSpec};
use crate::signal::domain::moving_average::moving_average;
use crate::signal::domain::normalization::z_normalize;
use crate::signal::domain::pos_projection::pos_project_samples;
use crate::signal::domain::rate_estimate::{estimate_rate, RateEstimate};

/// Converts a full window of raw samples into the scalar signal to filter.
pub trait SignalSource {
    type Sample: Copy;

    fn raw_signal(&self, window: &[Self::Sample]) -> Vec<f64>;
}

/// Forehead colour means, projected to a pulse signal with POS.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulseSource;

impl SignalSource for PulseSource {
    type Sample = [f64; 3];

    fn raw_signal(&self, window: &[[f64; 3]]) -> Vec<f64> {
        pos_project_samples(window)
    }
}

/// Shoulder-midpoint pixel positions, used as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplacementSource;

impl SignalSource for DisplacementSource {
    type Sample = f64;

    fn raw_signal(&self, window: &[f64]) -> Vec<f64> {
        window.to_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Accumulating,
    Ready,
}

/// Result of one processed window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowOutput {
    pub rate: RateEstimate,
    /// Smoothed waveform; shorter than the window by `smoothing - 1`.
    pub waveform: Vec<f64>,
    /// Peak indices into `waveform`.
    pub peaks: Vec<usize>,
}

/// Filter settings and rate parameters shared by every window of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowProcessor {
    pub filter: FilterSpec,
    pub smoothing: usize,
    pub peak_distance: f64,
    pub fps: f64,
}

impl WindowProcessor {
    pub fn new(config: &SignalConfig, sample_rate: SampleRate) -> Self {
        let fps = sample_rate.fps();
        Self {
            filter: FilterSpec::new(config.low_hz, config.high_hz, fps)
                .with_order(config.filter_order),
            smoothing: sample_rate.smoothing_window(),
            peak_distance: sample_rate.peak_distance(config.peak_divisor),
            fps,
        }
    }

    /// Filter, normalize, smooth, then estimate the rate. Never fails: every
    /// degenerate case yields a passthrough signal or an undefined rate.
    pub fn process(&self, raw: &[f64]) -> WindowOutput {
        let filtered = bandpass_filter(raw, &self.filter);
        let normalized = if filtered.is_empty() {
            filtered
        } else {
            z_normalize(&filtered)
        };
        let waveform = moving_average(&normalized, self.smoothing);
        let (rate, peaks) = estimate_rate(&waveform, self.fps, self.peak_distance);
        WindowOutput {
            rate,
            waveform,
            peaks,
        }
    }
}

pub struct WindowedPipeline<S: SignalSource> {
    source: S,
    buffer: SampleBuffer<S::Sample>,
    processor: WindowProcessor,
}

impl<S: SignalSource> WindowedPipeline<S> {
    pub fn new(
        source: S,
        config: &SignalConfig,
        sample_rate: SampleRate,
        window_seconds: f64,
    ) -> Self {
        Self {
            source,
            buffer: SampleBuffer::new(sample_rate.window_len(window_seconds)),
            processor: WindowProcessor::new(config, sample_rate),
        }
    }

    pub fn state(&self) -> PipelineState {
        if self.buffer.is_full() {
            PipelineState::Ready
        } else {
            PipelineState::Accumulating
        }
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn window_len(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn processor(&self) -> &WindowProcessor {
        &self.processor
    }

    /// Appends one sample; processes and clears the window once it is full.
    pub fn push(&mut self, sample: S::Sample) -> Option<WindowOutput> {
        self.buffer.push(sample);
        match self.state() {
            PipelineState::Accumulating => None,
            PipelineState::Ready => {
                let window = self.buffer.drain_window();
                let raw = self.source.raw_signal(&window);
                Some(self.processor.process(&raw))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn respiration(fps: f64) -> WindowedPipeline<DisplacementSource> {
        WindowedPipeline::new(
            DisplacementSource,
            &SignalConfig::respiration(),
            SampleRate::new(fps).unwrap(),
            10.0,
        )
    }

    fn breathing_y(i: usize, fps: f64) -> f64 {
        300.0 + 10.0 * (2.0 * PI * 0.25 * i as f64 / fps).sin()
    }

    #[test]
    fn test_accumulates_until_window_full() {
        let mut pipeline = respiration(30.0);
        assert_eq!(pipeline.window_len(), 300);
        for i in 0..299 {
            assert!(pipeline.push(breathing_y(i, 30.0)).is_none());
            assert_eq!(pipeline.state(), PipelineState::Accumulating);
        }
        assert_eq!(pipeline.buffered(), 299);
        assert!(pipeline.push(breathing_y(299, 30.0)).is_some());
    }

    #[test]
    fn test_buffer_empty_after_window() {
        let mut pipeline = respiration(30.0);
        for i in 0..300 {
            pipeline.push(breathing_y(i, 30.0));
        }
        assert_eq!(pipeline.buffered(), 0);
        assert_eq!(pipeline.state(), PipelineState::Accumulating);
    }

    #[test]
    fn test_breathing_rate_recovered() {
        let mut pipeline = respiration(30.0);
        let output = (0..300)
            .filter_map(|i| pipeline.push(breathing_y(i, 30.0)))
            .last()
            .unwrap();
        assert_relative_eq!(output.rate.bpm().unwrap(), 15.0, epsilon = 2.0);
        // 300 samples smoothed with a 15-sample window
        assert_eq!(output.waveform.len(), 286);
    }

    #[test]
    fn test_windows_are_independent() {
        let mut pipeline = respiration(30.0);
        let outputs: Vec<WindowOutput> = (0..600)
            .filter_map(|i| pipeline.push(breathing_y(i, 30.0)))
            .collect();
        assert_eq!(outputs.len(), 2);
        for output in &outputs {
            assert!(output.rate.is_defined());
        }
    }

    #[test]
    fn test_fractional_fps_rounds_window_up() {
        let pipeline = respiration(29.97);
        assert_eq!(pipeline.window_len(), 300);
    }

    #[test]
    fn test_flat_window_is_undefined() {
        let mut pipeline = respiration(30.0);
        let output = (0..300).filter_map(|_| pipeline.push(250.0)).last().unwrap();
        assert_eq!(output.rate, RateEstimate::Undefined);
        assert!(output.peaks.is_empty());
    }

    #[test]
    fn test_pulse_source_projects_rgb() {
        let window = vec![[150.0, 110.0, 90.0], [151.0, 110.0, 90.0], [149.0, 110.0, 90.0]];
        assert_eq!(PulseSource.raw_signal(&window).len(), 3);
    }

    #[test]
    fn test_processor_parameters_follow_config() {
        let processor = WindowProcessor::new(&SignalConfig::heart(), SampleRate::new(30.0).unwrap());
        assert_eq!(processor.smoothing, 15);
        assert_relative_eq!(processor.peak_distance, 10.0);
        assert_relative_eq!(processor.filter.low_hz, 0.75);
        assert_relative_eq!(processor.filter.high_hz, 3.0);
        assert_eq!(processor.filter.order, 5);
    }

    #[test]
    fn test_processor_empty_window() {
        let processor = WindowProcessor::new(&SignalConfig::heart(), SampleRate::default());
        let output = processor.process(&[]);
        assert!(output.waveform.is_empty());
        assert_eq!(output.rate, RateEstimate::Undefined);
    }
}
