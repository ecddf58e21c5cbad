use std::fmt;
use std::time::Instant;

use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

use crate::measurement::domain::frame_measurements::FrameMeasurements;
use crate::pipeline::pipeline_logger::{NullPipelineLogger, PipelineLogger};
use crate::pipeline::windowed_pipeline::{
    DisplacementSource, PipelineState, PulseSource, WindowOutput, WindowedPipeline,
};
use crate::shared::config::{validate_window_seconds, MonitorConfig};
use crate::shared::constants::WINDOW_SECONDS;
use crate::shared::sample_rate::SampleRate;
use crate::signal::domain::rate_estimate::RateEstimate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineId {
    HeartRate,
    Respiration,
}

impl PipelineId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineId::HeartRate => "heart_rate",
            PipelineId::Respiration => "respiration",
        }
    }

    fn unit(&self) -> &'static str {
        match self {
            PipelineId::HeartRate => "Beat Per Minute",
            PipelineId::Respiration => "Breath Per Minute",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            PipelineId::HeartRate => "Heart Rate",
            PipelineId::Respiration => "Respiration Rate",
        }
    }
}

impl fmt::Display for PipelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One completed window, as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsEstimate {
    pub pipeline: PipelineId,
    pub rate: RateEstimate,
    pub waveform: Vec<f64>,
}

impl VitalsEstimate {
    /// e.g. `Heart Rate: 72.00 BPM (Beat Per Minute)`, or `--` when undefined.
    pub fn label(&self) -> String {
        format!(
            "{}: {} BPM ({})",
            self.pipeline.title(),
            self.rate,
            self.pipeline.unit()
        )
    }
}

/// A monitoring session: the pulse and respiration pipelines side by side.
///
/// Each pipeline owns its buffer, so a miss or a degenerate window in one
/// never delays or corrupts the other. Completed windows are returned from
/// [`push_measurements`](Self::push_measurements) and also sent to every
/// subscriber.
pub struct VitalsMonitor {
    heart: WindowedPipeline<PulseSource>,
    respiration: WindowedPipeline<DisplacementSource>,
    sample_rate: SampleRate,
    subscribers: Vec<Sender<VitalsEstimate>>,
    logger: Box<dyn PipelineLogger>,
    frames: usize,
}

impl VitalsMonitor {
    /// Invalid frame rates in `config` fall back to the default.
    pub fn new(config: &MonitorConfig) -> Self {
        Self::with_sample_rate(config, SampleRate::from_reported(config.fps))
    }

    /// Invalid window lengths in `config` fall back to the default.
    pub fn with_sample_rate(config: &MonitorConfig, sample_rate: SampleRate) -> Self {
        let window_seconds = validate_window_seconds(config.window_seconds).unwrap_or_else(|e| {
            log::warn!("{e}, falling back to {WINDOW_SECONDS}");
            WINDOW_SECONDS
        });
        Self {
            heart: WindowedPipeline::new(PulseSource, &config.heart, sample_rate, window_seconds),
            respiration: WindowedPipeline::new(
                DisplacementSource,
                &config.respiration,
                sample_rate,
                window_seconds,
            ),
            sample_rate,
            subscribers: Vec::new(),
            logger: Box::new(NullPipelineLogger),
            frames: 0,
        }
    }

    pub fn with_logger(mut self, logger: Box<dyn PipelineLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// Receives every estimate completed after this call.
    pub fn subscribe(&mut self) -> Receiver<VitalsEstimate> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn buffered(&self, pipeline: PipelineId) -> usize {
        match pipeline {
            PipelineId::HeartRate => self.heart.buffered(),
            PipelineId::Respiration => self.respiration.buffered(),
        }
    }

    pub fn window_len(&self, pipeline: PipelineId) -> usize {
        match pipeline {
            PipelineId::HeartRate => self.heart.window_len(),
            PipelineId::Respiration => self.respiration.window_len(),
        }
    }

    pub fn state(&self, pipeline: PipelineId) -> PipelineState {
        match pipeline {
            PipelineId::HeartRate => self.heart.state(),
            PipelineId::Respiration => self.respiration.state(),
        }
    }

    /// Appends whatever this frame measured. Missing fields append nothing.
    pub fn push_measurements(&mut self, measurements: &FrameMeasurements) -> Vec<VitalsEstimate> {
        self.frames += 1;
        self.logger.frame(self.frames);

        let mut estimates = Vec::new();
        if let Some(rgb) = measurements.rgb {
            let started = Instant::now();
            if let Some(output) = self.heart.push(rgb) {
                estimates.push(self.complete(PipelineId::HeartRate, output, started));
            }
        }
        if let Some(y) = measurements.shoulder_y {
            let started = Instant::now();
            if let Some(output) = self.respiration.push(y) {
                estimates.push(self.complete(PipelineId::Respiration, output, started));
            }
        }

        for estimate in &estimates {
            self.subscribers
                .retain(|tx| tx.send(estimate.clone()).is_ok());
        }
        estimates
    }

    /// Logs the session summary through the configured logger.
    pub fn finish(&mut self) {
        let message = format!("Session finished after {} frames", self.frames);
        self.logger.info(&message);
        self.logger.summary();
    }

    fn complete(
        &mut self,
        pipeline: PipelineId,
        output: WindowOutput,
        started: Instant,
    ) -> VitalsEstimate {
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.logger.timing(pipeline.as_str(), elapsed_ms);
        let metric = format!("{pipeline}_bpm");
        match output.rate {
            RateEstimate::Bpm(bpm) => self.logger.metric(&metric, bpm),
            RateEstimate::Undefined => self.logger.undefined(&metric),
        }
        log::debug!(
            "{pipeline} window at frame {}: {} peaks, rate {}",
            self.frames,
            output.peaks.len(),
            output.rate
        );

        VitalsEstimate {
            pipeline,
            rate: output.rate,
            waveform: output.waveform,
        }
    }
}
