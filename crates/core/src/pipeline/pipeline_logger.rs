use std::collections::BTreeMap;
use std::time::Instant;

/// Observer for monitor session events.
///
/// Keeps the monitor free of any particular output: the CLI logs a summary,
/// tests and embedders that render their own status use the null logger.
pub trait PipelineLogger: Send {
    /// Running count of frames pushed into the session.
    fn frame(&mut self, count: usize);

    /// Duration of one processed window, per pipeline.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// A numeric result, e.g. a defined rate.
    fn metric(&mut self, name: &str, value: f64);

    /// A window that ended without a defined rate.
    fn undefined(&mut self, name: &str);

    fn info(&mut self, message: &str);

    /// End-of-session report. Default: no-op.
    fn summary(&self) {}
}

/// Discards every event.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn frame(&mut self, _count: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn undefined(&mut self, _name: &str) {}
    fn info(&mut self, _message: &str) {}
}

/// Accumulates per-window timings and rates and forwards messages to the
/// `log` facade. Frame counts are logged every `throttle_frames` frames.
pub struct LogPipelineLogger {
    throttle_frames: usize,
    timings: BTreeMap<String, Vec<f64>>,
    metrics: BTreeMap<String, Vec<f64>>,
    undefined: BTreeMap<String, usize>,
    start_time: Instant,
    frames: usize,
}

impl LogPipelineLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: BTreeMap::new(),
            metrics: BTreeMap::new(),
            undefined: BTreeMap::new(),
            start_time: Instant::now(),
            frames: 0,
        }
    }

    /// `None` until at least one window has been reported.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() && self.undefined.is_empty() {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Session summary ({} frames, {elapsed_s:.1}s):",
            self.frames
        )];

        for (stage, durations) in &self.timings {
            let total: f64 = durations.iter().sum();
            let avg = total / durations.len() as f64;
            lines.push(format!(
                "  {stage:12}: {} windows, avg {avg:.2}ms",
                durations.len()
            ));
        }

        for (name, values) in &self.metrics {
            let avg = values.iter().sum::<f64>() / values.len() as f64;
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            lines.push(format!(
                "  {name}: avg {avg:.2}  min {min:.2}  max {max:.2}"
            ));
        }

        for (name, count) in &self.undefined {
            lines.push(format!("  {name}: {count} undefined"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }

    pub fn undefined_count(&self, name: &str) -> usize {
        self.undefined.get(name).copied().unwrap_or(0)
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Default for LogPipelineLogger {
    fn default() -> Self {
        Self::new(300)
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn frame(&mut self, count: usize) {
        self.frames = count;
        if count % self.throttle_frames == 0 {
            log::debug!("Processed {count} frames");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.entry(name.to_string()).or_default().push(value);
    }

    fn undefined(&mut self, name: &str) {
        *self.undefined.entry(name.to_string()).or_default() += 1;
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
