use crate::measurement::domain::frame_measurements::FrameMeasurements;
use crate::measurement::measurement_extractor::{MeasurementExtractor, RoiOverlays};
use crate::pipeline::vitals_monitor::{VitalsEstimate, VitalsMonitor};
use crate::shared::frame::Frame;

/// Everything a preview needs to draw for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame_index: usize,
    pub measurements: FrameMeasurements,
    pub overlays: RoiOverlays,
    /// Estimates whose window completed on this frame; usually empty.
    pub estimates: Vec<VitalsEstimate>,
}

/// Per-frame loop body: extract measurements, push them, report.
///
/// The caller owns the acquisition loop and may stop calling at any time.
pub struct MonitorVitalsUseCase {
    extractor: MeasurementExtractor,
    monitor: VitalsMonitor,
}

impl MonitorVitalsUseCase {
    pub fn new(extractor: MeasurementExtractor, monitor: VitalsMonitor) -> Self {
        Self { extractor, monitor }
    }

    pub fn monitor(&self) -> &VitalsMonitor {
        &self.monitor
    }

    pub fn monitor_mut(&mut self) -> &mut VitalsMonitor {
        &mut self.monitor
    }

    pub fn process_frame(
        &mut self,
        frame: &Frame,
    ) -> Result<FrameReport, Box<dyn std::error::Error>> {
        let extraction = self.extractor.extract(frame)?;
        let estimates = self.monitor.push_measurements(&extraction.measurements);
        for estimate in &estimates {
            log::info!("{}", estimate.label());
        }
        Ok(FrameReport {
            frame_index: frame.index(),
            measurements: extraction.measurements,
            overlays: extraction.overlays,
            estimates,
        })
    }

    /// Runs every frame, stopping at the first detector or source error.
    pub fn execute<I>(&mut self, frames: I) -> Result<usize, Box<dyn std::error::Error>>
    where
        I: IntoIterator<Item = Result<Frame, Box<dyn std::error::Error>>>,
    {
        let mut processed = 0;
        for frame in frames {
            self.process_frame(&frame?)?;
            processed += 1;
        }
        self.monitor.finish();
        Ok(processed)
    }
}
