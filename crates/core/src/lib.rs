//! Heart-rate and respiration-rate estimation from per-frame video
//! measurements.

pub mod shared {
    pub mod config;
    pub mod constants;
    pub mod error;
    pub mod frame;
    pub mod region;
    pub mod sample_rate;
}

pub mod signal {
    pub mod domain {
        pub mod bandpass_filter;
        pub mod butterworth;
        pub mod moving_average;
        pub mod normalization;
        pub mod peak_detector;
        pub mod pos_projection;
        pub mod rate_estimate;
    }
}

pub mod detection {
    pub mod domain {
        pub mod face_detector;
        pub mod pose_landmarker;
    }
}

pub mod measurement {
    pub mod domain {
        pub mod forehead_roi;
        pub mod frame_measurements;
        pub mod shoulder_roi;
    }
    pub mod infrastructure {
        pub mod jsonl_trace;
    }
    pub mod measurement_extractor;
}

pub mod pipeline {
    pub mod monitor_vitals_use_case;
    pub mod pipeline_logger;
    pub mod sample_buffer;
    pub mod vitals_monitor;
    pub mod windowed_pipeline;
}
