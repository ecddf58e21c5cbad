use ndarray::{s, ArrayView3, Axis};

use crate::shared::region::Region;

/// A single camera frame: contiguous RGB bytes in row-major order.
///
/// Capture backends convert to RGB before handing frames to the core.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

const CHANNELS: usize = 3;

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// `None` when the buffer does not match the declared dimensions.
    pub fn as_ndarray(&self) -> Option<ArrayView3<'_, u8>> {
        ArrayView3::from_shape(
            (self.height as usize, self.width as usize, CHANNELS),
            &self.data,
        )
        .ok()
    }

    /// Mean R, G and B intensity inside `region`.
    ///
    /// The region is intersected with the frame first; `None` if nothing
    /// remains to average.
    pub fn mean_rgb(&self, region: &Region) -> Option<[f64; 3]> {
        let roi = region.intersect_frame(self.width, self.height);
        if roi.is_empty() {
            return None;
        }
        let pixels = self.as_ndarray()?;
        let patch = pixels.slice(s![
            roi.y as usize..roi.bottom() as usize,
            roi.x as usize..roi.right() as usize,
            ..
        ]);
        let count = roi.area() as f64;
        let sums = patch
            .mapv(f64::from)
            .sum_axis(Axis(0))
            .sum_axis(Axis(0));
        Some([sums[0] / count, sums[1] / count, sums[2] / count])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
        let data = (0..width * height).flat_map(|_| rgb).collect();
        Frame::new(data, width, height, 0)
    }

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * 3")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 0);
    }

    #[test]
    fn test_as_ndarray_shape() {
        let frame = Frame::new(vec![0u8; 24], 4, 2, 0);
        let arr = frame.as_ndarray().unwrap();
        assert_eq!(arr.shape(), &[2, 4, 3]);
    }

    #[test]
    fn test_mean_rgb_solid_frame() {
        let frame = solid(8, 6, [200, 100, 50]);
        let mean = frame.mean_rgb(&Region::new(1, 1, 4, 3)).unwrap();
        assert_relative_eq!(mean[0], 200.0);
        assert_relative_eq!(mean[1], 100.0);
        assert_relative_eq!(mean[2], 50.0);
    }

    #[test]
    fn test_mean_rgb_averages_only_region() {
        // 2x1 frame: left pixel red, right pixel blue
        let frame = Frame::new(vec![255, 0, 0, 0, 0, 255], 2, 1, 0);
        let left = frame.mean_rgb(&Region::new(0, 0, 1, 1)).unwrap();
        assert_eq!(left, [255.0, 0.0, 0.0]);
        let both = frame.mean_rgb(&Region::new(0, 0, 2, 1)).unwrap();
        assert_relative_eq!(both[0], 127.5);
        assert_relative_eq!(both[2], 127.5);
    }

    #[test]
    fn test_mean_rgb_clips_to_frame() {
        let frame = solid(4, 4, [10, 20, 30]);
        let mean = frame.mean_rgb(&Region::new(-2, 2, 10, 10)).unwrap();
        assert_eq!(mean, [10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_mean_rgb_outside_frame_is_none() {
        let frame = solid(4, 4, [10, 20, 30]);
        assert!(frame.mean_rgb(&Region::new(10, 10, 5, 5)).is_none());
        assert!(frame.mean_rgb(&Region::new(0, 0, 0, 5)).is_none());
    }
}
