/// Append-only sample store for one processing window.
///
/// Fills up to `capacity` samples, then is drained in one piece; nothing
/// carries over into the next window.
#[derive(Debug, Clone)]
pub struct SampleBuffer<T> {
    samples: Vec<T>,
    capacity: usize,
}

impl<T> SampleBuffer<T> {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::new(),
            capacity,
        }
    }

    pub fn push(&mut self, sample: T) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    pub fn as_slice(&self) -> &[T] {
        &self.samples
    }

    /// Takes every buffered sample, leaving the buffer empty.
    pub fn drain_window(&mut self) -> Vec<T> {
        std::mem::take(&mut self.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_to_capacity() {
        let mut buffer = SampleBuffer::new(3);
        assert!(buffer.is_empty());
        buffer.push(1.0);
        buffer.push(2.0);
        assert!(!buffer.is_full());
        buffer.push(3.0);
        assert!(buffer.is_full());
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_drain_empties_buffer() {
        let mut buffer = SampleBuffer::new(2);
        buffer.push([1.0, 2.0, 3.0]);
        buffer.push([4.0, 5.0, 6.0]);

        let window = buffer.drain_window();
        assert_eq!(window.len(), 2);
        assert_eq!(buffer.len(), 0);
        assert!(!buffer.is_full());
        assert_eq!(buffer.capacity(), 2);
    }

    #[test]
    fn test_huge_capacity_does_not_allocate() {
        let mut buffer = SampleBuffer::new(usize::MAX);
        assert_eq!(buffer.capacity(), usize::MAX);
        buffer.push(1u8);
        assert!(!buffer.is_full());
        assert_eq!(buffer.drain_window(), vec![1u8]);
    }

    #[test]
    fn test_zero_capacity_is_one() {
        let mut buffer = SampleBuffer::new(0);
        assert_eq!(buffer.capacity(), 1);
        buffer.push(0u8);
        assert!(buffer.is_full());
    }
}
