//! Fixed-capacity rolling windows for angle smoothing.
//!
//! Both the 12-sample angle smoother and the 3-sample torso window are
//! bounded: the oldest sample is evicted once capacity is reached, so memory
//! stays fixed regardless of session length.

use std::collections::VecDeque;

/// A bounded rolling window over `f64` samples with O(1) push and eviction.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    buf: VecDeque<f64>,
    capacity: usize,
}

impl RollingWindow {
    /// Create an empty window holding at most `capacity` samples.
    ///
    /// `capacity` must be at least 1; configurations are validated upstream.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a sample, evicting the oldest once the window is full.
    pub fn push(&mut self, value: f64) {
        if self.buf.len() == self.capacity {
            self.buf.pop_front();
        }
        self.buf.push_back(value);
    }

    /// Arithmetic mean of the buffered samples, or `None` when empty.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.buf.is_empty() {
            return None;
        }
        Some(self.buf.iter().sum::<f64>() / self.buf.len() as f64)
    }

    /// Number of buffered samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when no samples are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// True once the window holds `capacity` samples.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }

    /// Remove all samples, keeping the capacity.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_window_has_no_mean() {
        let w = RollingWindow::new(3);
        assert!(w.mean().is_none());
        assert!(w.is_empty());
        assert!(!w.is_full());
    }

    #[test]
    fn mean_of_buffered_samples() {
        let mut w = RollingWindow::new(4);
        w.push(10.0);
        w.push(20.0);
        assert_relative_eq!(w.mean().unwrap(), 15.0);
        assert_eq!(w.len(), 2);
    }

    #[test]
    fn oldest_sample_evicted_at_capacity() {
        let mut w = RollingWindow::new(3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            w.push(v);
        }
        // 1.0 evicted; window holds [2, 3, 4]
        assert!(w.is_full());
        assert_eq!(w.len(), 3);
        assert_relative_eq!(w.mean().unwrap(), 3.0);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut w = RollingWindow::new(2);
        w.push(5.0);
        w.push(6.0);
        w.clear();
        assert!(w.is_empty());
        w.push(7.0);
        w.push(8.0);
        w.push(9.0);
        assert_relative_eq!(w.mean().unwrap(), 8.5);
    }
}
