use std::sync::Mutex;

/// Counters for isoline request outcomes.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    completed: usize,
    failed: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                completed: 0,
                failed: 0,
            }),
        }
    }

    pub fn record_completed(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.completed += 1;
        }
    }

    pub fn record_failed(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.failed += 1;
        }
    }

    /// (completed, failed)
    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.completed, metrics.failed)
        } else {
            (0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let recorder = MetricsRecorder::new();
        recorder.record_completed();
        recorder.record_completed();
        recorder.record_failed();
        assert_eq!(recorder.snapshot(), (2, 1));
    }
}
