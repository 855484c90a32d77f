//! Frame statistics for the window title.

use std::time::{Duration, Instant};

/// Counts frames and reports the rate once per second.
pub struct FrameCounter {
    window_start: Instant,
    frames: u32,
}

impl FrameCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
        }
    }

    /// Count one frame. Returns the frames-per-second figure whenever a full
    /// second has elapsed, `None` otherwise.
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;
        if now.duration_since(self.window_start) >= Duration::from_secs(1) {
            let fps = self.frames;
            self.frames = 0;
            self.window_start = now;
            Some(fps)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_second() {
        let start = Instant::now();
        let mut counter = FrameCounter::new(start);

        for i in 1..=59 {
            assert_eq!(counter.tick(start + Duration::from_millis(i * 16)), None);
        }
        assert_eq!(counter.tick(start + Duration::from_secs(1)), Some(60));

        // The window restarts after a report.
        assert_eq!(counter.tick(start + Duration::from_millis(1500)), None);
        assert_eq!(counter.tick(start + Duration::from_secs(2)), Some(2));
    }
}
