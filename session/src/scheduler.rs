use std::time::{Duration, Instant};

/// Paces the session loop to a fixed tick rate.
///
/// [`FrameScheduler::wait_for_next_frame`] is the single yield point at the
/// end of every tick. A scheduler that falls behind does not try to catch up;
/// the next frame is measured from the moment the late tick finished.
#[derive(Debug)]
pub struct FrameScheduler {
    frame: Option<Duration>,
    deadline: Option<Instant>,
}

impl FrameScheduler {
    /// Creates a scheduler that runs at most `ticks_per_second` ticks per second.
    #[must_use]
    pub fn paced(ticks_per_second: u32) -> Self {
        let frame = (ticks_per_second > 0)
            .then(|| Duration::from_secs(1) / ticks_per_second);
        Self {
            frame,
            deadline: None,
        }
    }

    /// Creates a scheduler that never sleeps.
    #[must_use]
    pub const fn unpaced() -> Self {
        Self {
            frame: None,
            deadline: None,
        }
    }

    /// Target duration of a single frame, if pacing is enabled.
    #[must_use]
    pub const fn frame_duration(&self) -> Option<Duration> {
        self.frame
    }

    /// Blocks until the current frame's time slice is used up.
    pub fn wait_for_next_frame(&mut self) {
        let Some(frame) = self.frame else {
            return;
        };

        let now = Instant::now();
        let deadline = self.deadline.unwrap_or(now + frame);
        if deadline > now {
            std::thread::sleep(deadline - now);
            self.deadline = Some(deadline + frame);
        } else {
            self.deadline = Some(now + frame);
        }
    }
}
