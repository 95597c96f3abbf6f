//! Frame pacing
//!
//! Best-effort fixed rate: after a frame's work is done, wait out whatever is
//! left of the frame budget. Missed frames are not made up.

use macroquad::time::get_time;

/// Seconds left before the deadline at which native builds stop sleeping
const SPIN_MARGIN: f64 = 0.002;

pub struct FrameClock {
    /// Seconds per frame, None for unlimited
    frame_time: Option<f64>,
    frame_start: f64,
}

impl FrameClock {
    pub fn new(frame_time: Option<f64>) -> Self {
        Self {
            frame_time,
            frame_start: get_time(),
        }
    }

    /// Mark the start of a frame
    pub fn begin(&mut self) {
        self.frame_start = get_time();
    }

    /// Block until the current frame's budget is used up
    pub fn wait(&self) {
        let Some(target_frame_time) = self.frame_time else { return };
        let frame_start = self.frame_start;
        if get_time() - frame_start >= target_frame_time {
            return;
        }

        // Native: sleep for the bulk, then spin for precision
        #[cfg(not(target_arch = "wasm32"))]
        {
            while get_time() - frame_start + SPIN_MARGIN < target_frame_time {
                std::thread::sleep(std::time::Duration::from_millis(1));
            }
            while get_time() - frame_start < target_frame_time {
                std::hint::spin_loop();
            }
        }
        // WASM: no thread::sleep, busy wait
        #[cfg(target_arch = "wasm32")]
        {
            while get_time() - frame_start < target_frame_time {
                std::hint::spin_loop();
            }
        }
    }
}
