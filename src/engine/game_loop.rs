//! Frame clock for the variable-step update loop
//!
//! Every rendered frame is one logical tick. The clock hands game logic the
//! current game time and the time elapsed since the previous tick, both in
//! seconds. Time spent paused is excluded from game time so animations and
//! cooldowns resume where they left off.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Longest delta handed to game logic; longer stalls (window drags,
/// breakpoints) are clamped so movement cannot tunnel through walls
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Timing for a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Game time in seconds since the clock started
    pub now: f32,
    /// Seconds since the previous tick, clamped to `MAX_FRAME_DELTA`
    pub dt: f32,
}

/// Frame clock state
pub struct FrameClock {
    /// Time when the clock started
    start_time: Instant,

    /// Time of last tick
    last_frame_time: Instant,

    /// When the current pause began, if paused
    paused_at: Option<Instant>,

    /// Total time spent paused
    paused_total: Duration,

    /// Frame timing history for FPS calculation
    frame_times: VecDeque<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl FrameClock {
    /// Create a new clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame_time: now,
            paused_at: None,
            paused_total: Duration::ZERO,
            frame_times: VecDeque::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame
    ///
    /// While paused the game time is frozen and the delta is zero.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.pop_front();
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        let dt = if self.is_paused() {
            0.0
        } else {
            frame_time.as_secs_f32().min(MAX_FRAME_DELTA)
        };

        FrameTime {
            now: self.game_time_at(now),
            dt,
        }
    }

    /// Current game time in seconds, without starting a new frame
    pub fn now(&self) -> f32 {
        self.game_time_at(Instant::now())
    }

    fn game_time_at(&self, instant: Instant) -> f32 {
        let effective = self.paused_at.unwrap_or(instant);
        effective
            .duration_since(self.start_time)
            .saturating_sub(self.paused_total)
            .as_secs_f32()
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames ticked
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Check if the clock is paused
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Freeze game time
    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(Instant::now());
            log::info!("Game paused");
        }
    }

    /// Unfreeze game time
    pub fn resume(&mut self) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += paused_at.elapsed();
            log::info!("Game resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_creation() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_tick_counts_frames() {
        let mut clock = FrameClock::new();
        clock.tick();
        clock.tick();
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_time_advances() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        let frame = clock.tick();
        assert!(frame.now >= 0.01);
        assert!(frame.dt >= 0.01);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(150));
        let frame = clock.tick();
        assert!(frame.dt <= MAX_FRAME_DELTA);
        assert!(frame.now >= 0.15);
    }

    #[test]
    fn test_pause_freezes_time() {
        let mut clock = FrameClock::new();
        clock.pause();
        let frozen = clock.now();

        thread::sleep(Duration::from_millis(20));
        let frame = clock.tick();
        assert_eq!(frame.dt, 0.0);
        assert_eq!(frame.now, frozen);
    }

    #[test]
    fn test_resume_excludes_paused_time() {
        let mut clock = FrameClock::new();
        clock.pause();
        thread::sleep(Duration::from_millis(50));
        clock.resume();
        assert!(clock.now() < 0.05);
    }

    #[test]
    fn test_toggle_pause() {
        let mut clock = FrameClock::new();
        clock.toggle_pause();
        assert!(clock.is_paused());
        clock.toggle_pause();
        assert!(!clock.is_paused());
    }
}
