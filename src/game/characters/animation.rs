// Character animation clips and the per-state animation table

use super::state::ActionState;
use crate::engine::input::{Direction, DirectionMap};
use crate::engine::renderer::Image;

/// How many times a clip plays before it stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loops {
    /// Cycle until replaced
    Forever,
    /// Play the full cycle this many times, then hold the last frame
    Times(u32),
}

/// A time-driven sequence of frames
///
/// The clip's clock starts the first time it is queried. Each later query
/// advances one frame per elapsed frame period, catching up if several
/// periods passed since the previous query.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    frames: Vec<Image>,
    /// Frames per second
    fps: f32,
    /// Duration of each frame in seconds
    frame_duration: f32,
    loops: Loops,
    /// Current frame index, always within `frames`
    current_frame: usize,
    /// Full cycles completed so far
    loop_count: u32,
    /// Time of the last frame change (or of the first query)
    last_advance: Option<f32>,
    /// Set once a finite clip exhausts its loops; cleared only by `reset`
    done: bool,
}

impl AnimationClip {
    /// Create a new clip
    ///
    /// # Panics
    ///
    /// Panics if `frames` is empty or `fps` is not positive.
    pub fn new(frames: Vec<Image>, fps: f32, loops: Loops) -> Self {
        assert!(!frames.is_empty(), "an animation clip needs at least one frame");
        assert!(fps > 0.0, "animation rate must be positive");

        Self {
            frames,
            fps,
            frame_duration: 1.0 / fps,
            loops,
            current_frame: 0,
            loop_count: 0,
            last_advance: None,
            done: false,
        }
    }

    /// Create a clip that cycles forever
    pub fn looping(frames: Vec<Image>, fps: f32) -> Self {
        Self::new(frames, fps, Loops::Forever)
    }

    /// Create a clip that plays `loops` full cycles and then reports done
    pub fn finite(frames: Vec<Image>, fps: f32, loops: u32) -> Self {
        Self::new(frames, fps, Loops::Times(loops))
    }

    /// Advance the clip to `now` (seconds) and return the frame to display
    pub fn get_next_frame(&mut self, now: f32) -> &Image {
        let timer = *self.last_advance.get_or_insert(now);

        if !self.done {
            let steps = ((now - timer) / self.frame_duration).floor();
            if steps >= 1.0 {
                self.last_advance = Some(timer + steps * self.frame_duration);
                self.advance(steps as u64);
            }
        }

        &self.frames[self.current_frame]
    }

    fn advance(&mut self, steps: u64) {
        let frame_count = self.frames.len() as u64;
        let total = self.current_frame as u64 + steps;
        let wraps = total / frame_count;

        match self.loops {
            Loops::Forever => {
                self.loop_count = self.loop_count.saturating_add(wraps.min(u32::MAX as u64) as u32);
                self.current_frame = (total % frame_count) as usize;
            }
            Loops::Times(limit) => {
                if u64::from(self.loop_count) + wraps >= u64::from(limit) {
                    self.loop_count = limit;
                    self.current_frame = self.frames.len() - 1;
                    self.done = true;
                } else {
                    self.loop_count += wraps as u32;
                    self.current_frame = (total % frame_count) as usize;
                }
            }
        }
    }

    /// Rewind to the first frame and restore the loop budget
    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.loop_count = 0;
        self.last_advance = None;
        self.done = false;
    }

    /// Check if a finite clip has played all of its loops
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The frame that would be displayed right now
    pub fn current_image(&self) -> &Image {
        &self.frames[self.current_frame]
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Image] {
        &self.frames
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn loops(&self) -> Loops {
        self.loops
    }

    /// Full playback length of a finite clip in seconds
    pub fn total_duration(&self) -> Option<f32> {
        match self.loops {
            Loops::Forever => None,
            Loops::Times(limit) => {
                Some(self.frames.len() as f32 * limit as f32 / self.fps)
            }
        }
    }
}

/// One clip per direction
pub type DirectionalClips = DirectionMap<AnimationClip>;

/// Every clip a composited character can show:
/// {hit flash} × {action state} × {direction}
#[derive(Debug, Clone)]
pub struct AnimationTable {
    /// Indexed by `[hit as usize][action.index()]`
    clips: [[DirectionalClips; 2]; 2],
}

impl AnimationTable {
    pub fn new(
        normal: DirectionalClips,
        attack: DirectionalClips,
        normal_flash: DirectionalClips,
        attack_flash: DirectionalClips,
    ) -> Self {
        Self {
            clips: [[normal, attack], [normal_flash, attack_flash]],
        }
    }

    pub fn get(&self, hit: bool, action: ActionState, direction: Direction) -> &AnimationClip {
        &self.clips[usize::from(hit)][action.index()][direction]
    }

    pub fn get_mut(
        &mut self,
        hit: bool,
        action: ActionState,
        direction: Direction,
    ) -> &mut AnimationClip {
        &mut self.clips[usize::from(hit)][action.index()][direction]
    }

    /// Rewind every hit-flash clip
    pub fn reset_flashing(&mut self) {
        for clips in &mut self.clips[1] {
            for clip in clips.values_mut() {
                clip.reset();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::sync::Arc;

    fn frames(count: u8) -> Vec<Image> {
        (0..count)
            .map(|i| Arc::new(RgbaImage::from_pixel(1, 1, Rgba([i, 0, 0, 255]))))
            .collect()
    }

    fn shade(image: &Image) -> u8 {
        image.get_pixel(0, 0)[0]
    }

    #[test]
    fn test_clip_creation() {
        let clip = AnimationClip::looping(frames(2), 8.0);
        assert_eq!(clip.frame_count(), 2);
        assert_eq!(clip.fps(), 8.0);
        assert_eq!(clip.loops(), Loops::Forever);
        assert_eq!(clip.total_duration(), None);
    }

    #[test]
    fn test_rate_reported_as_given() {
        for fps in [7.0, 20.0, 30.0] {
            assert_eq!(AnimationClip::looping(frames(1), fps).fps(), fps);
        }
    }

    #[test]
    #[should_panic]
    fn test_empty_clip_is_rejected() {
        AnimationClip::looping(Vec::new(), 7.0);
    }

    #[test]
    fn test_clock_starts_on_first_query() {
        let mut clip = AnimationClip::looping(frames(2), 10.0);
        assert_eq!(shade(clip.get_next_frame(100.0)), 0);
        assert_eq!(shade(clip.get_next_frame(100.05)), 0);
        assert_eq!(shade(clip.get_next_frame(100.15)), 1);
    }

    #[test]
    fn test_looping_wraps() {
        let mut clip = AnimationClip::looping(frames(3), 10.0);
        clip.get_next_frame(0.0);
        assert_eq!(shade(clip.get_next_frame(0.35)), 0); // 3.5 frames
        assert!(!clip.is_done());
    }

    #[test]
    fn test_catches_up_after_stall() {
        let mut clip = AnimationClip::looping(frames(4), 10.0);
        clip.get_next_frame(0.0);
        assert_eq!(shade(clip.get_next_frame(0.25)), 2);
        assert_eq!(shade(clip.get_next_frame(0.31)), 3);
    }

    #[test]
    fn test_finite_clip_finishes_on_last_frame() {
        let mut clip = AnimationClip::finite(frames(2), 20.0, 10);
        assert_eq!(clip.total_duration(), Some(1.0));

        clip.get_next_frame(0.0);
        clip.get_next_frame(0.5);
        assert!(!clip.is_done());

        clip.get_next_frame(1.2);
        assert!(clip.is_done());
        assert_eq!(clip.current_frame(), 1);
    }

    #[test]
    fn test_done_holds_until_reset() {
        let mut clip = AnimationClip::finite(frames(2), 20.0, 10);
        clip.get_next_frame(0.0);
        clip.get_next_frame(2.0);
        assert!(clip.is_done());

        clip.get_next_frame(5.0);
        assert!(clip.is_done());
        assert_eq!(clip.current_frame(), 1);

        clip.reset();
        assert!(!clip.is_done());
        assert_eq!(shade(clip.get_next_frame(6.0)), 0);
        assert!(!clip.is_done());
    }

    #[test]
    fn test_frame_index_stays_in_range() {
        let mut clip = AnimationClip::looping(frames(2), 7.0);
        clip.get_next_frame(0.0);
        for tick in 1..500 {
            clip.get_next_frame(tick as f32 * 0.016);
            assert!(clip.current_frame() < clip.frame_count());
        }
    }

    fn directional(count: u8) -> DirectionalClips {
        DirectionMap::from_fn(|_| AnimationClip::finite(frames(count), 20.0, 1))
    }

    #[test]
    fn test_table_lookup() {
        let table = AnimationTable::new(
            directional(1),
            directional(2),
            directional(3),
            directional(4),
        );
        assert_eq!(table.get(false, ActionState::Normal, Direction::Left).frame_count(), 1);
        assert_eq!(table.get(false, ActionState::Attack, Direction::Left).frame_count(), 2);
        assert_eq!(table.get(true, ActionState::Normal, Direction::Front).frame_count(), 3);
        assert_eq!(table.get(true, ActionState::Attack, Direction::Right).frame_count(), 4);
    }

    #[test]
    fn test_reset_flashing() {
        let mut table = AnimationTable::new(
            directional(2),
            directional(2),
            directional(2),
            directional(2),
        );
        for hit in [false, true] {
            let clip = table.get_mut(hit, ActionState::Attack, Direction::Back);
            clip.get_next_frame(0.0);
            clip.get_next_frame(1.0);
            assert!(clip.is_done());
        }

        table.reset_flashing();
        assert!(!table.get(true, ActionState::Attack, Direction::Back).is_done());
        assert!(table.get(false, ActionState::Attack, Direction::Back).is_done());
    }
}
