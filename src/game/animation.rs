//! Sprite Animation
//!
//! Animations are tick-driven: every game tick advances the elapsed-frame
//! counter by one, and the image shown is `frame / img_duration`. The image
//! sequences themselves live in the asset store; actors only carry the
//! counters plus a copy of the clip description.

use serde::{Serialize, Deserialize};

/// Animation category that selects which image sequence plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Action {
    #[default]
    Idle,
    Run,
    Jump,
    Shoot,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Idle, Action::Run, Action::Jump, Action::Shoot];

    /// Asset directory name for this action
    pub fn name(&self) -> &'static str {
        match self {
            Action::Idle => "idle",
            Action::Run => "run",
            Action::Jump => "jump",
            Action::Shoot => "shoot",
        }
    }

    fn slot(&self) -> usize {
        match self {
            Action::Idle => 0,
            Action::Run => 1,
            Action::Jump => 2,
            Action::Shoot => 3,
        }
    }
}

/// Immutable description of one image sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSpec {
    /// Number of images in the sequence
    pub frame_count: usize,
    /// Ticks each image stays on screen
    pub img_duration: u32,
    /// Wrap around at the end instead of holding the last image
    pub looping: bool,
}

impl AnimationSpec {
    pub const fn new(frame_count: usize, img_duration: u32, looping: bool) -> Self {
        Self { frame_count, img_duration, looping }
    }

    /// Length of one pass in ticks (empty clips count as one image)
    fn total_ticks(&self) -> u32 {
        self.img_duration.max(1) * self.frame_count.max(1) as u32
    }

    /// Same timing with a different image count (used once assets are known)
    pub fn with_frames(self, frame_count: usize) -> Self {
        Self { frame_count, ..self }
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::new(1, 5, true)
    }
}

/// Playback state for one actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    spec: AnimationSpec,
    /// Elapsed ticks since the clip started
    frame: u32,
}

impl Animation {
    pub fn new(spec: AnimationSpec) -> Self {
        Self { spec, frame: 0 }
    }

    /// Advance one tick
    pub fn update(&mut self) {
        let total = self.spec.total_ticks();
        if self.spec.looping {
            self.frame = (self.frame + 1) % total;
        } else {
            self.frame = (self.frame + 1).min(total - 1);
        }
    }

    /// Index of the image to draw
    pub fn image_index(&self) -> usize {
        (self.frame / self.spec.img_duration.max(1)) as usize
    }

    #[cfg(test)]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Non-looping clip reached its last tick
    #[cfg(test)]
    pub fn is_done(&self) -> bool {
        !self.spec.looping && self.frame + 1 >= self.spec.total_ticks()
    }
}

/// Clip descriptions for every action of one actor type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipTable {
    clips: [AnimationSpec; 4],
}

impl ClipTable {
    pub fn new(idle: AnimationSpec, run: AnimationSpec, jump: AnimationSpec, shoot: AnimationSpec) -> Self {
        Self { clips: [idle, run, jump, shoot] }
    }

    pub fn get(&self, action: Action) -> AnimationSpec {
        self.clips[action.slot()]
    }

    pub fn set(&mut self, action: Action, spec: AnimationSpec) {
        self.clips[action.slot()] = spec;
    }

    /// Player timings before image counts are known
    pub fn player() -> Self {
        Self::new(
            AnimationSpec::new(1, 6, true),
            AnimationSpec::new(1, 15, true),
            AnimationSpec::default(),
            AnimationSpec::default(),
        )
    }

    /// Enemy timings before image counts are known
    pub fn enemy() -> Self {
        Self::new(
            AnimationSpec::new(1, 6, true),
            AnimationSpec::new(1, 4, true),
            AnimationSpec::default(),
            AnimationSpec::default(),
        )
    }
}
