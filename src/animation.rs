//! Tick-driven animations and the library that hands them out
//!
//! Rendering owns the actual images; this module only tracks *which* image of an
//! animation is showing. Every entity owns its own `Animation` instance so two
//! enemies running the same animation stay independent.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKey {
    PlayerIdle,
    PlayerRun,
    PlayerJump,
    PlayerSlide,
    PlayerWallSlide,
    EnemyIdle,
    EnemyRun,
    ParticleDark,
}

fn default_loop() -> bool {
    true
}

/// Static description of one animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationData {
    /// Number of images in the strip
    pub frames: usize,
    /// Ticks each image stays on screen
    pub frame_duration: u32,
    #[serde(default = "default_loop")]
    pub loop_animation: bool,
}

impl AnimationData {
    pub fn new(frames: usize, frame_duration: u32, loop_animation: bool) -> Self {
        AnimationData {
            frames,
            frame_duration,
            loop_animation,
        }
    }
}

/// One running instance of an animation.
///
/// The internal counter advances once per tick. The visible image is
/// `counter / frame_duration`; looping animations wrap the counter while one-shot
/// animations stop on their last image.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    frames: usize,
    frame_duration: u32,
    loop_animation: bool,
    tick: u64,
    done: bool,
}

impl Animation {
    /// Zero frame counts or durations are treated as 1 so the image index is
    /// always defined.
    pub fn new(data: AnimationData) -> Self {
        Animation {
            frames: data.frames.max(1),
            frame_duration: data.frame_duration.max(1),
            loop_animation: data.loop_animation,
            tick: 0,
            done: false,
        }
    }

    /// Never zero; saturates for oversized definitions
    fn total_ticks(&self) -> u64 {
        (self.frames as u64).saturating_mul(u64::from(self.frame_duration))
    }

    /// Advance by one tick
    pub fn advance(&mut self) {
        if self.loop_animation {
            self.tick = (self.tick + 1) % self.total_ticks();
        } else {
            self.tick = (self.tick + 1).min(self.total_ticks() - 1);
            if self.tick >= self.total_ticks() - 1 {
                self.done = true;
            }
        }
    }

    /// Jump to an arbitrary point of the animation (wrapped into range)
    pub fn seek(&mut self, tick: u32) {
        self.tick = u64::from(tick) % self.total_ticks();
    }

    /// Index of the image to draw this tick
    pub fn current_frame(&self) -> usize {
        let image = self.tick / u64::from(self.frame_duration);
        usize::try_from(image).unwrap_or(usize::MAX).min(self.frames - 1)
    }

    pub fn frame_duration(&self) -> u32 {
        self.frame_duration
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// One-shot animations report `true` once their last image has been reached.
    /// Looping animations never finish.
    pub fn is_finished(&self) -> bool {
        self.done
    }
}

/// All animation definitions known to the game, keyed by `AnimationKey`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationLibrary {
    pub animations: HashMap<AnimationKey, AnimationData>,
}

impl Default for AnimationLibrary {
    fn default() -> Self {
        let animations = HashMap::from([
            (AnimationKey::PlayerIdle, AnimationData::new(22, 6, true)),
            (AnimationKey::PlayerRun, AnimationData::new(8, 4, true)),
            (AnimationKey::PlayerJump, AnimationData::new(1, 5, true)),
            (AnimationKey::PlayerSlide, AnimationData::new(1, 5, true)),
            (AnimationKey::PlayerWallSlide, AnimationData::new(1, 5, true)),
            (AnimationKey::EnemyIdle, AnimationData::new(16, 6, true)),
            (AnimationKey::EnemyRun, AnimationData::new(8, 4, true)),
            (AnimationKey::ParticleDark, AnimationData::new(4, 6, false)),
        ]);

        AnimationLibrary { animations }
    }
}

impl AnimationLibrary {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn data(&self, key: AnimationKey) -> Option<&AnimationData> {
        self.animations.get(&key)
    }

    /// Hand out a fresh, independently playing instance of `key`.
    ///
    /// Unknown keys fall back to a single still image so a missing definition
    /// never stops the game.
    pub fn instantiate(&self, key: AnimationKey) -> Animation {
        match self.animations.get(&key) {
            Some(data) => Animation::new(*data),
            None => {
                log::warn!("No animation defined for {:?}, using a still frame", key);
                Animation::new(AnimationData::new(1, 1, true))
            }
        }
    }

    /// Frame duration of `key`, or 1 if it is not defined
    pub fn frame_duration(&self, key: AnimationKey) -> u32 {
        self.data(key).map(|d| d.frame_duration.max(1)).unwrap_or(1)
    }
}
