// Shared per-frame types used by the entity update functions

use crate::animation::AnimationLibrary;
use crate::collision::Rect;
use crate::effects::Effects;
use crate::tile::Tilemap;
use crate::vector::Vec2;
use rand::RngCore;

/// Everything an entity may touch during its update besides itself.
///
/// The tilemap and animation library are read-only for the whole tick; effects
/// and the random source are the only shared things entities write to.
pub struct FrameContext<'a> {
    pub tilemap: &'a Tilemap,
    pub animations: &'a AnimationLibrary,
    pub effects: &'a mut Effects,
    pub rng: &'a mut dyn RngCore,
}

/// Buttons the player is holding (`left`/`right`) or pressed this frame (`jump`/`dash`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub dash: bool,
}

impl PlayerInput {
    /// Horizontal movement intent for this frame
    pub fn movement(&self, speed: f32) -> Vec2 {
        Vec2::new((self.right as i32 - self.left as i32) as f32 * speed, 0.0)
    }
}

/// What enemies are allowed to know about the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub position: Vec2,
    pub bounds: Rect,
    pub dash_timer: u32,
}
