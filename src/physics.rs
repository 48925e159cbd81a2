//! Shared physics for every moving entity
//!
//! `PhysicsBody` is the piece the player and enemies have in common: position,
//! velocity, collision flags, facing and the current animation. Entity kinds wrap
//! a body and call `PhysicsBody::update` first, then react to the collision flags
//! it produced.
//!
//! # Per-frame update order
//!
//! 1. Clear collision flags
//! 2. `frame_velocity = velocity + movement` (movement is never stored)
//! 3. Face the direction of horizontal motion (unchanged when it is 0)
//! 4. Advance the animation one tick
//! 5. Move and resolve on X
//! 6. Move and resolve on Y
//! 7. Gravity with terminal velocity; vertical hits zero vertical velocity
//! 8. Horizontal friction toward 0
//!
//! Resolving each axis separately stops entities from snagging on tile corners.
//! Within an axis every overlapping tile rectangle re-places the entity, so when
//! several overlap the last one in the tilemap's neighbour order decides.

use crate::animation::{Animation, AnimationKey, AnimationLibrary};
use crate::collision::{Rect, aabb_intersect};
use crate::health::Health;
use crate::tile::Tilemap;
use crate::vector::{CollisionFlags, Vec2};
use serde::{Deserialize, Serialize};

/// Tunable constants of the physics step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to vertical velocity every frame (positive y is down)
    pub gravity: f32,
    /// Hard cap on falling speed
    pub terminal_velocity: f32,
    /// Horizontal velocity lost per frame
    pub friction: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            gravity: 0.1,
            terminal_velocity: 5.0,
            friction: 0.1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PhysicsBody {
    /// Top-left corner of the bounding box
    pub position: Vec2,
    pub size: Vec2,
    /// Persistent velocity (gravity, jumps, dashes)
    pub velocity: Vec2,
    pub collisions: CollisionFlags,
    /// `true` when facing left
    pub flip: bool,
    pub health: Health,
    frame_velocity: Vec2,
    animation_key: AnimationKey,
    animation: Animation,
    physics: PhysicsConfig,
}

impl PhysicsBody {
    pub fn new(
        position: Vec2,
        size: Vec2,
        animation_key: AnimationKey,
        animations: &AnimationLibrary,
        physics: PhysicsConfig,
    ) -> Self {
        PhysicsBody {
            position,
            size,
            velocity: Vec2::ZERO,
            collisions: CollisionFlags::new(),
            flip: false,
            health: Health::default(),
            frame_velocity: Vec2::ZERO,
            animation_key,
            animation: animations.instantiate(animation_key),
            physics,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    /// Velocity actually used this frame (persistent velocity + movement intent)
    pub fn frame_velocity(&self) -> Vec2 {
        self.frame_velocity
    }

    pub fn animation_key(&self) -> AnimationKey {
        self.animation_key
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    /// Switches animation. Re-selecting the current animation keeps its progress.
    pub fn set_animation(&mut self, key: AnimationKey, animations: &AnimationLibrary) {
        if key != self.animation_key {
            self.animation_key = key;
            self.animation = animations.instantiate(key);
        }
    }

    /// Runs one physics frame against `tilemap`.
    ///
    /// `movement` is this frame's intent (e.g. from held keys). It moves the body
    /// but does not carry over to the next frame.
    pub fn update(&mut self, tilemap: &Tilemap, movement: Vec2) {
        self.collisions.reset();
        self.frame_velocity = self.velocity + movement;
        self.update_facing();
        self.animation.advance();

        self.resolve_x(tilemap);
        self.resolve_y(tilemap);

        self.apply_gravity();
        self.apply_friction();
    }

    fn update_facing(&mut self) {
        if self.frame_velocity.x > 0.0 {
            self.flip = false;
        }
        if self.frame_velocity.x < 0.0 {
            self.flip = true;
        }
    }

    fn resolve_x(&mut self, tilemap: &Tilemap) {
        self.position.x += self.frame_velocity.x;
        let mut rect = self.rect();

        for tile_rect in tilemap.physics_rects_around(self.position) {
            if aabb_intersect(&rect, &tile_rect) {
                if self.frame_velocity.x > 0.0 {
                    rect.set_right(tile_rect.left());
                    self.collisions.right = true;
                }
                if self.frame_velocity.x < 0.0 {
                    rect.set_left(tile_rect.right());
                    self.collisions.left = true;
                }
                self.position.x = rect.x;
            }
        }
    }

    fn resolve_y(&mut self, tilemap: &Tilemap) {
        self.position.y += self.frame_velocity.y;
        let mut rect = self.rect();

        for tile_rect in tilemap.physics_rects_around(self.position) {
            if aabb_intersect(&rect, &tile_rect) {
                if self.frame_velocity.y > 0.0 {
                    rect.set_bottom(tile_rect.top());
                    self.collisions.down = true;
                }
                if self.frame_velocity.y < 0.0 {
                    rect.set_top(tile_rect.bottom());
                    self.collisions.up = true;
                }
                self.position.y = rect.y;
            }
        }
    }

    fn apply_gravity(&mut self) {
        self.velocity.y = (self.velocity.y + self.physics.gravity).min(self.physics.terminal_velocity);

        if self.collisions.down || self.collisions.up {
            self.velocity.y = 0.0;
        }
    }

    fn apply_friction(&mut self) {
        let friction = self.physics.friction;
        if self.velocity.x > 0.0 {
            self.velocity.x = (self.velocity.x - friction).max(0.0);
        } else {
            self.velocity.x = (self.velocity.x + friction).min(0.0);
        }
    }
}
