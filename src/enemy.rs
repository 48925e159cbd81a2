//! Wandering, shooting enemy
//!
//! An enemy idles until a 1-in-100 roll per frame starts a walk of 30 to 120
//! frames. While walking it turns around at ledges and walls. When the walk ends
//! and the player is roughly level with it, it fires a projectile if it happens
//! to be facing the player.
//!
//! The only way to hurt an enemy is to dash through it.

use crate::animation::{AnimationKey, AnimationLibrary};
use crate::collision::{Collidable, Rect};
use crate::effects::{
    HIT_SHAKE, Projectile, SoundEffect, particle_burst, spark_burst, spark_line, spark_spray,
};
use crate::game::{FrameContext, PlayerSnapshot};
use crate::physics::{PhysicsBody, PhysicsConfig};
use crate::vector::Vec2;
use rand::Rng;
use std::f32::consts::PI;

pub const ENEMY_SIZE: Vec2 = Vec2::new(8.0, 15.0);

const WALK_SPEED: f32 = 0.5;
const WALK_START_CHANCE: f64 = 0.01;
const WALK_MIN_FRAMES: u32 = 30;
const WALK_MAX_FRAMES: u32 = 120;

/// Ledge probe: horizontal offset from the body's center, vertical offset from its top
const LEDGE_PROBE: Vec2 = Vec2::new(7.0, 23.0);

/// The player must be within this many pixels vertically to be shot at
const SHOOT_RANGE_Y: f32 = 16.0;
const MUZZLE_OFFSET: f32 = 7.0;
const PROJECTILE_SPEED: f32 = 1.5;

/// Dash timer value from which a dashing player damages enemies
pub const DASH_DAMAGE_THRESHOLD: u32 = 50;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: PhysicsBody,
    /// Frames of walking left; 0 means standing still
    pub walk_timer: u32,
}

impl Enemy {
    pub fn new(position: Vec2, animations: &AnimationLibrary, physics: PhysicsConfig) -> Self {
        Enemy {
            body: PhysicsBody::new(position, ENEMY_SIZE, AnimationKey::EnemyIdle, animations, physics),
            walk_timer: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.body.health.is_alive()
    }

    /// Runs one frame: AI, then physics, then animation, then the dash-hit check
    pub fn update(&mut self, ctx: &mut FrameContext, player: &PlayerSnapshot) {
        let mut movement = Vec2::ZERO;

        if self.walk_timer > 0 {
            movement.x += self.walk_step(ctx);
            self.count_down_walk(ctx, player);
        } else if ctx.rng.gen_bool(WALK_START_CHANCE) {
            self.walk_timer = ctx.rng.gen_range(WALK_MIN_FRAMES..=WALK_MAX_FRAMES);
        }

        self.body.update(ctx.tilemap, movement);
        self.update_animation(ctx.animations);
        self.check_dash_hit(ctx, player);
    }

    fn facing_sign(&self) -> f32 {
        if self.body.flip { -1.0 } else { 1.0 }
    }

    /// Turns around at ledges and walls and returns this frame's horizontal push.
    ///
    /// Reads the collision flags left by the previous frame's physics step.
    fn walk_step(&mut self, ctx: &FrameContext) -> f32 {
        let probe = Vec2::new(
            self.body.rect().center().x + LEDGE_PROBE.x * self.facing_sign(),
            self.body.position.y + LEDGE_PROBE.y,
        );
        if ctx.tilemap.solid_check(probe).is_none() {
            self.body.flip = !self.body.flip;
        }

        let collisions = self.body.collisions;
        if !collisions.right || collisions.left {
            WALK_SPEED * self.facing_sign()
        } else {
            self.body.flip = !self.body.flip;
            0.0
        }
    }

    fn count_down_walk(&mut self, ctx: &mut FrameContext, player: &PlayerSnapshot) {
        self.walk_timer = self.walk_timer.saturating_sub(1);

        if self.walk_timer == 0 {
            let diff = player.position - self.body.position;
            if diff.y.abs() < SHOOT_RANGE_Y {
                self.shoot(ctx, diff);
            }
        }
    }

    /// Fires toward the player, but only when already facing their side
    fn shoot(&mut self, ctx: &mut FrameContext, diff: Vec2) {
        let facing_player = (self.body.flip && diff.x < 0.0) || (!self.body.flip && diff.x > 0.0);
        if !facing_player {
            return;
        }

        let center = self.body.rect().center();
        let sign = self.facing_sign();
        let muzzle = Vec2::new(center.x + MUZZLE_OFFSET * sign, center.y);

        ctx.effects
            .projectiles
            .push(Projectile::new(muzzle, Vec2::new(PROJECTILE_SPEED * sign, 0.0)));
        let angle = if self.body.flip { PI } else { 0.0 };
        ctx.effects.sparks.extend(spark_spray(muzzle, angle, 4, ctx.rng));
        ctx.effects.play(SoundEffect::Shoot);

        log::debug!("Enemy at {:?} fired toward {:?}", self.body.position, diff);
    }

    fn update_animation(&mut self, animations: &AnimationLibrary) {
        let key = if self.body.frame_velocity().x != 0.0 {
            AnimationKey::EnemyRun
        } else {
            AnimationKey::EnemyIdle
        };
        self.body.set_animation(key, animations);
    }

    fn check_dash_hit(&mut self, ctx: &mut FrameContext, player: &PlayerSnapshot) {
        if player.dash_timer < DASH_DAMAGE_THRESHOLD || !self.collides_with(&player.bounds) {
            return;
        }

        let center = self.body.rect().center();
        ctx.effects.play(SoundEffect::Hit);
        ctx.effects.shake(HIT_SHAKE);
        ctx.effects.sparks.extend(spark_burst(center, ctx.rng));
        ctx.effects
            .particles
            .extend(particle_burst(AnimationKey::ParticleDark, center, ctx.animations, ctx.rng));
        ctx.effects.sparks.push(spark_line(self.body.position, 0.0));
        ctx.effects.sparks.push(spark_line(self.body.position, PI));

        self.body.health.reduce(1);
        if !self.is_alive() {
            log::info!("Enemy killed at {:?}", self.body.position);
        }
    }
}

impl Collidable for Enemy {
    fn bounds(&self) -> Rect {
        self.body.rect()
    }
}
