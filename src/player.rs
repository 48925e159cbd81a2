use crate::animation::{AnimationKey, AnimationLibrary};
use crate::collision::{Collidable, Rect};
use crate::effects::{Particle, SoundEffect, dash_burst};
use crate::game::{FrameContext, PlayerSnapshot};
use crate::physics::{PhysicsBody, PhysicsConfig};
use crate::vector::Vec2;

pub const PLAYER_SIZE: Vec2 = Vec2::new(8.0, 15.0);

pub const MAX_JUMPS: u32 = 2;
const JUMP_VELOCITY: Vec2 = Vec2::new(0.0, -3.0);
/// Wall jump kick, pointing away from the wall the player is pressing into
const WALL_JUMP_VELOCITY: Vec2 = Vec2::new(2.5, -2.5);

/// Frames airborne before the player is considered lost
pub const MAX_AIR_TIME: u32 = 300;
const WALL_SLIDE_SPEED: f32 = 0.5;

/// Value the dash timer is set to when a dash starts
pub const DASH_MAX: u32 = 60;
/// Length of the fast phase at the top of the countdown
pub const DASH_DURATION: u32 = 12;
/// Timer value at which the fast phase ends
pub const DASH_DIFF: u32 = DASH_MAX - DASH_DURATION;
const DASH_SPEED: f32 = 8.0;
const DASH_END_DAMPING: f32 = 0.4;

/// The player character
///
/// Game Dev Pattern: Composition over inheritance
/// `Player` owns a `PhysicsBody` and runs its own rules *after* the shared
/// physics step, so everything below reads this frame's collision flags.
///
/// # State
/// - `airborne` / `air_time`: set when the feet leave the ground without touching
///   a wall; `air_time` counts frames and kills the player past `MAX_AIR_TIME`
/// - `jumps`: refilled on landing, spent by every successful jump
/// - `wall_sliding`: airborne while touching a side wall; recomputed each frame
/// - `dash_timer`: counts down from `DASH_MAX`; the top `DASH_DURATION` frames
///   are the fast phase
#[derive(Debug, Clone)]
pub struct Player {
    pub body: PhysicsBody,
    pub airborne: bool,
    pub air_time: u32,
    pub jumps: u32,
    pub max_jumps: u32,
    pub wall_sliding: bool,
    pub dash_timer: u32,
}

impl Player {
    pub fn new(position: Vec2, animations: &AnimationLibrary, physics: PhysicsConfig) -> Self {
        Player {
            body: PhysicsBody::new(position, PLAYER_SIZE, AnimationKey::PlayerIdle, animations, physics),
            airborne: true,
            air_time: 0,
            jumps: MAX_JUMPS,
            max_jumps: MAX_JUMPS,
            wall_sliding: false,
            dash_timer: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.body.health.is_alive()
    }

    /// True during the fast phase of a dash
    pub fn is_dashing(&self) -> bool {
        self.dash_timer > DASH_DIFF
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.body.position,
            bounds: self.bounds(),
            dash_timer: self.dash_timer,
        }
    }

    /// Jumps, wall-jumps, or does nothing. Returns whether a jump happened.
    ///
    /// While wall sliding the player can only kick off the wall, and only when
    /// pressing into it. Otherwise a jump needs a remaining jump.
    pub fn jump(&mut self, ctx: &mut FrameContext) -> bool {
        if self.wall_sliding {
            let frame_x = self.body.frame_velocity().x;
            if self.body.flip && frame_x < 0.0 {
                self.bump(ctx, WALL_JUMP_VELOCITY);
                true
            } else if !self.body.flip && frame_x > 0.0 {
                self.bump(ctx, Vec2::new(-WALL_JUMP_VELOCITY.x, WALL_JUMP_VELOCITY.y));
                true
            } else {
                false
            }
        } else if self.jumps > 0 {
            self.bump(ctx, JUMP_VELOCITY);
            true
        } else {
            false
        }
    }

    fn bump(&mut self, ctx: &mut FrameContext, velocity: Vec2) {
        ctx.effects.play(SoundEffect::Jump);
        self.airborne = true;
        self.jumps = self.jumps.saturating_sub(1);
        self.body.velocity = velocity;
    }

    /// Starts a dash unless one is already running
    pub fn dash(&mut self, ctx: &mut FrameContext) -> bool {
        if self.dash_timer > 0 {
            return false;
        }

        ctx.effects.play(SoundEffect::Dash);
        self.dash_timer = DASH_MAX;
        self.emit_dash_burst(ctx);
        log::debug!("Dash started at {:?}", self.body.position);
        true
    }

    pub fn update(&mut self, ctx: &mut FrameContext, movement: Vec2) {
        self.body.update(ctx.tilemap, movement);

        let collisions = self.body.collisions;
        if collisions.down {
            self.airborne = false;
            self.air_time = 0;
            self.jumps = self.max_jumps;
        } else if !collisions.horizontal() {
            self.airborne = true;
            self.air_time += 1;
        }

        if self.air_time > MAX_AIR_TIME {
            self.air_time = 0;
            self.body.health.kill();
            log::info!("Player fell for too long at {:?}", self.body.position);
        }

        self.wall_sliding = collisions.horizontal() && self.airborne;
        if self.wall_sliding {
            self.body.velocity.y = self.body.velocity.y.min(WALL_SLIDE_SPEED);
        }

        self.update_dash(ctx);
        self.update_animation(ctx.animations);
    }

    fn update_dash(&mut self, ctx: &mut FrameContext) {
        if self.dash_timer > 0 {
            self.dash_timer -= 1;
            if self.dash_timer == DASH_DIFF {
                self.emit_dash_burst(ctx);
            }
        }

        if self.dash_timer > DASH_DIFF {
            self.body.velocity.x = if self.body.flip { -DASH_SPEED } else { DASH_SPEED };
            if self.dash_timer == DASH_DIFF + 1 {
                self.body.velocity.x *= DASH_END_DAMPING;
            }

            // Trail
            let trail = Particle::with_random_start(
                AnimationKey::ParticleDark,
                self.body.rect().center(),
                self.body.velocity / 4.0,
                ctx.animations,
                ctx.rng,
            );
            ctx.effects.particles.push(trail);
        }
    }

    fn emit_dash_burst(&self, ctx: &mut FrameContext) {
        let burst = dash_burst(self.body.rect().center(), ctx.animations, ctx.rng);
        ctx.effects.particles.extend(burst);
    }

    fn update_animation(&mut self, animations: &AnimationLibrary) {
        let key = if self.wall_sliding {
            AnimationKey::PlayerWallSlide
        } else if self.airborne && self.air_time > animations.frame_duration(AnimationKey::PlayerIdle) {
            AnimationKey::PlayerJump
        } else if self.is_dashing() {
            AnimationKey::PlayerSlide
        } else if self.body.frame_velocity().x != 0.0 {
            AnimationKey::PlayerRun
        } else {
            AnimationKey::PlayerIdle
        };
        self.body.set_animation(key, animations);
    }
}

impl Collidable for Player {
    fn bounds(&self) -> Rect {
        self.body.rect()
    }
}
