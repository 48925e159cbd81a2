// GameWorld struct and the per-tick phase order
//
// The world owns every entity plus the tilemap they collide with. `tick` is the
// only place entity updates happen, and it always runs the phases in the same
// order so collision flags, projectiles and effects are seen consistently.

use crate::animation::{AnimationKey, AnimationLibrary};
use crate::effects::{Effects, HIT_SHAKE, SoundEffect, particle_burst, spark_burst, spark_spray};
use crate::enemy::{DASH_DAMAGE_THRESHOLD, Enemy};
use crate::physics::PhysicsConfig;
use crate::player::Player;
use crate::tile::{TileKind, Tilemap};
use crate::vector::Vec2;
use rand::rngs::StdRng;
use std::f32::consts::PI;

use super::{FrameContext, PlayerInput};

/// Spawner tile marking the player start
pub const PLAYER_SPAWNER: (TileKind, u32) = (TileKind::Spawners, 0);
/// Spawner tile marking an enemy
pub const ENEMY_SPAWNER: (TileKind, u32) = (TileKind::Spawners, 1);

const WALL_HIT_SPARKS: usize = 4;

/// GameWorld encapsulates all game entities and world state
pub struct GameWorld {
    pub tilemap: Tilemap,
    pub animations: AnimationLibrary,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub effects: Effects,
    player_speed: f32,
    rng: StdRng,
    frame: u64,
}

impl GameWorld {
    /// Builds a session from a level.
    ///
    /// Spawner tiles are removed from the map and replaced by entities: the
    /// player starts on the first player spawner, every enemy spawner gets an
    /// enemy. A level without a player spawner starts the player at the origin.
    pub fn new(mut tilemap: Tilemap, animations: AnimationLibrary, physics: PhysicsConfig, rng: StdRng) -> Self {
        let mut player_start = None;
        let mut enemies = Vec::new();

        for spawner in tilemap.extract(&[PLAYER_SPAWNER, ENEMY_SPAWNER], false) {
            if (spawner.kind, spawner.variant) == PLAYER_SPAWNER {
                player_start.get_or_insert(spawner.position);
            } else {
                enemies.push(Enemy::new(spawner.position, &animations, physics));
            }
        }

        let player_start = player_start.unwrap_or_else(|| {
            log::warn!("Level has no player spawner, starting at the origin");
            Vec2::ZERO
        });
        log::info!("Spawned player at {:?} and {} enemies", player_start, enemies.len());

        GameWorld {
            player: Player::new(player_start, &animations, physics),
            tilemap,
            animations,
            enemies,
            effects: Effects::new(),
            player_speed: 1.0,
            rng,
            frame: 0,
        }
    }

    pub fn with_player_speed(mut self, speed: f32) -> Self {
        self.player_speed = speed;
        self
    }

    /// Number of ticks run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn player_dead(&self) -> bool {
        !self.player.is_alive()
    }

    /// Advances the whole session by one frame.
    ///
    /// Phases: input actions, player, enemies, projectiles, particles and
    /// sparks, dead enemy removal, screen shake decay.
    pub fn tick(&mut self, input: &PlayerInput) {
        let mut ctx = FrameContext {
            tilemap: &self.tilemap,
            animations: &self.animations,
            effects: &mut self.effects,
            rng: &mut self.rng,
        };

        if input.jump {
            self.player.jump(&mut ctx);
        }
        if input.dash {
            self.player.dash(&mut ctx);
        }
        self.player.update(&mut ctx, input.movement(self.player_speed));

        let snapshot = self.player.snapshot();
        for enemy in self.enemies.iter_mut() {
            enemy.update(&mut ctx, &snapshot);
        }

        update_projectiles(&mut self.player, &mut ctx);
        ctx.effects.update_particles();
        ctx.effects.update_sparks();

        self.enemies.retain(|enemy| enemy.is_alive());
        self.effects.decay_shake();
        self.frame += 1;
    }
}

/// Moves projectiles and resolves what they hit.
///
/// A projectile disappears on a solid tile (with a few sparks thrown back), when
/// it gets too old, or when it hits the player outside the dash damage window.
fn update_projectiles(player: &mut Player, ctx: &mut FrameContext) {
    let mut projectiles = std::mem::take(&mut ctx.effects.projectiles);

    projectiles.retain_mut(|proj| {
        proj.update();

        if proj.hit_wall(ctx.tilemap) {
            let back = if proj.velocity.x > 0.0 { PI } else { 0.0 };
            ctx.effects
                .sparks
                .extend(spark_spray(proj.position, back, WALL_HIT_SPARKS, ctx.rng));
            return false;
        }
        if proj.is_expired() {
            return false;
        }

        if player.dash_timer < DASH_DAMAGE_THRESHOLD && player.body.rect().contains_point(proj.position) {
            let center = player.body.rect().center();
            ctx.effects.play(SoundEffect::Hit);
            ctx.effects.shake(HIT_SHAKE);
            ctx.effects.sparks.extend(spark_burst(center, ctx.rng));
            ctx.effects
                .particles
                .extend(particle_burst(AnimationKey::ParticleDark, center, ctx.animations, ctx.rng));

            player.body.health.reduce(1);
            log::info!("Player hit by projectile at {:?}", proj.position);
            return false;
        }

        true
    });

    ctx.effects.projectiles = projectiles;
}
