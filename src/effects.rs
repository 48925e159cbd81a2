/// Short-lived gameplay objects: projectiles, particles, sparks and sound cues
///
/// Game Dev Pattern: Effect Sinks
/// Entities never own the effects they cause. They append to the collections in
/// `Effects`, which the game session updates (and the renderer draws) in
/// insertion order. Sounds are queued the same way so the audio layer can play
/// them after the frame.
use crate::animation::{Animation, AnimationKey, AnimationLibrary};
use crate::tile::Tilemap;
use crate::vector::Vec2;
use rand::{Rng, RngCore};
use std::f32::consts::{PI, TAU};

/// Ticks a projectile survives before despawning
pub const PROJECTILE_LIFETIME: u32 = 360;

/// Screen shake applied when something takes a hit
pub const HIT_SHAKE: u32 = 16;

const BURST_SPARKS: usize = 30;
const BURST_PARTICLES: usize = 30;
pub const DASH_BURST_PARTICLES: usize = 20;
const SPARK_DECAY: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Jump,
    Dash,
    Hit,
    Shoot,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    pub velocity: Vec2,
    pub age: u32,
}

impl Projectile {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Projectile {
            position,
            velocity,
            age: 0,
        }
    }

    pub fn update(&mut self) {
        self.position += self.velocity;
        self.age += 1;
    }

    pub fn is_expired(&self) -> bool {
        self.age > PROJECTILE_LIFETIME
    }

    /// True when the projectile is inside a physics tile
    pub fn hit_wall(&self, tilemap: &Tilemap) -> bool {
        tilemap.solid_check(self.position).is_some()
    }
}

/// A drifting animated particle that disappears when its animation ends
#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: AnimationKey,
    pub position: Vec2,
    pub velocity: Vec2,
    animation: Animation,
}

impl Particle {
    pub fn new(kind: AnimationKey, position: Vec2, velocity: Vec2, animations: &AnimationLibrary) -> Self {
        Particle {
            kind,
            position,
            velocity,
            animation: animations.instantiate(kind),
        }
    }

    /// Same as `new`, but starting somewhere in the first 8 ticks of the
    /// animation so groups of particles don't pulse in sync.
    pub fn with_random_start(
        kind: AnimationKey,
        position: Vec2,
        velocity: Vec2,
        animations: &AnimationLibrary,
        rng: &mut dyn RngCore,
    ) -> Self {
        let mut particle = Particle::new(kind, position, velocity, animations);
        particle.animation.seek(rng.gen_range(0..8));
        particle
    }

    /// Moves the particle and returns `true` once it should be removed
    pub fn update(&mut self) -> bool {
        self.position += self.velocity;
        self.animation.advance();
        self.animation.is_finished()
    }

    pub fn current_frame(&self) -> usize {
        self.animation.current_frame()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub position: Vec2,
    pub angle: f32,
    pub speed: f32,
}

impl Spark {
    pub fn new(position: Vec2, angle: f32, speed: f32) -> Self {
        Spark {
            position,
            angle,
            speed,
        }
    }

    /// Moves along `angle` while slowing down. Returns `true` once stopped.
    pub fn update(&mut self) -> bool {
        self.position += Vec2::new(self.angle.cos(), self.angle.sin()) * self.speed;
        self.speed = (self.speed - SPARK_DECAY).max(0.0);
        self.speed <= 0.0
    }
}

/// Sparks flying out in every direction
pub fn spark_burst(center: Vec2, rng: &mut dyn RngCore) -> Vec<Spark> {
    (0..BURST_SPARKS)
        .map(|_| Spark::new(center, rng.gen_range(0.0..TAU), 2.0 + rng.gen_range(0.0..1.0)))
        .collect()
}

/// A single fast spark along `angle`
pub fn spark_line(position: Vec2, angle: f32) -> Spark {
    Spark::new(position, angle, 5.0)
}

/// `count` sparks fanning out around `angle`
pub fn spark_spray(position: Vec2, angle: f32, count: usize, rng: &mut dyn RngCore) -> Vec<Spark> {
    (0..count)
        .map(|_| {
            Spark::new(
                position,
                angle + rng.gen_range(-0.5..0.5),
                2.0 + rng.gen_range(0.0..1.0),
            )
        })
        .collect()
}

fn radial_particles(
    count: usize,
    kind: AnimationKey,
    center: Vec2,
    animations: &AnimationLibrary,
    rng: &mut dyn RngCore,
) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(0.0..5.0);
            let velocity = Vec2::new((angle + PI).cos(), (angle + PI).sin()) * speed * 0.5;
            Particle::with_random_start(kind, center, velocity, animations, rng)
        })
        .collect()
}

/// Particles thrown outward from `center` (hit effect)
pub fn particle_burst(
    kind: AnimationKey,
    center: Vec2,
    animations: &AnimationLibrary,
    rng: &mut dyn RngCore,
) -> Vec<Particle> {
    radial_particles(BURST_PARTICLES, kind, center, animations, rng)
}

/// The smaller puff marking the start and end of a dash
pub fn dash_burst(center: Vec2, animations: &AnimationLibrary, rng: &mut dyn RngCore) -> Vec<Particle> {
    radial_particles(DASH_BURST_PARTICLES, AnimationKey::ParticleDark, center, animations, rng)
}

/// Session-owned effect collections, appended to by entities
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub sparks: Vec<Spark>,
    pub sounds: Vec<SoundEffect>,
    /// Remaining frames of screen shake
    pub screen_shake: u32,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self, sound: SoundEffect) {
        self.sounds.push(sound);
    }

    /// Takes the queued sounds, oldest first
    pub fn drain_sounds(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.sounds)
    }

    /// Keeps the stronger of the current and requested shake
    pub fn shake(&mut self, frames: u32) {
        self.screen_shake = self.screen_shake.max(frames);
    }

    pub fn decay_shake(&mut self) {
        self.screen_shake = self.screen_shake.saturating_sub(1);
    }

    pub fn update_particles(&mut self) {
        self.particles.retain_mut(|particle| !particle.update());
    }

    pub fn update_sparks(&mut self) {
        self.sparks.retain_mut(|spark| !spark.update());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_spark_slows_and_expires() {
        let mut spark = Spark::new(Vec2::ZERO, 0.0, 0.25);

        assert!(!spark.update());
        assert!(spark.position.x > 0.0);
        assert!(!spark.update());
        assert!(spark.update());
    }

    #[test]
    fn test_particle_expires_with_animation() {
        let library = AnimationLibrary::default();
        let mut effects = Effects::new();
        effects.particles.push(Particle::new(
            AnimationKey::ParticleDark,
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            &library,
        ));

        // particle_dark: 4 images x 6 ticks, one-shot
        for _ in 0..22 {
            effects.update_particles();
        }
        assert_eq!(effects.particles.len(), 1);
        assert_eq!(effects.particles[0].position.x, 22.0);

        effects.update_particles();
        assert!(effects.particles.is_empty());
    }

    #[test]
    fn test_projectile_lifetime_and_wall_hit() {
        let mut map = Tilemap::new(16);
        map.place_at_pixel(crate::tile::TileKind::Stone, 0, Vec2::new(40.0, 0.0));

        let mut proj = Projectile::new(Vec2::new(20.0, 4.0), Vec2::new(1.5, 0.0));
        proj.update();
        assert!(!proj.hit_wall(&map));
        for _ in 0..8 {
            proj.update();
        }
        assert!(proj.hit_wall(&map));

        proj.age = PROJECTILE_LIFETIME;
        assert!(!proj.is_expired());
        proj.update();
        assert!(proj.is_expired());
    }

    #[test]
    fn test_shake_keeps_maximum_and_decays() {
        let mut effects = Effects::new();
        effects.shake(HIT_SHAKE);
        effects.shake(4);
        assert_eq!(effects.screen_shake, 16);

        effects.decay_shake();
        assert_eq!(effects.screen_shake, 15);

        effects.screen_shake = 0;
        effects.decay_shake();
        assert_eq!(effects.screen_shake, 0);
    }

    #[test]
    fn test_sounds_drain_in_order() {
        let mut effects = Effects::new();
        effects.play(SoundEffect::Jump);
        effects.play(SoundEffect::Hit);

        assert_eq!(effects.drain_sounds(), vec![SoundEffect::Jump, SoundEffect::Hit]);
        assert!(effects.sounds.is_empty());
    }

    #[test]
    fn test_burst_sizes() {
        let library = AnimationLibrary::default();
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(spark_burst(Vec2::ZERO, &mut rng).len(), 30);
        assert_eq!(particle_burst(AnimationKey::ParticleDark, Vec2::ZERO, &library, &mut rng).len(), 30);
        assert_eq!(dash_burst(Vec2::ZERO, &library, &mut rng).len(), DASH_BURST_PARTICLES);
    }
}
