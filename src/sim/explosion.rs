//! Explosion particles
//!
//! Particles fly at constant velocity, shrink geometrically and die after a
//! fixed number of ticks. Removal is lifetime-gated only.

use glam::Vec3;
use rand::Rng;

use super::state::{Explosion, Particle};
use crate::tuning::Tuning;

impl Explosion {
    /// Burst of `tuning.explosion_particles` particles at `origin`
    pub fn spawn<R: Rng + ?Sized>(id: u32, origin: Vec3, tuning: &Tuning, rng: &mut R) -> Self {
        let speed = tuning.particle_speed;
        let particles = (0..tuning.explosion_particles)
            .map(|_| Particle {
                pos: origin,
                vel: Vec3::new(
                    rng.random_range(-speed..=speed),
                    rng.random_range(-speed..=speed),
                    rng.random_range(-speed..=speed),
                ),
                size: tuning.particle_size,
                lifetime: tuning.particle_lifetime,
            })
            .collect();
        Self { id, particles }
    }

    /// Age every particle by one tick and drop expired ones.
    /// Returns false once the explosion has no particles left.
    pub fn step(&mut self, shrink: f32) -> bool {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.lifetime -= 1;
            particle.size *= shrink;
        }
        self.particles.retain(|p| p.lifetime > 0);
        !self.particles.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Age all explosions; finished ones are removed in the same call
pub fn age_explosions(explosions: &mut Vec<Explosion>, shrink: f32) {
    explosions.retain_mut(|explosion| explosion.step(shrink));
}
