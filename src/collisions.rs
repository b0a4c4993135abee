use crate::audio::SoundCue;
use crate::constants::*;
use crate::entities::{Asteroid, ExplosionEffect, ParticleKind};
use crate::game::World;
use crate::spawner::{spawn_particles, spawn_power_up, spawn_split_asteroids};
use crate::types::Vector2D;
use crate::upgrades::{PowerUpType, apply_power_up};
use log::debug;
use rand::Rng;

/// Elastic response between two overlapping asteroids. Returns the contact
/// midpoint when an impulse was applied, `None` when the pair does not
/// overlap or is already separating.
pub fn resolve_asteroid_pair(a: &mut Asteroid, b: &mut Asteroid, restitution: f64) -> Option<Vector2D> {
    let delta = b.position.sub(a.position);
    let distance = delta.length();
    let min_distance = a.radius + b.radius;
    if distance >= min_distance || distance == 0.0 {
        return None;
    }

    let normal = delta.scale(1.0 / distance);
    let closing = b.velocity.sub(a.velocity).dot(normal);
    if closing > 0.0 {
        return None;
    }

    let (mass_a, mass_b) = (a.mass(), b.mass());
    let impulse = -(1.0 + restitution) * closing / (1.0 / mass_a + 1.0 / mass_b);
    a.velocity = a.velocity.sub(normal.scale(impulse / mass_a));
    b.velocity = b.velocity.add(normal.scale(impulse / mass_b));

    // Push both bodies apart by half the overlap each so they cannot sink into one another.
    let correction = normal.scale((min_distance - distance) / 2.0);
    a.position = a.position.sub(correction);
    b.position = b.position.add(correction);

    Some(a.position.midpoint(b.position))
}

pub fn collide_asteroids(asteroids: &mut [Asteroid], restitution: f64) -> Vec<Vector2D> {
    let mut contacts = Vec::new();
    for i in 0..asteroids.len() {
        let (head, tail) = asteroids.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if let Some(contact) = resolve_asteroid_pair(a, b, restitution) {
                contacts.push(contact);
            }
        }
    }
    contacts
}

impl World {
    // Fixed order; each rule sees the stores as the previous one left them.
    pub fn resolve_collisions(&mut self, rng: &mut impl Rng) {
        self.collide_bullets_with_asteroids(rng);
        self.collide_ship_with_asteroids(rng);
        self.collide_bullets_with_ufos(rng);
        self.collide_ufo_bullets_with_ship(rng);
        self.collect_power_ups();
    }

    pub(crate) fn collide_bullets_with_asteroids(&mut self, rng: &mut impl Rng) {
        for i in (0..self.bullets.len()).rev() {
            let bullet_position = self.bullets[i].position;
            // A bullet destroys at most one asteroid.
            let hit = (0..self.asteroids.len())
                .rev()
                .find(|&j| bullet_position.distance(self.asteroids[j].position) < self.asteroids[j].radius);
            let Some(j) = hit else { continue };

            self.bullets.remove(i);
            let asteroid = self.asteroids.remove(j);

            spawn_particles(&mut self.particles, asteroid.position, ASTEROID_HIT_DEBRIS, ParticleKind::Debris, rng);
            spawn_particles(&mut self.particles, asteroid.position, ASTEROID_HIT_SPARKS, ParticleKind::Spark, rng);
            self.trigger_screen_shake(LIGHT_SHAKE_INTENSITY, LIGHT_SHAKE_FRAMES);
            self.trigger_freeze(LIGHT_FREEZE_FRAMES);
            self.emit(SoundCue::Explosion);
            self.award(SCORE_ASTEROID);

            if rng.gen_bool(POWER_UP_DROP_CHANCE) {
                self.power_ups.push(spawn_power_up(asteroid.position, rng));
            }
            self.asteroids.extend(spawn_split_asteroids(&asteroid, rng));
        }
    }

    pub(crate) fn collide_ship_with_asteroids(&mut self, rng: &mut impl Rng) {
        if self.game_over || self.has_power_up(PowerUpType::Shield) {
            return;
        }
        let ship_position = self.ship.position;
        let crashed = self
            .asteroids
            .iter()
            .any(|a| ship_position.distance(a.position) < a.radius + SHIP_SIZE / 2.0);
        // The asteroid survives the crash untouched.
        if crashed {
            self.damage_ship(rng);
        }
    }

    pub(crate) fn collide_bullets_with_ufos(&mut self, rng: &mut impl Rng) {
        for i in (0..self.bullets.len()).rev() {
            let bullet_position = self.bullets[i].position;
            let hit = self
                .ufos
                .iter()
                .position(|ufo| bullet_position.distance(ufo.position) < ufo.size());
            let Some(u) = hit else { continue };

            self.bullets.remove(i);
            self.emit(SoundCue::Explosion);
            let ufo = &mut self.ufos[u];
            ufo.health = ufo.health.saturating_sub(1);
            if ufo.health > 0 {
                continue;
            }

            let ufo = self.ufos.remove(u);
            debug!("Destroyed {:?} UFO", ufo.ufo_type);
            self.award(ufo.settings().points);
            self.explosions.push(ExplosionEffect::new(ufo.position, rng));
            spawn_particles(&mut self.particles, ufo.position, UFO_KILL_DEBRIS, ParticleKind::Debris, rng);
            spawn_particles(&mut self.particles, ufo.position, UFO_KILL_SPARKS, ParticleKind::Spark, rng);
            self.trigger_screen_shake(LIGHT_SHAKE_INTENSITY, LIGHT_SHAKE_FRAMES);
            self.trigger_freeze(LIGHT_FREEZE_FRAMES);
            if rng.gen_bool(UFO_POWER_UP_DROP_CHANCE) {
                self.power_ups.push(spawn_power_up(ufo.position, rng));
            }
        }
    }

    pub(crate) fn collide_ufo_bullets_with_ship(&mut self, rng: &mut impl Rng) {
        if self.game_over || self.has_power_up(PowerUpType::Shield) {
            return;
        }
        let ship_position = self.ship.position;
        let hit = self
            .ufo_bullets
            .iter()
            .position(|b| ship_position.distance(b.position) < SHIP_SIZE / 2.0 + UFO_BULLET_HIT_PADDING);
        if let Some(i) = hit {
            self.ufo_bullets.remove(i);
            self.damage_ship(rng);
        }
    }

    pub(crate) fn collect_power_ups(&mut self) {
        if self.game_over {
            return;
        }
        let ship_position = self.ship.position;
        let mut collected = Vec::new();
        self.power_ups.retain(|p| {
            let touching = ship_position.distance(p.position) < SHIP_SIZE / 2.0 + p.size;
            if touching {
                collected.push(p.power_up_type);
            }
            !touching
        });
        for power_up_type in collected {
            apply_power_up(&mut self.active_power_ups, power_up_type);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn still_asteroid(x: f64, y: f64, radius: f64) -> Asteroid {
        let mut rng = StdRng::seed_from_u64(11);
        Asteroid::new(Vector2D::new(x, y), Vector2D::ZERO, radius, &mut rng)
    }

    #[test]
    fn separating_pair_is_left_alone() {
        let mut a = still_asteroid(0.0, 0.0, 30.0);
        let mut b = still_asteroid(40.0, 0.0, 30.0);
        a.velocity = Vector2D::new(-1.0, 0.0);
        b.velocity = Vector2D::new(1.0, 0.0);
        assert!(resolve_asteroid_pair(&mut a, &mut b, ASTEROID_RESTITUTION).is_none());
        assert_eq!(a.position, Vector2D::new(0.0, 0.0));
    }

    #[test]
    fn overlap_is_split_evenly() {
        let mut a = still_asteroid(0.0, 0.0, 30.0);
        let mut b = still_asteroid(40.0, 0.0, 30.0);
        let contact = resolve_asteroid_pair(&mut a, &mut b, ASTEROID_RESTITUTION);
        assert!(contact.is_some());
        assert!((a.position.x + 10.0).abs() < 1e-9);
        assert!((b.position.x - 50.0).abs() < 1e-9);
    }

    #[test]
    fn momentum_is_conserved_for_unequal_masses() {
        let mut a = still_asteroid(0.0, 0.0, 40.0);
        let mut b = still_asteroid(50.0, 10.0, 20.0);
        a.velocity = Vector2D::new(2.0, 0.5);
        b.velocity = Vector2D::new(-3.0, 0.0);
        let before = a.velocity.scale(a.mass()).add(b.velocity.scale(b.mass()));
        resolve_asteroid_pair(&mut a, &mut b, ASTEROID_RESTITUTION).unwrap();
        let after = a.velocity.scale(a.mass()).add(b.velocity.scale(b.mass()));
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn every_pair_is_checked_once() {
        let mut asteroids = vec![
            still_asteroid(0.0, 0.0, 30.0),
            still_asteroid(50.0, 0.0, 30.0),
            still_asteroid(500.0, 500.0, 30.0),
        ];
        asteroids[0].velocity = Vector2D::new(1.0, 0.0);
        let contacts = collide_asteroids(&mut asteroids, ASTEROID_RESTITUTION);
        assert_eq!(contacts.len(), 1);
        assert_eq!(asteroids[2].position, Vector2D::new(500.0, 500.0));
    }
}
