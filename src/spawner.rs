use crate::constants::*;
use crate::entities::{Asteroid, Particle, ParticleKind, Ship, Ufo, UfoType};
use crate::types::Vector2D;
use crate::upgrades::{PowerUp, PowerUpType};
use log::debug;
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, PI};

const LEVEL_SPAWN_MAX_ATTEMPTS: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub fn random(rng: &mut impl Rng) -> Edge {
        match rng.gen_range(0..4) {
            0 => Edge::Top,
            1 => Edge::Right,
            2 => Edge::Bottom,
            _ => Edge::Left,
        }
    }

    pub fn inward_angle(self) -> f64 {
        match self {
            Edge::Top => FRAC_PI_2,
            Edge::Right => PI,
            Edge::Bottom => -FRAC_PI_2,
            Edge::Left => 0.0,
        }
    }

    pub fn point_outside(self, width: f64, height: f64, offset: f64, rng: &mut impl Rng) -> Vector2D {
        match self {
            Edge::Top => Vector2D::new(rng.gen_range(0.0..width), -offset),
            Edge::Right => Vector2D::new(width + offset, rng.gen_range(0.0..height)),
            Edge::Bottom => Vector2D::new(rng.gen_range(0.0..width), height + offset),
            Edge::Left => Vector2D::new(-offset, rng.gen_range(0.0..height)),
        }
    }
}

// --- Asteroids ---

// 15% fast, 20% slow, 65% normal.
pub fn asteroid_speed_multiplier(rng: &mut impl Rng) -> f64 {
    let range = ASTEROID_SPEED_MAX - ASTEROID_SPEED_MIN;
    let roll = rng.gen_range(0.0..1.0);
    let fraction = if roll < FAST_ASTEROID_CHANCE {
        rng.gen_range(0.7..1.0)
    } else if roll < SLOW_ASTEROID_CUTOFF {
        rng.gen_range(0.0..0.4)
    } else {
        rng.gen_range(0.3..0.8)
    };
    ASTEROID_SPEED_MIN + range * fraction
}

pub fn spawn_edge_asteroid(width: f64, height: f64, rng: &mut impl Rng) -> Asteroid {
    let radius = ASTEROID_SIZE / 2.0;
    let edge = Edge::random(rng);
    let position = edge.point_outside(width, height, radius, rng);
    let heading = edge.inward_angle() + rng.gen_range(-0.5..0.5) * EDGE_HEADING_SPREAD;
    let speed = ASTEROID_SPEED * asteroid_speed_multiplier(rng);
    Asteroid::new(position, Vector2D::from_angle(heading, speed), radius, rng)
}

pub fn spawn_split_asteroids(parent: &Asteroid, rng: &mut impl Rng) -> Vec<Asteroid> {
    if !parent.can_split() {
        return Vec::new();
    }
    let radius = parent.radius * ASTEROID_SPLIT_RATIO;
    // Smaller fragments move faster.
    let size_speed_bonus = f64::max(1.0, (ASTEROID_SIZE / 2.0) / radius * 0.3);

    (0..ASTEROID_SPLIT_CHILDREN)
        .map(|_| {
            let heading = rng.gen_range(0.0..2.0 * PI);
            let multiplier = if rng.gen_bool(FAST_FRAGMENT_CHANCE) {
                rng.gen_range(0.8..1.5)
            } else {
                rng.gen_range(0.4..1.0)
            };
            let speed = ASTEROID_SPEED * multiplier * size_speed_bonus;
            Asteroid::new(parent.position, Vector2D::from_angle(heading, speed), radius, rng)
        })
        .collect()
}

pub fn level_speed_multiplier(level: u32) -> f64 {
    1.0 + level.saturating_sub(1) as f64 * 0.2
}

pub fn level_size_multiplier(level: u32) -> f64 {
    f64::max(0.8, 1.2 - level.saturating_sub(1) as f64 * 0.1)
}

pub fn spawn_level_asteroid(
    level: u32,
    ship_position: Vector2D,
    width: f64,
    height: f64,
    rng: &mut impl Rng,
) -> Asteroid {
    let position = safe_point(ship_position, width, height, rng);
    let heading = rng.gen_range(0.0..2.0 * PI);
    let speed = ASTEROID_SPEED
        * asteroid_speed_multiplier(rng)
        * level_speed_multiplier(level)
        * rng.gen_range(0.8..1.2);
    let radius = ASTEROID_SIZE * level_size_multiplier(level) * rng.gen_range(0.8..1.2);
    Asteroid::new(position, Vector2D::from_angle(heading, speed), radius, rng)
}

// Rejection sampling; the farthest corner is the fallback on a tiny field.
fn safe_point(ship_position: Vector2D, width: f64, height: f64, rng: &mut impl Rng) -> Vector2D {
    for _ in 0..LEVEL_SPAWN_MAX_ATTEMPTS {
        let candidate = Vector2D::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
        if candidate.distance(ship_position) >= LEVEL_SPAWN_SAFE_DISTANCE {
            return candidate;
        }
    }
    [
        Vector2D::new(0.0, 0.0),
        Vector2D::new(width, 0.0),
        Vector2D::new(0.0, height),
        Vector2D::new(width, height),
    ]
    .into_iter()
    .fold(Vector2D::ZERO, |best, corner| {
        if corner.distance(ship_position) > best.distance(ship_position) {
            corner
        } else {
            best
        }
    })
}

// --- UFOs ---

pub fn small_ufo_chance(level: u32) -> f64 {
    if level < UFO_SMALL_CHANCE_LEVEL {
        UFO_SMALL_CHANCE_BASE
    } else {
        let steps = (level - UFO_SMALL_CHANCE_LEVEL + 1) as f64;
        (UFO_SMALL_CHANCE_BASE + steps * UFO_SMALL_CHANCE_STEP).min(UFO_SMALL_CHANCE_MAX)
    }
}

pub fn pick_ufo_type(level: u32, rng: &mut impl Rng) -> UfoType {
    if rng.gen_bool(small_ufo_chance(level)) {
        UfoType::Small
    } else {
        UfoType::Large
    }
}

pub fn spawn_ufo(level: u32, ship: &Ship, width: f64, height: f64, rng: &mut impl Rng) -> Ufo {
    let ufo_type = pick_ufo_type(level, rng);
    let edge = Edge::random(rng);
    let position = edge.point_outside(width, height, ufo_type.settings().size, rng);
    let ufo = Ufo::new(position, ufo_type, position.angle_to(ship.position));
    debug!("Spawned {:?} UFO at ({:.0}, {:.0})", ufo_type, position.x, position.y);
    ufo
}

// --- Power-ups ---

pub fn spawn_power_up(position: Vector2D, rng: &mut impl Rng) -> PowerUp {
    let power_up_type = PowerUpType::ALL[rng.gen_range(0..PowerUpType::ALL.len())];
    let velocity = Vector2D::new(
        rng.gen_range(-POWER_UP_DRIFT..POWER_UP_DRIFT),
        rng.gen_range(-POWER_UP_DRIFT..POWER_UP_DRIFT),
    );
    debug!("Dropped {:?} power-up", power_up_type);
    PowerUp::new(position, velocity, power_up_type)
}

// --- Particles ---

// Requests beyond `MAX_PARTICLES` are dropped.
pub fn spawn_particles(
    particles: &mut Vec<Particle>,
    position: Vector2D,
    count: usize,
    kind: ParticleKind,
    rng: &mut impl Rng,
) {
    let (min_size, max_size) = kind.size_range();
    let (min_life, max_life) = kind.life_range();
    let (min_speed, max_speed) = kind.speed_range();

    for _ in 0..count {
        if particles.len() >= MAX_PARTICLES {
            break;
        }
        let origin = position.add(Vector2D::new(
            rng.gen_range(-PARTICLE_JITTER..=PARTICLE_JITTER),
            rng.gen_range(-PARTICLE_JITTER..=PARTICLE_JITTER),
        ));
        let velocity = Vector2D::from_angle(rng.gen_range(0.0..2.0 * PI), rng.gen_range(min_speed..max_speed));
        particles.push(Particle::new(
            origin,
            velocity,
            kind,
            rng.gen_range(min_size..=max_size),
            rng.gen_range(min_life..=max_life),
        ));
    }
}
