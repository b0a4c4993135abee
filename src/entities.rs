use crate::constants::*;
use crate::types::{Vector2D, is_outside, wrap_position};
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, PI};

// --- Ship ---
#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub rotation: f64, // Radians, 0 points right
    pub rotation_velocity: f64,
    pub thrusting: bool,
}

impl Ship {
    pub fn new(x: f64, y: f64) -> Self {
        Ship {
            position: Vector2D::new(x, y),
            velocity: Vector2D::ZERO,
            rotation: 0.0,
            rotation_velocity: 0.0,
            thrusting: false,
        }
    }

    pub fn heading(&self) -> Vector2D {
        Vector2D::from_angle(self.rotation, 1.0)
    }

    pub fn nose(&self) -> Vector2D {
        self.position.add(self.heading().scale(SHIP_SIZE))
    }

    pub fn tail(&self) -> Vector2D {
        self.position.sub(self.heading().scale(SHIP_SIZE))
    }

    // `direction` is -1 for left, +1 for right. The hull is pushed opposite to the turn.
    pub fn rotate(&mut self, direction: f64) {
        self.rotation_velocity += ROTATION_SPEED * direction;
        let side_force_angle = self.rotation - FRAC_PI_2 * direction;
        self.velocity = self
            .velocity
            .add(Vector2D::from_angle(side_force_angle, RCS_SIDE_THRUST));
    }

    pub fn thrust(&mut self) {
        self.thrusting = true;
        self.velocity = self
            .velocity
            .add(self.heading().scale(SHIP_SPEED * SHIP_THRUST_FACTOR));
    }

    pub fn update(&mut self, width: f64, height: f64) {
        self.rotation_velocity = self
            .rotation_velocity
            .clamp(-MAX_ROTATION_SPEED, MAX_ROTATION_SPEED);
        self.rotation_velocity *= ROTATION_FRICTION;
        self.rotation += self.rotation_velocity;

        self.velocity = self.velocity.scale(FRICTION);
        self.position = self.position.add(self.velocity);

        self.position = wrap_position(self.position, width, height, 0.0);
    }

    pub fn reset_to(&mut self, x: f64, y: f64) {
        self.position = Vector2D::new(x, y);
        self.velocity = Vector2D::ZERO;
        self.rotation_velocity = 0.0;
    }
}

// --- Bullet ---
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl Bullet {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Bullet { position, velocity }
    }

    pub fn fired_from(ship: &Ship, angle: f64) -> Self {
        Bullet::new(
            ship.nose(),
            Vector2D::from_angle(angle, BULLET_SPEED).add(ship.velocity),
        )
    }

    pub fn update(&mut self) {
        self.position = self.position.add(self.velocity);
    }

    pub fn is_off_screen(&self, width: f64, height: f64) -> bool {
        is_outside(self.position, width, height, 0.0)
    }
}

// --- Asteroid ---
#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub radius: f64,
    pub angle: f64,
    pub vertices: Vec<Vector2D>, // Fixed outline, offsets from the centre
}

impl Asteroid {
    pub fn new(position: Vector2D, velocity: Vector2D, radius: f64, rng: &mut impl Rng) -> Self {
        Asteroid {
            position,
            velocity,
            radius,
            angle: rng.gen_range(0.0..2.0 * PI),
            vertices: jagged_outline(radius, rng),
        }
    }

    pub fn mass(&self) -> f64 {
        self.radius * self.radius * ASTEROID_DENSITY
    }

    pub fn can_split(&self) -> bool {
        self.radius > ASTEROID_SPLIT_THRESHOLD
    }

    pub fn update(&mut self, width: f64, height: f64) {
        self.position = self.position.add(self.velocity);
        self.position = wrap_position(self.position, width, height, self.radius);
        self.angle += ASTEROID_SPIN;
    }
}

pub fn jagged_outline(radius: f64, rng: &mut impl Rng) -> Vec<Vector2D> {
    let angle_step = 2.0 * PI / ASTEROID_VERTICES as f64;
    (0..ASTEROID_VERTICES)
        .map(|i| {
            let jag = 1.0 - ASTEROID_JAG / 2.0 + rng.gen_range(0.0..ASTEROID_JAG);
            Vector2D::from_angle(angle_step * i as f64, radius * jag)
        })
        .collect()
}

// --- UFO ---
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UfoType {
    Small,
    Large,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UfoSettings {
    pub size: f64,
    pub health: u32,
    pub speed: f64,
    pub shoot_cooldown: u32,
    pub change_direction_interval: u32,
    pub points: u32,
    pub accuracy: f64, // Max aim error in radians
}

impl UfoType {
    pub fn settings(self) -> UfoSettings {
        match self {
            UfoType::Large => UfoSettings {
                size: 25.0,
                health: 3,
                speed: 1.5,
                shoot_cooldown: 120,
                change_direction_interval: 180,
                points: 200,
                accuracy: 0.35,
            },
            UfoType::Small => UfoSettings {
                size: 15.0,
                health: 1,
                speed: 2.5,
                shoot_cooldown: 70,
                change_direction_interval: 90,
                points: 1000,
                accuracy: 0.1,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ufo {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub ufo_type: UfoType,
    pub health: u32,
    pub shoot_cooldown: u32,
    pub direction_timer: u32,
    pub target_angle: f64,
}

impl Ufo {
    pub fn new(position: Vector2D, ufo_type: UfoType, target_angle: f64) -> Self {
        let settings = ufo_type.settings();
        Ufo {
            position,
            velocity: Vector2D::from_angle(target_angle, settings.speed),
            ufo_type,
            health: settings.health,
            shoot_cooldown: settings.shoot_cooldown,
            direction_timer: 0,
            target_angle,
        }
    }

    pub fn settings(&self) -> UfoSettings {
        self.ufo_type.settings()
    }

    pub fn size(&self) -> f64 {
        self.settings().size
    }

    pub fn update(
        &mut self,
        ship: &Ship,
        width: f64,
        height: f64,
        rng: &mut impl Rng,
    ) -> Option<UfoBullet> {
        let settings = self.settings();

        self.direction_timer += 1;
        if self.direction_timer >= settings.change_direction_interval {
            self.direction_timer = 0;
            self.target_angle = self.position.angle_to(ship.position)
                + rng.gen_range(-UFO_HEADING_JITTER..=UFO_HEADING_JITTER);
            self.velocity = Vector2D::from_angle(self.target_angle, settings.speed);
        }

        self.position = self.position.add(self.velocity);
        self.position = wrap_position(self.position, width, height, settings.size);

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        if self.shoot_cooldown == 0 {
            self.shoot_cooldown = settings.shoot_cooldown;
            return Some(UfoBullet::aimed_at(self.position, ship, settings.accuracy, rng));
        }
        None
    }
}

// --- UFO bullet ---
#[derive(Clone, Debug, PartialEq)]
pub struct UfoBullet {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub life: u32,
    pub max_life: u32,
}

impl UfoBullet {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        UfoBullet {
            position,
            velocity,
            life: UFO_BULLET_LIFE,
            max_life: UFO_BULLET_LIFE,
        }
    }

    // Lead the ship, then spoil the shot by up to `accuracy` radians.
    pub fn aimed_at(origin: Vector2D, ship: &Ship, accuracy: f64, rng: &mut impl Rng) -> Self {
        let flight_time = origin.distance(ship.position) / UFO_BULLET_SPEED;
        let predicted = ship.position.add(ship.velocity.scale(flight_time));
        let jitter = if accuracy > 0.0 {
            rng.gen_range(-accuracy..=accuracy)
        } else {
            0.0
        };
        let angle = origin.angle_to(predicted) + jitter;
        UfoBullet::new(origin, Vector2D::from_angle(angle, UFO_BULLET_SPEED))
    }

    pub fn update(&mut self) {
        self.position = self.position.add(self.velocity);
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_expired(&self, width: f64, height: f64) -> bool {
        self.life == 0 || is_outside(self.position, width, height, UFO_BULLET_PADDING)
    }
}

// --- Particles ---
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Debris,
    Spark,
    Thruster,
}

impl ParticleKind {
    pub fn color(self) -> [u8; 3] {
        match self {
            ParticleKind::Debris => [136, 136, 136],
            ParticleKind::Spark => [255, 215, 0],
            ParticleKind::Thruster => [255, 102, 0],
        }
    }

    pub fn size_range(self) -> (f64, f64) {
        match self {
            ParticleKind::Debris => (2.0, 4.0),
            ParticleKind::Spark => (1.0, 2.0),
            ParticleKind::Thruster => (1.0, 3.0),
        }
    }

    pub fn life_range(self) -> (u32, u32) {
        match self {
            ParticleKind::Debris => (40, 70),
            ParticleKind::Spark => (15, 30),
            ParticleKind::Thruster => (10, 20),
        }
    }

    pub fn speed_range(self) -> (f64, f64) {
        match self {
            ParticleKind::Debris => (0.5, 2.5),
            ParticleKind::Spark => (1.5, 4.0),
            ParticleKind::Thruster => (0.5, 1.5),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub color: [u8; 3],
    pub size: f64,
    pub life: u32,
    pub max_life: u32,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn new(position: Vector2D, velocity: Vector2D, kind: ParticleKind, size: f64, life: u32) -> Self {
        Particle {
            position,
            velocity,
            color: kind.color(),
            size,
            life,
            max_life: life,
            kind,
        }
    }

    pub fn update(&mut self, width: f64, height: f64) {
        self.velocity = self.velocity.scale(PARTICLE_DAMPING);
        if self.kind == ParticleKind::Thruster {
            self.velocity.y += THRUSTER_DRIFT;
        }
        self.position = self.position.add(self.velocity);
        self.position = wrap_position(self.position, width, height, 0.0);
        self.life = self.life.saturating_sub(1);
    }

    pub fn fade(&self) -> f64 {
        self.life as f64 / self.max_life.max(1) as f64
    }
}

// --- Explosion effect ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplosionLine {
    pub angle: f64,
    pub length: f64,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExplosionEffect {
    pub position: Vector2D,
    pub lines: Vec<ExplosionLine>,
    pub duration: u32,
    pub max_duration: u32,
}

impl ExplosionEffect {
    pub fn new(position: Vector2D, rng: &mut impl Rng) -> Self {
        let lines = (0..EXPLOSION_LINES)
            .map(|i| ExplosionLine {
                angle: 2.0 * PI * i as f64 / EXPLOSION_LINES as f64 + rng.gen_range(-0.25..0.25),
                length: rng.gen_range(15.0..40.0),
                opacity: rng.gen_range(0.8..=1.0),
            })
            .collect();
        ExplosionEffect {
            position,
            lines,
            duration: EXPLOSION_DURATION,
            max_duration: EXPLOSION_DURATION,
        }
    }

    pub fn update(&mut self) {
        self.duration = self.duration.saturating_sub(1);
    }

    pub fn is_finished(&self) -> bool {
        self.duration == 0
    }

    pub fn fade(&self) -> f64 {
        self.duration as f64 / self.max_duration.max(1) as f64
    }

    // Lines grow from 30% to full length as the effect plays out.
    pub fn line_end(&self, line: &ExplosionLine) -> Vector2D {
        let progress = 1.0 - self.fade();
        let length = line.length * (0.3 + progress * 0.7);
        self.position.add(Vector2D::from_angle(line.angle, length))
    }
}

// --- Screen shake ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenShake {
    pub intensity: f64,
    pub duration: u32,
    pub max_duration: u32,
}

impl ScreenShake {
    pub fn new(intensity: f64, duration: u32) -> Self {
        ScreenShake {
            intensity,
            duration,
            max_duration: duration,
        }
    }

    pub fn merge(self, other: ScreenShake) -> ScreenShake {
        ScreenShake {
            intensity: self.intensity.max(other.intensity),
            duration: self.duration.max(other.duration),
            max_duration: self.max_duration.max(other.max_duration),
        }
    }

    pub fn update(&mut self) {
        self.duration = self.duration.saturating_sub(1);
    }

    pub fn is_finished(&self) -> bool {
        self.duration == 0
    }

    // Render-only; never fed back into the simulation.
    pub fn offset(&self, rng: &mut impl Rng) -> Vector2D {
        if self.intensity <= 0.0 {
            return Vector2D::ZERO;
        }
        Vector2D::new(
            rng.gen_range(-self.intensity..=self.intensity),
            rng.gen_range(-self.intensity..=self.intensity),
        )
    }
}
