use log::{debug, info};
use rand::Rng;

use crate::audio::SoundCue;
use crate::collisions::collide_asteroids;
use crate::constants::*;
use crate::entities::{
    Asteroid, Bullet, ExplosionEffect, Particle, ParticleKind, ScreenShake, Ship, Ufo, UfoBullet,
};
use crate::input::{InputState, Key};
use crate::spawner::{spawn_edge_asteroid, spawn_level_asteroid, spawn_particles, spawn_ufo};
use crate::upgrades::{ActivePowerUp, PowerUp, PowerUpType, is_active, tick_active};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Input,
    FreezeFrame,
    Ship,
    Bullets,
    Asteroids,
    Ufos,
    UfoBullets,
    PowerUps,
    Particles,
    ScreenShake,
    Explosions,
    Collisions,
    LevelProgress,
}

pub const FRAME_STAGES: [Stage; 13] = [
    Stage::Input,
    Stage::FreezeFrame,
    Stage::Ship,
    Stage::Bullets,
    Stage::Asteroids,
    Stage::Ufos,
    Stage::UfoBullets,
    Stage::PowerUps,
    Stage::Particles,
    Stage::ScreenShake,
    Stage::Explosions,
    Stage::Collisions,
    Stage::LevelProgress,
];

impl Stage {
    pub fn always_runs(self) -> bool {
        matches!(self, Stage::Input | Stage::FreezeFrame)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Simulated,
    Frozen,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    pub frame: u64,
    pub status: FrameStatus,
}

// Every store is owned here and touched only from `step`, `restart` and `resize`.
#[derive(Clone, Debug)]
pub struct World {
    pub width: f64,
    pub height: f64,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub ufos: Vec<Ufo>,
    pub ufo_bullets: Vec<UfoBullet>,
    pub power_ups: Vec<PowerUp>,
    pub active_power_ups: Vec<ActivePowerUp>,
    pub explosions: Vec<ExplosionEffect>,
    pub particles: Vec<Particle>,
    pub screen_shake: Option<ScreenShake>,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub high_score: u32,
    pub game_over: bool,
    pub freeze_frames: u32,
    pub ufo_spawn_timer: u32,
    pub frame: u64,
    fire_held: bool,
    thruster_playing: bool,
    high_score_dirty: bool,
    sound_cues: Vec<SoundCue>,
}

impl World {
    pub fn empty(width: f64, height: f64) -> Self {
        let width = width.max(MIN_WORLD_WIDTH);
        let height = height.max(MIN_WORLD_HEIGHT);
        World {
            width,
            height,
            ship: Ship::new(width / 2.0, height / 2.0),
            bullets: Vec::new(),
            asteroids: Vec::new(),
            ufos: Vec::new(),
            ufo_bullets: Vec::new(),
            power_ups: Vec::new(),
            active_power_ups: Vec::new(),
            explosions: Vec::new(),
            particles: Vec::new(),
            screen_shake: None,
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            high_score: 0,
            game_over: false,
            freeze_frames: 0,
            ufo_spawn_timer: 0,
            frame: 0,
            fire_held: false,
            thruster_playing: false,
            high_score_dirty: false,
            sound_cues: Vec::new(),
        }
    }

    pub fn new(width: f64, height: f64, high_score: u32, rng: &mut impl Rng) -> Self {
        let mut world = World::empty(width, height);
        world.high_score = high_score;
        world.spawn_opening_wave(rng);
        info!("New game on a {}x{} field", world.width, world.height);
        world
    }

    fn spawn_opening_wave(&mut self, rng: &mut impl Rng) {
        for _ in 0..ASTEROID_COUNT {
            self.asteroids.push(spawn_edge_asteroid(self.width, self.height, rng));
        }
    }

    pub fn restart(&mut self, rng: &mut impl Rng) {
        let high_score = self.high_score;
        let thruster_playing = self.thruster_playing;
        let sound_cues = std::mem::take(&mut self.sound_cues);
        *self = World::empty(self.width, self.height);
        self.high_score = high_score;
        self.sound_cues = sound_cues;
        if thruster_playing {
            self.emit(SoundCue::ThrusterStop);
        }
        self.spawn_opening_wave(rng);
        info!("Game restarted");
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(MIN_WORLD_WIDTH);
        self.height = height.max(MIN_WORLD_HEIGHT);
        if self.ship.position.x < 0.0 || self.ship.position.x > self.width {
            self.ship.position.x = self.width / 2.0;
        }
        if self.ship.position.y < 0.0 || self.ship.position.y > self.height {
            self.ship.position.y = self.height / 2.0;
        }
        debug!("Resized field to {}x{}", self.width, self.height);
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    // --- Frame pipeline ---

    /// Advance one frame. Rendering is left to the caller and should happen
    /// exactly once after every call, whatever the returned status.
    pub fn step(&mut self, input: &InputState, rng: &mut impl Rng) -> FrameReport {
        self.frame += 1;
        let mut frozen = false;

        for stage in FRAME_STAGES {
            if !stage.always_runs() && (frozen || self.game_over) {
                continue;
            }
            match stage {
                Stage::Input => self.handle_input(input, rng),
                Stage::FreezeFrame => frozen = self.tick_freeze(),
                Stage::Ship => self.update_ship(input, rng),
                Stage::Bullets => self.update_bullets(),
                Stage::Asteroids => self.update_asteroids(rng),
                Stage::Ufos => self.update_ufos(rng),
                Stage::UfoBullets => self.update_ufo_bullets(),
                Stage::PowerUps => self.update_power_ups(),
                Stage::Particles => self.update_particles(),
                Stage::ScreenShake => self.update_screen_shake(),
                Stage::Explosions => self.update_explosions(),
                Stage::Collisions => self.resolve_collisions(rng),
                Stage::LevelProgress => self.check_level_progress(rng),
            }
        }

        let status = if self.game_over {
            FrameStatus::GameOver
        } else if frozen {
            FrameStatus::Frozen
        } else {
            FrameStatus::Simulated
        };
        FrameReport { frame: self.frame, status }
    }

    fn handle_input(&mut self, input: &InputState, rng: &mut impl Rng) {
        let fire = input.is_held(Key::Fire);
        if self.game_over {
            if input.is_held(Key::Restart) {
                self.restart(rng);
            }
            self.fire_held = fire;
            return;
        }
        // One shot per press, unless rapid fire turns it into autofire.
        if fire && (!self.fire_held || self.has_power_up(PowerUpType::RapidFire)) {
            self.fire();
        }
        self.fire_held = fire;
    }

    pub fn fire(&mut self) {
        let rotation = self.ship.rotation;
        if self.has_power_up(PowerUpType::TripleShot) {
            for offset in [-TRIPLE_SHOT_SPREAD, 0.0, TRIPLE_SHOT_SPREAD] {
                self.bullets.push(Bullet::fired_from(&self.ship, rotation + offset));
            }
        } else {
            self.bullets.push(Bullet::fired_from(&self.ship, rotation));
        }
        self.emit(SoundCue::Laser);
    }

    /// Count the freeze down. True while the frame should be render-only.
    fn tick_freeze(&mut self) -> bool {
        if self.freeze_frames == 0 {
            return false;
        }
        self.freeze_frames -= 1;
        self.freeze_frames > 0
    }

    fn update_ship(&mut self, input: &InputState, rng: &mut impl Rng) {
        self.ship.thrusting = false;
        if input.is_held(Key::Left) {
            self.ship.rotate(-1.0);
        }
        if input.is_held(Key::Right) {
            self.ship.rotate(1.0);
        }
        if input.is_held(Key::Up) {
            self.ship.thrust();
            spawn_particles(&mut self.particles, self.ship.tail(), 1, ParticleKind::Thruster, rng);
            if !self.thruster_playing {
                self.thruster_playing = true;
                self.emit(SoundCue::ThrusterStart);
            }
        } else if self.thruster_playing {
            self.thruster_playing = false;
            self.emit(SoundCue::ThrusterStop);
        }
        self.ship.update(self.width, self.height);
    }

    fn update_bullets(&mut self) {
        let (width, height) = (self.width, self.height);
        self.bullets.retain_mut(|bullet| {
            bullet.update();
            !bullet.is_off_screen(width, height)
        });
    }

    fn update_asteroids(&mut self, rng: &mut impl Rng) {
        for asteroid in &mut self.asteroids {
            asteroid.update(self.width, self.height);
        }
        for contact in collide_asteroids(&mut self.asteroids, ASTEROID_RESTITUTION) {
            spawn_particles(&mut self.particles, contact, ASTEROID_CONTACT_SPARKS, ParticleKind::Spark, rng);
        }
    }

    fn update_ufos(&mut self, rng: &mut impl Rng) {
        self.try_spawn_ufo(rng);
        for ufo in &mut self.ufos {
            if let Some(bullet) = ufo.update(&self.ship, self.width, self.height, rng) {
                self.ufo_bullets.push(bullet);
            }
        }
    }

    fn try_spawn_ufo(&mut self, rng: &mut impl Rng) {
        if self.level < UFO_MIN_LEVEL {
            return;
        }
        self.ufo_spawn_timer += 1;
        if self.ufo_spawn_timer < UFO_SPAWN_INTERVAL_FRAMES {
            return;
        }
        self.ufo_spawn_timer = 0;
        if self.ufos.len() < MAX_UFOS && rng.gen_bool(UFO_SPAWN_CHANCE) {
            let ufo = spawn_ufo(self.level, &self.ship, self.width, self.height, rng);
            self.ufos.push(ufo);
        }
    }

    fn update_ufo_bullets(&mut self) {
        let (width, height) = (self.width, self.height);
        self.ufo_bullets.retain_mut(|bullet| {
            bullet.update();
            !bullet.is_expired(width, height)
        });
    }

    fn update_power_ups(&mut self) {
        let (width, height) = (self.width, self.height);
        self.power_ups.retain_mut(|power_up| {
            power_up.update(width, height);
            !power_up.is_expired()
        });
        tick_active(&mut self.active_power_ups);
    }

    fn update_particles(&mut self) {
        let (width, height) = (self.width, self.height);
        self.particles.retain_mut(|particle| {
            particle.update(width, height);
            particle.life > 0
        });
        self.particles.truncate(MAX_PARTICLES);
    }

    fn update_screen_shake(&mut self) {
        if let Some(shake) = &mut self.screen_shake {
            shake.update();
            if shake.is_finished() {
                self.screen_shake = None;
            }
        }
    }

    fn update_explosions(&mut self) {
        self.explosions.retain_mut(|effect| {
            effect.update();
            !effect.is_finished()
        });
    }

    // Low-water-mark refill: the only way the level advances.
    pub fn check_level_progress(&mut self, rng: &mut impl Rng) {
        if self.asteroids.len() > LEVEL_REFILL_THRESHOLD {
            return;
        }
        let count = self.level as usize + 2;
        for _ in 0..count {
            let asteroid = spawn_level_asteroid(self.level, self.ship.position, self.width, self.height, rng);
            self.asteroids.push(asteroid);
        }
        self.level += 1;
        info!("Level {} reached, spawned {} asteroids", self.level, count);
    }

    // --- Effects and scoring ---

    pub fn trigger_screen_shake(&mut self, intensity: f64, duration: u32) {
        let shake = ScreenShake::new(intensity, duration);
        self.screen_shake = Some(match self.screen_shake {
            Some(current) => current.merge(shake),
            None => shake,
        });
    }

    pub fn trigger_freeze(&mut self, frames: u32) {
        self.freeze_frames = self.freeze_frames.max(frames);
    }

    pub fn has_power_up(&self, power_up_type: PowerUpType) -> bool {
        is_active(&self.active_power_ups, power_up_type)
    }

    pub(crate) fn award(&mut self, points: u32) {
        let points = if self.has_power_up(PowerUpType::ScoreMultiplier) {
            points * SCORE_MULTIPLIER_FACTOR
        } else {
            points
        };
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
            self.high_score_dirty = true;
        }
    }

    pub(crate) fn damage_ship(&mut self, rng: &mut impl Rng) {
        let position = self.ship.position;
        self.lives = self.lives.saturating_sub(1);
        spawn_particles(&mut self.particles, position, SHIP_HIT_DEBRIS, ParticleKind::Debris, rng);
        spawn_particles(&mut self.particles, position, SHIP_HIT_SPARKS, ParticleKind::Spark, rng);
        self.explosions.push(ExplosionEffect::new(position, rng));
        self.trigger_screen_shake(HEAVY_SHAKE_INTENSITY, HEAVY_SHAKE_FRAMES);
        self.trigger_freeze(HEAVY_FREEZE_FRAMES);
        self.emit(SoundCue::Explosion);

        if self.lives == 0 {
            self.game_over = true;
            if self.thruster_playing {
                self.thruster_playing = false;
                self.emit(SoundCue::ThrusterStop);
            }
            info!("Game over at level {} with score {}", self.level, self.score);
        } else {
            let (x, y) = self.center();
            self.ship.reset_to(x, y);
            info!("Ship lost, {} lives left", self.lives);
        }
    }

    // --- Boundaries to the front-end ---

    pub(crate) fn emit(&mut self, cue: SoundCue) {
        self.sound_cues.push(cue);
    }

    pub fn drain_sound_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.sound_cues)
    }

    pub fn is_thruster_playing(&self) -> bool {
        self.thruster_playing
    }

    pub fn take_high_score_update(&mut self) -> Option<u32> {
        if self.high_score_dirty {
            self.high_score_dirty = false;
            Some(self.high_score)
        } else {
            None
        }
    }
}
