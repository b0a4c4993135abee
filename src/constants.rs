// --- World ---
pub const DEFAULT_WORLD_WIDTH: f64 = 800.0;
pub const DEFAULT_WORLD_HEIGHT: f64 = 600.0;
pub const MIN_WORLD_WIDTH: f64 = 400.0;
pub const MIN_WORLD_HEIGHT: f64 = 300.0;

// --- Ship ---
pub const SHIP_SIZE: f64 = 20.0;
pub const SHIP_SPEED: f64 = 2.5;
pub const SHIP_THRUST_FACTOR: f64 = 0.05;
pub const ROTATION_SPEED: f64 = 0.003; // Angular acceleration from the RCS thrusters
pub const MAX_ROTATION_SPEED: f64 = 0.15;
pub const ROTATION_FRICTION: f64 = 0.95;
pub const RCS_SIDE_THRUST: f64 = 0.008;
pub const FRICTION: f64 = 0.995;
pub const STARTING_LIVES: u32 = 3;

// --- Bullets ---
pub const BULLET_SPEED: f64 = 10.0;
pub const TRIPLE_SHOT_SPREAD: f64 = 0.2; // Radians between the fanned bullets

// --- Asteroids ---
pub const ASTEROID_SPEED: f64 = 1.5;
pub const ASTEROID_SPEED_MIN: f64 = 0.5;
pub const ASTEROID_SPEED_MAX: f64 = 2.5;
pub const FAST_ASTEROID_CHANCE: f64 = 0.15;
pub const SLOW_ASTEROID_CUTOFF: f64 = 0.35; // Cumulative: 15% fast + 20% slow
pub const FAST_FRAGMENT_CHANCE: f64 = 0.3;
pub const ASTEROID_VERTICES: usize = 10;
pub const ASTEROID_JAG: f64 = 0.4;
pub const ASTEROID_SIZE: f64 = 100.0;
pub const ASTEROID_COUNT: usize = 5;
pub const ASTEROID_SPLIT_THRESHOLD: f64 = 20.0;
pub const ASTEROID_SPLIT_RATIO: f64 = 0.6;
pub const ASTEROID_SPLIT_CHILDREN: usize = 2;
pub const ASTEROID_DENSITY: f64 = 0.1;
pub const ASTEROID_RESTITUTION: f64 = 0.8;
pub const ASTEROID_SPIN: f64 = 0.01;
pub const EDGE_HEADING_SPREAD: f64 = std::f64::consts::PI * 0.8; // ±72° around the inward normal
pub const LEVEL_SPAWN_SAFE_DISTANCE: f64 = 150.0;
pub const LEVEL_REFILL_THRESHOLD: usize = 2;

// --- Scoring ---
pub const SCORE_ASTEROID: u32 = 100;
pub const SCORE_MULTIPLIER_FACTOR: u32 = 2;

// --- UFOs ---
pub const UFO_MIN_LEVEL: u32 = 3;
pub const UFO_SPAWN_INTERVAL_FRAMES: u32 = 1800;
pub const UFO_SPAWN_CHANCE: f64 = 0.3;
pub const MAX_UFOS: usize = 1;
pub const UFO_SMALL_CHANCE_BASE: f64 = 0.3;
pub const UFO_SMALL_CHANCE_LEVEL: u32 = 5; // Small UFOs become likelier from here on
pub const UFO_SMALL_CHANCE_STEP: f64 = 0.1;
pub const UFO_SMALL_CHANCE_MAX: f64 = 0.7;
pub const UFO_HEADING_JITTER: f64 = std::f64::consts::FRAC_PI_4;
pub const UFO_BULLET_SPEED: f64 = 4.0;
pub const UFO_BULLET_LIFE: u32 = 150;
pub const UFO_BULLET_PADDING: f64 = 10.0;
pub const UFO_BULLET_HIT_PADDING: f64 = 3.0;
pub const UFO_POWER_UP_DROP_CHANCE: f64 = 0.5;

// --- Power-ups ---
pub const POWER_UP_DROP_CHANCE: f64 = 0.3;
pub const POWER_UP_SIZE: f64 = 15.0;
pub const POWER_UP_LIFETIME: u32 = 60 * 15;
pub const POWER_UP_DRIFT: f64 = 0.5;
pub const POWER_UP_SPIN: f64 = 0.05;

// --- Particles ---
pub const MAX_PARTICLES: usize = 100;
pub const PARTICLE_JITTER: f64 = 5.0;
pub const PARTICLE_DAMPING: f64 = 0.98;
pub const THRUSTER_DRIFT: f64 = 0.05;
pub const ASTEROID_HIT_DEBRIS: usize = 8;
pub const ASTEROID_HIT_SPARKS: usize = 6;
pub const SHIP_HIT_DEBRIS: usize = 20;
pub const SHIP_HIT_SPARKS: usize = 12;
pub const UFO_KILL_DEBRIS: usize = 14;
pub const UFO_KILL_SPARKS: usize = 10;
pub const ASTEROID_CONTACT_SPARKS: usize = 4;

// --- Effects ---
pub const EXPLOSION_LINES: usize = 12;
pub const EXPLOSION_DURATION: u32 = 30; // Frames
pub const LIGHT_SHAKE_INTENSITY: f64 = 3.0;
pub const LIGHT_SHAKE_FRAMES: u32 = 10;
pub const LIGHT_FREEZE_FRAMES: u32 = 2;
pub const HEAVY_SHAKE_INTENSITY: f64 = 10.0;
pub const HEAVY_SHAKE_FRAMES: u32 = 30;
pub const HEAVY_FREEZE_FRAMES: u32 = 6;

// --- Front-end ---
pub const FRAME_DURATION_MS: u64 = 16; // ~60 Hz
pub const KEY_HOLD_FRAMES: u64 = 6; // Held-key window when the terminal reports no key releases
