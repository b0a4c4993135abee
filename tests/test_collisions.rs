use vibe_asteroids::World;
use vibe_asteroids::audio::SoundCue;
use vibe_asteroids::collisions::{collide_asteroids, resolve_asteroid_pair};
use vibe_asteroids::constants::*;
use vibe_asteroids::entities::{Asteroid, Bullet, Ufo, UfoType};
use vibe_asteroids::types::Vector2D;
use vibe_asteroids::upgrades::{PowerUp, PowerUpType, apply_power_up, is_active};

use rand::SeedableRng;
use rand::rngs::StdRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn asteroid(x: f64, y: f64, radius: f64, vx: f64, vy: f64) -> Asteroid {
    let mut rng = StdRng::seed_from_u64(5);
    Asteroid::new(Vector2D::new(x, y), Vector2D::new(vx, vy), radius, &mut rng)
}

fn still_bullet(x: f64, y: f64) -> Bullet {
    Bullet::new(Vector2D::new(x, y), Vector2D::ZERO)
}

// ── bullet vs asteroid ────────────────────────────────────────────────────────

#[test]
fn bullet_splits_a_large_asteroid() {
    let mut rng = seeded_rng();
    let mut world = World::empty(800.0, 600.0);
    world.asteroids.push(asteroid(400.0, 100.0, 100.0, 0.0, 0.0));
    world.bullets.push(still_bullet(400.0, 100.0));

    world.resolve_collisions(&mut rng);

    assert!(world.bullets.is_empty());
    assert_eq!(world.score, SCORE_ASTEROID);
    assert_eq!(world.asteroids.len(), ASTEROID_SPLIT_CHILDREN);
    for child in &world.asteroids {
        assert!((child.radius - 100.0 * ASTEROID_SPLIT_RATIO).abs() < 1e-9);
        assert_eq!(child.position, Vector2D::new(400.0, 100.0));
    }
    assert_eq!(world.freeze_frames, LIGHT_FREEZE_FRAMES);
    assert_eq!(world.screen_shake.map(|s| s.intensity), Some(LIGHT_SHAKE_INTENSITY));
    assert!(!world.particles.is_empty());
    assert_eq!(world.drain_sound_cues(), vec![SoundCue::Explosion]);
}

#[test]
fn score_multiplier_doubles_asteroid_points() {
    let mut rng = seeded_rng();
    let mut world = World::empty(800.0, 600.0);
    apply_power_up(&mut world.active_power_ups, PowerUpType::ScoreMultiplier);
    world.asteroids.push(asteroid(400.0, 100.0, 100.0, 0.0, 0.0));
    world.bullets.push(still_bullet(400.0, 100.0));

    world.resolve_collisions(&mut rng);
    assert_eq!(world.score, SCORE_ASTEROID * SCORE_MULTIPLIER_FACTOR);
}

#[test]
fn small_asteroid_is_destroyed_without_fragments() {
    let mut rng = seeded_rng();
    let mut world = World::empty(800.0, 600.0);
    world.asteroids.push(asteroid(100.0, 100.0, ASTEROID_SPLIT_THRESHOLD, 0.0, 0.0));
    world.bullets.push(still_bullet(105.0, 100.0));

    world.resolve_collisions(&mut rng);
    assert!(world.asteroids.is_empty());
    assert_eq!(world.score, SCORE_ASTEROID);
}

#[test]
fn one_bullet_destroys_one_asteroid() {
    let mut rng = seeded_rng();
    let mut world = World::empty(800.0, 600.0);
    world.asteroids.push(asteroid(100.0, 100.0, 15.0, 0.0, 0.0));
    world.asteroids.push(asteroid(105.0, 100.0, 15.0, 0.0, 0.0));
    world.bullets.push(still_bullet(102.0, 100.0));

    world.resolve_collisions(&mut rng);
    assert_eq!(world.asteroids.len(), 1);
    assert_eq!(world.score, SCORE_ASTEROID);
}

#[test]
fn missing_bullet_changes_nothing() {
    let mut rng = seeded_rng();
    let mut world = World::empty(800.0, 600.0);
    world.asteroids.push(asteroid(100.0, 100.0, 30.0, 0.0, 0.0));
    world.bullets.push(still_bullet(131.0, 100.0));

    world.resolve_collisions(&mut rng);
    assert_eq!(world.asteroids.len(), 1);
    assert_eq!(world.bullets.len(), 1);
    assert_eq!(world.score, 0);
}

// ── bullet vs UFO ─────────────────────────────────────────────────────────────

#[test]
fn small_ufo_dies_to_one_hit() {
    let mut rng = seeded_rng();
    let mut world = World::empty(800.0, 600.0);
    world.ufos.push(Ufo::new(Vector2D::new(600.0, 300.0), UfoType::Small, 0.0));
    world.bullets.push(still_bullet(610.0, 300.0));

    world.resolve_collisions(&mut rng);
    assert!(world.ufos.is_empty());
    assert_eq!(world.score, UfoType::Small.settings().points);
    assert_eq!(world.explosions.len(), 1);
}

#[test]
fn large_ufo_takes_three_hits() {
    let mut rng = seeded_rng();
    let mut world = World::empty(800.0, 600.0);
    world.ufos.push(Ufo::new(Vector2D::new(600.0, 300.0), UfoType::Large, 0.0));

    for hit in 1..=2 {
        world.bullets.push(still_bullet(600.0, 300.0));
        world.resolve_collisions(&mut rng);
        assert_eq!(world.ufos[0].health, 3 - hit);
        assert_eq!(world.score, 0);
        assert!(world.explosions.is_empty());
    }
    world.bullets.push(still_bullet(600.0, 300.0));
    world.resolve_collisions(&mut rng);
    assert!(world.ufos.is_empty());
    assert_eq!(world.score, UfoType::Large.settings().points);

    let hits = world
        .drain_sound_cues()
        .into_iter()
        .filter(|&cue| cue == SoundCue::Explosion)
        .count();
    assert_eq!(hits, 3);
}

// ── power-up pickup ───────────────────────────────────────────────────────────

#[test]
fn touching_a_power_up_activates_it() {
    let mut rng = seeded_rng();
    let mut world = World::empty(800.0, 600.0);
    world.power_ups.push(PowerUp::new(Vector2D::new(420.0, 300.0), Vector2D::ZERO, PowerUpType::TripleShot));
    world.power_ups.push(PowerUp::new(Vector2D::new(100.0, 100.0), Vector2D::ZERO, PowerUpType::Shield));

    world.resolve_collisions(&mut rng);
    assert!(is_active(&world.active_power_ups, PowerUpType::TripleShot));
    assert!(!is_active(&world.active_power_ups, PowerUpType::Shield));
    assert_eq!(world.power_ups.len(), 1);
}

#[test]
fn repeated_pickup_refreshes_without_summing() {
    let mut rng = seeded_rng();
    let mut world = World::empty(800.0, 600.0);
    apply_power_up(&mut world.active_power_ups, PowerUpType::Shield);
    world.active_power_ups[0].duration = 10;
    world.power_ups.push(PowerUp::new(Vector2D::new(400.0, 300.0), Vector2D::ZERO, PowerUpType::Shield));

    world.resolve_collisions(&mut rng);
    assert_eq!(world.active_power_ups.len(), 1);
    assert_eq!(world.active_power_ups[0].duration, PowerUpType::Shield.duration());
}

// ── asteroid vs asteroid ──────────────────────────────────────────────────────

#[test]
fn perfectly_elastic_equal_masses_swap_velocities() {
    let mut a = asteroid(0.0, 0.0, 30.0, 1.0, 0.0);
    let mut b = asteroid(50.0, 0.0, 30.0, -1.0, 0.0);
    resolve_asteroid_pair(&mut a, &mut b, 1.0).unwrap();
    assert!((a.velocity.x + 1.0).abs() < 1e-9);
    assert!((b.velocity.x - 1.0).abs() < 1e-9);
    assert!(a.velocity.y.abs() < 1e-12);
}

#[test]
fn restitution_scales_separating_speed() {
    let mut a = asteroid(0.0, 0.0, 30.0, 1.0, 0.0);
    let mut b = asteroid(50.0, 0.0, 30.0, -1.0, 0.0);
    resolve_asteroid_pair(&mut a, &mut b, ASTEROID_RESTITUTION).unwrap();
    let separating = b.velocity.x - a.velocity.x;
    assert!((separating - 2.0 * ASTEROID_RESTITUTION).abs() < 1e-9);
}

#[test]
fn resolved_pairs_no_longer_overlap() {
    let mut asteroids = vec![
        asteroid(100.0, 100.0, 40.0, 0.5, 0.0),
        asteroid(150.0, 110.0, 25.0, -0.5, 0.0),
    ];
    let contacts = collide_asteroids(&mut asteroids, ASTEROID_RESTITUTION);
    assert_eq!(contacts.len(), 1);
    let gap = asteroids[0].position.distance(asteroids[1].position);
    assert!(gap >= 65.0 - 1e-9);
}

#[test]
fn asteroid_contacts_throw_sparks_during_a_frame() {
    let mut rng = seeded_rng();
    let mut world = World::empty(800.0, 600.0);
    world.asteroids = vec![
        asteroid(100.0, 100.0, 30.0, 1.0, 0.0),
        asteroid(155.0, 100.0, 30.0, -1.0, 0.0),
        asteroid(700.0, 500.0, 30.0, 0.0, 0.0),
    ];
    world.step(&vibe_asteroids::InputState::new(), &mut rng);
    assert_eq!(world.particles.len(), ASTEROID_CONTACT_SPARKS);
    assert!(world.asteroids[0].velocity.x < 0.0);
}
