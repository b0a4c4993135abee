use crate::constants::*;
use crate::types::{Vector2D, wrap_position};
use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpType {
    Shield,
    TripleShot,
    RapidFire,
    ScoreMultiplier,
}

impl PowerUpType {
    pub const ALL: [PowerUpType; 4] = [
        PowerUpType::Shield,
        PowerUpType::TripleShot,
        PowerUpType::RapidFire,
        PowerUpType::ScoreMultiplier,
    ];

    /// Frames the effect lasts once picked up.
    pub fn duration(self) -> u32 {
        match self {
            PowerUpType::Shield => 600,
            PowerUpType::TripleShot => 600,
            PowerUpType::RapidFire => 480,
            PowerUpType::ScoreMultiplier => 900,
        }
    }

    pub fn display_char(self) -> char {
        match self {
            PowerUpType::Shield => 'S',
            PowerUpType::TripleShot => 'T',
            PowerUpType::RapidFire => 'R',
            PowerUpType::ScoreMultiplier => 'X',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerUpType::Shield => "Shield",
            PowerUpType::TripleShot => "Triple Shot",
            PowerUpType::RapidFire => "Rapid Fire",
            PowerUpType::ScoreMultiplier => "Score x2",
        }
    }
}

// --- Floating pickup ---
#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub power_up_type: PowerUpType,
    pub size: f64,
    pub rotation: f64,
    pub life_time: u32,
    pub max_life_time: u32,
}

impl PowerUp {
    pub fn new(position: Vector2D, velocity: Vector2D, power_up_type: PowerUpType) -> Self {
        PowerUp {
            position,
            velocity,
            power_up_type,
            size: POWER_UP_SIZE,
            rotation: 0.0,
            life_time: 0,
            max_life_time: POWER_UP_LIFETIME,
        }
    }

    pub fn update(&mut self, width: f64, height: f64) {
        self.position = self.position.add(self.velocity);
        self.rotation += POWER_UP_SPIN;
        self.life_time += 1;
        self.position = wrap_position(self.position, width, height, 0.0);
    }

    pub fn is_expired(&self) -> bool {
        self.life_time >= self.max_life_time
    }
}

// --- Effect currently applied to the ship ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActivePowerUp {
    pub power_up_type: PowerUpType,
    pub duration: u32,
    pub max_duration: u32,
}

impl ActivePowerUp {
    pub fn new(power_up_type: PowerUpType) -> Self {
        let duration = power_up_type.duration();
        ActivePowerUp {
            power_up_type,
            duration,
            max_duration: duration,
        }
    }

    pub fn remaining(&self) -> f64 {
        self.duration as f64 / self.max_duration.max(1) as f64
    }
}

/// Add an effect, or refresh an existing one of the same type. A refresh
/// takes the longer of the remaining and the full duration; it never sums.
pub fn apply_power_up(active: &mut Vec<ActivePowerUp>, power_up_type: PowerUpType) {
    let fresh = ActivePowerUp::new(power_up_type);
    match active.iter_mut().find(|a| a.power_up_type == power_up_type) {
        Some(existing) => {
            existing.duration = existing.duration.max(fresh.duration);
            existing.max_duration = fresh.max_duration;
            debug!("Extended {:?} to {} frames", power_up_type, existing.duration);
        }
        None => {
            debug!("Activated {:?} for {} frames", power_up_type, fresh.duration);
            active.push(fresh);
        }
    }
}

pub fn is_active(active: &[ActivePowerUp], power_up_type: PowerUpType) -> bool {
    active.iter().any(|a| a.power_up_type == power_up_type)
}

/// Count every effect down one frame and drop the ones that ran out.
pub fn tick_active(active: &mut Vec<ActivePowerUp>) {
    active.retain_mut(|a| {
        a.duration = a.duration.saturating_sub(1);
        a.duration > 0
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_pickup_extends_to_full_not_sum() {
        let mut active = Vec::new();
        apply_power_up(&mut active, PowerUpType::Shield);
        active[0].duration = 100;
        apply_power_up(&mut active, PowerUpType::Shield);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].duration, PowerUpType::Shield.duration());
    }

    #[test]
    fn distinct_types_coexist() {
        let mut active = Vec::new();
        apply_power_up(&mut active, PowerUpType::Shield);
        apply_power_up(&mut active, PowerUpType::RapidFire);
        assert!(is_active(&active, PowerUpType::Shield));
        assert!(is_active(&active, PowerUpType::RapidFire));
        assert!(!is_active(&active, PowerUpType::TripleShot));
    }

    #[test]
    fn active_effects_expire() {
        let mut active = vec![ActivePowerUp {
            power_up_type: PowerUpType::TripleShot,
            duration: 1,
            max_duration: 600,
        }];
        tick_active(&mut active);
        assert!(active.is_empty());
    }

    #[test]
    fn pickup_expires_at_lifetime() {
        let mut power_up = PowerUp::new(Vector2D::new(10.0, 10.0), Vector2D::ZERO, PowerUpType::Shield);
        power_up.life_time = POWER_UP_LIFETIME - 1;
        power_up.update(800.0, 600.0);
        assert!(power_up.is_expired());
    }
}
