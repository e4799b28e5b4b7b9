//! Burst-fire weapons
//!
//! A weapon is a small state machine. `shoot` only arms a burst; the shots
//! themselves come out of `update`, which runs once per tick. That keeps the
//! emission cadence independent of how often the trigger is pulled (auto-fire
//! pulls it every tick).
//!
//! ```text
//! Idle --shoot (cooled down)--> Bursting --burst_size shots--> Idle
//! ```

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::projectile::Projectile;
use crate::consts::*;

/// Weapon families available in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Smg,
    Pistol,
    Rifle,
}

impl WeaponKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponKind::Smg => "SMG",
            WeaponKind::Pistol => "Pistol",
            WeaponKind::Rifle => "Rifle",
        }
    }

    /// One-line description shown on shop cards
    pub fn blurb(&self) -> &'static str {
        match self {
            WeaponKind::Smg => "Burst Fire",
            WeaponKind::Pistol => "Single Shot",
            WeaponKind::Rifle => "Long Burst",
        }
    }

    pub fn default_stats(&self) -> WeaponStats {
        let base = WeaponStats::default();
        match self {
            WeaponKind::Smg => base,
            WeaponKind::Pistol => WeaponStats {
                burst_size: 1,
                burst_interval_ticks: 1,
                burst_cooldown_ticks: 20,
                ..base
            },
            WeaponKind::Rifle => WeaponStats {
                burst_size: 5,
                burst_interval_ticks: 3,
                burst_cooldown_ticks: 45,
                ..base
            },
        }
    }
}

/// Firing parameters, all in ticks and pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponStats {
    /// Shots per burst
    pub burst_size: u32,
    /// Ticks between shots within a burst
    pub burst_interval_ticks: u32,
    /// Ticks after a burst completes before the next can start
    pub burst_cooldown_ticks: u32,
    pub muzzle_speed: f64,
    pub projectile_life: i32,
    pub projectile_size: f64,
}

impl Default for WeaponStats {
    fn default() -> Self {
        Self {
            burst_size: SMG_BURST_SIZE,
            burst_interval_ticks: SMG_BURST_INTERVAL,
            burst_cooldown_ticks: SMG_BURST_COOLDOWN,
            muzzle_speed: BULLET_SPEED,
            projectile_life: BULLET_LIFE,
            projectile_size: BULLET_SIZE,
        }
    }
}

impl WeaponStats {
    /// Force values into a range the state machine can run with
    pub fn sanitized(mut self) -> Self {
        self.burst_size = self.burst_size.max(1);
        self.burst_interval_ticks = self.burst_interval_ticks.max(1);
        if self.projectile_size.is_nan() || self.projectile_size <= 0.0 {
            self.projectile_size = BULLET_SIZE;
        }
        if !self.muzzle_speed.is_finite() {
            self.muzzle_speed = BULLET_SPEED;
        }
        self
    }
}

/// Where a weapon is in its firing cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BurstState {
    Idle,
    Bursting {
        /// Direction locked in when the burst was armed
        angle: f64,
        shots_fired: u32,
        /// Ticks since the burst was armed
        timer: u32,
    },
}

/// A weapon instance. Each tracks its own burst independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub kind: WeaponKind,
    pub stats: WeaponStats,
    pub state: BurstState,
    /// Tick at which the last burst finished (None = never fired)
    last_burst_end: Option<u64>,
}

impl Weapon {
    pub fn new(name: impl Into<String>, kind: WeaponKind) -> Self {
        Self::with_stats(name, kind, kind.default_stats())
    }

    pub fn with_stats(name: impl Into<String>, kind: WeaponKind, stats: WeaponStats) -> Self {
        Self {
            name: name.into(),
            kind,
            stats: stats.sanitized(),
            state: BurstState::Idle,
            last_burst_end: None,
        }
    }

    /// Inventory widget label: second word of the name, or "W"
    pub fn short_label(&self) -> &str {
        self.name.split_whitespace().nth(1).unwrap_or("W")
    }

    pub fn is_bursting(&self) -> bool {
        matches!(self.state, BurstState::Bursting { .. })
    }

    /// True once the cooldown since the last burst has fully elapsed
    pub fn is_cooled_down(&self, now: u64) -> bool {
        match self.last_burst_end {
            None => true,
            Some(end) => now.saturating_sub(end) > u64::from(self.stats.burst_cooldown_ticks),
        }
    }

    /// Arm a burst toward `angle`. No-op while bursting or cooling down.
    ///
    /// Returns true if a new burst was armed.
    pub fn shoot(&mut self, angle: f64, now: u64) -> bool {
        if self.is_bursting() || !self.is_cooled_down(now) {
            return false;
        }
        self.state = BurstState::Bursting {
            angle,
            shots_fired: 0,
            timer: 0,
        };
        true
    }

    /// Advance the burst by one tick, firing from `origin` on interval ticks
    pub fn update(&mut self, origin: DVec2, now: u64) -> Option<Projectile> {
        let BurstState::Bursting {
            angle,
            mut shots_fired,
            timer,
        } = self.state
        else {
            return None;
        };

        let mut fired = None;
        if timer % self.stats.burst_interval_ticks == 0 {
            fired = Some(Projectile::new(
                origin,
                angle,
                self.stats.muzzle_speed,
                self.stats.projectile_size,
                self.stats.projectile_life,
            ));
            shots_fired += 1;
            if shots_fired >= self.stats.burst_size {
                self.state = BurstState::Idle;
                self.last_burst_end = Some(now);
                return fired;
            }
        }

        self.state = BurstState::Bursting {
            angle,
            shots_fired,
            timer: timer + 1,
        };
        fired
    }
}
