//! Projectiles spawned by weapon bursts

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::actor::{Body, Color};
use super::physics::Arena;

/// A straight-flying shot with a tick-based lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: DVec2,
    /// Fixed at spawn
    vel: DVec2,
    pub size: f64,
    /// Ticks left before the projectile expires
    pub life: i32,
}

impl Projectile {
    /// Spawn at `origin` flying along `angle` (radians) at `speed` per tick
    pub fn new(origin: DVec2, angle: f64, speed: f64, size: f64, life: i32) -> Self {
        Self {
            pos: origin,
            vel: DVec2::new(angle.cos(), angle.sin()) * speed,
            size,
            life,
        }
    }

    pub fn vel(&self) -> DVec2 {
        self.vel
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life -= 1;
    }

    /// Out of life, or outside the arena rectangle
    pub fn is_expired(&self, arena: &Arena) -> bool {
        self.life <= 0 || !arena.contains(self.pos)
    }
}

impl Body for Projectile {
    fn pos(&self) -> DVec2 {
        self.pos
    }
    fn size(&self) -> f64 {
        self.size
    }
    fn color(&self) -> Color {
        Color::PROJECTILE
    }
}
