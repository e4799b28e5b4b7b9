//! Moving entities: the player and the chasing enemies
//!
//! Both are circles in the arena. They share the `Body` capability so that
//! targeting and rendering can treat them uniformly, but they move by very
//! different rules: the player integrates acceleration with damping, enemies
//! walk straight at their target at a constant speed.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::physics::{Arena, clamp_magnitude, distance, normalize};
use super::tick::TickInput;
use super::weapon::Weapon;
use crate::consts::*;
use crate::tuning::Tuning;

/// RGBA fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    pub const PLAYER: Color = Color::rgb(255, 100, 100);
    pub const ENEMY: Color = Color::rgb(100, 255, 100);
    pub const PROJECTILE: Color = Color::rgb(255, 255, 0);
}

/// What a renderer needs to draw one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: DVec2,
    /// Diameter
    pub size: f64,
    pub color: Color,
}

/// Anything that occupies a circle in the arena
pub trait Body {
    fn pos(&self) -> DVec2;
    /// Diameter
    fn size(&self) -> f64;
    fn color(&self) -> Color;

    fn display(&self) -> Circle {
        Circle {
            center: self.pos(),
            size: self.size(),
            color: self.color(),
        }
    }
}

/// Ordered weapon storage with a fixed capacity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Weapon>,
    capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(INVENTORY_CAPACITY)
    }
}

impl Inventory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn items(&self) -> &[Weapon] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_room(&self) -> bool {
        self.items.len() < self.capacity
    }

    /// Take ownership of a weapon. Hands it back if there is no room.
    pub fn add(&mut self, weapon: Weapon) -> Result<(), Weapon> {
        if !self.has_room() {
            return Err(weapon);
        }
        self.items.push(weapon);
        Ok(())
    }

    /// The weapon used for auto-fire
    pub fn primary_mut(&mut self) -> Option<&mut Weapon> {
        self.items.first_mut()
    }
}

/// The player-controlled entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: DVec2,
    pub vel: DVec2,
    pub size: f64,
    pub color: Color,
    /// Velocity gained per tick on each held axis
    pub acceleration: f64,
    /// Velocity magnitude cap
    pub max_speed: f64,
    /// Multiplier applied to velocity every tick
    pub damping: f64,
    pub inventory: Inventory,
}

impl Player {
    pub fn new(pos: DVec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: DVec2::ZERO,
            size: tuning.player_size,
            color: Color::PLAYER,
            acceleration: tuning.player_acceleration,
            max_speed: tuning.player_speed,
            damping: tuning.damping_factor,
            inventory: Inventory::with_capacity(tuning.inventory_capacity),
        }
    }

    /// Advance one tick of momentum physics from the held movement keys.
    ///
    /// Acceleration is applied per axis without normalizing the input, so
    /// diagonals accelerate faster than straight lines. Hitting a wall
    /// clamps position only; velocity keeps pushing into the wall.
    pub fn move_with_input(&mut self, input: &TickInput, arena: &Arena) {
        self.vel += input.axis() * self.acceleration;
        self.vel *= self.damping;
        self.vel = clamp_magnitude(self.vel, self.max_speed);
        self.pos += self.vel;
        self.pos = arena.clamp_body(self.pos, self.size);
    }

    /// Firing angle (radians) from the player to a point
    pub fn aim_at(&self, target: DVec2) -> f64 {
        let d = target - self.pos;
        d.y.atan2(d.x)
    }
}

impl Body for Player {
    fn pos(&self) -> DVec2 {
        self.pos
    }
    fn size(&self) -> f64 {
        self.size
    }
    fn color(&self) -> Color {
        self.color
    }
}

/// A chaser that walks straight at its target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: DVec2,
    pub size: f64,
    pub color: Color,
    pub speed: f64,
}

impl Enemy {
    pub fn new(id: u32, pos: DVec2, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            size: tuning.enemy_size,
            color: Color::ENEMY,
            speed: tuning.enemy_speed,
        }
    }

    /// Step toward `target` at constant speed. No acceleration, no damping.
    pub fn move_toward(&mut self, target: DVec2, arena: &Arena) {
        if distance(self.pos, target) > ENEMY_STOP_DISTANCE {
            let direction = normalize(target - self.pos);
            self.pos += direction * self.speed;
        }
        self.pos = arena.clamp_body(self.pos, self.size);
    }
}

impl Body for Enemy {
    fn pos(&self) -> DVec2 {
        self.pos
    }
    fn size(&self) -> f64 {
        self.size
    }
    fn color(&self) -> Color {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::weapon::WeaponKind;
    use proptest::prelude::*;

    fn arena() -> Arena {
        Arena::new(800.0, 600.0)
    }

    #[test]
    fn test_single_tick_right() {
        let mut player = Player::new(DVec2::new(100.0, 100.0), &Tuning::default());
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        player.move_with_input(&input, &arena());

        assert!((player.vel.x - 0.45).abs() < 1e-12);
        assert_eq!(player.vel.y, 0.0);
        assert!((player.pos.x - 100.45).abs() < 1e-12);
        assert_eq!(player.pos.y, 100.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut player = Player::new(DVec2::new(100.0, 100.0), &Tuning::default());
        let input = TickInput {
            left: true,
            right: true,
            up: true,
            down: true,
        };
        player.move_with_input(&input, &arena());
        assert_eq!(player.vel, DVec2::ZERO);
        assert_eq!(player.pos, DVec2::new(100.0, 100.0));
    }

    #[test]
    fn test_diagonal_accelerates_faster() {
        let tuning = Tuning::default();
        let mut straight = Player::new(DVec2::new(400.0, 300.0), &tuning);
        let mut diagonal = straight.clone();

        straight.move_with_input(
            &TickInput {
                right: true,
                ..Default::default()
            },
            &arena(),
        );
        diagonal.move_with_input(
            &TickInput {
                right: true,
                down: true,
                ..Default::default()
            },
            &arena(),
        );
        assert!(diagonal.vel.length() > straight.vel.length());
    }

    #[test]
    fn test_speed_is_capped() {
        let mut player = Player::new(DVec2::new(400.0, 300.0), &Tuning::default());
        let input = TickInput {
            right: true,
            down: true,
            ..Default::default()
        };
        for _ in 0..200 {
            player.move_with_input(&input, &Arena::new(100_000.0, 100_000.0));
            assert!(player.vel.length() <= PLAYER_SPEED + 1e-9);
        }
    }

    #[test]
    fn test_wall_keeps_velocity() {
        let mut player = Player::new(DVec2::new(785.0, 300.0), &Tuning::default());
        player.vel = DVec2::new(4.0, 0.0);
        player.move_with_input(&TickInput::default(), &arena());
        assert_eq!(player.pos.x, 785.0);
        // Clamped position, but velocity was not zeroed
        assert!(player.vel.x > 0.0);
    }

    #[test]
    fn test_resize_reclamps_on_next_move() {
        let mut player = Player::new(DVec2::new(700.0, 500.0), &Tuning::default());
        let small = Arena::new(400.0, 300.0);
        player.move_with_input(&TickInput::default(), &small);
        assert_eq!(player.pos, DVec2::new(385.0, 285.0));
    }

    #[test]
    fn test_enemy_chases_at_constant_speed() {
        let mut enemy = Enemy::new(1, DVec2::new(50.0, 50.0), &Tuning::default());
        enemy.move_toward(DVec2::new(350.0, 450.0), &arena());
        // Direction (0.6, 0.8) * speed 2
        assert!((enemy.pos.x - 51.2).abs() < 1e-12);
        assert!((enemy.pos.y - 51.6).abs() < 1e-12);
    }

    #[test]
    fn test_enemy_stops_when_close() {
        let mut enemy = Enemy::new(1, DVec2::new(100.0, 100.0), &Tuning::default());
        enemy.move_toward(DVec2::new(100.5, 100.0), &arena());
        assert_eq!(enemy.pos, DVec2::new(100.0, 100.0));
    }

    #[test]
    fn test_inventory_capacity() {
        let mut inventory = Inventory::with_capacity(1);
        assert!(inventory.add(Weapon::new("SMG Alpha", WeaponKind::Smg)).is_ok());
        let rejected = inventory.add(Weapon::new("SMG Beta", WeaponKind::Smg));
        assert_eq!(rejected.map_err(|w| w.name), Err("SMG Beta".to_string()));
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.items()[0].name, "SMG Alpha");
    }

    #[test]
    fn test_display_reads_body() {
        let enemy = Enemy::new(3, DVec2::new(5.0, 6.0), &Tuning::default());
        let circle = enemy.display();
        assert_eq!(circle.center, DVec2::new(5.0, 6.0));
        assert_eq!(circle.size, ENEMY_SIZE);
        assert_eq!(circle.color, Color::ENEMY);
    }

    proptest! {
        #[test]
        fn damping_shrinks_speed_without_input(
            vx in -5.0f64..5.0,
            vy in -5.0f64..5.0,
            ticks in 1usize..200,
        ) {
            let mut player = Player::new(DVec2::new(5000.0, 5000.0), &Tuning::default());
            player.vel = DVec2::new(vx, vy);
            let huge = Arena::new(10_000.0, 10_000.0);
            let mut last = player.vel.length();
            for _ in 0..ticks {
                player.move_with_input(&TickInput::default(), &huge);
                let now = player.vel.length();
                prop_assert!(now <= last);
                if last > 0.0 {
                    prop_assert!(now < last);
                }
                last = now;
            }
        }

        #[test]
        fn position_always_in_bounds(
            x in 0.0f64..800.0,
            y in 0.0f64..600.0,
            vx in -50.0f64..50.0,
            vy in -50.0f64..50.0,
            keys in 0u8..16,
        ) {
            let mut player = Player::new(DVec2::new(x, y), &Tuning::default());
            player.vel = DVec2::new(vx, vy);
            let input = TickInput {
                up: keys & 1 != 0,
                down: keys & 2 != 0,
                left: keys & 4 != 0,
                right: keys & 8 != 0,
            };
            player.move_with_input(&input, &arena());
            prop_assert!(player.pos.x >= 15.0 && player.pos.x <= 785.0);
            prop_assert!(player.pos.y >= 15.0 && player.pos.y <= 585.0);
        }
    }
}
