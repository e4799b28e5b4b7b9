//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, velocities in pixels per tick
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod physics;
pub mod projectile;
pub mod shop;
pub mod state;
pub mod targeting;
pub mod tick;
pub mod weapon;

pub use actor::{Body, Circle, Color, Enemy, Inventory, Player};
pub use physics::{Arena, clamp_magnitude, distance, normalize};
pub use projectile::Projectile;
pub use shop::{Rect, Shop, ShopSlot, slot_rect};
pub use state::{GameEvent, GamePhase, GameState, InputEvent};
pub use targeting::{nearest_enemy, nearest_index};
pub use tick::{TickInput, tick};
pub use weapon::{BurstState, Weapon, WeaponKind, WeaponStats};
