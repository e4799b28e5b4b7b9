//! Arena Shooter - a top-down auto-firing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, weapons, targeting, game state)
//! - `render`: Backend-neutral draw list built from the game state
//! - `input`: Key bindings and held-key tracking
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod input;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

use render::DrawCmd;
use sim::{GameState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Maximum player speed (pixels per tick)
    pub const PLAYER_SPEED: f64 = 5.0;
    /// Player acceleration per held axis (pixels per tick²)
    pub const PLAYER_ACCELERATION: f64 = 0.5;
    /// Per-tick velocity decay (momentum/friction)
    pub const DAMPING_FACTOR: f64 = 0.9;
    /// Player diameter
    pub const PLAYER_SIZE: f64 = 30.0;

    /// Enemy chase speed (pixels per tick)
    pub const ENEMY_SPEED: f64 = 2.0;
    /// Enemy diameter
    pub const ENEMY_SIZE: f64 = 20.0;
    /// Enemies stop closing in once within this distance of their target
    pub const ENEMY_STOP_DISTANCE: f64 = 1.0;
    /// Spawn point of the first enemy
    pub const FIRST_ENEMY_POS: (f64, f64) = (50.0, 50.0);

    /// Projectile defaults
    pub const BULLET_SPEED: f64 = 10.0;
    pub const BULLET_SIZE: f64 = 5.0;
    pub const BULLET_LIFE: i32 = 100;

    /// SMG burst defaults (ticks)
    pub const SMG_BURST_SIZE: u32 = 3;
    pub const SMG_BURST_INTERVAL: u32 = 5;
    pub const SMG_BURST_COOLDOWN: u32 = 30;

    /// Width of the side panel (inventory widget) subtracted from the viewport
    pub const LEFT_PANEL_WIDTH: f64 = 200.0;

    /// Weapons the player can carry
    pub const INVENTORY_CAPACITY: usize = 1;

    /// Shop grid layout
    pub const SHOP_CARD_SIZE: f64 = 140.0;
    pub const SHOP_CARD_PITCH: f64 = 150.0;
    pub const SHOP_CARD_CORNER: f64 = 10.0;
    /// Grid origin relative to arena center
    pub const SHOP_OFFSET_X: f64 = -220.0;
    pub const SHOP_OFFSET_Y: f64 = -100.0;
}

/// Run one scheduler callback: a full simulation tick, then a render pass.
///
/// The update phase always completes before anything is drawn.
pub fn run_frame(state: &mut GameState, input: &TickInput) -> Vec<DrawCmd> {
    tick(state, input);
    render::draw(state)
}
