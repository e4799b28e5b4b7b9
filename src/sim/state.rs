//! Game state and discrete input handling
//!
//! `GameState` owns every entity collection and the phase flags. Nothing in
//! the simulation is global: update and render both take it by reference.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Enemy, Player};
use super::physics::Arena;
use super::projectile::Projectile;
use super::shop::Shop;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Shop screen, waiting for a weapon pick and confirm
    Start,
    /// Active gameplay (see `GameState::paused`)
    Playing,
}

/// Things the binding layer may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WeaponPurchased { slot: usize, name: String },
    /// Player inventory changed; inventory widgets should re-render
    InventoryChanged,
    GameStarted,
    Paused,
    Resumed,
    BurstStarted { angle: f64 },
    ProjectileFired,
}

/// Discrete inputs delivered between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved(DVec2),
    Click(DVec2),
    ConfirmReleased,
    PauseReleased,
    Resized {
        viewport_width: f64,
        viewport_height: f64,
    },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed used for enemy placement
    pub seed: u64,
    /// Unpaused Playing ticks so far
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Only meaningful while Playing
    pub paused: bool,
    pub arena: Arena,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub shop: Shop,
    /// Last known pointer position (shop hover)
    pub pointer: Option<DVec2>,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, arena: Arena, tuning: &Tuning) -> Self {
        let player = Player::new(arena.center(), tuning);

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut enemies = Vec::with_capacity(tuning.enemy_count);
        for id in 0..tuning.enemy_count {
            let pos = if id == 0 {
                DVec2::new(FIRST_ENEMY_POS.0, FIRST_ENEMY_POS.1)
            } else {
                let half = tuning.enemy_size / 2.0;
                DVec2::new(
                    rng.random_range(half..(arena.width - half).max(half + 1.0)),
                    rng.random_range(half..(arena.height - half).max(half + 1.0)),
                )
            };
            enemies.push(Enemy::new(id as u32, pos, tuning));
        }

        log::info!(
            "New session: seed={} arena={}x{} enemies={} shop={}",
            seed,
            arena.width,
            arena.height,
            enemies.len(),
            tuning.shop.len()
        );

        Self {
            seed,
            time_ticks: 0,
            phase: GamePhase::Start,
            paused: false,
            arena,
            player,
            enemies,
            projectiles: Vec::new(),
            shop: Shop::new(tuning.shop_stock()),
            pointer: None,
            events: Vec::new(),
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved(p) => self.pointer = Some(p),
            InputEvent::Click(p) => {
                self.pointer = Some(p);
                self.click(p);
            }
            InputEvent::ConfirmReleased => self.confirm(),
            InputEvent::PauseReleased => self.toggle_pause(),
            InputEvent::Resized {
                viewport_width,
                viewport_height,
            } => self.resize(Arena::from_viewport(viewport_width, viewport_height)),
        }
    }

    /// Buy the clicked shop weapon if the player has room for it
    pub fn click(&mut self, point: DVec2) {
        if self.phase != GamePhase::Start {
            return;
        }
        let Some(slot) = self.shop.slot_at(point, &self.arena) else {
            return;
        };
        if !self.player.inventory.has_room() {
            return;
        }
        let Some(weapon) = self.shop.take(slot) else {
            return;
        };
        let name = weapon.name.clone();
        if let Err(weapon) = self.player.inventory.add(weapon) {
            self.shop.restock(slot, weapon);
            return;
        }
        log::info!("Picked {} from slot {}", name, slot);
        self.emit(GameEvent::WeaponPurchased { slot, name });
        self.emit(GameEvent::InventoryChanged);
    }

    /// Leave the shop. Requires at least one weapon.
    pub fn confirm(&mut self) {
        if self.phase != GamePhase::Start || self.player.inventory.is_empty() {
            return;
        }
        self.phase = GamePhase::Playing;
        self.paused = false;
        log::info!("Game started");
        self.emit(GameEvent::GameStarted);
    }

    /// Flip the pause flag. Ignored outside Playing.
    pub fn toggle_pause(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.paused = !self.paused;
        if self.paused {
            log::info!("Paused at tick {}", self.time_ticks);
            self.emit(GameEvent::Paused);
        } else {
            log::info!("Resumed at tick {}", self.time_ticks);
            self.emit(GameEvent::Resumed);
        }
    }

    /// Adopt new arena bounds. Entities are re-clamped on their next move.
    pub fn resize(&mut self, arena: Arena) {
        log::debug!("Arena resized to {}x{}", arena.width, arena.height);
        self.arena = arena;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::shop::slot_rect;

    fn new_state() -> GameState {
        GameState::new(12345, Arena::new(800.0, 600.0), &Tuning::default())
    }

    fn click_slot(state: &mut GameState, slot: usize) {
        let center = slot_rect(slot, &state.arena).center();
        state.handle_event(InputEvent::Click(center));
    }

    #[test]
    fn test_initial_layout() {
        let state = new_state();
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.player.pos, DVec2::new(400.0, 300.0));
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos, DVec2::new(50.0, 50.0));
        assert_eq!(state.shop.remaining(), 3);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_buy_one_weapon_only() {
        let mut state = new_state();
        click_slot(&mut state, 0);
        click_slot(&mut state, 1);

        let names: Vec<&str> = state
            .player
            .inventory
            .items()
            .iter()
            .map(|w| w.name.as_str())
            .collect();
        assert_eq!(names, vec!["SMG Alpha"]);
        assert!(state.shop.slots()[0].is_none());
        assert!(state.shop.slots()[1].is_some());
        assert_eq!(state.shop.selected, Some(0));

        let events = state.drain_events();
        assert_eq!(
            events,
            vec![
                GameEvent::WeaponPurchased {
                    slot: 0,
                    name: "SMG Alpha".to_string()
                },
                GameEvent::InventoryChanged,
            ]
        );
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_click_outside_slots_is_noop() {
        let mut state = new_state();
        state.handle_event(InputEvent::Click(DVec2::new(5.0, 5.0)));
        state.handle_event(InputEvent::Click(DVec2::new(-500.0, 1e7)));
        assert!(state.player.inventory.is_empty());
        assert_eq!(state.shop.remaining(), 3);
        assert_eq!(state.pointer, Some(DVec2::new(-500.0, 1e7)));
    }

    #[test]
    fn test_confirm_needs_weapon() {
        let mut state = new_state();
        state.handle_event(InputEvent::ConfirmReleased);
        assert_eq!(state.phase, GamePhase::Start);

        click_slot(&mut state, 2);
        state.handle_event(InputEvent::ConfirmReleased);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_clicks_ignored_while_playing() {
        let mut state = new_state();
        click_slot(&mut state, 0);
        state.confirm();
        click_slot(&mut state, 1);
        assert_eq!(state.shop.remaining(), 2);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = new_state();
        // No effect on the shop screen
        state.handle_event(InputEvent::PauseReleased);
        assert!(!state.paused);
        assert_eq!(state.phase, GamePhase::Start);

        click_slot(&mut state, 0);
        state.confirm();
        state.handle_event(InputEvent::PauseReleased);
        assert!(state.paused);
        state.handle_event(InputEvent::PauseReleased);
        assert!(!state.paused);
    }

    #[test]
    fn test_resize_is_lazy() {
        let mut state = new_state();
        state.handle_event(InputEvent::Resized {
            viewport_width: 500.0,
            viewport_height: 200.0,
        });
        assert_eq!(state.arena, Arena::new(300.0, 200.0));
        // Positions untouched until the next move
        assert_eq!(state.player.pos, DVec2::new(400.0, 300.0));
    }

    #[test]
    fn test_seeded_enemy_placement() {
        let tuning = Tuning {
            enemy_count: 4,
            ..Default::default()
        };
        let arena = Arena::new(800.0, 600.0);
        let a = GameState::new(99, arena, &tuning);
        let b = GameState::new(99, arena, &tuning);
        assert_eq!(a.enemies.len(), 4);
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
            assert!(ea.pos.x >= 10.0 && ea.pos.x <= 790.0);
            assert!(ea.pos.y >= 10.0 && ea.pos.y <= 590.0);
        }
    }

    #[test]
    fn test_state_serializes() {
        let mut state = new_state();
        click_slot(&mut state, 0);
        let json = serde_json::to_string(&state).expect("serialize");
        let restored: GameState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.player.inventory.len(), 1);
        assert!(restored.shop.slots()[0].is_none());
    }
}
