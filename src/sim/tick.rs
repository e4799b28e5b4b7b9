//! Per-frame simulation tick
//!
//! One call advances Playing by exactly one step. The shop screen is driven
//! by discrete input events instead (see `GameState::handle_event`).

use glam::DVec2;

use super::state::{GameEvent, GamePhase, GameState};
use super::targeting::nearest_index;

/// Movement keys held during this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// Raw direction in {-1, 0, 1} per axis (screen y grows downward)
    pub fn axis(&self) -> DVec2 {
        let mut axis = DVec2::ZERO;
        if self.left {
            axis.x -= 1.0;
        }
        if self.right {
            axis.x += 1.0;
        }
        if self.up {
            axis.y -= 1.0;
        }
        if self.down {
            axis.y += 1.0;
        }
        axis
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing || state.paused {
        return;
    }

    let now = state.time_ticks;
    let arena = state.arena;

    state.player.move_with_input(input, &arena);

    auto_fire(state, now);

    // Update everything first, then prune in a single filtering pass
    for projectile in &mut state.projectiles {
        projectile.update();
    }
    state.projectiles.retain(|p| !p.is_expired(&arena));

    let target = state.player.pos;
    for enemy in &mut state.enemies {
        enemy.move_toward(target, &arena);
    }

    state.time_ticks += 1;
}

/// Aim the primary weapon at the nearest enemy and run its burst
fn auto_fire(state: &mut GameState, now: u64) {
    let origin = state.player.pos;
    let target = nearest_index(origin, &state.enemies).map(|i| state.enemies[i].pos);
    let angle = target.map(|t| state.player.aim_at(t));

    let Some(weapon) = state.player.inventory.primary_mut() else {
        return;
    };

    let armed = angle.filter(|&a| weapon.shoot(a, now));
    // A burst in flight keeps firing even if its target disappears
    let fired = weapon.update(origin, now);

    if let Some(angle) = armed {
        log::debug!("Burst armed at tick {} angle {:.3}", now, angle);
        state.emit(GameEvent::BurstStarted { angle });
    }
    if let Some(projectile) = fired {
        state.projectiles.push(projectile);
        state.emit(GameEvent::ProjectileFired);
    }
}
