//! Pre-game weapon shop
//!
//! Slots are a fixed-size array laid out left to right. Buying a weapon
//! empties its slot in place so the remaining cards never shift.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::physics::Arena;
use super::weapon::Weapon;
use crate::consts::*;

/// Axis-aligned rectangle (top-left origin, screen coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Edges inclusive
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Top-left corner of the card grid
pub fn grid_origin(arena: &Arena) -> DVec2 {
    arena.center() + DVec2::new(SHOP_OFFSET_X, SHOP_OFFSET_Y)
}

/// Screen rectangle of the card in slot `index`
pub fn slot_rect(index: usize, arena: &Arena) -> Rect {
    let origin = grid_origin(arena);
    Rect {
        x: origin.x + index as f64 * SHOP_CARD_PITCH,
        y: origin.y,
        w: SHOP_CARD_SIZE,
        h: SHOP_CARD_SIZE,
    }
}

/// A slot either holds a weapon for sale or is empty (already bought)
pub type ShopSlot = Option<Weapon>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shop {
    slots: Vec<ShopSlot>,
    /// Slot the player bought from, if any
    pub selected: Option<usize>,
}

impl Shop {
    pub fn new(stock: Vec<Weapon>) -> Self {
        Self {
            slots: stock.into_iter().map(Some).collect(),
            selected: None,
        }
    }

    pub fn slots(&self) -> &[ShopSlot] {
        &self.slots
    }

    /// First still-stocked slot whose card contains `point`
    pub fn slot_at(&self, point: DVec2, arena: &Arena) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| i)
            .find(|&i| slot_rect(i, arena).contains(point))
    }

    /// Remove the weapon from `index`, leaving the slot empty
    pub fn take(&mut self, index: usize) -> Option<Weapon> {
        let weapon = self.slots.get_mut(index)?.take()?;
        self.selected = Some(index);
        Some(weapon)
    }

    /// Undo a `take`: put the weapon back and drop the selection
    pub fn restock(&mut self, index: usize, weapon: Weapon) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Some(weapon);
            if self.selected == Some(index) {
                self.selected = None;
            }
        }
    }

    pub fn remaining(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
