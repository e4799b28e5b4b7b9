//! Data-driven game balance
//!
//! Every number the simulation uses can be overridden from JSON. Missing
//! fields fall back to the defaults in `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Weapon, WeaponKind, WeaponStats};

/// One weapon offered in the shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub name: String,
    #[serde(default)]
    pub kind: WeaponKind,
    /// Overrides the kind's default stats
    #[serde(default)]
    pub stats: Option<WeaponStats>,
}

impl ShopItem {
    pub fn new(name: &str, kind: WeaponKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            stats: None,
        }
    }

    pub fn to_weapon(&self) -> Weapon {
        match self.stats {
            Some(stats) => Weapon::with_stats(self.name.clone(), self.kind, stats),
            None => Weapon::new(self.name.clone(), self.kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_speed: f64,
    pub player_acceleration: f64,
    pub damping_factor: f64,
    pub player_size: f64,
    pub enemy_speed: f64,
    pub enemy_size: f64,
    pub enemy_count: usize,
    pub inventory_capacity: usize,
    pub shop: Vec<ShopItem>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            player_acceleration: PLAYER_ACCELERATION,
            damping_factor: DAMPING_FACTOR,
            player_size: PLAYER_SIZE,
            enemy_speed: ENEMY_SPEED,
            enemy_size: ENEMY_SIZE,
            enemy_count: 1,
            inventory_capacity: INVENTORY_CAPACITY,
            shop: vec![
                ShopItem::new("SMG Alpha", WeaponKind::Smg),
                ShopItem::new("SMG Beta", WeaponKind::Smg),
                ShopItem::new("SMG Gamma", WeaponKind::Smg),
            ],
        }
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

impl Tuning {
    /// Parse and sanitize a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load from a JSON file, falling back to defaults on any problem
    pub fn load_or_default(path: &std::path::Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read tuning {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values into ranges the simulation can run with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.player_speed = positive_or(self.player_speed, defaults.player_speed);
        self.player_size = positive_or(self.player_size, defaults.player_size);
        self.enemy_size = positive_or(self.enemy_size, defaults.enemy_size);
        if !self.player_acceleration.is_finite() || self.player_acceleration < 0.0 {
            self.player_acceleration = defaults.player_acceleration;
        }
        if !self.enemy_speed.is_finite() || self.enemy_speed < 0.0 {
            self.enemy_speed = defaults.enemy_speed;
        }
        self.damping_factor = if self.damping_factor.is_finite() {
            self.damping_factor.clamp(0.0, 1.0)
        } else {
            defaults.damping_factor
        };
        self.inventory_capacity = self.inventory_capacity.max(1);
        self
    }

    /// Fresh weapons for the shop, in slot order
    pub fn shop_stock(&self) -> Vec<Weapon> {
        self.shop.iter().map(ShopItem::to_weapon).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let tuning = Tuning::default();
        assert_eq!(tuning.player_speed, 5.0);
        assert_eq!(tuning.damping_factor, 0.9);
        assert_eq!(tuning.enemy_count, 1);
        let names: Vec<String> = tuning.shop_stock().into_iter().map(|w| w.name).collect();
        assert_eq!(names, vec!["SMG Alpha", "SMG Beta", "SMG Gamma"]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "enemy_count": 4, "enemy_speed": 3.5 }"#).unwrap();
        assert_eq!(tuning.enemy_count, 4);
        assert_eq!(tuning.enemy_speed, 3.5);
        assert_eq!(tuning.player_acceleration, PLAYER_ACCELERATION);
        assert_eq!(tuning.shop.len(), 3);
    }

    #[test]
    fn test_custom_shop() {
        let json = r#"{
            "shop": [
                { "name": "Rifle Prime", "kind": "Rifle" },
                { "name": "Pea Shooter", "kind": "Pistol",
                  "stats": { "burst_cooldown_ticks": 5 } }
            ]
        }"#;
        let tuning = Tuning::from_json(json).unwrap();
        let stock = tuning.shop_stock();
        assert_eq!(stock.len(), 2);
        assert_eq!(stock[0].kind, WeaponKind::Rifle);
        assert_eq!(stock[0].stats.burst_size, 5);
        assert_eq!(stock[1].stats.burst_cooldown_ticks, 5);
        // Unspecified override fields come from WeaponStats::default
        assert_eq!(stock[1].stats.burst_size, SMG_BURST_SIZE);
    }

    #[test]
    fn test_sanitize_rejects_nonsense() {
        let tuning = Tuning::from_json(
            r#"{ "player_speed": -1, "damping_factor": 3.0, "inventory_capacity": 0 }"#,
        )
        .unwrap();
        assert_eq!(tuning.player_speed, PLAYER_SPEED);
        assert_eq!(tuning.damping_factor, 1.0);
        assert_eq!(tuning.inventory_capacity, 1);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default(std::path::Path::new("/definitely/not/here.json"));
        assert_eq!(tuning, Tuning::default());
    }
}
