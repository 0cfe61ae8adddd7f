//! Gold and item bag owned by a hero.

use super::types::{Item, ItemCategory, ItemEffect};
use crate::character::stats::{ManaPool, Stats};
use crate::core::constants::{HEALING_POTION, MANA_POTION};
use crate::core::error::GameError;
use serde::{Deserialize, Serialize};

/// Ordered item list plus a gold balance.
///
/// Gold has no floor: narrative penalties can push it below zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    gold: i64,
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn add_gold(&mut self, delta: i64) {
        self.gold += delta;
    }

    pub fn gold(&self) -> i64 {
        self.gold
    }

    pub fn set_gold(&mut self, value: i64) {
        self.gold = value;
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    pub fn count(&self, name: &str) -> usize {
        self.items.iter().filter(|item| item.name == name).count()
    }

    /// Distinct item names in first-seen order.
    pub fn item_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for item in &self.items {
            if !names.iter().any(|n| *n == item.name) {
                names.push(item.name.clone());
            }
        }
        names
    }

    /// Removes the first item with this name; the rest keep their order.
    pub fn remove_item(&mut self, name: &str) -> Result<Item, GameError> {
        let index = self
            .items
            .iter()
            .position(|item| item.name == name)
            .ok_or_else(|| GameError::ItemNotFound(name.to_string()))?;
        Ok(self.items.remove(index))
    }

    /// Consumes one item named `name` and applies it to the holder.
    ///
    /// Only healing and mana potions are consumable. Anything else goes back
    /// into the bag (at the end) and the call fails. An absent item leaves the
    /// inventory untouched.
    pub fn use_item(
        &mut self,
        name: &str,
        stats: &mut Stats,
        mana: &mut ManaPool,
    ) -> Result<ItemEffect, GameError> {
        let item = self.remove_item(name)?;

        if item.category != ItemCategory::Potion {
            let err = GameError::ItemNotUsable {
                name: item.name.clone(),
                reason: "it can't be used right now".to_string(),
            };
            self.add_item(item);
            return Err(err);
        }

        match item.name.as_str() {
            HEALING_POTION => Ok(ItemEffect::Healed {
                restored: stats.heal(item.magnitude),
            }),
            MANA_POTION => Ok(ItemEffect::ManaRestored {
                restored: mana.restore(item.magnitude),
            }),
            _ => {
                let err = GameError::ItemNotUsable {
                    name: item.name.clone(),
                    reason: "unknown potion type".to_string(),
                };
                self.add_item(item);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wounded() -> (Stats, ManaPool) {
        let mut stats = Stats::new("Tester", 100, 10, 0);
        stats.take_damage(50);
        (stats, ManaPool::new(100))
    }

    #[test]
    fn test_add_and_remove_preserves_order() {
        let mut inv = Inventory::new();
        inv.add_item(Item::healing_potion(30));
        inv.add_item(Item::mana_potion(30));
        inv.add_item(Item::healing_potion(20));

        let removed = inv.remove_item("healing_potion").unwrap();
        assert_eq!(removed.magnitude, 30);
        let names: Vec<&str> = inv.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["mana_potion", "healing_potion"]);
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut inv = Inventory::new();
        inv.add_item(Item::healing_potion(30));
        inv.add_item(Item::healing_potion(30));
        assert_eq!(inv.count("healing_potion"), 2);
        assert_eq!(inv.item_names(), vec!["healing_potion".to_string()]);
    }

    #[test]
    fn test_remove_missing_item() {
        let mut inv = Inventory::new();
        assert_eq!(
            inv.remove_item("relic"),
            Err(GameError::ItemNotFound("relic".to_string()))
        );
    }

    #[test]
    fn test_gold_can_go_negative() {
        let mut inv = Inventory::new();
        inv.add_gold(5);
        inv.add_gold(-10);
        assert_eq!(inv.gold(), -5);
        inv.set_gold(12);
        assert_eq!(inv.gold(), 12);
    }

    #[test]
    fn test_use_healing_potion_at_half_health() {
        let (mut stats, mut mana) = wounded();
        let mut inv = Inventory::new();
        inv.add_item(Item::healing_potion(30));
        inv.add_item(Item::healing_potion(30));

        let effect = inv.use_item("healing_potion", &mut stats, &mut mana).unwrap();
        assert_eq!(effect, ItemEffect::Healed { restored: 30 });
        assert_eq!(stats.current_hp, 80);
        assert_eq!(inv.count("healing_potion"), 1);
    }

    #[test]
    fn test_use_healing_potion_caps_at_max() {
        let mut stats = Stats::new("Tester", 100, 10, 0);
        stats.take_damage(10);
        let mut mana = ManaPool::new(100);
        let mut inv = Inventory::new();
        inv.add_item(Item::healing_potion(30));

        let effect = inv.use_item("healing_potion", &mut stats, &mut mana).unwrap();
        assert_eq!(effect, ItemEffect::Healed { restored: 10 });
        assert_eq!(stats.current_hp, 100);
    }

    #[test]
    fn test_use_missing_item_leaves_inventory_unchanged() {
        let (mut stats, mut mana) = wounded();
        let mut inv = Inventory::new();
        inv.add_item(Item::mana_potion(30));
        let before = inv.clone();

        let err = inv
            .use_item("healing_potion", &mut stats, &mut mana)
            .unwrap_err();
        assert_eq!(err, GameError::ItemNotFound("healing_potion".to_string()));
        assert_eq!(inv, before);
        assert_eq!(stats.current_hp, 50);
    }

    #[test]
    fn test_use_mana_potion() {
        let (mut stats, mut mana) = wounded();
        mana.spend(60);
        let mut inv = Inventory::new();
        inv.add_item(Item::mana_potion(30));

        let effect = inv.use_item("mana_potion", &mut stats, &mut mana).unwrap();
        assert_eq!(effect, ItemEffect::ManaRestored { restored: 30 });
        assert_eq!(mana.current, 70);
        assert!(inv.is_empty());
    }

    #[test]
    fn test_weapon_is_returned_and_rejected() {
        let (mut stats, mut mana) = wounded();
        let mut inv = Inventory::new();
        inv.add_item(Item::cursed_sword());
        inv.add_item(Item::healing_potion(30));

        let err = inv
            .use_item("cursed_sword_plus5", &mut stats, &mut mana)
            .unwrap_err();
        assert!(matches!(err, GameError::ItemNotUsable { .. }));
        assert!(inv.has_item("cursed_sword_plus5"));
        assert_eq!(inv.items().len(), 2);
        // Returned items go to the back of the bag
        assert_eq!(inv.items()[1].name, "cursed_sword_plus5");
    }

    #[test]
    fn test_unknown_potion_is_returned() {
        let (mut stats, mut mana) = wounded();
        let mut inv = Inventory::new();
        inv.add_item(Item::new("strange_brew", ItemCategory::Potion, 10));

        let err = inv
            .use_item("strange_brew", &mut stats, &mut mana)
            .unwrap_err();
        assert_eq!(
            err,
            GameError::ItemNotUsable {
                name: "strange_brew".to_string(),
                reason: "unknown potion type".to_string(),
            }
        );
        assert!(inv.has_item("strange_brew"));
        assert_eq!(stats.current_hp, 50);
    }
}
