use crate::core::constants::{CURSED_SWORD, CURSED_SWORD_BONUS, HEALING_POTION, MANA_POTION};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    Potion,
    Weapon,
    Armor,
}

impl ItemCategory {
    pub fn name(&self) -> &'static str {
        match self {
            ItemCategory::Potion => "Potion",
            ItemCategory::Weapon => "Weapon",
            ItemCategory::Armor => "Armor",
        }
    }
}

/// An inventory entry. Several items may share a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub category: ItemCategory,
    /// Healing amount, mana amount, or stat bonus depending on the item.
    pub magnitude: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, category: ItemCategory, magnitude: u32) -> Self {
        Self {
            name: name.into(),
            category,
            magnitude,
        }
    }

    pub fn healing_potion(strength: u32) -> Self {
        Self::new(HEALING_POTION, ItemCategory::Potion, strength)
    }

    pub fn mana_potion(strength: u32) -> Self {
        Self::new(MANA_POTION, ItemCategory::Potion, strength)
    }

    /// Carries a +5 attack bonus that nothing ever applies.
    pub fn cursed_sword() -> Self {
        Self::new(CURSED_SWORD, ItemCategory::Weapon, CURSED_SWORD_BONUS)
    }

    /// Human-readable name for menus ("healing_potion" -> "Healing Potion").
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }
}

/// Turns a snake_case item name into title case.
pub fn display_name(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// What a successfully used item did to its user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEffect {
    /// Health actually restored (capped at max health).
    Healed { restored: u32 },
    /// Mana actually restored (capped at max mana).
    ManaRestored { restored: u32 },
}
