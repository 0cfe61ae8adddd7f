//! Shared combatant stats and the `Combatant` capability.

use super::hero::SpecialOutcome;
use crate::core::constants::ATTACK_DIE;
use crate::core::dice::RandomSource;
use serde::{Deserialize, Serialize};

/// Health, attack and defense of anything that fights.
///
/// `current_hp` always stays within `[0, max_hp]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub name: String,
    pub current_hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
}

impl Stats {
    pub fn new(name: impl Into<String>, max_hp: u32, attack: u32, defense: u32) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            name: name.into(),
            current_hp: max_hp,
            max_hp,
            attack,
            defense,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Defense is a flat reduction. Returns the health actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let effective = amount.saturating_sub(self.defense);
        let lost = effective.min(self.current_hp);
        self.current_hp -= lost;
        lost
    }

    /// Returns the health actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp - self.current_hp);
        self.current_hp += restored;
        restored
    }

    pub fn missing_hp(&self) -> u32 {
        self.max_hp - self.current_hp
    }

    pub fn hp_ratio(&self) -> f64 {
        self.current_hp as f64 / self.max_hp as f64
    }
}

/// Mana pool clamped to `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaPool {
    pub current: u32,
    pub max: u32,
}

impl ManaPool {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Returns the mana actually restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max - self.current);
        self.current += restored;
        restored
    }

    pub fn spend(&mut self, cost: u32) {
        self.current = self.current.saturating_sub(cost);
    }
}

/// Raw attack damage before the target's own mitigation:
/// `max(0, roll + attack + bonus - target_defense)`.
pub fn attack_damage(roll: u32, attack: u32, bonus: u32, target_defense: u32) -> u32 {
    (roll + attack + bonus).saturating_sub(target_defense)
}

/// Result of one basic attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// Health the target actually lost.
    pub damage: u32,
    /// Extra elemental damage folded into the hit (monsters only).
    pub elemental_bonus: u32,
}

/// Capability shared by heroes and monsters.
///
/// The attack formula subtracts the target's defense once, then
/// [`Stats::take_damage`] subtracts it again: defense counts twice against
/// basic attacks.
pub trait Combatant {
    fn stats(&self) -> &Stats;

    fn stats_mut(&mut self) -> &mut Stats;

    fn name(&self) -> &str {
        &self.stats().name
    }

    fn is_alive(&self) -> bool {
        self.stats().is_alive()
    }

    fn take_damage(&mut self, amount: u32) -> u32 {
        self.stats_mut().take_damage(amount)
    }

    fn heal(&mut self, amount: u32) -> u32 {
        self.stats_mut().heal(amount)
    }

    /// d20 + attack - target defense, applied through the target's `take_damage`.
    fn basic_attack<T: Combatant + ?Sized>(
        &mut self,
        target: &mut T,
        dice: &mut impl RandomSource,
    ) -> AttackOutcome {
        let roll = dice.roll(ATTACK_DIE);
        let raw = attack_damage(roll, self.stats().attack, 0, target.stats().defense);
        AttackOutcome {
            damage: target.take_damage(raw),
            elemental_bonus: 0,
        }
    }

    /// The combatant's signature move; one battle action.
    fn perform_special<T: Combatant + ?Sized>(
        &mut self,
        target: &mut T,
        dice: &mut impl RandomSource,
    ) -> SpecialOutcome;
}
