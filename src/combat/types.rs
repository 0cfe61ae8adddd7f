use crate::character::hero::SpecialOutcome;
use crate::character::stats::{attack_damage, AttackOutcome, Combatant, Stats};
use crate::core::constants::{ATTACK_DIE, MONSTER_ELEMENTAL_CHANCE, MONSTER_ELEMENTAL_DAMAGE};
use crate::core::dice::RandomSource;
use serde::{Deserialize, Serialize};

/// Creatures from the Upside Down, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Demobat,
    Demodog,
    FlayedOne,
    MindFlayer,
}

impl MonsterKind {
    pub fn all() -> [MonsterKind; 4] {
        [
            MonsterKind::Demobat,
            MonsterKind::Demodog,
            MonsterKind::FlayedOne,
            MonsterKind::MindFlayer,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MonsterKind::Demobat => "Demobat",
            MonsterKind::Demodog => "Demodog",
            MonsterKind::FlayedOne => "Flayed One",
            MonsterKind::MindFlayer => "Mind Flayer",
        }
    }

    /// Returns (max_hp, attack, defense).
    pub fn base_stats(&self) -> (u32, u32, u32) {
        match self {
            MonsterKind::Demobat => (25, 12, 4),
            MonsterKind::Demodog => (50, 16, 7),
            MonsterKind::FlayedOne => (80, 20, 10),
            MonsterKind::MindFlayer => (250, 35, 18),
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, MonsterKind::MindFlayer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub kind: MonsterKind,
    pub stats: Stats,
    pub is_boss: bool,
}

impl Monster {
    pub fn new(kind: MonsterKind) -> Self {
        let (hp, attack, defense) = kind.base_stats();
        Self {
            kind,
            stats: Stats::new(kind.name(), hp, attack, defense),
            is_boss: kind.is_boss(),
        }
    }

    pub fn boss() -> Self {
        Self::new(MonsterKind::MindFlayer)
    }
}

impl Combatant for Monster {
    fn stats(&self) -> &Stats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }

    /// d20 + attack - target defense, plus a 30% chance of 15 elemental damage.
    fn basic_attack<T: Combatant + ?Sized>(
        &mut self,
        target: &mut T,
        dice: &mut impl RandomSource,
    ) -> AttackOutcome {
        let roll = dice.roll(ATTACK_DIE);
        let base = attack_damage(roll, self.stats.attack, 0, target.stats().defense);
        let elemental_bonus = if dice.chance(MONSTER_ELEMENTAL_CHANCE) {
            MONSTER_ELEMENTAL_DAMAGE
        } else {
            0
        };
        AttackOutcome {
            damage: target.take_damage(base + elemental_bonus),
            elemental_bonus,
        }
    }

    fn perform_special<T: Combatant + ?Sized>(
        &mut self,
        _target: &mut T,
        _dice: &mut impl RandomSource,
    ) -> SpecialOutcome {
        SpecialOutcome::Nothing
    }
}
