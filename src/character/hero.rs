//! Player heroes: class roster, starting kits, and special abilities.

use super::stats::{attack_damage, Combatant, ManaPool, Stats};
use crate::core::constants::*;
use crate::core::dice::RandomSource;
use crate::core::error::GameError;
use crate::items::{Inventory, Item, ItemEffect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeroClass {
    Wizard,
    Sorcerer,
    Knight,
    Bard,
    Zoomer,
}

/// Starting stats and kit for a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroProfile {
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub starting_gold: i64,
    pub starting_items: Vec<Item>,
    pub starting_rage: u32,
    /// Special ability can stun the monster for its next turn.
    pub can_stun: bool,
}

impl HeroClass {
    pub fn all() -> [HeroClass; 5] {
        [
            HeroClass::Wizard,
            HeroClass::Sorcerer,
            HeroClass::Knight,
            HeroClass::Bard,
            HeroClass::Zoomer,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            HeroClass::Wizard => "Wizard",
            HeroClass::Sorcerer => "Sorcerer",
            HeroClass::Knight => "Knight",
            HeroClass::Bard => "Bard",
            HeroClass::Zoomer => "Zoomer",
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            HeroClass::Wizard => "Tank/Magic",
            HeroClass::Sorcerer => "Burst/Elemental",
            HeroClass::Knight => "Balanced/Crit",
            HeroClass::Bard => "Support/Rage",
            HeroClass::Zoomer => "Speed/Multi-hit",
        }
    }

    pub fn special_name(&self) -> &'static str {
        match self {
            HeroClass::Wizard => "Arcane Shield",
            HeroClass::Sorcerer => "Elemental Fury",
            HeroClass::Knight => "Holy Strike",
            HeroClass::Bard => "Battle Song",
            HeroClass::Zoomer => "Rapid Strike",
        }
    }

    pub fn special_description(&self) -> &'static str {
        match self {
            HeroClass::Wizard => "1.5x damage, 25% chance to stun",
            HeroClass::Sorcerer => "+10 damage, costs 30 mana",
            HeroClass::Knight => "25% chance of a 2.5x critical",
            HeroClass::Bard => "+1 damage per 10 HP missing, builds rage",
            HeroClass::Zoomer => "Strikes twice",
        }
    }

    pub fn profile(&self) -> HeroProfile {
        match self {
            HeroClass::Wizard => HeroProfile {
                max_hp: 120,
                attack: 20,
                defense: 15,
                starting_gold: 20,
                starting_items: vec![Item::healing_potion(30), Item::healing_potion(30)],
                starting_rage: 0,
                can_stun: true,
            },
            HeroClass::Sorcerer => HeroProfile {
                max_hp: 80,
                attack: 25,
                defense: 8,
                starting_gold: 30,
                starting_items: vec![Item::healing_potion(20), Item::mana_potion(30)],
                starting_rage: 0,
                can_stun: false,
            },
            HeroClass::Knight => HeroProfile {
                max_hp: 90,
                attack: 22,
                defense: 10,
                starting_gold: 40,
                starting_items: vec![Item::healing_potion(25)],
                starting_rage: 0,
                can_stun: false,
            },
            HeroClass::Bard => HeroProfile {
                max_hp: 140,
                attack: 28,
                defense: 12,
                starting_gold: 10,
                starting_items: vec![Item::healing_potion(40)],
                starting_rage: 20,
                can_stun: false,
            },
            HeroClass::Zoomer => HeroProfile {
                max_hp: 100,
                attack: 24,
                defense: 9,
                starting_gold: 35,
                starting_items: vec![Item::healing_potion(25), Item::healing_potion(25)],
                starting_rage: 0,
                can_stun: false,
            },
        }
    }
}

impl fmt::Display for HeroClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeroClass {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeroClass::all()
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::InvalidSelection(format!("unknown hero class '{s}'")))
    }
}

/// What a special ability did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialOutcome {
    ArcaneShield {
        damage: u32,
    },
    ElementalFury {
        damage: u32,
        mana_spent: u32,
    },
    /// Mana-gated ability did not trigger; nothing was spent.
    NotEnoughMana {
        have: u32,
        need: u32,
    },
    HolyStrike {
        damage: u32,
        critical: bool,
    },
    BattleSong {
        damage: u32,
        inspiration: u32,
        rage: u32,
    },
    /// `second` is `None` when the first strike was fatal.
    RapidStrike {
        first: u32,
        second: Option<u32>,
    },
    /// Monsters have no special ability.
    Nothing,
}

impl SpecialOutcome {
    pub fn total_damage(&self) -> u32 {
        match *self {
            SpecialOutcome::ArcaneShield { damage }
            | SpecialOutcome::ElementalFury { damage, .. }
            | SpecialOutcome::HolyStrike { damage, .. }
            | SpecialOutcome::BattleSong { damage, .. } => damage,
            SpecialOutcome::RapidStrike { first, second } => first + second.unwrap_or(0),
            SpecialOutcome::NotEnoughMana { .. } | SpecialOutcome::Nothing => 0,
        }
    }

    /// The failure behind an ability that did not trigger.
    pub fn failure(&self) -> Option<GameError> {
        match *self {
            SpecialOutcome::NotEnoughMana { have, need } => Some(GameError::InsufficientResource {
                resource: "mana",
                have,
                need,
            }),
            _ => None,
        }
    }
}

/// The player's character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    class: HeroClass,
    stats: Stats,
    mana: ManaPool,
    rage: u32,
    inventory: Inventory,
    can_stun: bool,
}

impl Hero {
    pub fn new(class: HeroClass) -> Self {
        let profile = class.profile();
        let mut inventory = Inventory::new();
        inventory.add_gold(profile.starting_gold);
        for item in profile.starting_items {
            inventory.add_item(item);
        }
        Self {
            class,
            stats: Stats::new(class.name(), profile.max_hp, profile.attack, profile.defense),
            mana: ManaPool::new(STARTING_MANA),
            rage: profile.starting_rage.min(MAX_RAGE),
            inventory,
            can_stun: profile.can_stun,
        }
    }

    pub fn class(&self) -> HeroClass {
        self.class
    }

    pub fn can_stun(&self) -> bool {
        self.can_stun
    }

    pub fn mana(&self) -> ManaPool {
        self.mana
    }

    pub fn rage(&self) -> u32 {
        self.rage
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn gold(&self) -> i64 {
        self.inventory.gold()
    }

    /// Returns the mana actually restored.
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        self.mana.restore(amount)
    }

    pub fn spend_mana(&mut self, cost: u32) {
        self.mana.spend(cost);
    }

    pub fn add_rage(&mut self, amount: u32) {
        self.rage = (self.rage + amount).min(MAX_RAGE);
    }

    pub fn reset_rage(&mut self) {
        self.rage = 0;
    }

    /// Drinks/uses one item from the inventory on this hero.
    pub fn use_item(&mut self, name: &str) -> Result<ItemEffect, GameError> {
        self.inventory
            .use_item(name, &mut self.stats, &mut self.mana)
    }

    fn arcane_shield<T: Combatant + ?Sized>(
        &mut self,
        target: &mut T,
        dice: &mut impl RandomSource,
    ) -> SpecialOutcome {
        let roll = dice.roll(ATTACK_DIE);
        let raw = attack_damage(roll, self.stats.attack, 0, target.stats().defense);
        let boosted = raw * 3 / 2;
        SpecialOutcome::ArcaneShield {
            damage: target.take_damage(boosted),
        }
    }

    fn elemental_fury<T: Combatant + ?Sized>(
        &mut self,
        target: &mut T,
        dice: &mut impl RandomSource,
    ) -> SpecialOutcome {
        if self.mana.current < SORCERER_MANA_COST {
            return SpecialOutcome::NotEnoughMana {
                have: self.mana.current,
                need: SORCERER_MANA_COST,
            };
        }
        self.mana.spend(SORCERER_MANA_COST);
        let roll = dice.roll(ATTACK_DIE);
        let raw = attack_damage(
            roll,
            self.stats.attack,
            SORCERER_ELEMENTAL_BONUS,
            target.stats().defense,
        );
        SpecialOutcome::ElementalFury {
            damage: target.take_damage(raw),
            mana_spent: SORCERER_MANA_COST,
        }
    }

    fn holy_strike<T: Combatant + ?Sized>(
        &mut self,
        target: &mut T,
        dice: &mut impl RandomSource,
    ) -> SpecialOutcome {
        let roll = dice.roll(ATTACK_DIE);
        let critical = dice.chance(KNIGHT_CRIT_CHANCE);
        let base = attack_damage(roll, self.stats.attack, 0, target.stats().defense);
        let raw = if critical { base * 5 / 2 } else { base };
        SpecialOutcome::HolyStrike {
            damage: target.take_damage(raw),
            critical,
        }
    }

    fn battle_song<T: Combatant + ?Sized>(
        &mut self,
        target: &mut T,
        dice: &mut impl RandomSource,
    ) -> SpecialOutcome {
        let inspiration = self.stats.missing_hp() / BARD_HP_PER_INSPIRATION;
        let roll = dice.roll(ATTACK_DIE);
        let raw = attack_damage(roll, self.stats.attack, inspiration, target.stats().defense);
        let damage = target.take_damage(raw);
        self.add_rage(BARD_RAGE_GAIN);
        SpecialOutcome::BattleSong {
            damage,
            inspiration,
            rage: self.rage,
        }
    }

    fn rapid_strike<T: Combatant + ?Sized>(
        &mut self,
        target: &mut T,
        dice: &mut impl RandomSource,
    ) -> SpecialOutcome {
        let first = self.basic_attack(target, dice).damage;
        let second = if target.is_alive() {
            Some(self.basic_attack(target, dice).damage)
        } else {
            None
        };
        SpecialOutcome::RapidStrike { first, second }
    }
}

impl Combatant for Hero {
    fn stats(&self) -> &Stats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }

    fn perform_special<T: Combatant + ?Sized>(
        &mut self,
        target: &mut T,
        dice: &mut impl RandomSource,
    ) -> SpecialOutcome {
        match self.class {
            HeroClass::Wizard => self.arcane_shield(target, dice),
            HeroClass::Sorcerer => self.elemental_fury(target, dice),
            HeroClass::Knight => self.holy_strike(target, dice),
            HeroClass::Bard => self.battle_song(target, dice),
            HeroClass::Zoomer => self.rapid_strike(target, dice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::ScriptedDice;

    fn target(hp: u32, defense: u32) -> Hero {
        // Any combatant works as a target; a stripped hero keeps tests local.
        let mut hero = Hero::new(HeroClass::Knight);
        hero.stats = Stats::new("Target", hp, 0, defense);
        hero
    }

    #[test]
    fn test_profiles_match_roster() {
        let wizard = Hero::new(HeroClass::Wizard);
        assert_eq!(wizard.stats().max_hp, 120);
        assert_eq!(wizard.stats().attack, 20);
        assert_eq!(wizard.stats().defense, 15);
        assert_eq!(wizard.gold(), 20);
        assert_eq!(wizard.inventory().count(HEALING_POTION), 2);
        assert!(wizard.can_stun());

        let bard = Hero::new(HeroClass::Bard);
        assert_eq!(bard.rage(), 20);
        assert_eq!(bard.stats().max_hp, 140);
        assert!(!bard.can_stun());

        let sorcerer = Hero::new(HeroClass::Sorcerer);
        assert!(sorcerer.inventory().has_item(MANA_POTION));
        assert_eq!(sorcerer.mana(), ManaPool { current: 100, max: 100 });
    }

    #[test]
    fn test_only_wizard_can_stun() {
        let stunners: Vec<HeroClass> = HeroClass::all()
            .into_iter()
            .filter(|c| Hero::new(*c).can_stun())
            .collect();
        assert_eq!(stunners, vec![HeroClass::Wizard]);
    }

    #[test]
    fn test_parse_class_name() {
        assert_eq!("knight".parse::<HeroClass>(), Ok(HeroClass::Knight));
        assert_eq!(" ZOOMER ".parse::<HeroClass>(), Ok(HeroClass::Zoomer));
        assert!("paladin".parse::<HeroClass>().is_err());
    }

    #[test]
    fn test_wizard_arcane_shield_multiplies_raw_damage() {
        let mut wizard = Hero::new(HeroClass::Wizard);
        let mut foe = target(200, 4);
        let mut dice = ScriptedDice::new([11]);

        // raw = 11 + 20 - 4 = 27, boosted = 40, lost = 40 - 4 = 36
        let outcome = wizard.perform_special(&mut foe, &mut dice);
        assert_eq!(outcome, SpecialOutcome::ArcaneShield { damage: 36 });
        assert_eq!(foe.stats().current_hp, 164);
    }

    #[test]
    fn test_sorcerer_without_mana_fizzles() {
        let mut sorcerer = Hero::new(HeroClass::Sorcerer);
        sorcerer.spend_mana(90);
        let mut foe = target(50, 4);
        let mut dice = ScriptedDice::new([]);

        let outcome = sorcerer.perform_special(&mut foe, &mut dice);
        assert_eq!(outcome, SpecialOutcome::NotEnoughMana { have: 10, need: 30 });
        assert_eq!(sorcerer.mana().current, 10);
        assert_eq!(foe.stats().current_hp, 50);
        assert!(dice.requested().is_empty());
        assert_eq!(
            outcome.failure(),
            Some(GameError::InsufficientResource {
                resource: "mana",
                have: 10,
                need: 30
            })
        );
    }

    #[test]
    fn test_sorcerer_elemental_fury_spends_mana() {
        let mut sorcerer = Hero::new(HeroClass::Sorcerer);
        let mut foe = target(100, 7);
        let mut dice = ScriptedDice::new([3]);

        // raw = 3 + 25 + 10 - 7 = 31, lost = 24
        let outcome = sorcerer.perform_special(&mut foe, &mut dice);
        assert_eq!(
            outcome,
            SpecialOutcome::ElementalFury {
                damage: 24,
                mana_spent: 30
            }
        );
        assert_eq!(sorcerer.mana().current, 70);
    }

    #[test]
    fn test_knight_critical_holy_strike() {
        let mut knight = Hero::new(HeroClass::Knight);
        let mut foe = target(200, 10);
        // d20 = 8, crit roll 25 <= 25
        let mut dice = ScriptedDice::new([8, 25]);

        // base = 8 + 22 - 10 = 20, crit = 50, lost = 40
        let outcome = knight.perform_special(&mut foe, &mut dice);
        assert_eq!(
            outcome,
            SpecialOutcome::HolyStrike {
                damage: 40,
                critical: true
            }
        );
        assert_eq!(dice.requested(), &[20, 100]);
    }

    #[test]
    fn test_knight_normal_holy_strike() {
        let mut knight = Hero::new(HeroClass::Knight);
        let mut foe = target(200, 10);
        let mut dice = ScriptedDice::new([8, 26]);

        let outcome = knight.perform_special(&mut foe, &mut dice);
        assert_eq!(
            outcome,
            SpecialOutcome::HolyStrike {
                damage: 10,
                critical: false
            }
        );
    }

    #[test]
    fn test_bard_inspiration_from_missing_health() {
        let mut bard = Hero::new(HeroClass::Bard);
        bard.stats.current_hp = 95; // 45 missing -> +4
        let mut foe = target(200, 10);
        let mut dice = ScriptedDice::new([10]);

        // raw = 10 + 28 + 4 - 10 = 32, lost = 22
        let outcome = bard.perform_special(&mut foe, &mut dice);
        assert_eq!(
            outcome,
            SpecialOutcome::BattleSong {
                damage: 22,
                inspiration: 4,
                rage: 35
            }
        );
    }

    #[test]
    fn test_bard_rage_caps_at_100() {
        let mut bard = Hero::new(HeroClass::Bard);
        let mut foe = target(10_000, 0);
        let mut dice = ScriptedDice::new(vec![1; 10]);
        for _ in 0..10 {
            bard.perform_special(&mut foe, &mut dice);
        }
        assert_eq!(bard.rage(), 100);
        bard.reset_rage();
        assert_eq!(bard.rage(), 0);
    }

    #[test]
    fn test_zoomer_second_strike_skipped_on_kill() {
        let mut zoomer = Hero::new(HeroClass::Zoomer);
        let mut foe = target(1, 0);
        let mut dice = ScriptedDice::new([1, 20]);

        let outcome = zoomer.perform_special(&mut foe, &mut dice);
        assert_eq!(
            outcome,
            SpecialOutcome::RapidStrike {
                first: 1,
                second: None
            }
        );
        assert_eq!(outcome.total_damage(), 1);
        assert!(!foe.is_alive());
        assert_eq!(dice.requested(), &[20]);
        assert_eq!(dice.remaining(), 1);
    }

    #[test]
    fn test_zoomer_strikes_twice() {
        let mut zoomer = Hero::new(HeroClass::Zoomer);
        let mut foe = target(200, 4);
        let mut dice = ScriptedDice::new([5, 6]);

        // (5 + 24 - 4) - 4 = 21, (6 + 24 - 4) - 4 = 22
        let outcome = zoomer.perform_special(&mut foe, &mut dice);
        assert_eq!(
            outcome,
            SpecialOutcome::RapidStrike {
                first: 21,
                second: Some(22)
            }
        );
        assert_eq!(outcome.total_damage(), 43);
        assert_eq!(foe.stats().current_hp, 157);
    }

    #[test]
    fn test_hero_basic_attack_has_no_elemental_bonus() {
        let mut knight = Hero::new(HeroClass::Knight);
        let mut foe = target(100, 4);
        let mut dice = ScriptedDice::new([20]);
        let outcome = knight.basic_attack(&mut foe, &mut dice);
        assert_eq!(outcome.elemental_bonus, 0);
        assert_eq!(outcome.damage, 34);
    }

    #[test]
    fn test_use_item_heals_hero() {
        let mut wizard = Hero::new(HeroClass::Wizard);
        wizard.take_damage(75); // 75 - 15 defense = 60 lost
        assert_eq!(wizard.stats().current_hp, 60);

        let effect = wizard.use_item(HEALING_POTION).unwrap();
        assert_eq!(effect, ItemEffect::Healed { restored: 30 });
        assert_eq!(wizard.stats().current_hp, 90);
        assert_eq!(wizard.inventory().count(HEALING_POTION), 1);
    }
}
