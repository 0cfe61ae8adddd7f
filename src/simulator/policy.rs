//! Autopilot strategies that answer campaign decisions without a human.

use crate::character::hero::{Hero, HeroClass};
use crate::character::stats::Combatant;
use crate::combat::logic::{Battle, PlayerAction};
use crate::core::constants::{HEALING_POTION, MANA_POTION, SORCERER_MANA_COST};
use crate::core::error::GameError;
use crate::encounters::{Vignette, VignetteChoice};
use std::fmt;
use std::str::FromStr;

/// Drink a healing potion below this share of max HP.
const HEAL_THRESHOLD: f64 = 0.35;
/// Try to run from non-boss fights below this share of max HP with nothing to drink.
const FLEE_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Always attack; accept every vignette.
    AttackOnly,
    /// Heal when low, use specials, run from bad fights.
    Tactical,
}

impl Policy {
    pub fn name(&self) -> &'static str {
        match self {
            Policy::AttackOnly => "attack-only",
            Policy::Tactical => "tactical",
        }
    }

    /// Picks one of `legal`. Falls back to `Attack` if the preferred action isn't offered.
    pub fn choose_action(&self, hero: &Hero, battle: &Battle, legal: &[PlayerAction]) -> PlayerAction {
        let preferred = match self {
            Policy::AttackOnly => PlayerAction::Attack,
            Policy::Tactical => tactical_action(hero, battle),
        };
        if legal.contains(&preferred) {
            preferred
        } else {
            PlayerAction::Attack
        }
    }

    pub fn choose_vignette(&self, vignette: Vignette, hero: &Hero) -> VignetteChoice {
        match (self, vignette) {
            (Policy::AttackOnly, _) => VignetteChoice::Accept,
            (Policy::Tactical, Vignette::CursedWeapon) => VignetteChoice::Decline,
            (Policy::Tactical, Vignette::Shrine) if hero.stats().missing_hp() == 0 => {
                VignetteChoice::Decline
            }
            (Policy::Tactical, _) => VignetteChoice::Accept,
        }
    }
}

fn tactical_action(hero: &Hero, battle: &Battle) -> PlayerAction {
    let inventory = hero.inventory();
    let hp_ratio = hero.stats().hp_ratio();

    if hp_ratio < HEAL_THRESHOLD && inventory.has_item(HEALING_POTION) {
        return PlayerAction::UseItem(HEALING_POTION.to_string());
    }
    if hp_ratio < FLEE_THRESHOLD && !battle.monster().is_boss {
        return PlayerAction::Flee;
    }
    if hero.class() == HeroClass::Sorcerer && hero.mana().current < SORCERER_MANA_COST {
        if inventory.has_item(MANA_POTION) {
            return PlayerAction::UseItem(MANA_POTION.to_string());
        }
        return PlayerAction::Attack;
    }
    PlayerAction::Special
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attack-only" | "attack" => Ok(Policy::AttackOnly),
            "tactical" => Ok(Policy::Tactical),
            other => Err(GameError::InvalidSelection(format!(
                "unknown policy '{other}' (expected attack-only or tactical)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::{Monster, MonsterKind};

    fn legal_for(hero: &Hero, battle: &Battle) -> Vec<PlayerAction> {
        battle.legal_actions(hero)
    }

    #[test]
    fn test_attack_only_always_attacks() {
        let mut hero = Hero::new(HeroClass::Knight);
        hero.stats_mut().current_hp = 1;
        let battle = Battle::new(Monster::new(MonsterKind::Demobat));
        let legal = legal_for(&hero, &battle);
        assert_eq!(
            Policy::AttackOnly.choose_action(&hero, &battle, &legal),
            PlayerAction::Attack
        );
    }

    #[test]
    fn test_tactical_heals_when_low() {
        let mut hero = Hero::new(HeroClass::Knight);
        hero.stats_mut().current_hp = 20;
        let battle = Battle::new(Monster::new(MonsterKind::Demodog));
        let legal = legal_for(&hero, &battle);
        assert_eq!(
            Policy::Tactical.choose_action(&hero, &battle, &legal),
            PlayerAction::UseItem(HEALING_POTION.to_string())
        );
    }

    #[test]
    fn test_tactical_flees_without_potions_but_not_from_boss() {
        let mut hero = Hero::new(HeroClass::Knight);
        hero.inventory_mut().remove_item(HEALING_POTION).unwrap();
        hero.stats_mut().current_hp = 10;

        let battle = Battle::new(Monster::new(MonsterKind::FlayedOne));
        let legal = legal_for(&hero, &battle);
        assert_eq!(
            Policy::Tactical.choose_action(&hero, &battle, &legal),
            PlayerAction::Flee
        );

        let boss_fight = Battle::new(Monster::boss());
        let legal = legal_for(&hero, &boss_fight);
        assert_eq!(
            Policy::Tactical.choose_action(&hero, &boss_fight, &legal),
            PlayerAction::Special
        );
    }

    #[test]
    fn test_tactical_sorcerer_drinks_mana_when_dry() {
        let mut hero = Hero::new(HeroClass::Sorcerer);
        hero.spend_mana(80);
        let battle = Battle::new(Monster::new(MonsterKind::Demobat));
        let legal = legal_for(&hero, &battle);
        assert_eq!(
            Policy::Tactical.choose_action(&hero, &battle, &legal),
            PlayerAction::UseItem(MANA_POTION.to_string())
        );
    }

    #[test]
    fn test_tactical_skips_cursed_sword() {
        let hero = Hero::new(HeroClass::Zoomer);
        assert_eq!(
            Policy::Tactical.choose_vignette(Vignette::CursedWeapon, &hero),
            VignetteChoice::Decline
        );
        assert_eq!(
            Policy::Tactical.choose_vignette(Vignette::Traveler, &hero),
            VignetteChoice::Accept
        );
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("Tactical".parse::<Policy>(), Ok(Policy::Tactical));
        assert_eq!("attack-only".parse::<Policy>(), Ok(Policy::AttackOnly));
        assert!("berserk".parse::<Policy>().is_err());
    }
}
