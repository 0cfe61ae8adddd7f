//! Per-turn event dispatch and the non-combat encounters.

use super::types::*;
use crate::character::hero::Hero;
use crate::character::stats::Combatant;
use crate::combat::types::{Monster, MonsterKind};
use crate::core::constants::*;
use crate::core::dice::RandomSource;
use crate::core::error::GameError;
use crate::items::{Item, ItemEffect};
use tracing::debug;

/// Picks this turn's event kind from a d100.
pub fn roll_event(dice: &mut impl RandomSource) -> EventKind {
    let roll = dice.roll(PERCENT_DIE);
    let kind = EventKind::from_roll(roll);
    debug!(roll, event = kind.name(), "event rolled");
    kind
}

/// Maps a d100 spawn roll onto a monster, weakest first.
pub fn monster_for_roll(roll: u32) -> MonsterKind {
    match roll {
        r if r <= SPAWN_WEAKEST_MAX => MonsterKind::Demobat,
        r if r <= SPAWN_SECOND_MAX => MonsterKind::Demodog,
        r if r <= SPAWN_THIRD_MAX => MonsterKind::FlayedOne,
        _ => MonsterKind::MindFlayer,
    }
}

/// Chooses the monster for a combat event.
///
/// Once `turn` reaches the boss threshold and the boss still stands, the
/// boss is forced and no spawn roll is made.
pub fn spawn_monster(dice: &mut impl RandomSource, turn: u32, boss_defeated: bool) -> Monster {
    if turn >= BOSS_TURN_THRESHOLD && !boss_defeated {
        debug!(turn, "boss forced");
        return Monster::boss();
    }
    let roll = dice.roll(PERCENT_DIE);
    let kind = monster_for_roll(roll);
    debug!(roll, monster = kind.name(), "monster spawned");
    Monster::new(kind)
}

pub fn open_treasure(hero: &mut Hero, dice: &mut impl RandomSource) -> TreasureFind {
    let gold = dice.roll(TREASURE_GOLD_DIE) as i64 + TREASURE_GOLD_BASE;
    hero.inventory_mut().add_gold(gold);

    let healing_potion = dice.chance(TREASURE_HEALING_CHANCE);
    if healing_potion {
        hero.inventory_mut()
            .add_item(Item::healing_potion(LOOT_POTION_STRENGTH));
    }
    let mana_potion = dice.chance(TREASURE_MANA_CHANCE);
    if mana_potion {
        hero.inventory_mut()
            .add_item(Item::mana_potion(LOOT_POTION_STRENGTH));
    }

    TreasureFind {
        gold,
        healing_potion,
        mana_potion,
    }
}

/// Heals 40% of max HP plus a d10 and restores some mana.
pub fn rest_at_fountain(hero: &mut Hero, dice: &mut impl RandomSource) -> FountainRest {
    let heal_rolled =
        hero.stats().max_hp * FOUNTAIN_HEAL_PERCENT / 100 + dice.roll(FOUNTAIN_HEAL_DIE);
    let healed = hero.heal(heal_rolled);
    let mana_restored = hero.restore_mana(FOUNTAIN_MANA);
    FountainRest {
        heal_rolled,
        healed,
        mana_restored,
    }
}

/// Trap damage goes through `take_damage`, so the hero's defense applies.
pub fn spring_trap(hero: &mut Hero, dice: &mut impl RandomSource) -> TrapOutcome {
    let severity_roll = dice.roll(TRAP_SEVERITY_DIE);
    let (severity, rolled) = if severity_roll <= TRAP_DODGE_MAX {
        (TrapSeverity::Dodged, 0)
    } else if severity_roll <= TRAP_LIGHT_MAX {
        (
            TrapSeverity::Light,
            dice.roll(TRAP_LIGHT_DIE) + TRAP_LIGHT_BASE,
        )
    } else {
        (
            TrapSeverity::Heavy,
            dice.roll(TRAP_HEAVY_DIE) + TRAP_HEAVY_BASE,
        )
    };
    let taken = if rolled > 0 {
        hero.take_damage(rolled)
    } else {
        0
    };
    TrapOutcome {
        severity,
        rolled,
        taken,
    }
}

/// Whether the hero meets a vignette's precondition.
pub fn vignette_available(vignette: Vignette, hero: &Hero) -> bool {
    match vignette {
        Vignette::WoundedCreature => hero.inventory().has_item(HEALING_POTION),
        Vignette::Shrine => hero.gold() >= SHRINE_COST,
        Vignette::Traveler | Vignette::CursedWeapon => true,
    }
}

/// Rolls a d4 for a vignette. `None` when the hero doesn't qualify for it;
/// the turn then passes quietly.
pub fn roll_vignette(hero: &Hero, dice: &mut impl RandomSource) -> Option<Vignette> {
    let vignette = Vignette::from_roll(dice.roll(VIGNETTE_COUNT));
    let available = vignette_available(vignette, hero);
    debug!(vignette = vignette.name(), available, "vignette rolled");
    available.then_some(vignette)
}

/// Applies the hero's answer to a vignette.
///
/// Gold may go negative when refusing the traveler.
pub fn resolve_vignette(
    vignette: Vignette,
    choice: VignetteChoice,
    hero: &mut Hero,
) -> Result<VignetteOutcome, GameError> {
    let outcome = match (vignette, choice) {
        (Vignette::Traveler, VignetteChoice::Accept) => {
            hero.inventory_mut().add_gold(TRAVELER_REWARD_GOLD);
            hero.inventory_mut()
                .add_item(Item::healing_potion(LOOT_POTION_STRENGTH));
            VignetteOutcome::HelpedTraveler {
                gold: TRAVELER_REWARD_GOLD,
            }
        }
        (Vignette::Traveler, VignetteChoice::Decline) => {
            hero.inventory_mut().add_gold(-TRAVELER_REFUSAL_PENALTY);
            VignetteOutcome::RefusedTraveler {
                gold_lost: TRAVELER_REFUSAL_PENALTY,
            }
        }
        (Vignette::WoundedCreature, VignetteChoice::Accept) => {
            let restored = match hero.use_item(HEALING_POTION)? {
                ItemEffect::Healed { restored } => restored,
                ItemEffect::ManaRestored { .. } => 0,
            };
            hero.inventory_mut().add_gold(WOLF_REWARD_GOLD);
            VignetteOutcome::HealedCreature {
                restored,
                gold: WOLF_REWARD_GOLD,
            }
        }
        (Vignette::WoundedCreature, VignetteChoice::Decline) => VignetteOutcome::LeftCreature,
        (Vignette::Shrine, VignetteChoice::Accept) => {
            let gold = hero.gold();
            if gold < SHRINE_COST {
                return Err(GameError::InsufficientResource {
                    resource: "gold",
                    have: gold.max(0) as u32,
                    need: SHRINE_COST as u32,
                });
            }
            hero.inventory_mut().add_gold(-SHRINE_COST);
            let healed = hero.heal(SHRINE_HEAL);
            let mana_restored = hero.restore_mana(SHRINE_MANA);
            VignetteOutcome::Sacrificed {
                gold_spent: SHRINE_COST,
                healed,
                mana_restored,
            }
        }
        (Vignette::Shrine, VignetteChoice::Decline) => VignetteOutcome::WalkedPastShrine,
        (Vignette::CursedWeapon, VignetteChoice::Accept) => {
            hero.inventory_mut().add_item(Item::cursed_sword());
            VignetteOutcome::TookCursedSword
        }
        (Vignette::CursedWeapon, VignetteChoice::Decline) => VignetteOutcome::LeftCursedSword,
    };
    debug!(vignette = vignette.name(), ?choice, ?outcome, "vignette resolved");
    Ok(outcome)
}
