use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// What happens on one campaign turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Combat,
    Treasure,
    Healing,
    Trap,
    Narrative,
}

impl EventKind {
    pub fn all() -> [EventKind; 5] {
        [
            EventKind::Combat,
            EventKind::Treasure,
            EventKind::Healing,
            EventKind::Trap,
            EventKind::Narrative,
        ]
    }

    /// Maps a d100 roll onto its band.
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            r if r <= EVENT_COMBAT_MAX => EventKind::Combat,
            r if r <= EVENT_TREASURE_MAX => EventKind::Treasure,
            r if r <= EVENT_HEALING_MAX => EventKind::Healing,
            r if r <= EVENT_TRAP_MAX => EventKind::Trap,
            _ => EventKind::Narrative,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Combat => "combat",
            EventKind::Treasure => "treasure",
            EventKind::Healing => "healing",
            EventKind::Trap => "trap",
            EventKind::Narrative => "narrative",
        }
    }
}

/// The four narrative choices a hero can stumble into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vignette {
    /// Help an old traveler or refuse.
    Traveler,
    /// Spend a healing potion on a wounded wolf.
    WoundedCreature,
    /// Sacrifice gold at a shrine.
    Shrine,
    /// Pick up a cursed sword.
    CursedWeapon,
}

impl Vignette {
    /// Maps a d4 roll onto a vignette.
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            1 => Vignette::Traveler,
            2 => Vignette::WoundedCreature,
            3 => Vignette::Shrine,
            _ => Vignette::CursedWeapon,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Vignette::Traveler => "traveler",
            Vignette::WoundedCreature => "wounded_creature",
            Vignette::Shrine => "shrine",
            Vignette::CursedWeapon => "cursed_weapon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VignetteChoice {
    Accept,
    Decline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasureFind {
    pub gold: i64,
    pub healing_potion: bool,
    pub mana_potion: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FountainRest {
    /// Amount the fountain offered, before the max-HP cap.
    pub heal_rolled: u32,
    pub healed: u32,
    pub mana_restored: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrapSeverity {
    Dodged,
    Light,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapOutcome {
    pub severity: TrapSeverity,
    /// Damage the trap dealt before the hero's defense.
    pub rolled: u32,
    /// Health the hero actually lost.
    pub taken: u32,
}

/// How a resolved vignette changed the hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VignetteOutcome {
    HelpedTraveler {
        gold: i64,
    },
    RefusedTraveler {
        gold_lost: i64,
    },
    HealedCreature {
        /// Health the potion restored to the hero.
        restored: u32,
        gold: i64,
    },
    LeftCreature,
    Sacrificed {
        gold_spent: i64,
        healed: u32,
        mana_restored: u32,
    },
    WalkedPastShrine,
    TookCursedSword,
    LeftCursedSword,
}
