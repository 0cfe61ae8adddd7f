//! Storyteller text for campaign events, and the scrolling log it lands in.

use std::collections::VecDeque;
use upside_down::character::SpecialOutcome;
use upside_down::combat::BattleEvent;
use upside_down::core::{CampaignResult, GameEvent};
use upside_down::encounters::{TrapSeverity, Vignette, VignetteOutcome};
use upside_down::items::{display_name, ItemEffect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Good,
    Bad,
    Story,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub tone: Tone,
}

impl LogEntry {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Bounded log; the oldest entries fall off the front.
#[derive(Debug, Clone)]
pub struct NarrationLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl NarrationLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = LogEntry>) {
        for entry in entries {
            self.push(entry);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The newest `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }
}

/// Question and the two answers shown for a vignette.
pub fn vignette_prompt(vignette: Vignette) -> (&'static str, &'static str, &'static str) {
    match vignette {
        Vignette::Traveler => ("An old traveler begs for help.", "Help", "Refuse"),
        Vignette::WoundedCreature => (
            "A wounded wolf whimpers in the dark. Spend a healing potion on it?",
            "Heal it",
            "Walk away",
        ),
        Vignette::Shrine => (
            "A flickering shrine asks for 10 gold.",
            "Sacrifice",
            "Pass by",
        ),
        Vignette::CursedWeapon => (
            "A cursed sword (+5 ATK) hums on the ground.",
            "Take it",
            "Leave it",
        ),
    }
}

/// Turns events into log lines. Remembers the monster in the current fight
/// so attacks can be attributed.
#[derive(Debug, Default)]
pub struct Narrator {
    monster: Option<String>,
}

impl Narrator {
    pub fn new() -> Self {
        Self::default()
    }

    fn monster(&self) -> &str {
        self.monster.as_deref().unwrap_or("The monster")
    }

    pub fn narrate_all(&mut self, events: &[GameEvent]) -> Vec<LogEntry> {
        events.iter().flat_map(|e| self.narrate(e)).collect()
    }

    pub fn narrate(&mut self, event: &GameEvent) -> Vec<LogEntry> {
        use Tone::*;
        match event {
            GameEvent::TurnStarted { turn, .. } => {
                vec![LogEntry::new(format!("── Turn {turn} ──"), Info)]
            }
            GameEvent::MonsterAppeared { kind, boss } => {
                self.monster = Some(kind.name().to_string());
                if *boss {
                    vec![
                        LogEntry::new(
                            "📖 Storyteller: \"The air turns cold. Something vast stirs...\"",
                            Story,
                        ),
                        LogEntry::new(format!("👑 The {} looms before you!", kind.name()), Bad),
                    ]
                } else {
                    vec![LogEntry::new(
                        format!("👹 A {} emerges from the shadows!", kind.name()),
                        Bad,
                    )]
                }
            }
            GameEvent::Battle(event) => self.narrate_battle(event),
            GameEvent::Fled => Vec::new(),
            GameEvent::BossDefeated => vec![LogEntry::new(
                "📖 Storyteller: \"The Mind Flayer crumbles. Hawkins is safe... for now.\"",
                Story,
            )],
            GameEvent::Treasure(find) => {
                let mut lines = vec![
                    LogEntry::new(
                        "📖 Storyteller: \"Ah! Fortune smiles upon you!\"",
                        Story,
                    ),
                    LogEntry::new(format!("💰 Found {} gold.", find.gold), Good),
                ];
                if find.healing_potion {
                    lines.push(LogEntry::new("🧪 A Healing Potion!", Good));
                }
                if find.mana_potion {
                    lines.push(LogEntry::new("💧 A Mana Potion!", Good));
                }
                lines
            }
            GameEvent::Fountain(rest) => vec![
                LogEntry::new(
                    "📖 Storyteller: \"A sacred fountain! Rest and recover...\"",
                    Story,
                ),
                LogEntry::new(
                    format!(
                        "⛲ Restored {} HP and {} mana.",
                        rest.healed, rest.mana_restored
                    ),
                    Good,
                ),
            ],
            GameEvent::Trap(trap) => {
                let line = match trap.severity {
                    TrapSeverity::Dodged => LogEntry::new("⚠️  A trap springs, but you dodge it!", Good),
                    TrapSeverity::Light => LogEntry::new(
                        format!(
                            "⚠️  Ouch! A trap deals {} damage ({} before armor).",
                            trap.taken, trap.rolled
                        ),
                        Bad,
                    ),
                    TrapSeverity::Heavy => LogEntry::new(
                        format!(
                            "💥 A heavy trap crushes you for {} damage ({} before armor)!",
                            trap.taken, trap.rolled
                        ),
                        Bad,
                    ),
                };
                vec![
                    LogEntry::new("📖 Storyteller: \"Wait! Something's not right...\"", Story),
                    line,
                ]
            }
            GameEvent::VignetteOffered(vignette) => {
                let (question, accept, decline) = vignette_prompt(*vignette);
                vec![
                    LogEntry::new(question, Story),
                    LogEntry::new(format!("[Y] {accept}   [N] {decline}"), Info),
                ]
            }
            GameEvent::VignetteResolved(outcome) => vec![narrate_vignette(outcome)],
            GameEvent::QuietTurn => vec![LogEntry::new(
                "The Upside Down is eerily quiet.",
                Info,
            )],
            GameEvent::Finished(result) => vec![match result {
                CampaignResult::Victory { turns } => {
                    LogEntry::new(format!("🏆 Victory after {turns} turns!"), Good)
                }
                CampaignResult::Defeat { turns, cause } => LogEntry::new(
                    format!("☠️  Your tale ends on turn {turns}. Slain by: {}.", cause.name()),
                    Bad,
                ),
            }],
        }
    }

    fn narrate_battle(&mut self, event: &BattleEvent) -> Vec<LogEntry> {
        use Tone::*;
        let monster = self.monster().to_string();
        let line = match event {
            BattleEvent::PlayerAttack { damage } => {
                LogEntry::new(format!("⚔️  You strike for {damage} damage."), Info)
            }
            BattleEvent::Special(outcome) => narrate_special(outcome),
            BattleEvent::MonsterStunned => LogEntry::new(format!("😵 {monster} is stunned!"), Good),
            BattleEvent::ItemUsed { item, effect } => {
                let name = display_name(item);
                match effect {
                    ItemEffect::Healed { restored } => {
                        LogEntry::new(format!("🧪 {name}: restored {restored} HP."), Good)
                    }
                    ItemEffect::ManaRestored { restored } => {
                        LogEntry::new(format!("💧 {name}: restored {restored} mana."), Good)
                    }
                }
            }
            BattleEvent::ItemUseFailed(err) => LogEntry::new(err.to_string(), Bad),
            BattleEvent::FleeSucceeded => {
                self.monster = None;
                LogEntry::new("🏃 You slip away into the dark!", Info)
            }
            BattleEvent::FleeFailed => LogEntry::new("🚫 You couldn't get away!", Bad),
            BattleEvent::MonsterAttack {
                damage,
                elemental_bonus,
            } => {
                if *elemental_bonus > 0 {
                    LogEntry::new(
                        format!("🔥 {monster} lashes out with dark energy for {damage} damage!"),
                        Bad,
                    )
                } else {
                    LogEntry::new(format!("💢 {monster} hits you for {damage} damage."), Bad)
                }
            }
            BattleEvent::MonsterSkippedTurn => {
                LogEntry::new(format!("😵 {monster} is stunned and skips its turn!"), Good)
            }
            BattleEvent::Inspected {
                name,
                current_hp,
                max_hp,
                attack,
                defense,
                boss,
            } => LogEntry::new(
                format!(
                    "🔍 {name}{}: HP {current_hp}/{max_hp}, ATK {attack}, DEF {defense}",
                    if *boss { " (boss)" } else { "" }
                ),
                Info,
            ),
            BattleEvent::Victory(victory) => {
                self.monster = None;
                let mut lines = vec![LogEntry::new(
                    format!(
                        "🎉 {monster} is defeated! Looted {} gold, recovered {} HP.",
                        victory.gold, victory.healed
                    ),
                    Good,
                )];
                if victory.potion_found {
                    lines.push(LogEntry::new("🧪 Found a Healing Potion!", Good));
                }
                return lines;
            }
            BattleEvent::PlayerDefeated => LogEntry::new("💀 You collapse...", Bad),
        };
        vec![line]
    }
}

fn narrate_special(outcome: &SpecialOutcome) -> LogEntry {
    use Tone::*;
    if let Some(err) = outcome.failure() {
        return LogEntry::new(format!("✨ {err}"), Bad);
    }
    match *outcome {
        SpecialOutcome::ArcaneShield { damage } => {
            LogEntry::new(format!("🔮 Arcane Shield blasts for {damage} damage!"), Info)
        }
        SpecialOutcome::ElementalFury { damage, mana_spent } => LogEntry::new(
            format!("🔥 Elemental Fury scorches for {damage} damage (-{mana_spent} mana)."),
            Info,
        ),
        SpecialOutcome::HolyStrike { damage, critical } => {
            if critical {
                LogEntry::new(format!("⚡ CRITICAL! Holy Strike smites for {damage}!"), Good)
            } else {
                LogEntry::new(format!("✝️  Holy Strike hits for {damage}."), Info)
            }
        }
        SpecialOutcome::BattleSong {
            damage,
            inspiration,
            rage,
        } => LogEntry::new(
            format!("🎵 Battle Song deals {damage} (+{inspiration} inspiration). Rage {rage}."),
            Info,
        ),
        SpecialOutcome::RapidStrike { first, second } => match second {
            Some(second) => LogEntry::new(
                format!("💨 Rapid Strike hits twice: {first} + {second}."),
                Info,
            ),
            None => LogEntry::new(
                format!("💨 Rapid Strike lands {first}. No need for a second swing."),
                Good,
            ),
        },
        SpecialOutcome::NotEnoughMana { .. } | SpecialOutcome::Nothing => {
            LogEntry::new("Nothing happens.", Info)
        }
    }
}

fn narrate_vignette(outcome: &VignetteOutcome) -> LogEntry {
    use Tone::*;
    match *outcome {
        VignetteOutcome::HelpedTraveler { gold } => {
            LogEntry::new(format!("📦 The traveler's chest: {gold} gold and a potion!"), Good)
        }
        VignetteOutcome::RefusedTraveler { gold_lost } => {
            LogEntry::new(format!("💸 The traveler curses you. Lost {gold_lost} gold."), Bad)
        }
        VignetteOutcome::HealedCreature { restored, gold } => LogEntry::new(
            format!("🐾 The wolf blesses you: +{gold} gold, +{restored} HP."),
            Good,
        ),
        VignetteOutcome::LeftCreature => LogEntry::new("You leave the wolf behind.", Info),
        VignetteOutcome::Sacrificed {
            gold_spent,
            healed,
            mana_restored,
        } => LogEntry::new(
            format!("✨ Blessed for {gold_spent} gold: +{healed} HP, +{mana_restored} mana."),
            Good,
        ),
        VignetteOutcome::WalkedPastShrine => LogEntry::new("The shrine's light fades.", Info),
        VignetteOutcome::TookCursedSword => LogEntry::new(
            "⚔️  You pick up the cursed sword. It refuses to be wielded.",
            Story,
        ),
        VignetteOutcome::LeftCursedSword => LogEntry::new("You leave the sword where it lies.", Info),
    }
}
