//! The campaign loop: one hero, turn after turn, until death or the boss falls.
//!
//! The campaign never blocks on input. Callers ask [`Campaign::pending`] what
//! decision is needed, then hand a [`Choice`] to [`Campaign::decide`], which
//! returns the structured events that choice produced. Rendering those events
//! is the caller's job.

use crate::character::hero::{Hero, HeroClass};
use crate::character::stats::Combatant;
use crate::combat::logic::{Battle, BattleEvent, BattleState, PlayerAction};
use crate::combat::types::MonsterKind;
use crate::core::dice::RandomSource;
use crate::core::error::GameError;
use crate::encounters::{
    open_treasure, rest_at_fountain, resolve_vignette, roll_event, roll_vignette, spawn_monster,
    spring_trap, EventKind, FountainRest, TrapOutcome, TreasureFind, Vignette, VignetteChoice,
    VignetteOutcome,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What killed the hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    Monster(MonsterKind),
    Trap,
}

impl DeathCause {
    pub fn name(&self) -> &'static str {
        match self {
            DeathCause::Monster(kind) => kind.name(),
            DeathCause::Trap => "Trap",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignResult {
    Victory { turns: u32 },
    Defeat { turns: u32, cause: DeathCause },
}

impl CampaignResult {
    pub fn is_victory(&self) -> bool {
        matches!(self, CampaignResult::Victory { .. })
    }

    pub fn turns(&self) -> u32 {
        match *self {
            CampaignResult::Victory { turns } | CampaignResult::Defeat { turns, .. } => turns,
        }
    }
}

/// Where the campaign is waiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Exploring,
    InBattle(Battle),
    AwaitingVignette(Vignette),
    Finished(CampaignResult),
}

/// The decision the campaign needs next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Start the next turn.
    Advance,
    Battle { legal: Vec<PlayerAction> },
    Vignette { vignette: Vignette },
    Finished(CampaignResult),
}

/// A caller's answer to a [`Decision`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Advance,
    Battle(PlayerAction),
    Vignette(VignetteChoice),
}

/// Everything observable that happened while resolving a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    TurnStarted { turn: u32, event: EventKind },
    MonsterAppeared { kind: MonsterKind, boss: bool },
    Battle(BattleEvent),
    Fled,
    BossDefeated,
    Treasure(TreasureFind),
    Fountain(FountainRest),
    Trap(TrapOutcome),
    VignetteOffered(Vignette),
    VignetteResolved(VignetteOutcome),
    /// A vignette was rolled but the hero didn't qualify for it.
    QuietTurn,
    Finished(CampaignResult),
}

impl GameEvent {
    /// Short stable identifier, used for tallies.
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::TurnStarted { .. } => "turn_started",
            GameEvent::MonsterAppeared { .. } => "monster_appeared",
            GameEvent::Battle(event) => event.kind(),
            GameEvent::Fled => "fled",
            GameEvent::BossDefeated => "boss_defeated",
            GameEvent::Treasure(_) => "treasure",
            GameEvent::Fountain(_) => "fountain",
            GameEvent::Trap(_) => "trap",
            GameEvent::VignetteOffered(_) => "vignette_offered",
            GameEvent::VignetteResolved(_) => "vignette_resolved",
            GameEvent::QuietTurn => "quiet_turn",
            GameEvent::Finished(_) => "finished",
        }
    }
}

/// One playthrough. Owns the hero and the random source.
#[derive(Debug, Clone)]
pub struct Campaign<D> {
    hero: Hero,
    turn: u32,
    boss_defeated: bool,
    phase: Phase,
    dice: D,
}

impl<D: RandomSource> Campaign<D> {
    pub fn new(class: HeroClass, dice: D) -> Self {
        info!(hero = class.name(), "campaign started");
        Self {
            hero: Hero::new(class),
            turn: 0,
            boss_defeated: false,
            phase: Phase::Exploring,
            dice,
        }
    }

    /// Starts over with a fresh hero, keeping the random source.
    pub fn restart(&mut self, class: HeroClass) {
        info!(hero = class.name(), "campaign restarted");
        self.hero = Hero::new(class);
        self.turn = 0;
        self.boss_defeated = false;
        self.phase = Phase::Exploring;
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn boss_defeated(&self) -> bool {
        self.boss_defeated
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn battle(&self) -> Option<&Battle> {
        match &self.phase {
            Phase::InBattle(battle) => Some(battle),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<CampaignResult> {
        match self.phase {
            Phase::Finished(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.result().is_some()
    }

    pub fn pending(&self) -> Decision {
        match &self.phase {
            Phase::Exploring => Decision::Advance,
            Phase::InBattle(battle) => Decision::Battle {
                legal: battle.legal_actions(&self.hero),
            },
            Phase::AwaitingVignette(vignette) => Decision::Vignette {
                vignette: *vignette,
            },
            Phase::Finished(result) => Decision::Finished(*result),
        }
    }

    /// Applies one choice. A choice that doesn't answer the pending decision
    /// is rejected and leaves the campaign untouched.
    pub fn decide(&mut self, choice: Choice) -> Result<Vec<GameEvent>, GameError> {
        if self.is_finished() {
            return Err(GameError::CampaignOver);
        }
        let waiting_on = match &self.phase {
            Phase::AwaitingVignette(vignette) => Some(*vignette),
            _ => None,
        };
        match (choice, waiting_on) {
            (Choice::Advance, _) if self.phase == Phase::Exploring => Ok(self.advance_turn()),
            (Choice::Battle(action), _) if self.battle().is_some() => self.battle_action(action),
            (Choice::Vignette(answer), Some(vignette)) => self.answer_vignette(vignette, answer),
            (choice, _) => Err(GameError::InvalidSelection(format!(
                "{choice:?} while {}",
                self.phase_name()
            ))),
        }
    }

    fn phase_name(&self) -> &'static str {
        match self.phase {
            Phase::Exploring => "exploring",
            Phase::InBattle(_) => "in battle",
            Phase::AwaitingVignette(_) => "awaiting a vignette answer",
            Phase::Finished(_) => "finished",
        }
    }

    fn advance_turn(&mut self) -> Vec<GameEvent> {
        self.turn += 1;
        let event = roll_event(&mut self.dice);
        debug!(turn = self.turn, event = event.name(), "turn started");
        let mut events = vec![GameEvent::TurnStarted {
            turn: self.turn,
            event,
        }];

        match event {
            EventKind::Combat => {
                let monster = spawn_monster(&mut self.dice, self.turn, self.boss_defeated);
                events.push(GameEvent::MonsterAppeared {
                    kind: monster.kind,
                    boss: monster.is_boss,
                });
                self.phase = Phase::InBattle(Battle::new(monster));
            }
            EventKind::Treasure => {
                events.push(GameEvent::Treasure(open_treasure(
                    &mut self.hero,
                    &mut self.dice,
                )));
            }
            EventKind::Healing => {
                events.push(GameEvent::Fountain(rest_at_fountain(
                    &mut self.hero,
                    &mut self.dice,
                )));
            }
            EventKind::Trap => {
                events.push(GameEvent::Trap(spring_trap(&mut self.hero, &mut self.dice)));
                if !self.hero.is_alive() {
                    self.finish(
                        CampaignResult::Defeat {
                            turns: self.turn,
                            cause: DeathCause::Trap,
                        },
                        &mut events,
                    );
                }
            }
            EventKind::Narrative => match roll_vignette(&self.hero, &mut self.dice) {
                Some(vignette) => {
                    events.push(GameEvent::VignetteOffered(vignette));
                    self.phase = Phase::AwaitingVignette(vignette);
                }
                None => events.push(GameEvent::QuietTurn),
            },
        }
        events
    }

    fn battle_action(&mut self, action: PlayerAction) -> Result<Vec<GameEvent>, GameError> {
        let Phase::InBattle(battle) = &mut self.phase else {
            return Err(GameError::InvalidSelection("no battle in progress".to_string()));
        };
        if !battle.legal_actions(&self.hero).contains(&action) {
            return Err(GameError::InvalidSelection(format!(
                "{} is not available",
                action.label()
            )));
        }

        let mut events: Vec<GameEvent> = battle
            .act(&mut self.hero, &action, &mut self.dice)?
            .into_iter()
            .map(GameEvent::Battle)
            .collect();

        let state = battle.state();
        let monster = battle.monster().kind;
        let boss = battle.monster().is_boss;
        match state {
            BattleState::PlayerTurn => {}
            BattleState::PlayerFled => {
                events.push(GameEvent::Fled);
                self.phase = Phase::Exploring;
            }
            BattleState::PlayerWon if boss => {
                self.boss_defeated = true;
                events.push(GameEvent::BossDefeated);
                self.finish(CampaignResult::Victory { turns: self.turn }, &mut events);
            }
            BattleState::PlayerWon => self.phase = Phase::Exploring,
            BattleState::PlayerDied => self.finish(
                CampaignResult::Defeat {
                    turns: self.turn,
                    cause: DeathCause::Monster(monster),
                },
                &mut events,
            ),
        }
        Ok(events)
    }

    fn answer_vignette(
        &mut self,
        vignette: Vignette,
        answer: VignetteChoice,
    ) -> Result<Vec<GameEvent>, GameError> {
        let outcome = resolve_vignette(vignette, answer, &mut self.hero)?;
        self.phase = Phase::Exploring;
        Ok(vec![GameEvent::VignetteResolved(outcome)])
    }

    fn finish(&mut self, result: CampaignResult, events: &mut Vec<GameEvent>) {
        info!(
            hero = self.hero.class().name(),
            turns = self.turn,
            gold = self.hero.gold(),
            ?result,
            "campaign finished"
        );
        self.phase = Phase::Finished(result);
        events.push(GameEvent::Finished(result));
    }
}
