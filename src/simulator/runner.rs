//! Plays whole campaigns on autopilot and tallies what happened.
//!
//! Statistics are gathered from the `GameEvent`s the campaign returns, the
//! same events the terminal UI narrates.

use super::config::SimConfig;
use super::policy::Policy;
use super::report::SimReport;
use crate::character::hero::HeroClass;
use crate::combat::logic::BattleEvent;
use crate::core::campaign::{Campaign, CampaignResult, Choice, DeathCause, Decision, GameEvent};
use crate::core::dice::{Dice, RandomSource};
use crate::core::error::GameError;
use crate::encounters::EventKind;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Outcome of one simulated campaign.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub hero: Option<HeroClass>,
    pub victory: bool,
    pub timed_out: bool,
    pub turns: u32,
    pub final_gold: i64,
    pub death_cause: Option<DeathCause>,
    pub events: HashMap<EventKind, u64>,
    pub battles_won: u64,
    pub flee_attempts: u64,
    pub flee_successes: u64,
    pub items_used: u64,
}

impl RunStats {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::TurnStarted { event, .. } => {
                *self.events.entry(*event).or_insert(0) += 1;
            }
            GameEvent::Battle(BattleEvent::Victory(_)) => self.battles_won += 1,
            GameEvent::Battle(BattleEvent::FleeSucceeded) => {
                self.flee_attempts += 1;
                self.flee_successes += 1;
            }
            GameEvent::Battle(BattleEvent::FleeFailed) => self.flee_attempts += 1,
            GameEvent::Battle(BattleEvent::ItemUsed { .. }) => self.items_used += 1,
            _ => {}
        }
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, GameError> {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let dice = match config.seed {
            Some(seed) => Dice::seeded(seed.wrapping_add(run_idx as u64)),
            None => Dice::from_entropy(),
        };
        let hero = config.hero_for_run(run_idx);
        let run = simulate_single_run(hero, config.policy, config.max_turns_per_run, dice)?;

        if config.verbosity >= 2 {
            info!(
                run = run_idx + 1,
                of = config.num_runs,
                hero = hero.name(),
                victory = run.victory,
                turns = run.turns,
                gold = run.final_gold,
                death = run.death_cause.map(|c| c.name()),
                "run finished"
            );
        }
        all_runs.push(run);
    }

    Ok(SimReport::from_runs(all_runs, config.policy))
}

/// Plays one campaign to the end, or until `max_turns` have passed.
pub fn simulate_single_run<D: RandomSource>(
    hero: HeroClass,
    policy: Policy,
    max_turns: u32,
    dice: D,
) -> Result<RunStats, GameError> {
    let mut campaign = Campaign::new(hero, dice);
    let mut stats = RunStats {
        hero: Some(hero),
        ..Default::default()
    };

    loop {
        let choice = match campaign.pending() {
            Decision::Finished(result) => {
                stats.victory = result.is_victory();
                if let CampaignResult::Defeat { cause, .. } = result {
                    stats.death_cause = Some(cause);
                }
                break;
            }
            Decision::Advance if campaign.turn() >= max_turns => {
                warn!(hero = hero.name(), turns = campaign.turn(), "run abandoned");
                stats.timed_out = true;
                break;
            }
            Decision::Advance => Choice::Advance,
            Decision::Battle { legal } => {
                let battle = campaign
                    .battle()
                    .ok_or_else(|| GameError::InvalidSelection("battle vanished".to_string()))?;
                Choice::Battle(policy.choose_action(campaign.hero(), battle, &legal))
            }
            Decision::Vignette { vignette } => {
                Choice::Vignette(policy.choose_vignette(vignette, campaign.hero()))
            }
        };
        debug!(?choice, "autopilot");
        for event in campaign.decide(choice)? {
            stats.record(&event);
        }
    }

    stats.turns = campaign.turn();
    stats.final_gold = campaign.hero().gold();
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_simulation_is_reproducible() {
        let config = SimConfig {
            num_runs: 20,
            ..SimConfig::quick(7)
        };
        let a = run_simulation(&config).unwrap();
        let b = run_simulation(&config).unwrap();
        assert_eq!(a.victories, b.victories);
        assert_eq!(a.avg_turns, b.avg_turns);
        assert_eq!(a.event_counts, b.event_counts);
    }

    #[test]
    fn test_every_run_ends() {
        let config = SimConfig {
            num_runs: 25,
            ..SimConfig::quick(11)
        };
        let report = run_simulation(&config).unwrap();
        assert_eq!(report.num_runs, 25);
        assert_eq!(report.victories + report.defeats + report.timed_out, 25);
    }

    #[test]
    fn test_single_run_records_turns() {
        let run = simulate_single_run(
            HeroClass::Wizard,
            Policy::Tactical,
            10_000,
            Dice::seeded(3),
        )
        .unwrap();
        assert!(run.turns > 0);
        assert_eq!(run.events.values().sum::<u64>(), run.turns as u64);
        assert!(run.victory != run.death_cause.is_some());
        assert!(run.flee_successes <= run.flee_attempts);
    }
}
