//! Simulation configuration.

use super::policy::Policy;
use crate::character::hero::HeroClass;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of campaigns to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random). Run `i` uses `seed + i`.
    pub seed: Option<u64>,

    /// Hero to play every run with (None = rotate through the roster)
    pub hero: Option<HeroClass>,

    /// How the autopilot answers decisions
    pub policy: Policy,

    /// Campaigns still running after this many turns are abandoned
    pub max_turns_per_run: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            hero: None,
            policy: Policy::Tactical,
            max_turns_per_run: 10_000,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small seeded batch, handy for smoke tests.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 100,
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// One class, many runs, for comparing a single hero's odds.
    pub fn class_focus(hero: HeroClass, num_runs: u32) -> Self {
        Self {
            num_runs,
            hero: Some(hero),
            ..Default::default()
        }
    }

    /// Hero for the given run index.
    pub fn hero_for_run(&self, run_idx: u32) -> HeroClass {
        let roster = HeroClass::all();
        self.hero
            .unwrap_or(roster[run_idx as usize % roster.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rotates_roster() {
        let config = SimConfig::default();
        assert_eq!(config.hero_for_run(0), HeroClass::Wizard);
        assert_eq!(config.hero_for_run(4), HeroClass::Zoomer);
        assert_eq!(config.hero_for_run(5), HeroClass::Wizard);
    }

    #[test]
    fn test_class_focus_pins_hero() {
        let config = SimConfig::class_focus(HeroClass::Bard, 10);
        assert_eq!(config.num_runs, 10);
        assert!((0..10).all(|i| config.hero_for_run(i) == HeroClass::Bard));
    }
}
