//! Simulation report generation.

use super::policy::Policy;
use super::runner::RunStats;
use crate::encounters::EventKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// Win/loss split for one hero class.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassSummary {
    pub runs: u32,
    pub victories: u32,
    pub win_rate: f64,
    pub avg_turns: f64,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub policy: String,
    pub num_runs: u32,
    pub victories: u32,
    pub defeats: u32,
    pub timed_out: u32,
    pub win_rate: f64,
    pub avg_turns: f64,
    pub avg_final_gold: f64,
    pub avg_battles_won: f64,
    pub avg_items_used: f64,

    /// Deaths keyed by what caused them.
    pub deaths_by_cause: BTreeMap<String, u32>,
    /// Turns spent on each event kind, across all runs.
    pub event_counts: BTreeMap<String, u64>,

    pub flee_attempts: u64,
    pub flee_successes: u64,
    pub flee_rate: f64,

    pub by_class: BTreeMap<String, ClassSummary>,
}

fn ratio(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole
    } else {
        0.0
    }
}

fn average(runs: &[RunStats], f: impl Fn(&RunStats) -> f64) -> f64 {
    ratio(runs.iter().map(f).sum::<f64>(), runs.len() as f64)
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, policy: Policy) -> Self {
        let num_runs = runs.len() as u32;
        let n = num_runs as f64;
        let victories = runs.iter().filter(|r| r.victory).count() as u32;
        let timed_out = runs.iter().filter(|r| r.timed_out).count() as u32;
        let defeats = runs.iter().filter(|r| r.death_cause.is_some()).count() as u32;

        let avg_turns = average(&runs, |r| r.turns as f64);
        let avg_final_gold = average(&runs, |r| r.final_gold as f64);
        let avg_battles_won = average(&runs, |r| r.battles_won as f64);
        let avg_items_used = average(&runs, |r| r.items_used as f64);

        let mut deaths_by_cause = BTreeMap::new();
        for cause in runs.iter().filter_map(|r| r.death_cause) {
            *deaths_by_cause.entry(cause.name().to_string()).or_insert(0) += 1;
        }

        let mut event_counts: BTreeMap<String, u64> = EventKind::all()
            .iter()
            .map(|kind| (kind.name().to_string(), 0))
            .collect();
        for run in &runs {
            for (kind, count) in &run.events {
                *event_counts.entry(kind.name().to_string()).or_insert(0) += count;
            }
        }

        let flee_attempts = runs.iter().map(|r| r.flee_attempts).sum::<u64>();
        let flee_successes = runs.iter().map(|r| r.flee_successes).sum::<u64>();

        let mut by_class: BTreeMap<String, ClassSummary> = BTreeMap::new();
        for run in &runs {
            let Some(hero) = run.hero else { continue };
            let entry = by_class.entry(hero.name().to_string()).or_default();
            entry.runs += 1;
            entry.victories += run.victory as u32;
            entry.avg_turns += run.turns as f64;
        }
        for summary in by_class.values_mut() {
            summary.win_rate = ratio(summary.victories as f64, summary.runs as f64);
            summary.avg_turns = ratio(summary.avg_turns, summary.runs as f64);
        }

        Self {
            policy: policy.name().to_string(),
            num_runs,
            victories,
            defeats,
            timed_out,
            win_rate: ratio(victories as f64, n),
            avg_turns,
            avg_final_gold,
            avg_battles_won,
            avg_items_used,
            deaths_by_cause,
            event_counts,
            flee_attempts,
            flee_successes,
            flee_rate: ratio(flee_successes as f64, flee_attempts as f64),
            by_class,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 UPSIDE DOWN SIMULATION REPORT\n");
        report.push_str(&format!("                    (policy: {})\n", self.policy));
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} won, {} lost, {} abandoned\n\n",
            self.num_runs, self.victories, self.defeats, self.timed_out
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Win Rate:            {:.1}%\n",
            self.win_rate * 100.0
        ));
        report.push_str(&format!("  Avg Turns:           {:.1}\n", self.avg_turns));
        report.push_str(&format!(
            "  Avg Final Gold:      {:.1}\n",
            self.avg_final_gold
        ));
        report.push_str(&format!(
            "  Avg Battles Won:     {:.1}\n",
            self.avg_battles_won
        ));
        report.push_str(&format!(
            "  Avg Items Used:      {:.1}\n\n",
            self.avg_items_used
        ));

        report.push_str("── BY CLASS ─────────────────────────────────────────────────────\n");
        report.push_str("  Class        Runs    Win %    Avg Turns\n");
        report.push_str("  ─────        ────    ─────    ─────────\n");
        for (class, summary) in &self.by_class {
            report.push_str(&format!(
                "  {:<10} {:6}   {:5.1}    {:9.1}\n",
                class,
                summary.runs,
                summary.win_rate * 100.0,
                summary.avg_turns
            ));
        }
        report.push('\n');

        report.push_str("── DEATHS ───────────────────────────────────────────────────────\n");
        if self.deaths_by_cause.is_empty() {
            report.push_str("  No deaths\n");
        }
        for (cause, count) in &self.deaths_by_cause {
            let pct = ratio(*count as f64, self.defeats as f64) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {:<12} {:5} {:>5.1}% {}\n", cause, count, pct, bar));
        }
        report.push('\n');

        report.push_str("── EVENTS ───────────────────────────────────────────────────────\n");
        let total_events = self.event_counts.values().sum::<u64>() as f64;
        for (kind, count) in &self.event_counts {
            report.push_str(&format!(
                "  {:<10} {:8} {:>5.1}%\n",
                kind,
                count,
                ratio(*count as f64, total_events) * 100.0
            ));
        }
        report.push('\n');

        report.push_str("── FLEEING ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Attempts: {}   Successes: {}   Rate: {:.1}%\n",
            self.flee_attempts,
            self.flee_successes,
            self.flee_rate * 100.0
        ));

        report.push_str("\n── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = if self.win_rate > 0.8 {
            "TOO EASY - Heroes rarely die"
        } else if self.win_rate > 0.4 {
            "GOOD - Challenging but fair"
        } else if self.win_rate > 0.15 {
            "HARD - Most heroes fall"
        } else {
            "TOO HARD - The Upside Down wins"
        };
        report.push_str(&format!("  Rating: {}\n", rating));
        if self.timed_out > 0 {
            report.push_str("  ⚠️  Some runs never finished - boss fights stalling?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
