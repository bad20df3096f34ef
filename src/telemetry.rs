//! Progress reporting for long searches. Nothing here feeds back into the search itself.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::search::{Outcome, Search};

const SI_SUFFIXES: [&str; 7] = ["", "k", "M", "G", "T", "P", "E"];

/// Milliseconds since an arbitrary epoch.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since an arbitrary epoch.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// `1234.0` → `"1.2k"`, `2.5e6` → `"2.5M"`. Values below a thousand are printed as is.
pub fn abbreviate_number(value: f64) -> String {
    if !value.is_finite() || value.abs() < 1000.0 {
        return format!("{}", (value * 10.0).round() / 10.0);
    }
    let tier = ((value.abs().log10() / 3.0).floor() as usize).min(SI_SUFFIXES.len() - 1);
    let scaled = value / 10f64.powi(3 * tier as i32);
    format!("{scaled:.1}{}", SI_SUFFIXES[tier])
}

/// Coarse human wording for a duration.
pub fn humanize_ms(ms: f64) -> String {
    let seconds = ms / 1000.0;
    let minutes = seconds / 60.0;
    let hours = minutes / 60.0;
    if seconds < 45.0 {
        "a few seconds".to_owned()
    } else if seconds < 90.0 {
        "a minute".to_owned()
    } else if minutes < 45.0 {
        format!("{} minutes", minutes.round())
    } else if minutes < 90.0 {
        "an hour".to_owned()
    } else if hours < 22.0 {
        format!("{} hours", hours.round())
    } else {
        format!("{} days", (hours / 24.0).round().max(1.0))
    }
}

/// Probability that a lookup somewhere along a root-to-leaf path hits, given the per-depth
/// hit ratios.
pub fn combined_repeated_ratio(ratios: &[f64]) -> f64 {
    ratios
        .iter()
        .rev()
        .fold(0.0, |deeper, &ratio| ratio + (1.0 - ratio) * deeper)
}

/// Games and wall time since the previous report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub games: u64,
    pub ms: f64,
}

/// Report scheduling for one `advance_steps` call.
#[derive(Debug)]
pub(crate) struct StepTimer {
    started_ms: f64,
    last_ms: f64,
    last_games: u64,
    report_every: u64,
    steps_total: Option<u64>,
}

impl StepTimer {
    pub(crate) fn start(steps: u64, report_interval: u64, games: u64) -> Self {
        let now = now_ms();
        Self {
            started_ms: now,
            last_ms: now,
            last_games: games,
            report_every: (steps / 1000).min(report_interval).max(1),
            steps_total: (steps != u64::MAX).then_some(steps),
        }
    }

    pub(crate) fn due(&self, counter: u64, finished: bool) -> bool {
        finished || counter % self.report_every == 0
    }

    pub(crate) fn lap(&mut self, games: u64) -> Window {
        let now = now_ms();
        let window = Window {
            games: games.saturating_sub(self.last_games),
            ms: now - self.last_ms,
        };
        self.last_ms = now;
        self.last_games = games;
        window
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        now_ms() - self.started_ms
    }

    pub(crate) fn steps_total(&self) -> Option<u64> {
        self.steps_total
    }
}

/// Snapshot of a search's progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub steps_done: u64,
    /// `None` when stepping without a bound.
    pub steps_total: Option<u64>,
    pub completion_ratio: f64,
    pub total_games: u64,
    pub estimated_games: f64,
    pub space_estimate: f64,
    pub pool_size: usize,
    /// Cache misses per depth, each one a newly seen position.
    pub hashes_created: Vec<u64>,
    pub hashes_in_memory: Vec<usize>,
    pub repeated_ratio: Vec<f64>,
    pub combined_repeated_ratio: f64,
    pub solutions: usize,
    pub solution_depth: Option<usize>,
    pub total_ms: f64,
    pub games_per_second: f64,
    pub current_games_per_second: f64,
    pub eta_ms: Option<f64>,
    pub result: Option<Outcome>,
}

impl Progress {
    pub(crate) fn capture(
        search: &Search,
        steps_done: u64,
        steps_total: Option<u64>,
        total_ms: f64,
        window: Option<Window>,
    ) -> Self {
        let completion_ratio = search.completion_ratio();
        let total_games = search.total_games();
        let space_estimate = search
            .config()
            .branching_factor
            .powi(search.max_depth() as i32);
        let estimated_games = if completion_ratio > 0.0 {
            total_games as f64 / completion_ratio
        } else {
            space_estimate
        };

        let stats = search.cache().stats();
        let repeated_ratio: Vec<f64> = stats.iter().map(|depth| depth.repeated_ratio()).collect();

        let games_per_second = rate(total_games, total_ms);
        let current_games_per_second = match window {
            Some(window) => rate(window.games, window.ms),
            None => games_per_second,
        };
        let remaining_games = (estimated_games - total_games as f64).max(0.0);
        let eta_ms =
            (games_per_second > 0.0).then(|| remaining_games / games_per_second * 1000.0);

        let leaves = search.leaves();
        Self {
            steps_done,
            steps_total,
            completion_ratio,
            total_games,
            estimated_games,
            space_estimate,
            pool_size: search.pool_size(),
            hashes_created: stats.iter().map(|depth| depth.unique).collect(),
            hashes_in_memory: search.cache().sizes(),
            combined_repeated_ratio: combined_repeated_ratio(&repeated_ratio),
            repeated_ratio,
            solutions: leaves.len(),
            solution_depth: leaves.first().map(|leaf| leaf.depth()),
            total_ms,
            games_per_second,
            current_games_per_second,
            eta_ms,
            result: search.result().filter(|_| search.finished()),
        }
    }
}

fn rate(games: u64, ms: f64) -> f64 {
    if ms > 0.0 {
        games as f64 / ms * 1000.0
    } else {
        0.0
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.steps_total {
            Some(total) => write!(
                f,
                "steps {} / {} ({})",
                abbreviate_number(self.steps_done as f64),
                abbreviate_number(total as f64),
                percent(self.steps_done as f64 / total.max(1) as f64)
            )?,
            None => write!(f, "steps {}", abbreviate_number(self.steps_done as f64))?,
        }
        writeln!(f, ", completion {}", percent(self.completion_ratio))?;
        writeln!(
            f,
            "games {} of ~{} estimated, space {}, pool {}",
            abbreviate_number(self.total_games as f64),
            abbreviate_number(self.estimated_games),
            abbreviate_number(self.space_estimate),
            self.pool_size
        )?;
        let created: Vec<String> = self
            .hashes_created
            .iter()
            .map(|&count| abbreviate_number(count as f64))
            .collect();
        let in_memory: Vec<String> = self
            .hashes_in_memory
            .iter()
            .map(|&count| abbreviate_number(count as f64))
            .collect();
        let repeated: Vec<String> = self.repeated_ratio.iter().map(|&r| percent(r)).collect();
        writeln!(
            f,
            "hashes created [{}] in memory [{}] repeated [{}] combined {}",
            created.join(", "),
            in_memory.join(", "),
            repeated.join(", "),
            percent(self.combined_repeated_ratio)
        )?;
        match self.solution_depth {
            Some(depth) => writeln!(f, "solutions {} at depth {depth}", self.solutions)?,
            None => writeln!(f, "no solution yet")?,
        }
        write!(
            f,
            "{} games/s total, {} games/s now, elapsed {}",
            abbreviate_number(self.games_per_second),
            abbreviate_number(self.current_games_per_second),
            humanize_ms(self.total_ms)
        )?;
        match (self.result, self.eta_ms) {
            (Some(result), _) => write!(f, ", finished: {result}"),
            (None, Some(eta)) => write!(f, ", remaining ~{}", humanize_ms(eta)),
            (None, None) => Ok(()),
        }
    }
}
