//! Writes the four demo datasets the dashboard reads by default.
//!
//! Usage: `generate_sample [OUTPUT_DIR]` (defaults to the current directory).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

const TEAMS: [&str; 32] = [
    "ARI", "ATL", "BAL", "BUF", "CAR", "CHI", "CIN", "CLE", "DAL", "DEN", "DET", "GB", "HOU",
    "IND", "JAX", "KC", "LA", "LAC", "LV", "MIA", "MIN", "NE", "NO", "NYG", "NYJ", "PHI", "PIT",
    "SEA", "SF", "TB", "TEN", "WAS",
];
const PAST_SEASONS: [i64; 4] = [2021, 2022, 2023, 2024];
const WEEKS: i64 = 18;
const GAMES_PER_WEEK: usize = 8;
/// Payout on a winning bet at -110.
const WIN_UNITS: f64 = 0.9091;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Shuffle the team list and pair it off into matchups.
    fn matchups(&mut self, n: usize) -> Vec<(&'static str, &'static str)> {
        let mut teams = TEAMS;
        for i in (1..teams.len()).rev() {
            let j = (self.next_u64() % (i as u64 + 1)) as usize;
            teams.swap(i, j);
        }
        teams.chunks(2).take(n).map(|p| (p[0], p[1])).collect()
    }
}

fn half_point(v: f64) -> f64 {
    (v * 2.0).round() / 2.0
}

fn tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// A line and the model's view of it. Spreads are from the home side.
struct Line {
    away_team: &'static str,
    home_team: &'static str,
    spread_line: f64,
    total_line: f64,
    model_spread: f64,
}

impl Line {
    fn draw(rng: &mut SimpleRng, away_team: &'static str, home_team: &'static str) -> Self {
        let spread_line = half_point(rng.gauss(-1.5, 6.0));
        Line {
            away_team,
            home_team,
            spread_line,
            total_line: half_point(rng.gauss(44.0, 4.0)),
            model_spread: tenth(spread_line + rng.gauss(0.0, 2.5)),
        }
    }

    fn edge(&self) -> f64 {
        tenth(self.spread_line - self.model_spread)
    }

    fn model_pick(&self) -> &'static str {
        if self.edge() >= 0.0 {
            self.home_team
        } else {
            self.away_team
        }
    }
}

#[derive(Serialize)]
struct PastRow {
    season: i64,
    week: i64,
    away_team: &'static str,
    home_team: &'static str,
    spread_line: f64,
    total_line: f64,
    model_spread: f64,
    model_pick: &'static str,
    home_margin: i64,
    result: &'static str,
    units: f64,
}

#[derive(Serialize)]
struct FutureRow {
    season: i64,
    week: i64,
    away_team: &'static str,
    home_team: &'static str,
    spread_line: f64,
    total_line: f64,
    model_spread: f64,
    edge: f64,
    model_pick: &'static str,
    confidence: f64,
}

#[derive(Default)]
struct Tally {
    bets: i64,
    wins: i64,
    losses: i64,
    pushes: i64,
    units: f64,
}

impl Tally {
    fn add(&mut self, row: &PastRow) {
        self.bets += 1;
        match row.result {
            "win" => self.wins += 1,
            "loss" => self.losses += 1,
            _ => self.pushes += 1,
        }
        self.units += row.units;
    }

    fn win_pct(&self) -> f64 {
        let decided = self.wins + self.losses;
        if decided == 0 {
            0.0
        } else {
            tenth(100.0 * self.wins as f64 / decided as f64)
        }
    }

    fn roi(&self) -> f64 {
        if self.bets == 0 {
            0.0
        } else {
            tenth(100.0 * self.units / self.bets as f64)
        }
    }
}

#[derive(Serialize)]
struct YearlyRow {
    season: i64,
    bets: i64,
    wins: i64,
    losses: i64,
    pushes: i64,
    win_pct: f64,
    units: f64,
    roi_pct: f64,
}

#[derive(Serialize)]
struct WeeklyRow {
    season: i64,
    week: i64,
    bets: i64,
    wins: i64,
    losses: i64,
    pushes: i64,
    units: f64,
}

fn past_row(rng: &mut SimpleRng, season: i64, week: i64, line: Line) -> PastRow {
    // Outcome drawn around the model's number so the model has a mild edge.
    let home_margin = rng.gauss(-line.model_spread, 13.0).round() as i64;
    let cover = home_margin as f64 + line.spread_line;
    let picked_home = line.model_pick() == line.home_team;
    let result = if cover == 0.0 {
        "push"
    } else if (cover > 0.0) == picked_home {
        "win"
    } else {
        "loss"
    };
    let units = match result {
        "win" => WIN_UNITS,
        "loss" => -1.0,
        _ => 0.0,
    };
    PastRow {
        season,
        week,
        away_team: line.away_team,
        home_team: line.home_team,
        spread_line: line.spread_line,
        total_line: line.total_line,
        model_spread: line.model_spread,
        model_pick: line.model_pick(),
        home_margin,
        result,
        units,
    }
}

fn write_rows<T: Serialize>(dir: &Path, name: &str, rows: &[T]) -> Result<()> {
    let path = dir.join(name);
    let mut writer =
        csv::Writer::from_path(&path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    writer.flush().with_context(|| format!("flushing {}", path.display()))?;
    println!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);

    let mut past = Vec::new();
    for season in PAST_SEASONS {
        for week in 1..=WEEKS {
            for (away, home) in rng.matchups(GAMES_PER_WEEK) {
                let line = Line::draw(&mut rng, away, home);
                past.push(past_row(&mut rng, season, week, line));
            }
        }
    }

    let mut yearly: BTreeMap<i64, Tally> = BTreeMap::new();
    let mut weekly: BTreeMap<(i64, i64), Tally> = BTreeMap::new();
    for row in &past {
        yearly.entry(row.season).or_default().add(row);
        weekly.entry((row.season, row.week)).or_default().add(row);
    }

    let yearly_rows: Vec<YearlyRow> = yearly
        .iter()
        .map(|(&season, t)| YearlyRow {
            season,
            bets: t.bets,
            wins: t.wins,
            losses: t.losses,
            pushes: t.pushes,
            win_pct: t.win_pct(),
            units: tenth(t.units),
            roi_pct: t.roi(),
        })
        .collect();

    let weekly_rows: Vec<WeeklyRow> = weekly
        .iter()
        .map(|(&(season, week), t)| WeeklyRow {
            season,
            week,
            bets: t.bets,
            wins: t.wins,
            losses: t.losses,
            pushes: t.pushes,
            units: tenth(t.units),
        })
        .collect();

    let next_season = PAST_SEASONS[PAST_SEASONS.len() - 1] + 1;
    let future: Vec<FutureRow> = rng
        .matchups(16)
        .into_iter()
        .map(|(away, home)| {
            let line = Line::draw(&mut rng, away, home);
            let edge = line.edge();
            FutureRow {
                season: next_season,
                week: 1,
                away_team: line.away_team,
                home_team: line.home_team,
                spread_line: line.spread_line,
                total_line: line.total_line,
                model_spread: line.model_spread,
                edge,
                model_pick: line.model_pick(),
                confidence: tenth((50.0 + edge.abs() * 3.0).min(75.0)),
            }
        })
        .collect();

    write_rows(&out_dir, "past.csv", &past)?;
    write_rows(&out_dir, "future.csv", &future)?;
    write_rows(&out_dir, "final_model_performance_summary.csv", &yearly_rows)?;
    write_rows(&out_dir, "bet_summary_by_season_week.csv", &weekly_rows)?;
    Ok(())
}
