use serde::Serialize;

use super::domain::{ScoreInput, VisitStatus};

/// One scored visit, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitRow {
    /// 1-based position of the visit in the month.
    pub index: u32,
    /// Redistributed target for this visit, rounded to one decimal.
    /// Goes negative once earlier overshoot has consumed more than the quota.
    pub planned_for_visit: f64,
    /// Stations actually inspected on this visit.
    pub actual: u32,
    /// `actual` against the redistributed target, 0 when the target is not
    /// positive.
    pub visit_attainment_percent: f64,
    pub score: u8,
    pub expected_cumulative_percent: f64,
    pub actual_cumulative_percent: f64,
    pub status: VisitStatus,
}

/// Outcome of scoring one month of visits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodResult {
    pub rows: Vec<VisitRow>,
    pub total_score: u32,
    pub month_percent: f64,
}

impl PeriodResult {
    fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total_score: 0,
            month_percent: 0.0,
        }
    }

    /// Highest total the scored visits could have reached.
    pub fn max_score(&self) -> u32 {
        2 * self.rows.len() as u32
    }

    /// Stations inspected across all scored visits.
    pub fn stations_done(&self) -> u32 {
        self.rows.iter().map(|row| row.actual).sum()
    }
}

/// Scores a month of visits against a dynamically re-planned target.
///
/// After every visit the remaining quota is redistributed evenly over the
/// remaining visits, so a shortfall or surplus on one visit moves every
/// later target. Scoring is two-tier: cumulative progress at or above the
/// visit-count schedule earns full points outright; otherwise the visit is
/// classified by its own attainment (under 50% poor, under 90% acceptable,
/// else good).
///
/// Remaining quota and remaining visits are left unclamped. Overshoot
/// drives later targets negative and extra visits past the plan flip the
/// sign of the divisor; both cases land in the zero-target guard, and the
/// cumulative pace check still decides the score.
///
/// A zero quota, a zero visit plan, or an empty fact sequence is "nothing
/// to score yet" and returns the empty result rather than an error.
pub fn compute_scores(input: &ScoreInput) -> PeriodResult {
    if input.station_quota == 0 || input.planned_visits == 0 || input.facts.is_empty() {
        return PeriodResult::empty();
    }

    let quota = f64::from(input.station_quota);
    let planned_visits = f64::from(input.planned_visits);

    let mut remaining_quota = i64::from(input.station_quota);
    let mut remaining_visits = i64::from(input.planned_visits);
    let mut cumulative_done: u64 = 0;
    let mut total_score: u32 = 0;

    let mut rows = Vec::with_capacity(input.facts.len());
    for (i, &fact) in input.facts.iter().enumerate() {
        let target = if remaining_visits > 0 {
            remaining_quota as f64 / remaining_visits as f64
        } else {
            0.0
        };
        let attainment = if target > 0.0 {
            f64::from(fact) / target * 100.0
        } else {
            0.0
        };

        let expected = (i as f64 + 1.0) / planned_visits * 100.0;
        let actual = (cumulative_done + u64::from(fact)) as f64 / quota * 100.0;

        // Comparisons run on the unrounded values; rounding happens only
        // on the emitted row.
        let (score, status) = if actual >= expected {
            (2, VisitStatus::OnPaceOverall)
        } else if attainment < 50.0 {
            (0, VisitStatus::Poor)
        } else if attainment < 90.0 {
            (1, VisitStatus::Acceptable)
        } else {
            (2, VisitStatus::Good)
        };

        rows.push(VisitRow {
            index: i as u32 + 1,
            planned_for_visit: round1(target),
            actual: fact,
            visit_attainment_percent: round1(attainment),
            score,
            expected_cumulative_percent: round1(expected),
            actual_cumulative_percent: round1(actual),
            status,
        });

        remaining_quota -= i64::from(fact);
        remaining_visits -= 1;
        cumulative_done += u64::from(fact);
        total_score += u32::from(score);
    }

    let month_percent = round1(cumulative_done as f64 / quota * 100.0);

    PeriodResult {
        rows,
        total_score,
        month_percent,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
