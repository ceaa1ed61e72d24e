use serde::Serialize;

use super::domain::{CompanyName, Period, VisitStatus};
use super::engine::{PeriodResult, VisitRow};
use super::service::ScoredReport;

#[derive(Debug, Clone, Serialize)]
pub struct VisitRowView {
    pub visit: u32,
    pub planned: f64,
    pub actual: u32,
    pub attainment_percent: f64,
    pub score: u8,
    pub expected_percent: f64,
    pub actual_percent: f64,
    pub status: VisitStatus,
    pub status_label: &'static str,
}

impl From<&VisitRow> for VisitRowView {
    fn from(row: &VisitRow) -> Self {
        Self {
            visit: row.index,
            planned: row.planned_for_visit,
            actual: row.actual,
            attainment_percent: row.visit_attainment_percent,
            score: row.score,
            expected_percent: row.expected_cumulative_percent,
            actual_percent: row.actual_cumulative_percent,
            status: row.status,
            status_label: row.status.label(),
        }
    }
}

/// Row table plus the three summary figures for one scoring pass.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreSummaryView {
    pub rows: Vec<VisitRowView>,
    pub total_score: u32,
    pub max_score: u32,
    pub month_percent: f64,
    pub stations_done: u32,
}

impl From<&PeriodResult> for ScoreSummaryView {
    fn from(result: &PeriodResult) -> Self {
        Self {
            rows: result.rows.iter().map(VisitRowView::from).collect(),
            total_score: result.total_score,
            max_score: result.max_score(),
            month_percent: result.month_percent,
            stations_done: result.stations_done(),
        }
    }
}

/// A journaled month rendered for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub company: CompanyName,
    pub period: Period,
    pub station_quota: u32,
    pub planned_visits: u32,
    #[serde(flatten)]
    pub summary: ScoreSummaryView,
}

impl From<&ScoredReport> for ReportView {
    fn from(scored: &ScoredReport) -> Self {
        Self {
            company: scored.report.company.clone(),
            period: scored.report.period,
            station_quota: scored.station_quota,
            planned_visits: scored.report.planned_visits,
            summary: ScoreSummaryView::from(&scored.result),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterEntryView {
    pub company: CompanyName,
    pub station_quota: u32,
}
