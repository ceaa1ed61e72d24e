use serde::{Deserialize, Serialize};

use super::domain::{CompanyName, Period, ReportKey, ScoreInput};

/// Summary persisted the last time a report was scored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub total_score: u32,
    pub max_score: u32,
    pub month_percent: f64,
    pub stations_done: u32,
}

/// Journal record: one company's month of visit facts plus the summary from
/// the last scoring pass. Station quotas are not stored here; they come from
/// the roster at scoring time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub company: CompanyName,
    pub period: Period,
    /// Visit plan fixed when the period record is created.
    pub planned_visits: u32,
    /// Stations inspected per visit, in chronological order.
    pub facts: Vec<u32>,
    pub totals: Option<ReportTotals>,
}

impl MonthlyReport {
    pub fn key(&self) -> ReportKey {
        ReportKey {
            company: self.company.clone(),
            period: self.period,
        }
    }

    /// Pairs the journaled facts with a quota from the roster for scoring.
    pub fn score_input(&self, station_quota: u32) -> ScoreInput {
        ScoreInput {
            station_quota,
            planned_visits: self.planned_visits,
            facts: self.facts.clone(),
        }
    }
}

/// Storage abstraction for the monthly report journal.
///
/// Each mutating method is one read-modify-write step: implementations
/// apply the whole mutation under their own exclusion so two concurrent
/// appends to the same company and month cannot interleave.
pub trait ReportJournal: Send + Sync {
    /// Appends one visit fact, creating the period record on first use.
    /// `planned_visits` fixes the period's plan at creation and must match
    /// the recorded plan on every later append.
    fn append_visit(
        &self,
        key: &ReportKey,
        planned_visits: u32,
        fact: u32,
    ) -> Result<MonthlyReport, JournalError>;

    /// Replaces the fact at `visit` (1-based) with a new value.
    fn amend_visit(&self, key: &ReportKey, visit: usize, fact: u32)
        -> Result<MonthlyReport, JournalError>;

    /// Removes the fact at `visit` (1-based); later visits shift down one
    /// position.
    fn remove_visit(&self, key: &ReportKey, visit: usize) -> Result<MonthlyReport, JournalError>;

    /// Stores the summary from the latest scoring pass on the record.
    fn record_totals(&self, key: &ReportKey, totals: ReportTotals) -> Result<(), JournalError>;

    fn fetch(&self, key: &ReportKey) -> Result<Option<MonthlyReport>, JournalError>;

    /// Every record for a company, oldest period first.
    fn list(&self, company: &CompanyName) -> Result<Vec<MonthlyReport>, JournalError>;

    /// Drops a whole period record.
    fn delete_report(&self, key: &ReportKey) -> Result<(), JournalError>;
}

/// Error enumeration for journal failures.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("no report recorded for this company and period")]
    NotFound,
    #[error("visit {visit} is out of range for {recorded} recorded visit(s)")]
    VisitOutOfRange { visit: usize, recorded: usize },
    #[error("visit plan is fixed at {recorded} for this period, cannot change it to {requested}")]
    PlanLocked { recorded: u32, requested: u32 },
    #[error("journal unavailable: {0}")]
    Unavailable(String),
}
