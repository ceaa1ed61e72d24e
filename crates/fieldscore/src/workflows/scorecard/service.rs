use std::sync::Arc;

use crate::workflows::roster::{
    CachedRosterDirectory, CompanyRoster, RosterImportError, RosterSource,
};

use super::domain::{CompanyName, DomainError, Period, ReportKey, ScoreInput};
use super::engine::{compute_scores, PeriodResult};
use super::journal::{JournalError, MonthlyReport, ReportJournal, ReportTotals};

/// A journal record paired with the scores recomputed from its facts.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredReport {
    pub report: MonthlyReport,
    /// Quota the roster carried for the company when scoring ran.
    pub station_quota: u32,
    pub result: PeriodResult,
}

/// Service composing the roster directory, the report journal, and the
/// scoring engine. Every mutation rescores the month from the full fact
/// sequence and writes the refreshed summary back to the journal.
pub struct ScorecardService<J, S> {
    journal: Arc<J>,
    directory: Arc<CachedRosterDirectory<S>>,
}

impl<J, S> ScorecardService<J, S>
where
    J: ReportJournal + 'static,
    S: RosterSource + 'static,
{
    pub fn new(journal: Arc<J>, directory: Arc<CachedRosterDirectory<S>>) -> Self {
        Self { journal, directory }
    }

    /// Record one completed visit and rescore the month.
    ///
    /// The first visit of a period fixes `planned_visits`; later calls must
    /// repeat the same plan or fail with [`JournalError::PlanLocked`].
    pub fn record_visit(
        &self,
        company: &CompanyName,
        period: Period,
        planned_visits: u32,
        fact: u32,
    ) -> Result<ScoredReport, ScorecardError> {
        if planned_visits == 0 {
            return Err(ScorecardError::InvalidPlan);
        }

        let quota = self.quota_for(company)?;
        let key = ReportKey {
            company: company.clone(),
            period,
        };
        let report = self.journal.append_visit(&key, planned_visits, fact)?;
        self.rescore(key, report, quota)
    }

    /// Replace the fact recorded for one visit (1-based) and rescore.
    pub fn amend_visit(
        &self,
        company: &CompanyName,
        period: Period,
        visit: usize,
        fact: u32,
    ) -> Result<ScoredReport, ScorecardError> {
        let quota = self.quota_for(company)?;
        let key = ReportKey {
            company: company.clone(),
            period,
        };
        let report = self.journal.amend_visit(&key, visit, fact)?;
        self.rescore(key, report, quota)
    }

    /// Drop one visit (1-based) from the period and rescore what remains.
    /// Later visits shift down a position and their targets change with the
    /// shortened sequence.
    pub fn remove_visit(
        &self,
        company: &CompanyName,
        period: Period,
        visit: usize,
    ) -> Result<ScoredReport, ScorecardError> {
        let quota = self.quota_for(company)?;
        let key = ReportKey {
            company: company.clone(),
            period,
        };
        let report = self.journal.remove_visit(&key, visit)?;
        self.rescore(key, report, quota)
    }

    /// The stored report for a company and period, scored with the current
    /// roster quota. Read-only: the persisted summary is left as it was.
    pub fn current_report(
        &self,
        company: &CompanyName,
        period: Period,
    ) -> Result<ScoredReport, ScorecardError> {
        let quota = self.quota_for(company)?;
        let key = ReportKey {
            company: company.clone(),
            period,
        };
        let report = self.journal.fetch(&key)?.ok_or(JournalError::NotFound)?;
        let result = compute_scores(&report.score_input(quota));

        Ok(ScoredReport {
            report,
            station_quota: quota,
            result,
        })
    }

    /// Every journaled period for a company, oldest first, each scored with
    /// the current roster quota.
    pub fn company_history(
        &self,
        company: &CompanyName,
    ) -> Result<Vec<ScoredReport>, ScorecardError> {
        let quota = self.quota_for(company)?;
        let reports = self.journal.list(company)?;

        Ok(reports
            .into_iter()
            .map(|report| {
                let result = compute_scores(&report.score_input(quota));
                ScoredReport {
                    report,
                    station_quota: quota,
                    result,
                }
            })
            .collect())
    }

    /// Remove a period record entirely. Works for companies that have left
    /// the roster, so stale journals can be cleaned up.
    pub fn delete_report(
        &self,
        company: &CompanyName,
        period: Period,
    ) -> Result<(), ScorecardError> {
        let key = ReportKey {
            company: company.clone(),
            period,
        };
        self.journal.delete_report(&key)?;
        Ok(())
    }

    /// Score an ad-hoc input without touching the journal.
    pub fn preview(&self, input: &ScoreInput) -> PeriodResult {
        compute_scores(input)
    }

    /// Current roster snapshot for listings and quota lookups.
    pub fn roster(&self) -> Result<Arc<CompanyRoster>, ScorecardError> {
        Ok(self.directory.current()?)
    }

    fn quota_for(&self, company: &CompanyName) -> Result<u32, ScorecardError> {
        let roster = self.directory.current()?;
        roster
            .quota(company)
            .ok_or_else(|| ScorecardError::UnknownCompany(company.clone()))
    }

    fn rescore(
        &self,
        key: ReportKey,
        mut report: MonthlyReport,
        quota: u32,
    ) -> Result<ScoredReport, ScorecardError> {
        let result = compute_scores(&report.score_input(quota));
        let totals = ReportTotals {
            total_score: result.total_score,
            max_score: result.max_score(),
            month_percent: result.month_percent,
            stations_done: result.stations_done(),
        };

        self.journal.record_totals(&key, totals)?;
        report.totals = Some(totals);

        Ok(ScoredReport {
            report,
            station_quota: quota,
            result,
        })
    }
}

/// Error raised by the scorecard service.
#[derive(Debug, thiserror::Error)]
pub enum ScorecardError {
    #[error("company '{0}' is not on the station roster")]
    UnknownCompany(CompanyName),
    #[error("planned visits for a period must be at least 1")]
    InvalidPlan,
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Journal(#[from] JournalError),
    #[error(transparent)]
    Roster(#[from] RosterImportError),
}
