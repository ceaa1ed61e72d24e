use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::roster::{CachedRosterDirectory, CompanyRoster};
use crate::workflows::scorecard::domain::{CompanyName, Period, ReportKey};
use crate::workflows::scorecard::journal::{
    JournalError, MonthlyReport, ReportJournal, ReportTotals,
};
use crate::workflows::scorecard::{scorecard_router, ScorecardService};

pub(super) fn company(name: &str) -> CompanyName {
    CompanyName::new(name).expect("valid company name")
}

pub(super) fn period(value: &str) -> Period {
    value.parse().expect("valid period")
}

pub(super) fn report_key(name: &str, month: &str) -> ReportKey {
    ReportKey {
        company: company(name),
        period: period(month),
    }
}

pub(super) fn sample_roster() -> CompanyRoster {
    CompanyRoster::from_entries([(company("GazService"), 47), (company("NordEnergo"), 10)])
}

pub(super) fn build_service() -> (
    ScorecardService<MemoryJournal, CompanyRoster>,
    Arc<MemoryJournal>,
) {
    let journal = Arc::new(MemoryJournal::default());
    let directory = Arc::new(CachedRosterDirectory::new(
        sample_roster(),
        Duration::from_secs(300),
    ));
    let service = ScorecardService::new(journal.clone(), directory);
    (service, journal)
}

pub(super) fn scorecard_router_with_service(
    service: ScorecardService<MemoryJournal, CompanyRoster>,
) -> axum::Router {
    scorecard_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Default, Clone)]
pub(super) struct MemoryJournal {
    pub(super) records: Arc<Mutex<HashMap<ReportKey, MonthlyReport>>>,
}

impl ReportJournal for MemoryJournal {
    fn append_visit(
        &self,
        key: &ReportKey,
        planned_visits: u32,
        fact: u32,
    ) -> Result<MonthlyReport, JournalError> {
        let mut guard = self.records.lock().expect("journal mutex poisoned");
        match guard.get_mut(key) {
            Some(report) => {
                if report.planned_visits != planned_visits {
                    return Err(JournalError::PlanLocked {
                        recorded: report.planned_visits,
                        requested: planned_visits,
                    });
                }
                report.facts.push(fact);
                Ok(report.clone())
            }
            None => {
                let report = MonthlyReport {
                    company: key.company.clone(),
                    period: key.period,
                    planned_visits,
                    facts: vec![fact],
                    totals: None,
                };
                guard.insert(key.clone(), report.clone());
                Ok(report)
            }
        }
    }

    fn amend_visit(
        &self,
        key: &ReportKey,
        visit: usize,
        fact: u32,
    ) -> Result<MonthlyReport, JournalError> {
        let mut guard = self.records.lock().expect("journal mutex poisoned");
        let report = guard.get_mut(key).ok_or(JournalError::NotFound)?;
        if visit == 0 || visit > report.facts.len() {
            return Err(JournalError::VisitOutOfRange {
                visit,
                recorded: report.facts.len(),
            });
        }
        report.facts[visit - 1] = fact;
        Ok(report.clone())
    }

    fn remove_visit(&self, key: &ReportKey, visit: usize) -> Result<MonthlyReport, JournalError> {
        let mut guard = self.records.lock().expect("journal mutex poisoned");
        let report = guard.get_mut(key).ok_or(JournalError::NotFound)?;
        if visit == 0 || visit > report.facts.len() {
            return Err(JournalError::VisitOutOfRange {
                visit,
                recorded: report.facts.len(),
            });
        }
        report.facts.remove(visit - 1);
        Ok(report.clone())
    }

    fn record_totals(&self, key: &ReportKey, totals: ReportTotals) -> Result<(), JournalError> {
        let mut guard = self.records.lock().expect("journal mutex poisoned");
        let report = guard.get_mut(key).ok_or(JournalError::NotFound)?;
        report.totals = Some(totals);
        Ok(())
    }

    fn fetch(&self, key: &ReportKey) -> Result<Option<MonthlyReport>, JournalError> {
        let guard = self.records.lock().expect("journal mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    fn list(&self, company: &CompanyName) -> Result<Vec<MonthlyReport>, JournalError> {
        let guard = self.records.lock().expect("journal mutex poisoned");
        let mut reports: Vec<MonthlyReport> = guard
            .values()
            .filter(|report| &report.company == company)
            .cloned()
            .collect();
        reports.sort_by_key(|report| report.period);
        Ok(reports)
    }

    fn delete_report(&self, key: &ReportKey) -> Result<(), JournalError> {
        let mut guard = self.records.lock().expect("journal mutex poisoned");
        guard.remove(key).map(|_| ()).ok_or(JournalError::NotFound)
    }
}

pub(super) struct UnavailableJournal;

impl ReportJournal for UnavailableJournal {
    fn append_visit(
        &self,
        _key: &ReportKey,
        _planned_visits: u32,
        _fact: u32,
    ) -> Result<MonthlyReport, JournalError> {
        Err(JournalError::Unavailable("journal offline".to_string()))
    }

    fn amend_visit(
        &self,
        _key: &ReportKey,
        _visit: usize,
        _fact: u32,
    ) -> Result<MonthlyReport, JournalError> {
        Err(JournalError::Unavailable("journal offline".to_string()))
    }

    fn remove_visit(&self, _key: &ReportKey, _visit: usize) -> Result<MonthlyReport, JournalError> {
        Err(JournalError::Unavailable("journal offline".to_string()))
    }

    fn record_totals(&self, _key: &ReportKey, _totals: ReportTotals) -> Result<(), JournalError> {
        Err(JournalError::Unavailable("journal offline".to_string()))
    }

    fn fetch(&self, _key: &ReportKey) -> Result<Option<MonthlyReport>, JournalError> {
        Err(JournalError::Unavailable("journal offline".to_string()))
    }

    fn list(&self, _company: &CompanyName) -> Result<Vec<MonthlyReport>, JournalError> {
        Err(JournalError::Unavailable("journal offline".to_string()))
    }

    fn delete_report(&self, _key: &ReportKey) -> Result<(), JournalError> {
        Err(JournalError::Unavailable("journal offline".to_string()))
    }
}
