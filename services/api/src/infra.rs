use fieldscore::workflows::scorecard::{
    CompanyName, JournalError, MonthlyReport, Period, ReportJournal, ReportKey, ReportTotals,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local journal backing the service. Each method takes the record
/// lock once, so appends and rescores from concurrent requests serialize.
#[derive(Default, Clone)]
pub(crate) struct InMemoryReportJournal {
    records: Arc<Mutex<HashMap<ReportKey, MonthlyReport>>>,
}

impl ReportJournal for InMemoryReportJournal {
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

pub(crate) fn parse_period(raw: &str) -> Result<Period, String> {
    raw.trim()
        .parse::<Period>()
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_key(name: &str, month: &str) -> ReportKey {
        ReportKey {
            company: CompanyName::new(name).expect("valid name"),
            period: month.parse().expect("valid period"),
        }
    }

    #[test]
    fn journal_appends_and_locks_the_plan() {
        let journal = InMemoryReportJournal::default();
        let key = report_key("GazService", "2025-08");

        journal.append_visit(&key, 4, 12).expect("first visit");
        let report = journal.append_visit(&key, 4, 13).expect("second visit");
        assert_eq!(report.facts, vec![12, 13]);

        let error = journal
            .append_visit(&key, 5, 14)
            .expect_err("plan drift rejected");
        assert!(matches!(error, JournalError::PlanLocked { recorded: 4, .. }));
    }

    #[test]
    fn journal_bounds_checks_visit_positions() {
        let journal = InMemoryReportJournal::default();
        let key = report_key("GazService", "2025-08");
        journal.append_visit(&key, 4, 12).expect("first visit");

        for visit in [0, 2] {
            let error = journal
                .amend_visit(&key, visit, 20)
                .expect_err("out of range");
            assert!(matches!(error, JournalError::VisitOutOfRange { .. }));
        }
    }

    #[test]
    fn parse_period_trims_input() {
        assert_eq!(
            parse_period(" 2025-08 ").expect("parses"),
            "2025-08".parse().expect("valid period")
        );
        assert!(parse_period("august").is_err());
    }
}
