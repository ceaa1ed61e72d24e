use super::common::*;
use crate::workflows::scorecard::journal::{JournalError, ReportJournal, ReportTotals};

#[test]
fn append_creates_the_period_record_then_extends_it() {
    let journal = MemoryJournal::default();
    let key = report_key("GazService", "2025-08");

    let first = journal.append_visit(&key, 4, 12).expect("first append");
    assert_eq!(first.planned_visits, 4);
    assert_eq!(first.facts, vec![12]);
    assert!(first.totals.is_none());

    let second = journal.append_visit(&key, 4, 13).expect("second append");
    assert_eq!(second.facts, vec![12, 13]);
}

#[test]
fn append_locks_the_plan_for_the_period() {
    let journal = MemoryJournal::default();
    let key = report_key("GazService", "2025-08");

    journal.append_visit(&key, 4, 12).expect("first append");
    let error = journal
        .append_visit(&key, 5, 13)
        .expect_err("plan change rejected");

    assert!(matches!(
        error,
        JournalError::PlanLocked {
            recorded: 4,
            requested: 5
        }
    ));
}

#[test]
fn plans_are_independent_across_periods() {
    let journal = MemoryJournal::default();

    journal
        .append_visit(&report_key("GazService", "2025-08"), 4, 12)
        .expect("august append");
    journal
        .append_visit(&report_key("GazService", "2025-09"), 6, 9)
        .expect("september takes its own plan");
}

#[test]
fn amend_replaces_one_fact_in_place() {
    let journal = MemoryJournal::default();
    let key = report_key("GazService", "2025-08");
    journal.append_visit(&key, 4, 12).expect("append");
    journal.append_visit(&key, 4, 13).expect("append");

    let amended = journal.amend_visit(&key, 1, 10).expect("amend");
    assert_eq!(amended.facts, vec![10, 13]);
}

#[test]
fn amend_rejects_out_of_range_visits() {
    let journal = MemoryJournal::default();
    let key = report_key("GazService", "2025-08");
    journal.append_visit(&key, 4, 12).expect("append");

    for visit in [0, 2] {
        let error = journal
            .amend_visit(&key, visit, 10)
            .expect_err("out of range rejected");
        assert!(matches!(
            error,
            JournalError::VisitOutOfRange { recorded: 1, .. }
        ));
    }
}

#[test]
fn remove_shifts_later_visits_down() {
    let journal = MemoryJournal::default();
    let key = report_key("GazService", "2025-08");
    for fact in [12, 13, 13, 2] {
        journal.append_visit(&key, 4, fact).expect("append");
    }

    let shortened = journal.remove_visit(&key, 2).expect("remove");
    assert_eq!(shortened.facts, vec![12, 13, 2]);
}

#[test]
fn mutations_on_missing_records_report_not_found() {
    let journal = MemoryJournal::default();
    let key = report_key("GazService", "2025-08");

    assert!(matches!(
        journal.amend_visit(&key, 1, 10),
        Err(JournalError::NotFound)
    ));
    assert!(matches!(
        journal.remove_visit(&key, 1),
        Err(JournalError::NotFound)
    ));
    assert!(matches!(
        journal.record_totals(
            &key,
            ReportTotals {
                total_score: 0,
                max_score: 0,
                month_percent: 0.0,
                stations_done: 0,
            }
        ),
        Err(JournalError::NotFound)
    ));
}

#[test]
fn record_totals_sticks_to_the_record() {
    let journal = MemoryJournal::default();
    let key = report_key("GazService", "2025-08");
    journal.append_visit(&key, 4, 12).expect("append");

    let totals = ReportTotals {
        total_score: 2,
        max_score: 2,
        month_percent: 25.5,
        stations_done: 12,
    };
    journal.record_totals(&key, totals).expect("totals stored");

    let stored = journal.fetch(&key).expect("fetch").expect("record exists");
    assert_eq!(stored.totals, Some(totals));
}

#[test]
fn list_returns_a_company_in_period_order() {
    let journal = MemoryJournal::default();
    journal
        .append_visit(&report_key("GazService", "2025-09"), 4, 9)
        .expect("append");
    journal
        .append_visit(&report_key("GazService", "2025-08"), 4, 12)
        .expect("append");
    journal
        .append_visit(&report_key("NordEnergo", "2025-08"), 2, 5)
        .expect("append");

    let reports = journal.list(&company("GazService")).expect("list");
    let periods: Vec<String> = reports
        .iter()
        .map(|report| report.period.to_string())
        .collect();
    assert_eq!(periods, vec!["2025-08", "2025-09"]);
}

#[test]
fn delete_report_drops_the_whole_period() {
    let journal = MemoryJournal::default();
    let key = report_key("GazService", "2025-08");
    journal.append_visit(&key, 4, 12).expect("append");

    journal.delete_report(&key).expect("delete");
    assert!(journal.fetch(&key).expect("fetch").is_none());
    assert!(matches!(
        journal.delete_report(&key),
        Err(JournalError::NotFound)
    ));
}
