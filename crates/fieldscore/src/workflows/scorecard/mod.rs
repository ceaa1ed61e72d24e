//! Monthly visit scoring for field service crews.
//!
//! A month is scored as a single pass over the recorded visit facts: the
//! remaining station quota is redistributed over the remaining visits after
//! every step, and each visit earns 0, 1, or 2 points from a two-tier rule
//! (overall pace first, own attainment second). The journal keeps one record
//! per company per month; every mutation rescores the whole month so the
//! stored summary never drifts from the facts.

pub mod domain;
pub mod engine;
pub mod journal;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{CompanyName, DomainError, Period, ReportKey, ScoreInput, VisitStatus};
pub use engine::{compute_scores, PeriodResult, VisitRow};
pub use journal::{JournalError, MonthlyReport, ReportJournal, ReportTotals};
pub use router::scorecard_router;
pub use service::{ScorecardError, ScorecardService, ScoredReport};
pub use views::{ReportView, RosterEntryView, ScoreSummaryView, VisitRowView};
