use crate::infra::InMemoryReportJournal;
use chrono::Local;
use clap::Args;
use fieldscore::error::AppError;
use fieldscore::workflows::roster::{CachedRosterDirectory, CompanyRoster};
use fieldscore::workflows::scorecard::views::{ReportView, ScoreSummaryView};
use fieldscore::workflows::scorecard::{
    compute_scores, CompanyName, Period, PeriodResult, ScoreInput, ScorecardService,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub(crate) struct ScoreComputeArgs {
    /// Station quota assigned to the company for the month
    #[arg(long)]
    pub(crate) quota: u32,
    /// Number of visits planned for the month
    #[arg(long)]
    pub(crate) planned_visits: u32,
    /// Stations inspected per visit, comma separated (e.g. 12,13,13,2)
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) facts: Vec<u32>,
    /// Emit the scorecard as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RosterShowArgs {
    /// Path to the roster CSV (defaults to station_roster.csv)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Company to score (must appear on the roster when --roster is given)
    #[arg(long, default_value = "GazService")]
    pub(crate) company: String,
    /// Reporting period (YYYY-MM). Defaults to the current month.
    #[arg(long, value_parser = crate::infra::parse_period)]
    pub(crate) period: Option<Period>,
    /// Optional roster CSV to load instead of the built-in sample entry
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Station quota used when no roster CSV is supplied
    #[arg(long, default_value_t = 47)]
    pub(crate) quota: u32,
    /// Stations inspected per visit, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = [12, 13, 13, 2])]
    pub(crate) facts: Vec<u32>,
    /// Number of visits planned for the month (defaults to the fact count)
    #[arg(long)]
    pub(crate) planned_visits: Option<u32>,
}

pub(crate) fn run_score_compute(args: ScoreComputeArgs) -> Result<(), AppError> {
    let ScoreComputeArgs {
        quota,
        planned_visits,
        facts,
        json,
    } = args;

    let input = ScoreInput {
        station_quota: quota,
        planned_visits,
        facts,
    };
    let result = compute_scores(&input);

    if json {
        match serde_json::to_string_pretty(&ScoreSummaryView::from(&result)) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Scorecard payload unavailable: {err}"),
        }
        return Ok(());
    }

    render_score_table(&result);
    render_score_summary(&result, input.station_quota);
    Ok(())
}

pub(crate) fn run_roster_show(args: RosterShowArgs) -> Result<(), AppError> {
    let path = args
        .roster
        .unwrap_or_else(|| PathBuf::from("station_roster.csv"));
    let roster = CompanyRoster::from_path(&path)?;

    println!(
        "Station roster from {} ({} companies)",
        path.display(),
        roster.len()
    );
    let mut total = 0u64;
    for (company, quota) in roster.entries() {
        println!("- {}: {} stations", company, quota);
        total += u64::from(quota);
    }
    println!("Total stations under contract: {total}");
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        company,
        period,
        roster,
        quota,
        facts,
        planned_visits,
    } = args;

    let company = CompanyName::new(&company)?;
    let period = period.unwrap_or_else(Period::current);
    let planned_visits = planned_visits.unwrap_or(facts.len() as u32).max(1);

    let roster = match roster {
        Some(path) => CompanyRoster::from_path(&path)?,
        None => CompanyRoster::from_entries([(company.clone(), quota)]),
    };

    println!(
        "Station scorecard demo (generated {})",
        Local::now().date_naive()
    );
    println!("Roster: {} companies on file", roster.len());

    let journal = Arc::new(InMemoryReportJournal::default());
    let directory = Arc::new(CachedRosterDirectory::new(roster, Duration::from_secs(300)));
    let service = ScorecardService::new(journal, directory);

    println!(
        "\nRecording {} visits for {} over {}",
        facts.len(),
        company,
        period
    );
    let mut last = None;
    for fact in &facts {
        match service.record_visit(&company, period, planned_visits, *fact) {
            Ok(scored) => last = Some(scored),
            Err(err) => {
                println!("  Visit rejected: {err}");
                return Ok(());
            }
        }
    }

    let Some(scored) = last else {
        println!("No facts supplied, nothing to score.");
        return Ok(());
    };

    println!();
    render_score_table(&scored.result);
    render_score_summary(&scored.result, scored.station_quota);

    let last_visit = scored.report.facts.len();
    let corrected = scored.report.facts[last_visit - 1] + 5;
    println!("\nField correction: visit {last_visit} actually covered {corrected} stations");
    let scored = match service.amend_visit(&company, period, last_visit, corrected) {
        Ok(scored) => scored,
        Err(err) => {
            println!("  Correction rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "After correction: total score {} / {} | month attainment {:.1}%",
        scored.result.total_score,
        scored.result.max_score(),
        scored.result.month_percent
    );

    match serde_json::to_string_pretty(&ReportView::from(&scored)) {
        Ok(json) => println!("\nReport payload:\n{json}"),
        Err(err) => println!("\nReport payload unavailable: {err}"),
    }

    Ok(())
}

pub(crate) fn render_score_table(result: &PeriodResult) {
    if result.rows.is_empty() {
        println!("No visits to score.");
        return;
    }

    println!("Visit |  Plan | Fact | Visit % | Score | Expected % | Actual % | Status");
    for row in &result.rows {
        println!(
            "{:>5} | {:>5.1} | {:>4} | {:>7.1} | {:>5} | {:>10.1} | {:>8.1} | {}",
            row.index,
            row.planned_for_visit,
            row.actual,
            row.visit_attainment_percent,
            row.score,
            row.expected_cumulative_percent,
            row.actual_cumulative_percent,
            row.status.label()
        );
    }
}

pub(crate) fn render_score_summary(result: &PeriodResult, station_quota: u32) {
    println!(
        "\nTotal score: {} / {}",
        result.total_score,
        result.max_score()
    );
    println!("Month attainment: {:.1}%", result.month_percent);
    println!(
        "Stations inspected: {} of {}",
        result.stations_done(),
        station_quota
    );
}
