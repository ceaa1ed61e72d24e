use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::workflows::roster::RosterSource;

use super::domain::{CompanyName, Period, ScoreInput};
use super::journal::ReportJournal;
use super::service::ScorecardService;
use super::views::{ReportView, RosterEntryView, ScoreSummaryView};

/// Router builder exposing HTTP endpoints for the monthly scorecard.
pub fn scorecard_router<J, S>(service: Arc<ScorecardService<J, S>>) -> Router
where
    J: ReportJournal + 'static,
    S: RosterSource + 'static,
{
    Router::new()
        .route("/api/v1/roster", get(roster_handler::<J, S>))
        .route("/api/v1/score/preview", post(preview_handler::<J, S>))
        .route("/api/v1/scorecard/:company", get(history_handler::<J, S>))
        .route(
            "/api/v1/scorecard/:company/:period",
            get(report_handler::<J, S>).delete(delete_report_handler::<J, S>),
        )
        .route(
            "/api/v1/scorecard/:company/:period/visits",
            post(record_visit_handler::<J, S>),
        )
        .route(
            "/api/v1/scorecard/:company/:period/visits/:visit",
            put(amend_visit_handler::<J, S>).delete(remove_visit_handler::<J, S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordVisitRequest {
    pub(crate) planned_visits: u32,
    pub(crate) fact: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AmendVisitRequest {
    pub(crate) fact: u32,
}

pub(crate) async fn record_visit_handler<J, S>(
    State(service): State<Arc<ScorecardService<J, S>>>,
    Path((company, period)): Path<(String, String)>,
    Json(request): Json<RecordVisitRequest>,
) -> Result<(StatusCode, Json<ReportView>), AppError>
where
    J: ReportJournal + 'static,
    S: RosterSource + 'static,
{
    let company = CompanyName::new(&company)?;
    let period: Period = period.parse()?;

    let scored = service.record_visit(&company, period, request.planned_visits, request.fact)?;
    Ok((StatusCode::CREATED, Json(ReportView::from(&scored))))
}

pub(crate) async fn amend_visit_handler<J, S>(
    State(service): State<Arc<ScorecardService<J, S>>>,
    Path((company, period, visit)): Path<(String, String, usize)>,
    Json(request): Json<AmendVisitRequest>,
) -> Result<Json<ReportView>, AppError>
where
    J: ReportJournal + 'static,
    S: RosterSource + 'static,
{
    let company = CompanyName::new(&company)?;
    let period: Period = period.parse()?;

    let scored = service.amend_visit(&company, period, visit, request.fact)?;
    Ok(Json(ReportView::from(&scored)))
}

pub(crate) async fn remove_visit_handler<J, S>(
    State(service): State<Arc<ScorecardService<J, S>>>,
    Path((company, period, visit)): Path<(String, String, usize)>,
) -> Result<Json<ReportView>, AppError>
where
    J: ReportJournal + 'static,
    S: RosterSource + 'static,
{
    let company = CompanyName::new(&company)?;
    let period: Period = period.parse()?;

    let scored = service.remove_visit(&company, period, visit)?;
    Ok(Json(ReportView::from(&scored)))
}

pub(crate) async fn report_handler<J, S>(
    State(service): State<Arc<ScorecardService<J, S>>>,
    Path((company, period)): Path<(String, String)>,
) -> Result<Json<ReportView>, AppError>
where
    J: ReportJournal + 'static,
    S: RosterSource + 'static,
{
    let company = CompanyName::new(&company)?;
    let period: Period = period.parse()?;

    let scored = service.current_report(&company, period)?;
    Ok(Json(ReportView::from(&scored)))
}

pub(crate) async fn history_handler<J, S>(
    State(service): State<Arc<ScorecardService<J, S>>>,
    Path(company): Path<String>,
) -> Result<Json<Vec<ReportView>>, AppError>
where
    J: ReportJournal + 'static,
    S: RosterSource + 'static,
{
    let company = CompanyName::new(&company)?;

    let history = service.company_history(&company)?;
    let views = history.iter().map(ReportView::from).collect();
    Ok(Json(views))
}

pub(crate) async fn delete_report_handler<J, S>(
    State(service): State<Arc<ScorecardService<J, S>>>,
    Path((company, period)): Path<(String, String)>,
) -> Result<StatusCode, AppError>
where
    J: ReportJournal + 'static,
    S: RosterSource + 'static,
{
    let company = CompanyName::new(&company)?;
    let period: Period = period.parse()?;

    service.delete_report(&company, period)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn preview_handler<J, S>(
    State(service): State<Arc<ScorecardService<J, S>>>,
    Json(input): Json<ScoreInput>,
) -> Json<ScoreSummaryView>
where
    J: ReportJournal + 'static,
    S: RosterSource + 'static,
{
    Json(ScoreSummaryView::from(&service.preview(&input)))
}

pub(crate) async fn roster_handler<J, S>(
    State(service): State<Arc<ScorecardService<J, S>>>,
) -> Result<Json<Vec<RosterEntryView>>, AppError>
where
    J: ReportJournal + 'static,
    S: RosterSource + 'static,
{
    let roster = service.roster()?;
    let entries = roster
        .entries()
        .map(|(company, station_quota)| RosterEntryView {
            company: company.clone(),
            station_quota,
        })
        .collect();
    Ok(Json(entries))
}
