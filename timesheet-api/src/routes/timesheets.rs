use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::{parse_date, parse_range, ApiError};
use crate::{
    adapters::inbound::http::{
        ActivityStatusResponse, CommentResponse, TimesheetEntryResponse, TimesheetSaveResponse,
    },
    app_state::AppState,
    domain::models::{ActivityBatch, ActivityId, DateRange, Timesheet, TimesheetEntry, UserId},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/activities/:activity_id", put(save_activity_entries))
        .route("/activities/:activity_id/entries", get(get_activity_entries))
        .route("/activities/:activity_id/status", get(get_activity_status))
        .route("/week", put(save_week))
        .route("/comments", get(get_comment))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPayload {
    date: String,
    /// Null or zero clears the day.
    hours: Option<f64>,
    comment: Option<String>,
}

fn to_entries(
    activity_id: &ActivityId,
    payload: Vec<EntryPayload>,
) -> Result<Vec<TimesheetEntry>, ApiError> {
    payload
        .into_iter()
        .map(|entry| {
            let date = parse_date(&entry.date)?;
            let parsed = TimesheetEntry::new(activity_id.clone(), date, entry.hours);
            Ok(match entry.comment.filter(|c| !c.trim().is_empty()) {
                Some(comment) => parsed.with_comment(comment),
                None => parsed,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEntriesPayload {
    from: String,
    to: String,
    entries: Vec<EntryPayload>,
}

#[instrument(name = "save_activity_entries", skip(app_state, payload))]
pub async fn save_activity_entries(
    State(app_state): State<AppState>,
    Path(activity_id): Path<String>,
    Json(payload): Json<SaveEntriesPayload>,
) -> Result<Json<Vec<ActivityStatusResponse>>, ApiError> {
    let service = &app_state.timesheet_service;

    let range = parse_range(&payload.from, &payload.to)?;
    let activity = service.get_activity(&ActivityId::new(activity_id)).await?;
    let entries = to_entries(&activity.id, payload.entries)?;

    let statuses = service
        .validate_and_persist(&activity, entries, range)
        .await?;

    Ok(Json(statuses.into_iter().map(Into::into).collect()))
}

#[derive(Debug, Deserialize)]
pub struct DateFilterQuery {
    from: String,
    to: String,
}

#[instrument(name = "get_activity_entries", skip(app_state))]
pub async fn get_activity_entries(
    State(app_state): State<AppState>,
    Path(activity_id): Path<String>,
    Query(date_filter): Query<DateFilterQuery>,
) -> Result<Json<Vec<TimesheetEntryResponse>>, ApiError> {
    let range = parse_range(&date_filter.from, &date_filter.to)?;

    let entries = app_state
        .timesheet_service
        .get_entries(&ActivityId::new(activity_id), range)
        .await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

#[instrument(name = "get_activity_status", skip(app_state))]
pub async fn get_activity_status(
    State(app_state): State<AppState>,
    Path(activity_id): Path<String>,
) -> Result<Json<ActivityStatusResponse>, ApiError> {
    let service = &app_state.timesheet_service;
    let activity = service.get_activity(&ActivityId::new(activity_id)).await?;
    let status = service.get_activity_status(&activity).await?;

    Ok(Json(status.into()))
}

// ============================================================================
// Week save
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntriesPayload {
    activity_id: String,
    entries: Vec<EntryPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWeekPayload {
    user_id: i32,
    /// Any day of the week; the ISO week containing it is saved.
    week_start: String,
    comment: Option<String>,
    activities: Vec<ActivityEntriesPayload>,
}

#[instrument(name = "save_week", skip(app_state, payload), fields(user_id = payload.user_id))]
pub async fn save_week(
    State(app_state): State<AppState>,
    Json(payload): Json<SaveWeekPayload>,
) -> Result<Json<TimesheetSaveResponse>, ApiError> {
    let service = &app_state.timesheet_service;
    let week = DateRange::for_week(parse_date(&payload.week_start)?);

    let mut batches = Vec::with_capacity(payload.activities.len());
    for item in payload.activities {
        let activity = service.get_activity(&ActivityId::new(item.activity_id)).await?;
        let entries = to_entries(&activity.id, item.entries)?;
        batches.push(ActivityBatch { activity, entries });
    }

    let outcome = service
        .persist_timesheet_week(Timesheet {
            user_id: UserId::new(payload.user_id),
            week,
            batches,
            comment: payload.comment,
        })
        .await?;

    Ok(Json(outcome.into()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentQuery {
    user_id: i32,
    week_start: String,
}

#[instrument(name = "get_comment", skip(app_state))]
pub async fn get_comment(
    State(app_state): State<AppState>,
    Query(query): Query<CommentQuery>,
) -> Result<Json<Option<CommentResponse>>, ApiError> {
    let week = DateRange::for_week(parse_date(&query.week_start)?);

    let comment = app_state
        .timesheet_service
        .get_comment(&UserId::new(query.user_id), week.start())
        .await?;

    Ok(Json(comment.map(Into::into)))
}
