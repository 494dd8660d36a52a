use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::{parse_range, ApiError};
use crate::{
    adapters::inbound::http::ApprovalStatusResponse,
    app_state::AppState,
    domain::models::{CustomerId, UserId},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/approval-statuses", get(list_approval_statuses))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalStatusQuery {
    user_id: i32,
    customer_id: String,
    from: String,
    to: String,
}

#[instrument(name = "list_approval_statuses", skip(app_state))]
pub async fn list_approval_statuses(
    State(app_state): State<AppState>,
    Query(query): Query<ApprovalStatusQuery>,
) -> Result<Json<Vec<ApprovalStatusResponse>>, ApiError> {
    let range = parse_range(&query.from, &query.to)?;

    let statuses = app_state
        .timesheet_service
        .get_approval_statuses(
            &UserId::new(query.user_id),
            &CustomerId::new(query.customer_id),
            range,
        )
        .await?;

    Ok(Json(statuses.into_iter().map(Into::into).collect()))
}
