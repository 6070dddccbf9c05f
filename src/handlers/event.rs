use crate::entities::Event;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct EventQuery {
    #[serde(default)]
    pub ongoing: bool,
}

/// GET /api/events, `?ongoing=true` keeps events running right now.
pub async fn fetch_events(
    State(state): State<AppState>,
    Query(q): Query<EventQuery>,
) -> Result<Json<Vec<Event>>, AppError> {
    tracing::info!(ongoing = q.ongoing, "fetchEvents");
    let events = if q.ongoing {
        state.events.find_ongoing(Utc::now()).await?
    } else {
        state.events.find_all().await?
    };
    Ok(Json(events))
}
