//! Dashboard lookup.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use zanalytics_domain::ConfigParams;

use crate::error::RelayError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    dashboard_id: Option<String>,
}

/// Fetch dashboard details by id alone.
pub async fn fetch_dashboard(
    State(state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Json<Value>, RelayError> {
    let Query(query) = query?;
    let dashboard_id = query
        .dashboard_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| RelayError::BadRequest("dashboardId is required".to_string()))?;

    tracing::debug!(dashboard_id = %dashboard_id, "fetching dashboard");
    let details = state.client.get_view_details(&dashboard_id, ConfigParams::new()).await?;
    Ok(Json(details))
}
