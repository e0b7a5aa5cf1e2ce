//! Report lookup.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use zanalytics_domain::ConfigParams;

use crate::error::RelayError;
use crate::state::AppState;

/// Body of `POST /report`.
///
/// Both fields are optional here so that a missing id is reported as a
/// 400 with a message instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    workspace_id: Option<Value>,
    view_id: Option<Value>,
}

/// Ids may arrive as strings or numbers.
pub(crate) fn id_of(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(id) if !id.trim().is_empty() => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Fetch the details of one view.
pub async fn fetch_report(
    State(state): State<AppState>,
    body: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<Json<Value>, RelayError> {
    let Json(request) = body?;
    let (Some(workspace_id), Some(view_id)) = (id_of(request.workspace_id), id_of(request.view_id))
    else {
        return Err(RelayError::BadRequest("workspaceId and viewId are required".to_string()));
    };

    tracing::debug!(workspace_id = %workspace_id, view_id = %view_id, "fetching report");
    let details = state.report_view(&workspace_id, &view_id).get_details(ConfigParams::new()).await?;
    Ok(Json(details))
}
