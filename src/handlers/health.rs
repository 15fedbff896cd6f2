use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

const MAX_COLLECTIONS: u32 = 10;
const MAX_ERROR_CHARS: usize = 80;

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "CampusClean Tech API running" }))
}

// GET /test
#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Store connectivity report. Always answers 200; failures are rendered
/// into the body and logged.
pub async fn diagnostics(State(state): State<Arc<AppState>>) -> Json<DiagnosticReport> {
    let mut report = DiagnosticReport {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: set_or_not(state.config.database_url.is_some()),
        database_name: set_or_not(state.config.database_name.is_some()),
        connection_status: "Not Connected".to_string(),
        collections: vec![],
    };

    match state.store.ping().await {
        Ok(()) => {
            report.database = "✅ Connected & Working".to_string();
            report.connection_status = "Connected".to_string();

            match state.store.collection_names(MAX_COLLECTIONS).await {
                Ok(names) => report.collections = names,
                Err(e) => {
                    tracing::warn!(error = %e, "diagnostic: listing collections failed");
                    report.database = format!("⚠️ Connected but Error: {}", truncate(&e));
                }
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "diagnostic: store unreachable");
            report.database = format!("❌ Error: {}", truncate(&e));
        }
    }

    Json(report)
}

fn set_or_not(is_set: bool) -> String {
    let label = if is_set { "✅ Set" } else { "❌ Not Set" };
    label.to_string()
}

fn truncate(err: &anyhow::Error) -> String {
    format!("{err:#}").chars().take(MAX_ERROR_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_bounds_length() {
        let err = anyhow::anyhow!("{}", "x".repeat(200));
        assert_eq!(truncate(&err).chars().count(), 80);

        let short = anyhow::anyhow!("disk I/O error");
        assert_eq!(truncate(&short), "disk I/O error");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let err = anyhow::anyhow!("{}", "é".repeat(100));
        assert_eq!(truncate(&err), "é".repeat(80));
    }
}
