//! Platform counters for the dashboards.

use axum::extract::State;
use axum::response::Json;
use catalog::CatalogStats;

use crate::services::content;
use crate::state::AppState;

/// `GET /api/stats`
pub async fn stats(State(state): State<AppState>) -> Json<CatalogStats> {
    Json(content::stats(&state).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_helpers;

    #[tokio::test]
    async fn stats_serialize_camel_case_counters() {
        let state = test_helpers::test_app_state();
        let Json(stats) = stats(State(state)).await;
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["users"], 1);
        assert_eq!(value["posts"], 3);
        assert_eq!(value["subjects"].as_array().map(Vec::len), Some(5));
    }
}
