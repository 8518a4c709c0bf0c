use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::llm::catalog;
use crate::server::AppState;

#[derive(Serialize)]
pub struct ListModelsResponse {
    models: Vec<ModelSummary>,
}

#[derive(Serialize)]
pub struct ModelSummary {
    id: &'static str,
    name: &'static str,
    provider: &'static str,
    description: &'static str,
    capabilities: &'static [&'static str],
    /// Whether live replies are available; otherwise the fallback responder answers.
    configured: bool,
}

/// GET /api/v1/models
pub async fn list_models(State(state): State<AppState>) -> Json<ListModelsResponse> {
    let providers = state.gateway.providers();
    let models = catalog::all()
        .iter()
        .map(|m| ModelSummary {
            id: m.id,
            name: m.display_name,
            provider: m.provider,
            description: m.description,
            capabilities: m.capabilities,
            configured: providers.is_configured(m.id),
        })
        .collect();

    Json(ListModelsResponse { models })
}
