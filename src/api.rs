//! HTTP surface - thin axum layer in front of the pricing engine

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analyze;
use crate::config::PricingConfig;
use crate::error::AppError;
use crate::pricing::{ComparableSale, PricingSummary, SubjectProperty};

#[derive(Clone)]
pub struct AppState {
    pub pricing: PricingConfig,
}

#[derive(Serialize, Deserialize)]
pub struct ApiResponse {
    pub message: String,
    pub status: String,
}

/// Body of POST /api/pricing/analyze
/// Comparables arrive already fetched from the listings provider.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub subject: SubjectProperty,
    #[serde(default)]
    pub comparables: Vec<ComparableSale>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/api/health", get(health_check))
        .route("/api/pricing/analyze", post(analyze_pricing))
        .with_state(state)
}

async fn health_check() -> Json<ApiResponse> {
    Json(ApiResponse {
        message: "Pricing API is running!".to_string(),
        status: "ok".to_string(),
    })
}

async fn analyze_pricing(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<PricingSummary>, AppError> {
    request.subject.validate_attributes()?;
    let summary = analyze(&request.subject, &request.comparables, &state.pricing)?;

    info!(
        "Analyzed {}: {} of {} comps used, positioning {}",
        request.subject.address,
        summary.metrics.comp_count,
        request.comparables.len(),
        summary.positioning
    );

    Ok(Json(summary))
}
