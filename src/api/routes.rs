use axum::{
    routing::{get, post},
    Router,
    extract::{Json, State},
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;

use crate::config::APP_VERSION;
use crate::error::{Result, AppError};
use crate::api::models::{HealthResponse, SummarizeRequest, SummarizeResponse};
use crate::api::ui;
use crate::model::{Method, SummarizationResult};
use crate::validation::validate;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::form_page).post(ui::submit_form))
        .route("/summarize", post(summarize_handler))
        .route("/health", get(health_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        env: state.config.env.clone(),
        version: APP_VERSION,
        model: state.summarizer.model_name().to_string(),
        device: state.config.device.clone(),
    })
}

async fn summarize_handler(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>> {
    let method = match req.method.as_deref() {
        Some(raw) => raw.parse::<Method>()?,
        None => Method::default(),
    };
    let limit = match method {
        Method::Extractive => req.max_sentences,
        Method::Abstractive => req.max_length,
    };

    let result = process_request(&state, &req.text, method, limit, req.reference.as_deref()).await?;

    Ok(Json(SummarizeResponse {
        summary: result.summary,
        method: result.method,
        cached: result.cached,
        scores: result.scores,
    }))
}

/// Validate and summarize under the configured request timeout.
///
/// Shared by the JSON API and the web form.
pub(crate) async fn process_request(
    state: &AppState,
    text: &str,
    method: Method,
    limit: Option<usize>,
    reference: Option<&str>,
) -> Result<SummarizationResult> {
    let timeout = state.config.request_timeout;

    let outcome = match validate(&state.config, text, method, limit) {
        Ok(request) => tokio::time::timeout(timeout, state.summarizer.summarize(&request, reference))
            .await
            .unwrap_or(Err(AppError::Timeout(timeout.as_secs()))),
        Err(err) => Err(err),
    };

    if let Err(err) = &outcome {
        if err.is_client_error() {
            tracing::warn!(%method, error = %err, "rejected summarization request");
        } else {
            tracing::error!(%method, error = %err, "summarization failed");
        }
    }
    outcome
}
