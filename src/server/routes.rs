//! API routes and handlers.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::DateTime;
use serde::Serialize;
use serde_json::{json, Value};
use solana_sdk::pubkey::Pubkey;
use tracing::{error, info};

use crate::cache::CachedClassification;
use crate::classifier::venues;
use crate::error::ClassifyError;
use crate::pipeline;
use crate::server::state::AppState;
use crate::types::ClassifyRequest;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/v1/solana/curve-exit",
            get(describe_endpoint).post(classify),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/v1/solana/curve-exit
///
/// Self-describing endpoint document, including supported venues and
/// live cache statistics.
async fn describe_endpoint(State(state): State<Arc<AppState>>) -> Json<Value> {
    let supported_venues: Vec<Value> = venues::venues()
        .iter()
        .map(|venue| {
            json!({
                "exit_type": venue.exit_type,
                "exit_venue": venue.exit_venue,
            })
        })
        .collect();

    Json(json!({
        "endpoint": "/api/v1/solana/curve-exit",
        "version": env!("CARGO_PKG_VERSION"),
        "method": "POST",
        "description": "Verify where a wallet sold a Pump.fun token with weighted attribution scoring. Returns a badge with token symbol and confidence level.",
        "pricing": "$0.01 per call",
        "pay_to_address": state.config.pay_to_address,
        "request_body": {
            "wallet": "string - Solana wallet address",
            "token": "string - token mint address",
        },
        "supported_venues": supported_venues,
        "cache_stats": state.cache.stats(),
    }))
}

/// POST /api/v1/solana/curve-exit
async fn classify(State(state): State<Arc<AppState>>, Json(payload): Json<Value>) -> Response {
    let Some(request) = extract_request(&payload) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Request body must be a JSON object with \"wallet\" and \"token\" fields",
        );
    };

    if !is_valid_address(&request.wallet) {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing or invalid \"wallet\" - must be a base58-encoded Solana address",
        );
    }
    if !is_valid_address(&request.token) {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing or invalid \"token\" - must be a base58-encoded token mint address",
        );
    }

    info!(wallet = %request.wallet, token = %request.token, "classification requested");

    let outcome = pipeline::classify_with_cache(
        &state.helius,
        &state.helius,
        &state.cache,
        &request.wallet,
        &request.token,
    )
    .await;

    match outcome {
        Ok(outcome) => success_response(state.as_ref(), &outcome.entry, outcome.cached),
        Err(err) => {
            error!(error = %err, "classification failed");
            error_response(status_for(&err), &err.to_string())
        }
    }
}

/// Tolerate the request shapes the original gateway forwards: a plain
/// object, an object nested under `body`, or a JSON string of either.
fn extract_request(payload: &Value) -> Option<ClassifyRequest> {
    let inner = payload.get("body").unwrap_or(payload);
    if let Some(text) = inner.as_str() {
        return serde_json::from_str(text).ok();
    }
    serde_json::from_value(inner.clone()).ok()
}

/// Base58 address validation; the `Pubkey` parse enforces both alphabet
/// and decoded length.
fn is_valid_address(address: &str) -> bool {
    Pubkey::from_str(address).is_ok()
}

fn status_for(err: &ClassifyError) -> StatusCode {
    match err {
        ClassifyError::NoSellFound { .. } => StatusCode::NOT_FOUND,
        ClassifyError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        ClassifyError::Upstream(_) => StatusCode::BAD_GATEWAY,
        ClassifyError::UnknownVenue { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn success_response(state: &AppState, entry: &CachedClassification, cached: bool) -> Response {
    let result = &entry.result;
    let sell_timestamp = DateTime::from_timestamp(result.sell_timestamp, 0)
        .map(|datetime| datetime.to_rfc3339())
        .unwrap_or_default();

    let body = json!({
        "status": "success",
        "cached": cached,
        "data": {
            "wallet": result.wallet,
            "token_symbol": result.token_symbol,
            "exit_type": result.exit_type,
            "exit_venue": result.exit_venue,
            "confidence": result.confidence,
            "description": result.description,
            "image_base64": entry.badge_base64,
            "pay_to_address": state.config.pay_to_address,
            "sell_signature": result.sell_signature,
            "sell_timestamp": sell_timestamp,
        },
    });

    (StatusCode::OK, Json(body)).into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = json!({ "status": "error", "error": message });
    (status, Json(body)).into_response()
}
